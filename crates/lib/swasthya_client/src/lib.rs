//! # swasthya_client
//!
//! Consumer-side session handling for the Swasthya Portal: durable token
//! storage, the ambient "current user" state, and the client-side form
//! validation schemas.

pub mod session;
pub mod token_store;
pub mod validation;

pub use session::{ClientError, SessionClient};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
