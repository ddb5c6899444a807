//! Swasthya Portal API server binary.

use std::sync::Arc;

use clap::Parser;
use swasthya_core::auth::service::{AuthService, SimulatedLatency};
use swasthya_core::auth::store::CredentialStore;
use swasthya_core::auth::token::TokenCodec;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "swasthya_server", about = "Swasthya Portal API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Skip pre-registering the demo accounts.
    #[arg(long, default_value_t = false)]
    no_seed: bool,

    /// Apply the demo per-operation latency to auth calls, for UX realism.
    #[arg(long, default_value_t = false)]
    demo_latency: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,swasthya_api=debug,swasthya_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let config = swasthya_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        auth_secret: swasthya_api::config::resolve_auth_secret(),
    };

    let mut service = AuthService::new(
        CredentialStore::new(),
        TokenCodec::new(config.auth_secret.as_bytes()),
    );
    if args.demo_latency {
        service = service.with_latency(SimulatedLatency::demo());
    }
    let service = Arc::new(service);

    if !args.no_seed {
        info!("seeding demo accounts");
        service.seed_demo_users().await;
    }

    let state = swasthya_api::AppState {
        auth: service.clone(),
        config: config.clone(),
    };
    let app = swasthya_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        users = service.user_count(),
        "Swasthya API listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
