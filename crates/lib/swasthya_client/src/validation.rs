//! Client-side form validation.
//!
//! These schemas are stricter than the service's contract on purpose: forms
//! demand 8+ character passwords with mixed character classes, while the
//! service itself accepts 6+. The `validator` derive handles per-field rules;
//! cross-field checks are appended to the same issue list by hand.

use serde::Deserialize;
use swasthya_core::models::auth::{Language, Role};
use validator::Validate;

/// Characters that satisfy the "special character" class.
const SPECIAL_CHARS: &str = "@$!%*?&";

/// One field-level problem in a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIssue {
    pub field: String,
    pub message: String,
}

/// Sign-in form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), Vec<FormIssue>> {
        finish(field_issues(self))
    }
}

/// Patient registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 2, max = 50, message = "Full name must be 2-50 characters"))]
    pub full_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Please confirm your password"))]
    pub confirm_password: String,
    pub role: Role,
    pub agree_to_terms: bool,
    #[serde(default)]
    pub preferred_language: Option<Language>,
}

impl RegisterForm {
    pub fn check(&self) -> Result<(), Vec<FormIssue>> {
        let mut issues = field_issues(self);
        common_register_checks(
            &mut issues,
            &self.full_name,
            &self.password,
            &self.confirm_password,
            self.agree_to_terms,
        );
        finish(issues)
    }
}

/// Health-worker registration form — the patient form plus professional
/// credentials.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HealthWorkerRegisterForm {
    #[validate(length(min = 2, max = 50, message = "Full name must be 2-50 characters"))]
    pub full_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Please confirm your password"))]
    pub confirm_password: String,
    pub role: Role,
    pub agree_to_terms: bool,
    #[serde(default)]
    pub preferred_language: Option<Language>,
    #[validate(length(min = 5, message = "License number must be at least 5 characters"))]
    pub license_number: String,
    #[validate(length(min = 1, message = "Specialization is required"))]
    pub specialization: String,
    #[validate(length(min = 1, message = "Work location is required"))]
    pub work_location: String,
    /// Years of experience. Unsigned, so "cannot be negative" holds by type.
    #[validate(range(min = 0, max = 50, message = "Experience cannot exceed 50 years"))]
    pub experience: u32,
}

impl HealthWorkerRegisterForm {
    pub fn check(&self) -> Result<(), Vec<FormIssue>> {
        let mut issues = field_issues(self);
        common_register_checks(
            &mut issues,
            &self.full_name,
            &self.password,
            &self.confirm_password,
            self.agree_to_terms,
        );
        finish(issues)
    }
}

/// Flatten the derive's per-field errors into a plain issue list.
fn field_issues<T: Validate>(form: &T) -> Vec<FormIssue> {
    let mut issues = Vec::new();
    if let Err(errors) = form.validate() {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                issues.push(FormIssue {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                });
            }
        }
    }
    issues
}

fn finish(issues: Vec<FormIssue>) -> Result<(), Vec<FormIssue>> {
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// Cross-field rules shared by both registration forms.
fn common_register_checks(
    issues: &mut Vec<FormIssue>,
    full_name: &str,
    password: &str,
    confirm_password: &str,
    agree_to_terms: bool,
) {
    if !full_name.is_empty() && !is_letters_and_spaces(full_name) {
        push(issues, "full_name", "Full name can only contain letters and spaces");
    }
    if !is_complex_enough(password) {
        push(
            issues,
            "password",
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character",
        );
    }
    if password != confirm_password {
        push(issues, "confirm_password", "Passwords don't match");
    }
    if !agree_to_terms {
        push(issues, "agree_to_terms", "You must agree to the terms and conditions");
    }
}

fn push(issues: &mut Vec<FormIssue>, field: &str, message: &str) {
    issues.push(FormIssue {
        field: field.to_owned(),
        message: message.to_owned(),
    });
}

fn is_letters_and_spaces(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// One lowercase, one uppercase, one digit, and one of `@$!%*?&`.
fn is_complex_enough(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}
