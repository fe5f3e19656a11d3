//! Credential format validation: a password evaluator that reports every
//! unmet requirement, and a username recognizer driven by a small automaton.

pub mod config;
pub mod consts;
pub mod models;
pub mod utils;

pub use models::{CredentialError, PasswordFeatures, ValidationResult};
pub use utils::password_evaluator::{validate_password, PasswordValidator};
pub use utils::username_recognizer::{validate_username, UsernameValidator};
