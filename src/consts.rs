//! Default values for the credential rules and the testbed.

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Punctuation accepted in a password, and required at least once.
pub const PASSWORD_SPECIAL_CHARS: &str = "~`!@#$%^&*()_-+{}[]|:,.?/";

pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MAX_USERNAME_LENGTH: usize = 16;
/// Characters allowed between two alphanumeric runs of a username.
pub const USERNAME_SEPARATORS: &str = "._-";

pub const CONFIG_FILE: &str = "credscan.json"; // Overridden by CONFIG_ENV_VAR
pub const CONFIG_ENV_VAR: &str = "CREDSCAN_CONFIG";
pub const LOG_FILE: &str = "./credscan.log";
