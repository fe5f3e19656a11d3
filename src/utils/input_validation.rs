use derive_more::derive::Display;
use inquire::{InquireError, Password as PasswordPrompt, PasswordDisplayMode, Text};
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::models::{Requirement, ValidationResult};
use crate::utils::password_evaluator::{validate_password, PasswordValidator};
use crate::utils::username_recognizer::{validate_username, UsernameValidator};

/// A credential that did not pass its validator. Displays the verdict message.
#[derive(Debug, Clone, Error)]
#[error("{}", .0.message)]
pub struct InvalidCredential(pub ValidationResult);

/// Wrapper type for a username that has been validated
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Username(String);

impl Username {
    pub fn parse_with(
        validator: &UsernameValidator,
        username: &str,
    ) -> Result<Self, InvalidCredential> {
        gate(validator.validate(username))?;
        Ok(Self(username.to_owned()))
    }
}

impl TryFrom<String> for Username {
    type Error = InvalidCredential;

    fn try_from(username: String) -> Result<Self, Self::Error> {
        gate(validate_username(&username))?;
        Ok(Self(username))
    }
}

impl TryFrom<&str> for Username {
    type Error = InvalidCredential;

    fn try_from(username: &str) -> Result<Self, Self::Error> {
        gate(validate_username(username))?;
        Ok(Self(username.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrapper type for a password that meets every requirement.
/// The content never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse_with(
        validator: &PasswordValidator,
        password: &str,
    ) -> Result<Self, InvalidCredential> {
        gate(validator.validate(password))?;
        Ok(Self(password.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl TryFrom<String> for Password {
    type Error = InvalidCredential;

    fn try_from(password: String) -> Result<Self, Self::Error> {
        gate(validate_password(&password))?;
        Ok(Self(password))
    }
}

impl TryFrom<&str> for Password {
    type Error = InvalidCredential;

    fn try_from(password: &str) -> Result<Self, Self::Error> {
        gate(validate_password(password))?;
        Ok(Self(password.to_owned()))
    }
}

fn gate(result: ValidationResult) -> Result<(), InvalidCredential> {
    if result.ok {
        Ok(())
    } else {
        Err(InvalidCredential(result))
    }
}

/// Two lines: the input, then a caret under the character at `index`.
///
/// Padding counts characters, so the caret drifts to the left of its target
/// when double-width characters (CJK, most emoji) come before `index`.
pub fn point_at(input: &str, index: usize) -> String {
    let padding = " ".repeat(index);
    format!("{input}\n{padding}^")
}

/// The requirement checklist for a password verdict, one line per requirement
pub fn checklist(result: &ValidationResult) -> Vec<String> {
    let features = result.features.unwrap_or_default();
    Requirement::iter()
        .map(|requirement| {
            let mark = if features.is_satisfied(requirement) { 'x' } else { ' ' };
            format!("[{mark}] {requirement}")
        })
        .collect()
}

/// Prints a rejected verdict, pointing at the offending character if there is one
pub fn report(input: &str, result: &ValidationResult) {
    if result.ok {
        return;
    }
    println!("{}", result.message);
    if let Some(index) = result.error_index {
        println!("{}", point_at(input, index));
    }
}

/// Interactively prompts for a username until one is accepted
pub fn username_input_validation(
    message: &str,
    validator: &UsernameValidator,
) -> Result<Username, InquireError> {
    loop {
        let username = Text::new(message).prompt()?;
        match Username::parse_with(validator, &username) {
            Ok(username) => return Ok(username),
            Err(InvalidCredential(result)) => report(&username, &result),
        }
    }
}

/// Interactively prompts for a password until one is accepted,
/// showing the checklist after every rejected attempt
pub fn password_input_validation(
    message: &str,
    validator: &PasswordValidator,
) -> Result<Password, InquireError> {
    loop {
        let password = PasswordPrompt::new(message)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;

        match Password::parse_with(validator, &password) {
            Ok(password) => return Ok(password),
            Err(InvalidCredential(result)) => {
                println!("{}", result.message);
                for line in checklist(&result) {
                    println!("  {line}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod username_wrapper_tests {
        use super::*;

        #[test]
        fn test_valid_username() {
            let valid_cases = vec!["alice123", "Bob_user", "developer123", "john_doe_42"];

            for username in valid_cases {
                assert!(
                    Username::try_from(username).is_ok(),
                    "Valid username {} was rejected !",
                    username
                );
            }
        }

        #[test]
        fn test_invalid_username() {
            let invalid_cases = vec![
                "a",
                "123starts_with_numbers",
                "_starts_with_underscore",
                "very_very_long_username_that_exceeds_limit",
                "special@character",
                "has space",
            ];

            for username in invalid_cases {
                assert!(
                    Username::try_from(username).is_err(),
                    "Invalid username {} was approved !",
                    username
                );
            }
        }

        #[test]
        fn test_username_from_string() {
            assert!(Username::try_from("valid".to_string()).is_ok());
            assert!(Username::try_from("1234".to_string()).is_err());
        }

        #[test]
        fn test_username_display_and_as_ref() {
            let username = Username::try_from("test_user").unwrap();
            assert_eq!(username.to_string(), "test_user");
            assert_eq!(username.as_ref(), "test_user");
        }

        #[test]
        fn test_rejection_carries_verdict() {
            let error = Username::try_from("ab..cd").unwrap_err();
            assert_eq!(error.0.error_index, Some(3));
            assert_eq!(error.to_string(), error.0.message);
        }
    }

    mod password_wrapper_tests {
        use super::*;

        #[test]
        fn test_password_gate() {
            assert!(Password::try_from("Aa!12345").is_ok());
            assert!(Password::try_from("Aa!12345".to_string()).is_ok());
            assert!(Password::try_from("aaaaaaaa").is_err());
            assert!(Password::try_from("").is_err());
        }

        #[test]
        fn test_password_is_redacted() {
            let password = Password::try_from("Aa!12345").unwrap();
            assert_eq!(format!("{:?}", password), "Password(***)");
            assert_eq!(password.expose(), "Aa!12345");
        }
    }

    #[test]
    fn test_point_at() {
        assert_eq!(point_at("ab..cd", 3), "ab..cd\n   ^");
        assert_eq!(point_at("1abc", 0), "1abc\n^");
        // One space per preceding character, whatever its display width
        assert_eq!(point_at("日本x", 2), "日本x\n  ^");
    }

    #[test]
    fn test_checklist() {
        let lines = checklist(&validate_password("aaaaaaaa"));
        assert_eq!(
            lines,
            vec![
                "[ ] Upper case",
                "[x] Lower case",
                "[ ] Numeric digits",
                "[ ] Special character",
                "[x] Long enough",
            ]
        );

        let lines = checklist(&validate_password(""));
        assert!(lines.iter().all(|line| line.starts_with("[ ]")));
    }
}
