//! Data model shared by both credential scanners

use derive_more::Display;
use serde::Serialize;
use strum_macros::EnumIter;
use thiserror::Error;

/// A character class a password must contain at least once
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum CharClass {
    #[display("upper case letter")]
    UpperCase,
    #[display("lower case letter")]
    LowerCase,
    #[display("numeric digit")]
    Digit,
    #[display("special character")]
    Special,
}

/// One line of the password requirement checklist.
///
/// The iteration order is the order in which unmet requirements are
/// listed in a failure message.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Requirement {
    #[display("Upper case")]
    UpperCase,
    #[display("Lower case")]
    LowerCase,
    #[display("Numeric digits")]
    Digit,
    #[display("Special character")]
    Special,
    #[display("Long enough")]
    Length,
}

impl Requirement {
    /// The character class behind this requirement, if it is one
    pub fn char_class(self) -> Option<CharClass> {
        match self {
            Requirement::UpperCase => Some(CharClass::UpperCase),
            Requirement::LowerCase => Some(CharClass::LowerCase),
            Requirement::Digit => Some(CharClass::Digit),
            Requirement::Special => Some(CharClass::Special),
            Requirement::Length => None,
        }
    }
}

/// The states of the username recognizer
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum UsernameState {
    /// Nothing consumed yet, expects a letter
    Start,
    /// Accepting state, inside the body of the name
    Body,
    /// Just consumed a separator, expects a letter or digit
    AfterSeparator,
}

/// Why a credential was rejected
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("the input is empty")]
    EmptyInput,

    #[error("missing {0}")]
    MissingCharacterClass(CharClass),

    #[error("shorter than {min} characters")]
    TooShort { min: usize },

    #[error("longer than {max} characters")]
    TooLong { max: usize },

    #[error("invalid character {found:?} at index {index}")]
    IllegalCharacter { index: usize, found: char },

    #[error("unexpected {} at index {index} in state {state}", describe_found(.found))]
    IllegalStateTransition {
        state: UsernameState,
        index: usize,
        found: Option<char>,
    },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_owned(),
    }
}

/// Which password requirements were met by a full scan of the input
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PasswordFeatures {
    pub upper_case: bool,
    pub lower_case: bool,
    pub digit: bool,
    pub special: bool,
    pub long_enough: bool,
}

impl PasswordFeatures {
    pub fn is_satisfied(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::UpperCase => self.upper_case,
            Requirement::LowerCase => self.lower_case,
            Requirement::Digit => self.digit,
            Requirement::Special => self.special,
            Requirement::Length => self.long_enough,
        }
    }

    pub fn all(&self) -> bool {
        self.upper_case && self.lower_case && self.digit && self.special && self.long_enough
    }

    pub(crate) fn record(&mut self, class: CharClass) {
        match class {
            CharClass::UpperCase => self.upper_case = true,
            CharClass::LowerCase => self.lower_case = true,
            CharClass::Digit => self.digit = true,
            CharClass::Special => self.special = true,
        }
    }
}

/// The outcome of one validation pass.
///
/// `ok` is true exactly when `message` is empty and `errors` is empty.
/// `features` is only filled in by the password scanner.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub message: String,
    pub error_index: Option<usize>,
    pub errors: Vec<CredentialError>,
    pub features: Option<PasswordFeatures>,
}

impl ValidationResult {
    pub(crate) fn accepted(features: Option<PasswordFeatures>) -> Self {
        Self {
            ok: true,
            message: String::new(),
            error_index: None,
            errors: Vec::new(),
            features,
        }
    }

    pub(crate) fn rejected(
        message: String,
        error_index: Option<usize>,
        errors: Vec<CredentialError>,
        features: Option<PasswordFeatures>,
    ) -> Self {
        Self {
            ok: false,
            message,
            error_index,
            errors,
            features,
        }
    }

    /// Converts the verdict into a `Result`, keeping the first reported error
    pub fn into_result(self) -> Result<(), CredentialError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
