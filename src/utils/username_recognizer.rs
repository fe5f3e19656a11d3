//! Username recognition with a three state automaton.
//!
//! ```text
//!   Start --letter--> Body --letter|digit--> Body
//!                     Body --separator-----> AfterSeparator
//!   AfterSeparator --letter|digit--> Body
//! ```
//!
//! `Body` is the only accepting state. Every character is inspected once and
//! the scan stops at the first character with no transition, or as soon as
//! more than the maximum number of characters has been consumed.

use crate::config::UsernameRules;
use crate::models::{CredentialError, UsernameState, ValidationResult};
use crate::utils::trace::{NoTrace, ScanStep, ScanTrace};
use std::sync::LazyLock;

static DEFAULT_RECOGNIZER: LazyLock<UsernameValidator> = LazyLock::new(UsernameValidator::default);

pub const EMPTY_USERNAME_MESSAGE: &str = "The input is empty";
const BAD_START_MESSAGE: &str = "A username must start with a letter (A-Z or a-z)";
const BAD_CHARACTER_MESSAGE: &str =
    "A username may only contain letters, digits, '.', '_', or '-'";
const BAD_AFTER_SEPARATOR_MESSAGE: &str =
    "A username character after '.', '_', or '-' must be a letter or digit";

/// Validates a username against the default rules
pub fn validate_username(candidate: &str) -> ValidationResult {
    DEFAULT_RECOGNIZER.validate(candidate)
}

#[derive(Debug, Clone, Default)]
pub struct UsernameValidator {
    rules: UsernameRules,
}

/// Where the automaton stopped
struct Halt {
    state: UsernameState,
    index: usize,
    size: usize,
    found: Option<char>,
}

impl UsernameValidator {
    pub fn new(rules: UsernameRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &UsernameRules {
        &self.rules
    }

    pub fn validate(&self, candidate: &str) -> ValidationResult {
        self.validate_with_trace(candidate, &mut NoTrace)
    }

    pub fn validate_with_trace(
        &self,
        candidate: &str,
        trace: &mut impl ScanTrace,
    ) -> ValidationResult {
        let result = if candidate.is_empty() {
            ValidationResult::rejected(
                EMPTY_USERNAME_MESSAGE.to_owned(),
                Some(0),
                vec![CredentialError::EmptyInput],
                None,
            )
        } else {
            let halt = self.run(candidate, trace);
            self.verdict(halt)
        };
        trace.finish(&result);
        result
    }

    fn transition(&self, state: UsernameState, c: char) -> Option<UsernameState> {
        match state {
            UsernameState::Start if c.is_ascii_alphabetic() => Some(UsernameState::Body),
            UsernameState::Start => None,
            UsernameState::Body if c.is_ascii_alphanumeric() => Some(UsernameState::Body),
            UsernameState::Body if self.rules.is_separator(c) => {
                Some(UsernameState::AfterSeparator)
            }
            UsernameState::Body => None,
            UsernameState::AfterSeparator if c.is_ascii_alphanumeric() => {
                Some(UsernameState::Body)
            }
            UsernameState::AfterSeparator => None,
        }
    }

    fn run(&self, candidate: &str, trace: &mut impl ScanTrace) -> Halt {
        let mut state = UsernameState::Start;
        let mut size = 0;

        for (index, c) in candidate.chars().enumerate() {
            let Some(next) = self.transition(state, c) else {
                trace.step(ScanStep::Halted {
                    index,
                    found: c,
                    state,
                    size,
                });
                return Halt {
                    state,
                    index,
                    size,
                    found: Some(c),
                };
            };

            size += 1;
            if size > self.rules.max_length {
                trace.step(ScanStep::Halted {
                    index,
                    found: c,
                    state,
                    size,
                });
                return Halt {
                    state,
                    index,
                    size,
                    found: Some(c),
                };
            }

            trace.step(ScanStep::Transition {
                index,
                found: c,
                from: state,
                to: next,
                size,
            });
            state = next;
        }

        Halt {
            state,
            index: size,
            size,
            found: None,
        }
    }

    fn verdict(&self, halt: Halt) -> ValidationResult {
        let Halt {
            state,
            index,
            size,
            found,
        } = halt;

        if size > self.rules.max_length {
            let max = self.rules.max_length;
            return ValidationResult::rejected(
                format!("A username must have no more than {max} characters"),
                None,
                vec![CredentialError::TooLong { max }],
                None,
            );
        }

        match state {
            UsernameState::Start => ValidationResult::rejected(
                BAD_START_MESSAGE.to_owned(),
                Some(0),
                vec![CredentialError::IllegalStateTransition {
                    state,
                    index,
                    found,
                }],
                None,
            ),

            UsernameState::Body if size < self.rules.min_length => {
                let min = self.rules.min_length;
                ValidationResult::rejected(
                    format!("A username must have at least {min} characters"),
                    None,
                    vec![CredentialError::TooShort { min }],
                    None,
                )
            }

            UsernameState::Body => match found {
                Some(found) => ValidationResult::rejected(
                    BAD_CHARACTER_MESSAGE.to_owned(),
                    Some(index),
                    vec![CredentialError::IllegalCharacter { index, found }],
                    None,
                ),
                None => ValidationResult::accepted(None),
            },

            UsernameState::AfterSeparator => ValidationResult::rejected(
                BAD_AFTER_SEPARATOR_MESSAGE.to_owned(),
                Some(index),
                vec![CredentialError::IllegalStateTransition {
                    state,
                    index,
                    found,
                }],
                None,
            ),
        }
    }
}
