//! Password evaluation: a single left to right scan that records which
//! requirements the input meets, without stopping at the first failure.

use crate::config::PasswordRules;
use crate::models::{
    CharClass, CredentialError, PasswordFeatures, Requirement, ValidationResult,
};
use crate::utils::trace::{NoTrace, ScanStep, ScanTrace};
use std::sync::LazyLock;
use strum::IntoEnumIterator;

static DEFAULT_EVALUATOR: LazyLock<PasswordValidator> = LazyLock::new(PasswordValidator::default);

pub const EMPTY_PASSWORD_MESSAGE: &str = "The password is empty";
const INVALID_CHARACTER_CLAUSE: &str = "Invalid character";
const FAILURE_SUFFIX: &str = "conditions were not satisfied";

/// Validates a password against the default rules
pub fn validate_password(candidate: &str) -> ValidationResult {
    DEFAULT_EVALUATOR.validate(candidate)
}

#[derive(Debug, Clone, Default)]
pub struct PasswordValidator {
    rules: PasswordRules,
}

impl PasswordValidator {
    pub fn new(rules: PasswordRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PasswordRules {
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
        let result = self.scan(candidate, trace);
        trace.finish(&result);
        result
    }

    fn classify(&self, c: char) -> Option<CharClass> {
        if c.is_ascii_uppercase() {
            Some(CharClass::UpperCase)
        } else if c.is_ascii_lowercase() {
            Some(CharClass::LowerCase)
        } else if c.is_ascii_digit() {
            Some(CharClass::Digit)
        } else if self.rules.is_special(c) {
            Some(CharClass::Special)
        } else {
            None
        }
    }

    fn scan(&self, candidate: &str, trace: &mut impl ScanTrace) -> ValidationResult {
        if candidate.is_empty() {
            return ValidationResult::rejected(
                EMPTY_PASSWORD_MESSAGE.to_owned(),
                None,
                vec![CredentialError::EmptyInput],
                Some(PasswordFeatures::default()),
            );
        }

        let mut features = PasswordFeatures::default();
        let mut invalid: Option<(usize, char)> = None;
        let mut length = 0;

        for (index, c) in candidate.chars().enumerate() {
            let class = self.classify(c);
            trace.step(ScanStep::Classified {
                index,
                found: c,
                class,
            });

            match class {
                Some(class) => features.record(class),
                None => {
                    invalid.get_or_insert((index, c));
                }
            }

            // The nth character (1-based) reaching the minimum satisfies the length rule
            if index + 1 >= self.rules.min_length {
                features.long_enough = true;
            }
            length = index + 1;
        }

        if features.all() && invalid.is_none() {
            return ValidationResult::accepted(Some(features));
        }

        let mut errors = Vec::new();
        let mut clauses = Vec::new();
        for requirement in Requirement::iter() {
            if features.is_satisfied(requirement) {
                continue;
            }
            clauses.push(requirement.to_string());
            errors.push(match requirement.char_class() {
                Some(class) => CredentialError::MissingCharacterClass(class),
                None => CredentialError::TooShort {
                    min: self.rules.min_length,
                },
            });
        }
        if let Some((index, found)) = invalid {
            clauses.push(INVALID_CHARACTER_CLAUSE.to_owned());
            errors.push(CredentialError::IllegalCharacter { index, found });
        }

        let message = format!("{}; {}", clauses.join("; "), FAILURE_SUFFIX);
        let error_index = invalid.map(|(index, _)| index).unwrap_or(length);

        ValidationResult::rejected(message, Some(error_index), errors, Some(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::trace::RecordTrace;

    fn features(result: &ValidationResult) -> PasswordFeatures {
        result.features.expect("password results always carry features")
    }

    #[test]
    fn test_valid_passwords() {
        let valid_cases = vec![
            "Aa!12345",
            "StrongP@ssw0rd!",
            "Tr0ub4dour&3!",
            "~`!@#$%^&*()_-+{}[]|:,.?/aA1",
            "zZ9/zZ9/",
        ];

        for password in valid_cases {
            let result = validate_password(password);
            assert!(result.ok, "Valid password {} was rejected: {}", password, result.message);
            assert_eq!(result.message, "");
            assert_eq!(result.error_index, None);
            assert!(result.errors.is_empty());
            assert!(features(&result).all());
        }
    }

    #[test]
    fn test_invalid_passwords() {
        let invalid_cases = vec![
            "",
            "Ab12!",     // Too short
            "ABCdefgh",  // Missing digit and special
            "Abc12345",  // Missing special character
            "Ab=12!45",  // '=' is not in the special set
            "Aa!1 2345", // Space is not accepted
            "Aa!1234é",  // Non ASCII letter
        ];

        for password in invalid_cases {
            let result = validate_password(password);
            assert!(!result.ok, "Invalid password {} was accepted !", password);
            assert!(!result.message.is_empty());
        }
    }

    #[test]
    fn test_every_special_character_counts() {
        for special in PasswordRules::default().special_chars.chars() {
            for filler in 4..12 {
                let password = format!("A{special}1{}", "b".repeat(filler));
                let result = validate_password(&password);
                assert_eq!(
                    result.ok,
                    password.len() >= 8,
                    "Password {} gave: {}",
                    password,
                    result.message
                );
            }
        }
    }

    #[test]
    fn test_empty_password() {
        let result = validate_password("");
        assert!(!result.ok);
        assert!(result.message.contains("empty"));
        assert_eq!(result.error_index, None);
        assert_eq!(result.errors, vec![CredentialError::EmptyInput]);
        assert_eq!(features(&result), PasswordFeatures::default());
    }

    #[test]
    fn test_short_passwords_never_pass() {
        let base = "Aa!1Aa!1";
        for length in 1..base.len() {
            let password = &base[..length];
            let result = validate_password(password);
            assert!(!result.ok, "Password {} shorter than 8 was accepted", password);
            assert!(!features(&result).long_enough);
            assert!(result.errors.contains(&CredentialError::TooShort { min: 8 }));
        }
    }

    #[test]
    fn test_length_boundary() {
        let mut trace = RecordTrace::default();
        let result = PasswordValidator::default().validate_with_trace("abcdefgh", &mut trace);
        assert!(features(&result).long_enough);
        assert_eq!(trace.steps.len(), 8);
        assert!(!features(&validate_password("abcdefg")).long_enough);
    }

    #[test]
    fn test_lowercase_only() {
        let result = validate_password("aaaaaaaa");
        let flags = features(&result);
        assert!(!result.ok);
        assert!(!flags.upper_case);
        assert!(flags.lower_case);
        assert!(!flags.digit);
        assert!(!flags.special);
        assert!(flags.long_enough);
        assert_eq!(
            result.errors,
            vec![
                CredentialError::MissingCharacterClass(CharClass::UpperCase),
                CredentialError::MissingCharacterClass(CharClass::Digit),
                CredentialError::MissingCharacterClass(CharClass::Special),
            ]
        );
        assert_eq!(
            result.message,
            "Upper case; Numeric digits; Special character; conditions were not satisfied"
        );
        assert_eq!(result.error_index, Some(8));
    }

    #[test]
    fn test_invalid_character_keeps_scanning() {
        // Every class appears after the invalid character
        let result = validate_password("=Aa!12345");
        let flags = features(&result);
        assert!(!result.ok);
        assert!(flags.all());
        assert_eq!(result.error_index, Some(0));
        assert_eq!(
            result.errors,
            vec![CredentialError::IllegalCharacter { index: 0, found: '=' }]
        );
        assert_eq!(result.message, "Invalid character; conditions were not satisfied");
    }

    #[test]
    fn test_message_clause_order() {
        let result = validate_password("a b");
        assert_eq!(
            result.message,
            "Upper case; Numeric digits; Special character; Long enough; Invalid character; conditions were not satisfied"
        );
        assert_eq!(result.error_index, Some(1));
    }

    #[test]
    fn test_first_invalid_character_is_reported() {
        let result = validate_password("Aa1!= =xx");
        assert_eq!(result.error_index, Some(4));
        assert!(result
            .errors
            .contains(&CredentialError::IllegalCharacter { index: 4, found: '=' }));
    }

    #[test]
    fn test_indices_count_characters() {
        let result = validate_password("Aa1!éééé");
        assert_eq!(result.error_index, Some(4));
        assert!(features(&result).long_enough);
    }

    #[test]
    fn test_idempotence() {
        for password in ["", "Aa!12345", "aaaaaaaa", "=Aa!12345", "a b"] {
            assert_eq!(validate_password(password), validate_password(password));
        }
    }

    #[test]
    fn test_custom_rules() {
        let validator = PasswordValidator::new(PasswordRules {
            min_length: 4,
            special_chars: "=".to_owned(),
        });
        assert!(validator.validate("Ab1=").ok);
        assert!(!validator.validate("Ab1!").ok);
        assert_eq!(validator.rules().min_length, 4);
    }

    #[test]
    fn test_trace_records_classes() {
        let mut trace = RecordTrace::default();
        PasswordValidator::default().validate_with_trace("A=", &mut trace);
        assert!(trace.finished);
        assert_eq!(
            trace.steps,
            vec![
                ScanStep::Classified {
                    index: 0,
                    found: 'A',
                    class: Some(CharClass::UpperCase)
                },
                ScanStep::Classified {
                    index: 1,
                    found: '=',
                    class: None
                },
            ]
        );
    }
}
