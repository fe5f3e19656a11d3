pub mod input_validation;
pub mod password_evaluator;
pub mod trace;
pub mod username_recognizer;
