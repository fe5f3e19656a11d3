//! Optional observation of a scan, one callback per inspected character.
//!
//! The scanners never depend on the observer for control flow: passing
//! [`NoTrace`] or any other implementation yields the same verdict.

use crate::models::{CharClass, UsernameState, ValidationResult};
use log::debug;

/// What happened to a single character during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Password scanner classified the character (`None` for an invalid one)
    Classified {
        index: usize,
        found: char,
        class: Option<CharClass>,
    },
    /// Username recognizer consumed the character and moved between states
    Transition {
        index: usize,
        found: char,
        from: UsernameState,
        to: UsernameState,
        size: usize,
    },
    /// Username recognizer stopped without consuming the character
    Halted {
        index: usize,
        found: char,
        state: UsernameState,
        size: usize,
    },
}

pub trait ScanTrace {
    fn step(&mut self, step: ScanStep);

    fn finish(&mut self, _result: &ValidationResult) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl ScanTrace for NoTrace {
    fn step(&mut self, _step: ScanStep) {}
}

/// Forwards scan events to the `log` facade at debug level.
///
/// Password characters are never written out, only their class.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl ScanTrace for LogTrace {
    fn step(&mut self, step: ScanStep) {
        match step {
            ScanStep::Classified { index, class, .. } => match class {
                Some(class) => debug!("[{index}] {class} found"),
                None => debug!("[{index}] invalid character found"),
            },
            ScanStep::Transition {
                index,
                found,
                from,
                to,
                size,
            } => debug!("[{index}] {from} --{found:?}--> {to} (size {size})"),
            ScanStep::Halted {
                index,
                found,
                state,
                size,
            } => debug!("[{index}] halted in {state} on {found:?} (size {size})"),
        }
    }

    fn finish(&mut self, result: &ValidationResult) {
        debug!(
            "scan ended: ok={} error_index={:?}",
            result.ok, result.error_index
        );
    }
}

/// Keeps every event, mostly useful for tests and replaying a scan
#[derive(Debug, Default, Clone)]
pub struct RecordTrace {
    pub steps: Vec<ScanStep>,
    pub finished: bool,
}

impl ScanTrace for RecordTrace {
    fn step(&mut self, step: ScanStep) {
        self.steps.push(step);
    }

    fn finish(&mut self, _result: &ValidationResult) {
        self.finished = true;
    }
}
