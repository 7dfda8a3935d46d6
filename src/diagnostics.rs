use std::cell::RefCell;

/// Receives non-fatal diagnostics. `warn` emits `message` only when
/// `condition` is false and must never panic.
pub trait Diagnostics {
    fn warn(&self, condition: bool, message: &str);
}

/// Reports diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, condition: bool, message: &str) {
        if !condition {
            tracing::warn!("{message}");
        }
    }
}

/// Keeps every call, for tests and tooling that inspect diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticsLog {
    calls: RefCell<Vec<(bool, String)>>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(condition, message)` pair received so far.
    pub fn calls(&self) -> Vec<(bool, String)> {
        self.calls.borrow().clone()
    }

    /// Messages of calls whose condition was false.
    pub fn warnings(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(condition, _)| !condition)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Diagnostics for DiagnosticsLog {
    fn warn(&self, condition: bool, message: &str) {
        self.calls.borrow_mut().push((condition, message.to_string()));
    }
}
