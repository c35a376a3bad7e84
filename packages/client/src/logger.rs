//! Injected logging collaborator.
//!
//! Components that want to emit diagnostics take an `Arc<dyn Logger>`
//! instead of reaching for global state. Logging is fire-and-forget and never
//! influences control flow or error propagation.

/// A sink for structured trace and debug messages.
///
/// `component` names the emitting part of the pipeline (e.g. `"executor"`).
pub trait Logger: Send + Sync {
    fn trace(&self, component: &str, message: &str);
    fn debug(&self, component: &str, message: &str);
}

/// Discards everything. The default for a new executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn trace(&self, _component: &str, _message: &str) {}
    fn debug(&self, _component: &str, _message: &str) {}
}

/// Forwards to the `tracing` macros; install a subscriber to see output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn trace(&self, component: &str, message: &str) {
        tracing::trace!(component, "{message}");
    }

    fn debug(&self, component: &str, message: &str) {
        tracing::debug!(component, "{message}");
    }
}
