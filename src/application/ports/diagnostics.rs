//! Diagnostic channel port

/// Developer-facing log sink, separate from the user-visible status log
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}
