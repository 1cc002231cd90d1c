//! Reporting of lines that could not be scanned.

use crate::scanner::ScanError;

/// Receives malformed-directive reports from the resolver.
///
/// A bad line never aborts a resolution. The resolver reports it here and moves
/// on to the next line.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per line that failed to scan.
    fn malformed_directive(&self, resource: &str, line_number: usize, line: &str, error: &ScanError);
}

/// Discards every report. This is the resolver's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn malformed_directive(&self, _: &str, _: usize, _: &str, _: &ScanError) {}
}

/// Forwards reports to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn malformed_directive(&self, resource: &str, line_number: usize, line: &str, error: &ScanError) {
        tracing::error!(
            resource,
            line = line_number,
            "Encountered an error when extracting dependencies from {resource}:{line_number}:\n{}\n\n{error}\n\
             This might indicate a syntax error in the file. Please investigate.",
            line.trim()
        );
    }
}
