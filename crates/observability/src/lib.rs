//! Tracing/logging setup shared by binaries.

/// Initialize process-wide logging (human-readable).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Format::Pretty);
}

/// Initialize process-wide logging as JSON lines.
pub fn init_json() {
    tracing::init(tracing::Format::Json);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
