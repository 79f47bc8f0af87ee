//! Domain error type shared across the core crate.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected before it reaches the network layer.  Carries the
    /// human-readable rule message shown next to the offending field.
    #[error("Validation failed: {0}")]
    Validation(String),
}
