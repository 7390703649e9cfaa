//! Error type shared by the evolution engine.

/// Errors produced by the evolution engine.
///
/// The engine performs no I/O, so every variant describes a caller mistake
/// (bad configuration or mismatched lengths). Degenerate but reachable
/// states, such as a population where every individual scores zero, are
/// handled inside the engine and never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolutionError {
    /// Two sequences that must line up position-by-position differ in length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A configuration parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolutionError>;
