use thiserror::Error;

/// Failure of a single engine call.
///
/// `Rejected` carries the engine's own message verbatim — the request
/// boundary forwards it to the client unchanged, so nothing is prefixed
/// here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine answered and reported a failure.
    #[error("{0}")]
    Rejected(String),

    /// The call never completed (connection refused, reset, ...).
    #[error("engine transport error: {0}")]
    Transport(String),

    /// The engine answered with a body this contract cannot decode.
    #[error("malformed engine response: {0}")]
    Malformed(String),
}
