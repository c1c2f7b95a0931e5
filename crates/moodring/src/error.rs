use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`EmotionClient`](crate::EmotionClient).
///
/// Nothing is retried or recovered internally; every failure reaches the
/// caller through the returned `Result`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, DNS, body decode). The
    /// underlying reqwest error is propagated as-is, not inspected or
    /// transformed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status other than 200. The body is
    /// the error payload exactly as the service sent it.
    #[error("emotion API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The local image could not be opened for upload. No request was
    /// issued.
    #[error("failed to open image {}: {source}", path.display())]
    ImageOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Neither a local path nor a remote URL was supplied.
    #[error("no image source provided: supply a local path or a remote URL")]
    MissingImageSource,
}
