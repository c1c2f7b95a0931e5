//! moodring - client for the Project Oxford emotion recognition API
//!
//! Submits an image to the hosted recognition service and returns the
//! per-face emotion scores as parsed JSON. The image can be a local file
//! (streamed as raw bytes) or a URL the service fetches itself, optionally
//! scoped to known face rectangles.
//!
//! One client holds one subscription key and the request defaults; every
//! call is a single independent POST with no retries, caching, or state.
//!
//! # Example
//!
//! ```rust,no_run
//! use moodring::{AnalyzeOptions, ClientError, EmotionClient, FaceRectangle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ClientError> {
//!     let client = EmotionClient::new("my-subscription-key");
//!
//!     // Analyze an image by URL, scoped to one known face.
//!     let scores = client
//!         .analyze_emotion(
//!             AnalyzeOptions::remote("https://example.com/face.jpg")
//!                 .with_face_rectangles(vec![FaceRectangle::new(68, 97, 64, 64)]),
//!         )
//!         .await?;
//!     println!("{scores}");
//!
//!     // Or upload a local file.
//!     let scores = client
//!         .analyze_emotion(AnalyzeOptions::local("face.jpg"))
//!         .await?;
//!     println!("{scores}");
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientOptions, EmotionClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use types::{AnalyzeOptions, FaceRectangle, ImageSource};
