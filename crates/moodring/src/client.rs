//! The emotion recognition client.
//!
//! One struct, one operation: POST an image to the service's `/recognize`
//! endpoint and hand back the parsed JSON result. Each call is an
//! independent request sharing nothing but the connection pool, so a
//! single client can serve any number of concurrent calls.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Body, Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::error::ClientError;
use crate::types::{face_rectangles_param, AnalyzeOptions, ImageSource};

/// Default endpoint of the hosted emotion recognition service.
pub const DEFAULT_BASE_URL: &str = "https://api.projectoxford.ai/emotion/v1.0";

const RECOGNIZE_PATH: &str = "/recognize";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Options for configuring the emotion client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the recognition service. Trailing slashes are
    /// stripped at construction.
    pub base_url: String,
    /// User-agent header sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds. `None` leaves whatever the
    /// network stack defaults to.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("moodring/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

/// Client for the remote emotion recognition API.
///
/// Holds the subscription key and request defaults for its lifetime;
/// nothing is mutable after construction and no I/O happens until
/// [`analyze_emotion`](EmotionClient::analyze_emotion) is called.
pub struct EmotionClient {
    key: String,
    options: ClientOptions,
    client: Client,
}

impl EmotionClient {
    /// Create a client with the default service endpoint.
    ///
    /// The key is the opaque subscription credential issued by the
    /// service; it is sent with every request and never logged.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_options(key, ClientOptions::default())
    }

    /// Create a client with custom options.
    pub fn with_options(key: impl Into<String>, mut options: ClientOptions) -> Self {
        options.base_url = options.base_url.trim_end_matches('/').to_string();
        Self {
            key: key.into(),
            options,
            client: Client::new(),
        }
    }

    /// Get the base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.options.base_url
    }

    /// Analyze the emotions of one or more faces in an image.
    ///
    /// Issues exactly one POST to `/recognize`. A local source is opened
    /// and streamed as `application/octet-stream` for the duration of the
    /// upload; a remote source is sent as a `{"url": ...}` JSON body.
    /// Face rectangles, when present, ride along as a query parameter in
    /// input order.
    ///
    /// A 200 response resolves with the body parsed as JSON, forwarded
    /// without shape validation. Any other status is
    /// [`ClientError::Api`] carrying the raw response body; failures
    /// below HTTP are [`ClientError::Transport`] with the underlying
    /// error untouched.
    #[tracing::instrument(
        skip(self, options),
        fields(
            image = %options.source,
            rectangles = options.face_rectangles.len(),
        )
    )]
    pub async fn analyze_emotion(&self, options: AnalyzeOptions) -> Result<Value, ClientError> {
        let AnalyzeOptions {
            source,
            face_rectangles,
        } = options;

        let mut request = match source {
            ImageSource::Local(path) => self.local_image_request(path).await?,
            ImageSource::Remote(url) => self.remote_image_request(&url),
        };

        if let Some(param) = face_rectangles_param(&face_rectangles) {
            request = request.query(&[("faceRectangles", param.as_str())]);
        }

        self.send(request).await
    }

    /// Request skeleton shared by both branches: endpoint, credentials,
    /// user-agent, optional timeout.
    fn recognize_request(&self) -> RequestBuilder {
        let url = format!("{}{}", self.options.base_url, RECOGNIZE_PATH);
        let mut request = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .header(USER_AGENT, &self.options.user_agent);

        if let Some(secs) = self.options.timeout_secs {
            request = request.timeout(Duration::from_secs(secs));
        }

        request
    }

    /// Open a local image and pipe it as the raw request body.
    ///
    /// The file handle lives inside the body stream and is released when
    /// the upload completes or errors. Existence and format are not
    /// checked beforehand; the open itself reports failure.
    async fn local_image_request(
        &self,
        path: std::path::PathBuf,
    ) -> Result<RequestBuilder, ClientError> {
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|source| ClientError::ImageOpen { path, source })?;

        Ok(self
            .recognize_request()
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::wrap_stream(ReaderStream::new(file))))
    }

    /// Reference a remote image by URL; the service fetches it.
    fn remote_image_request(&self, url: &str) -> RequestBuilder {
        self.recognize_request()
            .json(&serde_json::json!({ "url": url }))
    }

    /// Dispatch and settle: 200 parses as JSON, anything else is an API
    /// error carrying the raw body.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ClientError> {
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "recognize responded");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            options.user_agent,
            format!("moodring/{}", env!("CARGO_PKG_VERSION"))
        );
        assert!(options.timeout_secs.is_none());
    }

    #[test]
    fn test_new_client_targets_default_endpoint() {
        let client = EmotionClient::new("key");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = EmotionClient::with_options(
            "key",
            ClientOptions {
                base_url: "http://localhost:8080/emotion/v1.0/".to_string(),
                ..ClientOptions::default()
            },
        );
        assert_eq!(client.base_url(), "http://localhost:8080/emotion/v1.0");
    }
}
