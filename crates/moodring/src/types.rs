//! Value types for a single recognize call.
//!
//! Everything here is transient: built by the caller, consumed by one
//! request. The wire conventions of the remote API (the shape of the
//! `faceRectangles` query parameter) live next to the types they encode.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Bounding box of a detected face, in pixels from the image's top-left.
///
/// Face detection APIs return rectangles in exactly this shape, so the
/// serde derives let callers lift them straight out of a detection
/// response and pass them along as analysis hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRectangle {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRectangle {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Renders the query fragment the API expects: `left,top,width,height`.
impl std::fmt::Display for FaceRectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
    }
}

/// Join rectangles into the `faceRectangles` query value, preserving
/// input order. Returns `None` for an empty list so the parameter is
/// omitted entirely rather than sent blank.
pub(crate) fn face_rectangles_param(rectangles: &[FaceRectangle]) -> Option<String> {
    if rectangles.is_empty() {
        return None;
    }

    let joined = rectangles
        .iter()
        .map(|rect| rect.to_string())
        .collect::<Vec<_>>()
        .join(";");

    Some(joined)
}

/// Where the image to analyze lives.
///
/// The two cases map to the two request bodies the API accepts: a local
/// file streamed as raw bytes, or a URL the service fetches itself.
/// Requiring a variant up front makes "no image at all" unrepresentable
/// for direct construction; dynamic inputs go through [`from_parts`].
///
/// [`from_parts`]: ImageSource::from_parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file, uploaded as `application/octet-stream`.
    Local(PathBuf),
    /// Publicly reachable URL, sent as a `{"url": ...}` JSON body.
    Remote(String),
}

impl ImageSource {
    /// Build a source from optional path/url fields, as when the caller
    /// deserialized them from user input.
    ///
    /// A path wins over a url when both are present. When neither is
    /// present this fails immediately with
    /// [`ClientError::MissingImageSource`] instead of producing a request
    /// that can never be sent.
    pub fn from_parts(
        path: Option<PathBuf>,
        url: Option<String>,
    ) -> Result<Self, ClientError> {
        if let Some(path) = path {
            return Ok(ImageSource::Local(path));
        }
        if let Some(url) = url {
            return Ok(ImageSource::Remote(url));
        }
        Err(ClientError::MissingImageSource)
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Local(path) => write!(f, "{}", path.display()),
            ImageSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Input for one [`analyze_emotion`] call.
///
/// [`analyze_emotion`]: crate::EmotionClient::analyze_emotion
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// The image to analyze.
    pub source: ImageSource,
    /// Face regions to constrain analysis to. Empty means the service
    /// runs its own face detection.
    pub face_rectangles: Vec<FaceRectangle>,
}

impl AnalyzeOptions {
    /// Analyze a local image file.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ImageSource::Local(path.into()),
            face_rectangles: Vec::new(),
        }
    }

    /// Analyze an image the service fetches by URL.
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Remote(url.into()),
            face_rectangles: Vec::new(),
        }
    }

    /// Constrain analysis to the given face regions, in order.
    pub fn with_face_rectangles(mut self, rectangles: Vec<FaceRectangle>) -> Self {
        self.face_rectangles = rectangles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_renders_in_field_order() {
        let rect = FaceRectangle::new(10, 20, 30, 40);
        assert_eq!(rect.to_string(), "10,20,30,40");
    }

    #[test]
    fn test_param_joins_rectangles_with_semicolons() {
        let rects = vec![
            FaceRectangle::new(1, 2, 3, 4),
            FaceRectangle::new(5, 6, 7, 8),
        ];
        assert_eq!(
            face_rectangles_param(&rects).as_deref(),
            Some("1,2,3,4;5,6,7,8")
        );
    }

    #[test]
    fn test_param_single_rectangle_has_no_separator() {
        let rects = vec![FaceRectangle::new(0, 0, 100, 100)];
        assert_eq!(face_rectangles_param(&rects).as_deref(), Some("0,0,100,100"));
    }

    #[test]
    fn test_param_empty_list_is_omitted() {
        assert_eq!(face_rectangles_param(&[]), None);
    }

    #[test]
    fn test_param_preserves_input_order() {
        let rects = vec![
            FaceRectangle::new(5, 6, 7, 8),
            FaceRectangle::new(1, 2, 3, 4),
        ];
        assert_eq!(
            face_rectangles_param(&rects).as_deref(),
            Some("5,6,7,8;1,2,3,4")
        );
    }

    #[test]
    fn test_from_parts_path_only() {
        let source = ImageSource::from_parts(Some(PathBuf::from("face.jpg")), None).unwrap();
        assert_eq!(source, ImageSource::Local(PathBuf::from("face.jpg")));
    }

    #[test]
    fn test_from_parts_url_only() {
        let source =
            ImageSource::from_parts(None, Some("https://example.com/face.jpg".into())).unwrap();
        assert_eq!(
            source,
            ImageSource::Remote("https://example.com/face.jpg".into())
        );
    }

    #[test]
    fn test_from_parts_path_wins_over_url() {
        let source = ImageSource::from_parts(
            Some(PathBuf::from("face.jpg")),
            Some("https://example.com/face.jpg".into()),
        )
        .unwrap();
        assert_eq!(source, ImageSource::Local(PathBuf::from("face.jpg")));
    }

    #[test]
    fn test_from_parts_neither_fails_immediately() {
        let err = ImageSource::from_parts(None, None).unwrap_err();
        assert!(matches!(err, ClientError::MissingImageSource));
    }

    #[test]
    fn test_rectangle_deserializes_from_detection_response() {
        let rect: FaceRectangle =
            serde_json::from_str(r#"{"left":68,"top":97,"width":64,"height":64}"#).unwrap();
        assert_eq!(rect, FaceRectangle::new(68, 97, 64, 64));
    }

    #[test]
    fn test_options_builder_attaches_rectangles() {
        let options = AnalyzeOptions::remote("https://example.com/face.jpg")
            .with_face_rectangles(vec![FaceRectangle::new(1, 2, 3, 4)]);
        assert_eq!(options.face_rectangles.len(), 1);
    }
}
