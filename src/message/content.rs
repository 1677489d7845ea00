use mime::Mime;

/// Message body together with its declared content type
///
/// The content type is kept verbatim; [`Content::mime`] parses it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Content {
    content_type: String,
    body: String,
}

impl Content {
    pub fn new<T: Into<String>, B: Into<String>>(content_type: T, body: B) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Plain text content in UTF-8
    pub fn text<B: Into<String>>(body: B) -> Self {
        Self::new(mime::TEXT_PLAIN_UTF_8.as_ref(), body)
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parsed content type, or `None` if it is not a valid MIME type
    pub fn mime(&self) -> Option<Mime> {
        self.content_type.parse().ok()
    }
}
