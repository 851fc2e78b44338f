use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::AnalysisError;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/(png|jpeg|jpg|gif|webp);base64,(.+)$").expect("valid regex")
});

/// Media subtypes the analysis pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSubtype {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSubtype::Png => "png",
            ImageSubtype::Jpeg => "jpeg",
            ImageSubtype::Gif => "gif",
            ImageSubtype::Webp => "webp",
        }
    }

    /// `jpg` is normalized to `jpeg`.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "png" => Some(ImageSubtype::Png),
            "jpeg" | "jpg" => Some(ImageSubtype::Jpeg),
            "gif" => Some(ImageSubtype::Gif),
            "webp" => Some(ImageSubtype::Webp),
            _ => None,
        }
    }

    /// Identify an image by its magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(ImageSubtype::Png)
        } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
            Some(ImageSubtype::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageSubtype::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageSubtype::Webp)
        } else {
            None
        }
    }
}

/// A base64-encoded image together with its declared media subtype,
/// interchangeable with its `data:image/<subtype>;base64,<payload>` form.
///
/// Parsing is strict and runs before anything touches the network: a wrong
/// prefix, an unsupported subtype or an empty payload is rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    subtype: ImageSubtype,
    payload: String,
}

impl EncodedImage {
    /// Encode raw image bytes under the given subtype.
    pub fn from_bytes(subtype: ImageSubtype, bytes: &[u8]) -> Self {
        Self {
            subtype,
            payload: B64.encode(bytes),
        }
    }

    /// Parse a data URI, failing with [`AnalysisError::InvalidImageFormat`]
    /// on any deviation from the expected form.
    pub fn parse(uri: &str) -> Result<Self, AnalysisError> {
        let caps = DATA_URI_RE
            .captures(uri)
            .ok_or(AnalysisError::InvalidImageFormat)?;
        let subtype =
            ImageSubtype::from_token(&caps[1]).ok_or(AnalysisError::InvalidImageFormat)?;
        Ok(Self {
            subtype,
            payload: caps[2].to_string(),
        })
    }

    pub fn subtype(&self) -> ImageSubtype {
        self.subtype
    }

    /// The base64 payload without the data URI prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn to_uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:image/{};base64,{}", self.subtype.as_str(), self.payload)
    }
}
