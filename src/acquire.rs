use std::path::Path;

use crate::encoded_image::{EncodedImage, ImageSubtype};
use crate::surface::DrawingSurface;

/// Where the canonical image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Upload,
    Drawing,
}

/// Encode already-loaded file bytes, sniffing the subtype from the content.
pub fn encode_file_bytes(bytes: &[u8]) -> anyhow::Result<EncodedImage> {
    let subtype = ImageSubtype::sniff(bytes)
        .ok_or_else(|| anyhow::anyhow!("unsupported image file content"))?;
    Ok(EncodedImage::from_bytes(subtype, bytes))
}

/// Read a user-selected file fully into memory and encode it. Suspends the
/// caller until every byte is read; there is no partial result.
pub async fn from_file(path: impl AsRef<Path>) -> anyhow::Result<EncodedImage> {
    let bytes = tokio::fs::read(path).await?;
    encode_file_bytes(&bytes)
}

/// Synchronous passthrough of the drawing surface's export.
pub fn from_canvas(surface: &DrawingSurface) -> EncodedImage {
    surface.export_bitmap()
}

/// Holds the single image an analysis request may consume.
///
/// An upload and a drawing can never both be live: whichever acquisition
/// path produced an image last displaces the other.
#[derive(Debug, Default)]
pub struct CanonicalImage {
    current: Option<(SourceKind, EncodedImage)>,
}

impl CanonicalImage {
    pub fn set_upload(&mut self, image: EncodedImage) {
        self.current = Some((SourceKind::Upload, image));
    }

    pub fn set_drawing(&mut self, image: EncodedImage) {
        self.current = Some((SourceKind::Drawing, image));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn source(&self) -> Option<SourceKind> {
        self.current.as_ref().map(|(kind, _)| *kind)
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.current.as_ref().map(|(_, image)| image)
    }

    /// Move the image out; ownership passes to the in-flight request.
    pub fn take(&mut self) -> Option<EncodedImage> {
        self.current.take().map(|(_, image)| image)
    }
}
