//! Signature and attachment capture.
//!
//! [`SignatureCapture`] holds a single inline image, as a `data:` URL, that is
//! merged into the saved payload under a fixed key when the host enables
//! signature capture. The image comes either from an uploaded file or from
//! flattening a free-hand [`SignaturePad`] into SVG.
//!
//! Reading a file is asynchronous ([`read_upload`]) and independent of the
//! capture, so a host may start several reads; whichever result it applies
//! last wins.

use std::fmt::Write as _;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use medform_core::{FormError, FormResult};

use crate::interaction::Point;

/// Encodes bytes as a base64 `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Guesses an image MIME type from a file extension.
pub fn image_mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Reads an image file for upload, returning its bytes and MIME type.
pub async fn read_upload(path: impl AsRef<Path>) -> FormResult<(Vec<u8>, &'static str)> {
    let path = path.as_ref();
    let mime = image_mime_for_path(path).ok_or_else(|| {
        FormError::Signature(format!("unsupported image type: {}", path.display()))
    })?;
    let bytes = tokio::fs::read(path).await?;
    Ok((bytes, mime))
}

/// A free-hand drawing surface made of strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    strokes: Vec<Vec<Point>>,
    drawing: bool,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new(400, 150)
    }
}

impl SignaturePad {
    /// Creates an empty pad of the given size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            strokes: Vec::new(),
            drawing: false,
        }
    }

    /// Starts a stroke at `point`.
    pub fn begin_stroke(&mut self, point: Point) {
        self.strokes.push(vec![point]);
        self.drawing = true;
    }

    /// Extends the current stroke; ignored when no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(point);
        }
    }

    /// Finishes the current stroke.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Returns the number of strokes drawn.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Returns `true` if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Erases every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    /// Flattens the drawing into an SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        for stroke in &self.strokes {
            let Some(first) = stroke.first() else {
                continue;
            };
            let mut d = format!("M{} {}", first.x, first.y);
            // A single tap still renders as a dot.
            let rest = if stroke.len() == 1 { &stroke[..] } else { &stroke[1..] };
            for point in rest {
                let _ = write!(d, " L{} {}", point.x, point.y);
            }
            let _ = write!(
                svg,
                r#"<path d="{d}" fill="none" stroke="black" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#
            );
        }
        svg.push_str("</svg>");
        svg
    }

    /// Flattens the drawing into an SVG `data:` URL, or `None` when empty.
    pub fn to_data_url(&self) -> Option<String> {
        (!self.is_empty()).then(|| data_url("image/svg+xml", self.to_svg().as_bytes()))
    }
}

/// The captured signature of one form.
#[derive(Debug, Clone, Default)]
pub struct SignatureCapture {
    pad: SignaturePad,
    payload: Option<String>,
}

impl SignatureCapture {
    /// Creates an empty capture with a default-sized pad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the drawing surface.
    pub const fn pad(&self) -> &SignaturePad {
        &self.pad
    }

    /// Returns the drawing surface for editing.
    pub fn pad_mut(&mut self) -> &mut SignaturePad {
        &mut self.pad
    }

    /// Stores an uploaded image, replacing any previous payload.
    pub fn load_bytes(&mut self, bytes: &[u8], mime: &str) -> FormResult<()> {
        if !mime.starts_with("image/") {
            return Err(FormError::Signature(format!("not an image: {mime}")));
        }
        if bytes.is_empty() {
            return Err(FormError::Signature("empty upload".to_string()));
        }
        self.payload = Some(data_url(mime, bytes));
        tracing::debug!(mime, size = bytes.len(), "signature uploaded");
        Ok(())
    }

    /// Reads an image file and stores it.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> FormResult<()> {
        let (bytes, mime) = read_upload(path).await?;
        self.load_bytes(&bytes, mime)
    }

    /// Flattens the pad into the stored payload.
    pub fn commit_drawing(&mut self) -> FormResult<()> {
        let url = self
            .pad
            .to_data_url()
            .ok_or_else(|| FormError::Signature("nothing drawn".to_string()))?;
        self.payload = Some(url);
        Ok(())
    }

    /// Returns the stored `data:` URL.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Resets both the pad and the stored payload.
    pub fn clear(&mut self) {
        self.pad.clear();
        self.payload = None;
    }
}
