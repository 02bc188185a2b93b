//! What the engine needs from the viewer to give the AI assistant context.
//!
//! The engine never decodes pages itself. A viewer implements
//! [`ContentSource`]; [`gather_context`] calls it and turns every failure into
//! an empty part of the result instead of an error.
use std::io::Cursor;

use futures::future::BoxFuture;
use image::RgbaImage;

mod context;

pub use context::{AiContext, ContextRequest, ContextStatus, ContextTracker, RequestId};

use crate::error::ExtractionError;

/// Rendered pixels of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pub page: u32,
    pub image: RgbaImage,
}

impl PageImage {
    pub fn new(page: u32, image: RgbaImage) -> Self {
        Self { page, image }
    }

    /// PNG bytes, the form the assistant backend accepts.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExtractionError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .map_err(|err| ExtractionError::Encode(err.to_string()))?;
        Ok(bytes.into_inner())
    }
}

/// Page content capability provided by the viewer.
///
/// All methods are best effort. The futures are `'static` so a host can park
/// them on whatever executor it has while the user keeps working.
pub trait ContentSource {
    /// Snapshot of the page on screen right now, if the viewer has one.
    fn current_page_image(&self) -> Option<PageImage>;

    /// One image per requested page, in request order. A viewer that isn't
    /// ready yet should resolve to an empty list rather than fail.
    fn images_for_pages(
        &self,
        pages: &[u32],
    ) -> BoxFuture<'static, Result<Vec<PageImage>, ExtractionError>>;

    /// Extracted text of the requested pages, concatenated.
    fn text_for_pages(&self, pages: &[u32]) -> BoxFuture<'static, Result<String, ExtractionError>>;
}

/// Fetch text and images for `request` concurrently.
///
/// Never fails: a part that errors is logged and left empty, and the result
/// is marked degraded.
pub fn gather_context(
    source: &dyn ContentSource,
    request: ContextRequest,
) -> BoxFuture<'static, AiContext> {
    let images = source.images_for_pages(&request.pages);
    let text = source.text_for_pages(&request.pages);

    Box::pin(async move {
        let (images, text) = futures::join!(images, text);
        let mut degraded = false;

        let images = images.unwrap_or_else(|err| {
            log::warn!("Page images unavailable for request {}: {}", request.id, err);
            degraded = true;
            Vec::new()
        });
        let text = text.unwrap_or_else(|err| {
            log::warn!("Page text unavailable for request {}: {}", request.id, err);
            degraded = true;
            String::new()
        });

        AiContext {
            request,
            text,
            images,
            degraded,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_encoding_produces_png_magic() {
        let page = PageImage::new(1, RgbaImage::new(4, 4));
        let bytes = page.encode_png().unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
