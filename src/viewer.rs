//! Stand-in for the PDF viewer used by the demo shell.
//!
//! Pages are blank sheets and their "text" is just a page label. Enough to
//! drive the engine end to end without a PDF renderer.
use futures::future::{self, BoxFuture};
use image::{Rgba, RgbaImage};

use crate::error::ExtractionError;
use crate::extraction::{ContentSource, PageImage};

/// US Letter at 72 dpi
pub const PAGE_SIZE: egui::Vec2 = egui::Vec2::new(612.0, 792.0);

/// Downscale for extracted page images
const THUMBNAIL_DIVISOR: u32 = 4;

#[derive(Debug, Clone, Default)]
pub struct PlaceholderViewer {
    page_count: Option<u32>,
    current_page: u32,
}

impl PlaceholderViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend to finish loading a document with `page_count` pages.
    pub fn open(&mut self, page_count: u32) {
        self.page_count = Some(page_count.max(1));
        self.current_page = 1;
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn show_page(&mut self, page: u32) {
        self.current_page = page;
    }

    pub fn page_text(page: u32) -> String {
        format!("Page {page}")
    }

    fn check_page(&self, page: u32) -> Result<(), ExtractionError> {
        let page_count = self.page_count.ok_or(ExtractionError::NotReady)?;
        if page == 0 || page > page_count {
            return Err(ExtractionError::PageOutOfRange { page, page_count });
        }
        Ok(())
    }

    /// The requested pages this viewer can serve, in request order.
    ///
    /// Bad pages are skipped. Only when every page is bad does the first
    /// error come back.
    fn readable_pages(&self, pages: &[u32]) -> Result<Vec<u32>, ExtractionError> {
        let mut readable = Vec::with_capacity(pages.len());
        let mut first_error = None;
        for &page in pages {
            match self.check_page(page) {
                Ok(()) => readable.push(page),
                Err(err) => {
                    log::warn!("Skipping page {page}: {err}");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        match first_error {
            Some(err) if readable.is_empty() => Err(err),
            _ => Ok(readable),
        }
    }

    fn render(page: u32) -> PageImage {
        let width = PAGE_SIZE.x as u32 / THUMBNAIL_DIVISOR;
        let height = PAGE_SIZE.y as u32 / THUMBNAIL_DIVISOR;
        PageImage::new(page, RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])))
    }
}

impl ContentSource for PlaceholderViewer {
    fn current_page_image(&self) -> Option<PageImage> {
        self.check_page(self.current_page).ok()?;
        Some(Self::render(self.current_page))
    }

    fn images_for_pages(
        &self,
        pages: &[u32],
    ) -> BoxFuture<'static, Result<Vec<PageImage>, ExtractionError>> {
        if self.page_count.is_none() {
            return Box::pin(future::ready(Ok(Vec::new())));
        }
        let images = self
            .readable_pages(pages)
            .map(|pages| pages.into_iter().map(Self::render).collect());
        Box::pin(future::ready(images))
    }

    fn text_for_pages(&self, pages: &[u32]) -> BoxFuture<'static, Result<String, ExtractionError>> {
        let text = self.readable_pages(pages).map(|pages| {
            pages
                .into_iter()
                .map(Self::page_text)
                .collect::<Vec<_>>()
                .join("\n\n")
        });
        Box::pin(future::ready(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_viewer_yields_no_images() {
        let viewer = PlaceholderViewer::new();
        let images = futures::executor::block_on(viewer.images_for_pages(&[1, 2])).unwrap();
        assert!(images.is_empty());
        assert!(viewer.current_page_image().is_none());
    }

    #[test]
    fn images_keep_request_order() {
        let mut viewer = PlaceholderViewer::new();
        viewer.open(5);
        let images = futures::executor::block_on(viewer.images_for_pages(&[4, 2])).unwrap();
        let pages: Vec<_> = images.iter().map(|i| i.page).collect();
        assert_eq!(pages, [4, 2]);
    }

    #[test]
    fn bad_pages_are_skipped() {
        let mut viewer = PlaceholderViewer::new();
        viewer.open(2);
        let images = futures::executor::block_on(viewer.images_for_pages(&[1, 9, 2])).unwrap();
        let pages: Vec<_> = images.iter().map(|i| i.page).collect();
        assert_eq!(pages, [1, 2]);

        let text = futures::executor::block_on(viewer.text_for_pages(&[0, 2])).unwrap();
        assert_eq!(text, "Page 2");

        assert!(matches!(
            futures::executor::block_on(viewer.images_for_pages(&[7])),
            Err(ExtractionError::PageOutOfRange { page: 7, page_count: 2 })
        ));
    }
}
