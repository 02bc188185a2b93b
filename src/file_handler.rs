use eframe::egui;

use crate::document::DocumentSource;

/// Collects files dropped onto the window and turns them into document sources.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up files dropped this frame.
    /// Returns true if there is anything to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Read the dropped files. Validation is left to the engine; files that
    /// can't be read at all are skipped here.
    pub fn take_sources(&mut self) -> Vec<DocumentSource> {
        std::mem::take(&mut self.dropped_files)
            .into_iter()
            .filter_map(|file| Self::read(&file))
            .collect()
    }

    fn display_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    fn read(file: &egui::DroppedFile) -> Option<DocumentSource> {
        let name = Self::display_name(file);

        if let Some(bytes) = &file.bytes {
            log::info!("Reading dropped file from memory: {} ({} bytes)", name, bytes.len());
            return Some(DocumentSource::new(name, bytes.to_vec()));
        }

        // Only native builds can read from the filesystem
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(path) = &file.path {
                return match std::fs::read(path) {
                    Ok(bytes) => Some(DocumentSource::new(name, bytes)),
                    Err(err) => {
                        log::error!("Failed to read dropped file: {}: {}", path.display(), err);
                        None
                    }
                };
            }
        }

        log::warn!("Dropped file has no accessible data: {}", name);
        None
    }

    /// Darken the window while files are dragged over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a PDF to open it",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}
