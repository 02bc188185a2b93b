use futures::channel::oneshot;

use crate::document::DocumentSource;
use crate::engine::Engine;
use crate::extraction::{AiContext, gather_context};
use crate::file_handler::FileHandler;
use crate::input::{Dispatch, InputEvent, InputHandler};
use crate::panels::{CanvasState, assistant_panel, central_panel, tools_panel};
use crate::viewer::PlaceholderViewer;
use crate::{CursorMode, EngineConfig};

/// Pages the placeholder viewer pretends every document has.
const PLACEHOLDER_PAGES: u32 = 3;

const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n% placeholder document\n%%EOF\n";

/// Demo host: egui input in, engine snapshot out.
pub struct AnnotatorApp {
    pub(crate) engine: Engine,
    pub(crate) viewer: PlaceholderViewer,
    pub(crate) canvas: CanvasState,
    pub(crate) assistant_input: String,
    pub(crate) last_error: Option<String>,
    /// Summary of the last quick snapshot of the visible page
    pub(crate) page_snapshot: Option<String>,
    input: InputHandler,
    files: FileHandler,
    pending_context: Option<oneshot::Receiver<AiContext>>,
}

impl AnnotatorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Self {
        // Ctrl +/- belongs to the page zoom, not the UI scale
        cc.egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);

        Self {
            engine: Engine::new(config),
            viewer: PlaceholderViewer::new(),
            canvas: CanvasState::default(),
            assistant_input: String::new(),
            last_error: None,
            page_snapshot: None,
            input: InputHandler::new(),
            files: FileHandler::new(),
            pending_context: None,
        }
    }

    pub(crate) fn open_sample(&mut self) {
        self.open(DocumentSource::new("sample.pdf", SAMPLE_PDF.to_vec()));
    }

    pub(crate) fn open(&mut self, source: DocumentSource) {
        match self.engine.load_document(&source) {
            Ok(_) => {
                self.last_error = None;
                self.canvas = CanvasState::default();
                self.pending_context = None;
                self.page_snapshot = None;
                self.viewer.open(PLACEHOLDER_PAGES);
                self.engine.on_document_ready(PLACEHOLDER_PAGES);
                for page in 1..=PLACEHOLDER_PAGES {
                    self.engine.on_page_text(page, PlaceholderViewer::page_text(page));
                }
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    /// Ask the viewer for page content on a background task.
    pub(crate) fn request_context(&mut self, ctx: &egui::Context, pages: &[u32]) {
        let Some(request) = self.engine.begin_context_request(pages) else {
            return;
        };
        let gathering = gather_context(&self.viewer, request);
        let (sender, receiver) = oneshot::channel();
        let repaint = ctx.clone();
        let task = async move {
            // The receiver is gone if a newer request replaced this one
            let _ = sender.send(gathering.await);
            repaint.request_repaint();
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || futures::executor::block_on(task));
        }
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        self.pending_context = Some(receiver);
    }

    /// Grab the visible page for a quick question without a full request.
    pub(crate) fn snapshot_page(&mut self) {
        let Some(image) = self.engine.current_page_context(&self.viewer) else {
            self.page_snapshot = Some("The viewer has no image of this page yet".to_owned());
            return;
        };
        self.page_snapshot = Some(match image.encode_png() {
            Ok(png) => format!(
                "Page {}: {}x{} px, {} KiB as PNG",
                image.page,
                image.image.width(),
                image.image.height(),
                png.len().div_ceil(1024)
            ),
            Err(err) => {
                log::error!("Failed to encode page {}: {}", image.page, err);
                format!("Page {} could not be encoded", image.page)
            }
        });
    }

    fn poll_context(&mut self) {
        let Some(receiver) = &mut self.pending_context else {
            return;
        };
        match receiver.try_recv() {
            Ok(Some(context)) => {
                self.engine.accept_context(context);
                self.pending_context = None;
            }
            Ok(None) => {}
            Err(oneshot::Canceled) => {
                log::warn!("Context task ended without a result");
                self.pending_context = None;
            }
        }
    }

    fn route_input(&mut self, ctx: &egui::Context) {
        let focus = InputHandler::focus(ctx);
        let over_canvas = ctx
            .pointer_latest_pos()
            .zip(self.canvas.viewport)
            .is_some_and(|(pos, rect)| rect.contains(pos));

        for event in self.input.process_input(ctx) {
            // Presses outside the page belong to the widgets; releases always
            // reach the engine so a drag can't get stuck.
            if matches!(event, InputEvent::PointerDown { .. }) && !over_canvas {
                continue;
            }
            if matches!(event, InputEvent::Wheel { .. }) && !over_canvas {
                continue;
            }
            if let Dispatch::Unhandled = self.engine.handle_input(&event, focus) {
                self.canvas.handle_unclaimed(&mut self.engine, &event, focus);
            }
        }
    }
}

fn cursor_icon(mode: CursorMode) -> egui::CursorIcon {
    match mode {
        CursorMode::Default => egui::CursorIcon::Default,
        CursorMode::Crosshair => egui::CursorIcon::Crosshair,
        CursorMode::Text => egui::CursorIcon::Text,
        CursorMode::Eraser => egui::CursorIcon::Cell,
        CursorMode::Grab => egui::CursorIcon::Grab,
        CursorMode::Grabbing => egui::CursorIcon::Grabbing,
        CursorMode::ZoomIn => egui::CursorIcon::ZoomIn,
    }
}

impl eframe::App for AnnotatorApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.files.check_for_dropped_files(ctx) {
            // Only the first dropped file is opened
            if let Some(source) = self.files.take_sources().into_iter().next() {
                self.open(source);
            }
        }
        self.files.preview_files_being_dropped(ctx);

        self.route_input(ctx);
        self.poll_context();
        self.viewer.show_page(self.engine.view().page());

        tools_panel(self, ctx);
        assistant_panel(self, ctx);
        central_panel(self, ctx);

        if self.canvas.hovered {
            ctx.set_cursor_icon(cursor_icon(self.engine.cursor_mode()));
        }

        if self.engine.is_clear_pending() {
            egui::Window::new("Clear all annotations?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label("This removes every annotation in the document. You can undo it.");
                    ui.horizontal(|ui| {
                        if ui.button("Clear").clicked() {
                            self.engine.resolve_clear_all(true);
                        }
                        if ui.button("Cancel").clicked() {
                            self.engine.resolve_clear_all(false);
                        }
                    });
                });
        }
    }
}
