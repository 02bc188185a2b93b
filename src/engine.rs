//! The annotation and interaction engine.
//!
//! `Engine` owns the tool state, the undo history, the view state and the
//! assistant context for one loaded document, and exposes them through a
//! narrow set of operations. Views read [`Engine::snapshot`]; input goes in
//! through [`Engine::handle_input`] or [`Engine::apply`].
//!
//! Nothing here returns an error. An operation that doesn't apply in the
//! current state is a no-op and reports `false`/`None`; the only fallible
//! entry point is [`Engine::load_document`], which rejects bad files before
//! touching any state.
use std::collections::BTreeMap;

use crate::annotation::{
    Annotation, AnnotationId, AnnotationKind, AnnotationSet, AnnotationStyle, Gesture,
};
use crate::command::{Command, History};
use crate::config::EngineConfig;
use crate::document::{Document, DocumentId, DocumentSource};
use crate::error::DocumentLoadError;
use crate::event::{EngineEvent, EventBus, EventHandler};
use crate::extraction::{
    AiContext, ContentSource, ContextRequest, ContextStatus, ContextTracker, PageImage,
};
use crate::input::{Dispatch, DispatchContext, FocusContext, InputEvent, dispatch};
use crate::tool::{
    CursorMode, ShapeVariant, ToolKind, ToolProperties, ToolPropertiesPatch, ToolState,
    cursor_mode,
};
use crate::view::ViewState;

/// Everything a view needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub document: Option<DocumentId>,
    pub page: u32,
    pub page_count: Option<u32>,
    pub scale: f32,
    pub rotation: u16,
    pub continuous: bool,
    pub horizontal: bool,
    pub edit_mode: bool,
    pub active_tool: ToolKind,
    pub active_shape: ShapeVariant,
    pub properties: ToolProperties,
    pub cursor: CursorMode,
    pub can_undo: bool,
    pub can_redo: bool,
    pub annotations: AnnotationSet,
}

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    tools: ToolState,
    history: History,
    view: ViewState,
    document: Option<Document>,
    page_text: BTreeMap<u32, String>,
    is_pan_dragging: bool,
    clear_pending: bool,
    context: ContextTracker,
    assistant_seed: Option<String>,
    events: EventBus,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        let tools = ToolState::new(
            config.default_properties.clone(),
            config.line_width,
            config.start_in_edit_mode,
        );
        Self {
            tools,
            history: History::new(),
            view: ViewState::new(config.zoom),
            document: None,
            page_text: BTreeMap::new(),
            is_pan_dragging: false,
            clear_pending: false,
            context: ContextTracker::new(),
            assistant_seed: None,
            events: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn is_pan_dragging(&self) -> bool {
        self.is_pan_dragging
    }

    pub fn cursor_mode(&self) -> CursorMode {
        cursor_mode(
            self.tools.active_tool(),
            self.is_pan_dragging,
            self.tools.is_magnify_active(),
        )
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            document: self.document.as_ref().map(|d| d.id),
            page: self.view.page(),
            page_count: self.view.page_count(),
            scale: self.view.scale(),
            rotation: self.view.rotation(),
            continuous: self.view.continuous(),
            horizontal: self.view.horizontal(),
            edit_mode: self.tools.edit_mode(),
            active_tool: self.tools.active_tool(),
            active_shape: self.tools.active_shape(),
            properties: self.tools.properties().clone(),
            cursor: self.cursor_mode(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            annotations: self.history.current().clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Tool state

    fn tool_changed(&mut self, old: ToolKind) -> bool {
        let new = self.tools.active_tool();
        if old == new {
            return false;
        }
        if new != ToolKind::Pan {
            self.is_pan_dragging = false;
        }
        self.events.emit(EngineEvent::ToolChanged { old, new });
        true
    }

    pub fn set_active_tool(&mut self, tool: ToolKind) -> bool {
        let old = self.tools.active_tool();
        self.tools.set_active_tool(tool);
        self.tool_changed(old)
    }

    pub fn set_active_shape(&mut self, variant: ShapeVariant) -> bool {
        let changed = self.tools.set_active_shape(variant);
        if changed {
            self.events.emit(EngineEvent::ShapeChanged(variant));
        }
        changed
    }

    pub fn select_shape(&mut self, variant: ShapeVariant) -> bool {
        let old_tool = self.tools.active_tool();
        let old_shape = self.tools.active_shape();
        if !self.tools.select_shape(variant) {
            return false;
        }
        if old_shape != variant {
            self.events.emit(EngineEvent::ShapeChanged(variant));
        }
        self.tool_changed(old_tool);
        true
    }

    pub fn set_properties(&mut self, patch: ToolPropertiesPatch) -> bool {
        let changed = self.tools.set_properties(patch);
        if changed {
            self.events.emit(EngineEvent::PropertiesChanged);
        }
        changed
    }

    pub fn nudge_line_width(&mut self, delta: f32) -> bool {
        let changed = self.tools.nudge_line_width(delta);
        if changed {
            log::debug!("Line width now {}", self.tools.properties().line_width);
            self.events.emit(EngineEvent::PropertiesChanged);
        }
        changed
    }

    pub fn toggle_magnify(&mut self) -> ToolKind {
        let old = self.tools.active_tool();
        let new = self.tools.toggle_magnify();
        self.tool_changed(old);
        new
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) -> bool {
        let old = self.tools.active_tool();
        let changed = self.tools.set_edit_mode(edit_mode);
        if changed {
            log::debug!("Edit mode {}", if edit_mode { "on" } else { "off" });
            self.events.emit(EngineEvent::EditModeChanged(edit_mode));
        }
        self.tool_changed(old);
        changed
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.tools.edit_mode());
        self.tools.edit_mode()
    }

    // ---------------------------------------------------------------------
    // History

    pub fn current(&self) -> &AnnotationSet {
        self.history.current()
    }

    fn history_changed(&self) {
        self.events.emit(EngineEvent::HistoryChanged {
            step: self.history.step(),
            len: self.history.len(),
        });
    }

    /// Make `next` the drawn state. The only path by which annotations change.
    pub fn commit(&mut self, next: AnnotationSet) {
        self.history.commit(next);
        log::debug!(
            "Committed {} annotations at step {}",
            self.history.current().len(),
            self.history.step()
        );
        self.history_changed();
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.history.undo();
        self.history_changed();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.history.redo();
        self.history_changed();
        true
    }

    /// Turn a finished gesture into an annotation on top of the current set.
    ///
    /// Style and shape variant come from the tool state as it is now; later
    /// property changes never reach the stored annotation.
    pub fn commit_gesture(&mut self, gesture: Gesture) -> Option<AnnotationId> {
        if self.document.is_none() || !self.tools.edit_mode() {
            log::debug!("Ignoring {} gesture outside edit mode", gesture.kind.name());
            return None;
        }
        if !self.view.contains_page(gesture.page) {
            log::warn!("Ignoring gesture on missing page {}", gesture.page);
            return None;
        }

        let page = gesture.page;
        let kind = gesture.kind;
        let Some(body) = gesture.into_body(self.tools.active_shape()) else {
            log::warn!("Ignoring {} gesture with unusable geometry", kind.name());
            return None;
        };

        let style =
            AnnotationStyle::snapshot(self.tools.properties(), kind == AnnotationKind::Text);
        let annotation = Annotation::new(page, body, style);
        let id = annotation.id();
        let next = self.history.current().with(annotation);
        self.commit(next);
        Some(id)
    }

    pub fn delete_annotation(&mut self, id: AnnotationId) -> bool {
        match self.history.current().without(id) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Ask for a clear-all. Nothing is committed until the user confirms.
    pub fn request_clear_all(&mut self) -> bool {
        if self.history.current().is_empty() {
            return false;
        }
        self.clear_pending = true;
        self.events.emit(EngineEvent::ClearRequested);
        true
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_pending
    }

    /// Answer a pending clear-all. Confirming commits an empty set, which
    /// stays undoable; declining leaves history alone.
    pub fn resolve_clear_all(&mut self, confirmed: bool) -> bool {
        if !std::mem::take(&mut self.clear_pending) {
            return false;
        }
        if !confirmed {
            log::debug!("Clear all declined");
            return false;
        }
        self.commit(AnnotationSet::empty());
        true
    }

    // ---------------------------------------------------------------------
    // Document lifecycle

    /// Validate and adopt a new document, starting it with empty history.
    /// A rejected file leaves the engine exactly as it was.
    pub fn load_document(
        &mut self,
        source: &DocumentSource,
    ) -> Result<DocumentId, DocumentLoadError> {
        if let Err(err) = source.validate() {
            log::warn!("Rejected document: {}", err);
            return Err(err);
        }

        let document = Document::from_source(source);
        let id = document.id;
        log::info!("Loaded {} ({} bytes) as {}", document.name, document.size_bytes, id);

        self.document = Some(document);
        self.history.reset();
        self.view.reset_for_document();
        self.page_text.clear();
        self.context.clear();
        self.clear_pending = false;
        self.is_pan_dragging = false;

        self.events.emit(EngineEvent::DocumentLoaded(id));
        self.history_changed();
        self.view_changed();
        Ok(id)
    }

    /// The viewer finished loading the document's pages.
    pub fn on_document_ready(&mut self, page_count: u32) {
        if self.document.is_none() {
            return;
        }
        self.view.set_page_count(page_count);
        self.events.emit(EngineEvent::DocumentReady {
            page_count: page_count.max(1),
        });
        self.view_changed();
    }

    /// The viewer extracted the text of one page.
    pub fn on_page_text(&mut self, page: u32, text: impl Into<String>) {
        if self.document.is_none() || !self.view.contains_page(page) {
            return;
        }
        self.page_text.insert(page, text.into());
    }

    pub fn page_text(&self, page: u32) -> Option<&str> {
        self.page_text.get(&page).map(String::as_str)
    }

    /// Cached text of `pages` in the given order, or `None` if none is cached.
    pub fn cached_text(&self, pages: &[u32]) -> Option<String> {
        let parts: Vec<&str> = pages.iter().filter_map(|&page| self.page_text(page)).collect();
        (!parts.is_empty()).then(|| parts.join("\n\n"))
    }

    // ---------------------------------------------------------------------
    // View

    fn view_changed(&self) {
        self.events.emit(EngineEvent::ViewChanged {
            page: self.view.page(),
            scale: self.view.scale(),
            rotation: self.view.rotation(),
        });
    }

    fn after_view_change(&self, changed: bool) -> bool {
        if changed {
            self.view_changed();
        }
        changed
    }

    pub fn zoom_by(&mut self, delta: f32) -> bool {
        let changed = self.view.zoom_by(delta);
        self.after_view_change(changed)
    }

    pub fn set_scale(&mut self, scale: f32) -> bool {
        let changed = self.view.set_scale(scale);
        self.after_view_change(changed)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.view.reset_zoom();
        self.after_view_change(changed)
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.view.set_page(page);
        self.after_view_change(changed)
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.view.next_page();
        self.after_view_change(changed)
    }

    pub fn previous_page(&mut self) -> bool {
        let changed = self.view.previous_page();
        self.after_view_change(changed)
    }

    pub fn rotate_clockwise(&mut self) {
        self.view.rotate_clockwise();
        self.view_changed();
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.view.rotate_counter_clockwise();
        self.view_changed();
    }

    pub fn set_continuous(&mut self, continuous: bool) -> bool {
        let changed = self.view.set_continuous(continuous);
        self.after_view_change(changed)
    }

    pub fn set_horizontal(&mut self, horizontal: bool) -> bool {
        let changed = self.view.set_horizontal(horizontal);
        self.after_view_change(changed)
    }

    // ---------------------------------------------------------------------
    // Input

    pub fn dispatch_context(&self, focus: FocusContext) -> DispatchContext {
        DispatchContext {
            edit_mode: self.tools.edit_mode(),
            focus,
            active_tool: self.tools.active_tool(),
            is_pan_dragging: self.is_pan_dragging,
            zoom: *self.view.limits(),
        }
    }

    /// Route one input event and run the resulting command, if any.
    pub fn handle_input(&mut self, event: &InputEvent, focus: FocusContext) -> Dispatch {
        let outcome = dispatch(event, &self.dispatch_context(focus));
        if let Dispatch::Command(command) = outcome {
            self.apply(command);
        }
        outcome
    }

    /// Run one command. Returns true if any state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        log::debug!("Applying {}", command.name());
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::ZoomBy(delta) => self.zoom_by(delta),
            Command::ToggleMagnify => {
                let old = self.tools.active_tool();
                self.toggle_magnify() != old
            }
            Command::SetTool(tool) => self.set_active_tool(tool),
            Command::SelectShape(variant) => self.select_shape(variant),
            Command::NudgeLineWidth(delta) => self.nudge_line_width(delta),
            Command::SetEditMode(edit_mode) => self.set_edit_mode(edit_mode),
            Command::BeginPanDrag => {
                let start = self.tools.active_tool() == ToolKind::Pan && !self.is_pan_dragging;
                self.is_pan_dragging |= start;
                start
            }
            Command::EndPanDrag => std::mem::take(&mut self.is_pan_dragging),
            Command::NextPage => self.next_page(),
            Command::PreviousPage => self.previous_page(),
        }
    }

    // ---------------------------------------------------------------------
    // Assistant context

    /// Start a context request for `pages` of the current document.
    ///
    /// Duplicates and pages outside the document are dropped. Returns `None`
    /// with no document loaded. The returned request supersedes any earlier one.
    pub fn begin_context_request(&mut self, pages: &[u32]) -> Option<ContextRequest> {
        let document = self.document.as_ref()?.id;
        let mut wanted: Vec<u32> = Vec::with_capacity(pages.len());
        for &page in pages {
            if self.view.contains_page(page) && !wanted.contains(&page) {
                wanted.push(page);
            }
        }
        let request = self.context.begin(document, wanted);
        log::debug!("Context request {} for pages {:?}", request.id, request.pages);
        self.events.emit(EngineEvent::ContextUpdated);
        Some(request)
    }

    /// Deliver a finished context. Stale results are dropped and reported as
    /// `false`.
    ///
    /// When the viewer gave no text, whatever page text it reported earlier
    /// through [`Engine::on_page_text`] is used instead.
    pub fn accept_context(&mut self, mut context: AiContext) -> bool {
        let document = self.document.as_ref().map(|d| d.id);
        if document == Some(context.request.document) && context.text.trim().is_empty() {
            if let Some(cached) = self.cached_text(&context.request.pages) {
                log::debug!("Using cached text for request {}", context.request.id);
                context.text = cached;
            }
        }
        let accepted = self.context.accept(document, context);
        if accepted {
            self.events.emit(EngineEvent::ContextUpdated);
        }
        accepted
    }

    pub fn context_status(&self) -> &ContextStatus {
        self.context.status()
    }

    /// Best-effort image of the page on screen, for quick questions.
    pub fn current_page_context(&self, source: &dyn ContentSource) -> Option<PageImage> {
        self.document.as_ref()?;
        let image = source.current_page_image();
        if image.is_none() {
            log::debug!("Viewer has no image for page {}", self.view.page());
        }
        image
    }

    /// Prefill for the assistant's input box, e.g. a quoted selection.
    pub fn seed_assistant(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.assistant_seed = Some(text);
        true
    }

    pub fn assistant_seed(&self) -> Option<&str> {
        self.assistant_seed.as_deref()
    }

    pub fn take_assistant_seed(&mut self) -> Option<String> {
        self.assistant_seed.take()
    }
}
