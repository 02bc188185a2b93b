use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::AnnotatorApp;
use crate::annotation::{
    Annotation, AnnotationBody, AnnotationId, AnnotationKind, DEFAULT_FONT_SIZE, Gesture,
};
use crate::command::Command;
use crate::engine::Engine;
use crate::input::{FocusContext, InputEvent};
use crate::tool::{ShapeVariant, ToolKind};
use crate::viewer::PAGE_SIZE;

const PAGE_MARGIN: f32 = 24.0;
const NOTE_WIDTH: f32 = 200.0;

/// Text annotation being typed, before it is committed
#[derive(Debug, Clone)]
struct TextDraft {
    page: u32,
    at: Pos2,
    text: String,
}

/// Transient pointer state owned by the canvas, never by the engine
#[derive(Debug, Default)]
pub struct CanvasState {
    /// Screen rect of the canvas last frame
    pub viewport: Option<Rect>,
    pub hovered: bool,
    /// Pan offset of the page inside the viewport
    offset: Vec2,
    /// Points of the gesture in progress, in page coordinates
    points: Vec<Pos2>,
    drawing: Option<ToolKind>,
    text_draft: Option<TextDraft>,
    pub selected: Option<AnnotationId>,
}

impl CanvasState {
    /// Keys and buttons the engine left alone
    pub fn handle_unclaimed(
        &mut self,
        engine: &mut Engine,
        event: &InputEvent,
        focus: FocusContext,
    ) {
        let InputEvent::Key(press) = event else {
            return;
        };
        if focus == FocusContext::TextInput || !press.modifiers.is_none() {
            return;
        }
        match press.key {
            egui::Key::Delete | egui::Key::Backspace if engine.tools().edit_mode() => {
                if let Some(id) = self.selected.take() {
                    engine.delete_annotation(id);
                }
            }
            egui::Key::Escape => {
                self.selected = None;
                self.points.clear();
                self.drawing = None;
            }
            egui::Key::ArrowRight | egui::Key::PageDown => {
                engine.apply(Command::NextPage);
            }
            egui::Key::ArrowLeft | egui::Key::PageUp => {
                engine.apply(Command::PreviousPage);
            }
            _ => {}
        }
    }

    fn begin(&mut self, tool: ToolKind, at: Pos2) {
        self.points.clear();
        self.points.push(at);
        self.drawing = Some(tool);
    }

    /// Finish the gesture in progress for `page`.
    fn finish(&mut self, page: u32) -> Option<Gesture> {
        let tool = self.drawing.take()?;
        let points = std::mem::take(&mut self.points);
        let kind = tool.annotation_kind()?;
        match kind {
            AnnotationKind::Shape => {
                let (first, last) = (*points.first()?, *points.last()?);
                Some(Gesture::shape(page, Rect::from_min_max(first, last)))
            }
            AnnotationKind::Text => None,
            _ => Some(Gesture::stroke(page, kind, points)),
        }
    }
}

/// Page-space <-> screen-space mapping for the visible page
struct PageTransform {
    rect: Rect,
    scale: f32,
}

impl PageTransform {
    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2() * self.scale
    }

    fn to_page(&self, pos: Pos2) -> Pos2 {
        ((pos - self.rect.min) / self.scale).to_pos2()
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_two_pos(self.to_screen(rect.min), self.to_screen(rect.max))
    }
}

pub fn central_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let viewport = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(viewport, Sense::click_and_drag());
        app.canvas.viewport = Some(viewport);
        app.canvas.hovered = response.hovered();

        if app.engine.document().is_none() {
            ui.painter().text(
                viewport.center(),
                Align2::CENTER_CENTER,
                "Drop a PDF here or use Open sample",
                FontId::proportional(18.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        if app.engine.is_pan_dragging() {
            app.canvas.offset += response.drag_delta();
        }

        let snapshot = app.engine.snapshot();
        let size = PAGE_SIZE * snapshot.scale;
        let top_left = Pos2::new(viewport.center().x - size.x * 0.5, viewport.min.y + PAGE_MARGIN);
        let transform = PageTransform {
            rect: Rect::from_min_size(top_left + app.canvas.offset, size),
            scale: snapshot.scale,
        };

        handle_pointer(app, &response, &transform, snapshot.page);

        let painter = ui.painter_at(viewport);
        painter.rect_filled(transform.rect, 0.0, Color32::WHITE);
        painter.text(
            transform.rect.center_bottom() + Vec2::new(0.0, 4.0),
            Align2::CENTER_TOP,
            format!("{} / {}", snapshot.page, snapshot.page_count.unwrap_or(1)),
            FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );

        for annotation in snapshot.annotations.on_page(snapshot.page) {
            paint_annotation(&painter, &transform, annotation);
            if app.canvas.selected == Some(annotation.id()) {
                painter.rect_stroke(
                    transform.rect_to_screen(annotation.bounds()).expand(2.0),
                    2.0,
                    Stroke::new(1.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        // Live preview of the gesture in progress
        if let Some(tool) = app.canvas.drawing {
            let props = &snapshot.properties;
            let stroke = Stroke::new(
                props.line_width * snapshot.scale,
                props.color.gamma_multiply(props.opacity),
            );
            let points: Vec<Pos2> =
                app.canvas.points.iter().map(|p| transform.to_screen(*p)).collect();
            if tool == ToolKind::Shape {
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    let drag = Rect::from_min_max(*first, *last);
                    paint_shape(&painter, snapshot.active_shape, drag, stroke);
                }
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }
    });

    text_draft_window(app, ctx);
}

fn handle_pointer(
    app: &mut AnnotatorApp,
    response: &egui::Response,
    transform: &PageTransform,
    page: u32,
) {
    let tool = app.engine.tools().active_tool();
    let pointer = response.interact_pointer_pos();

    if response.clicked() {
        if let Some(pos) = pointer {
            let at = transform.to_page(pos);
            match tool {
                ToolKind::Magnify => {
                    let step = app.engine.view().limits().step;
                    app.engine.zoom_by(step);
                }
                ToolKind::Text if app.engine.tools().edit_mode() => {
                    app.canvas.text_draft = Some(TextDraft {
                        page,
                        at,
                        text: String::new(),
                    });
                }
                ToolKind::Select => {
                    app.canvas.selected = app
                        .engine
                        .current()
                        .on_page(page)
                        .filter(|a| a.bounds().contains(at))
                        .last()
                        .map(Annotation::id);
                }
                _ => {}
            }
        }
    }
    if response.secondary_clicked() && tool == ToolKind::Magnify {
        let step = app.engine.view().limits().step;
        app.engine.zoom_by(-step);
    }

    let draws = matches!(
        tool,
        ToolKind::Pen | ToolKind::Highlight | ToolKind::Eraser | ToolKind::Shape
    );
    if !draws || !app.engine.tools().edit_mode() {
        return;
    }

    if response.drag_started() {
        if let Some(pos) = pointer {
            app.canvas.begin(tool, transform.to_page(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = pointer {
            app.canvas.points.push(transform.to_page(pos));
        }
    }
    if response.drag_stopped() {
        if let Some(gesture) = app.canvas.finish(page) {
            app.engine.commit_gesture(gesture);
        }
    }
}

fn paint_annotation(painter: &Painter, transform: &PageTransform, annotation: &Annotation) {
    let style = annotation.style();
    let color = match annotation.kind() {
        // Eraser marks paint page color over whatever is below
        AnnotationKind::EraserMark => Color32::WHITE,
        _ => style.paint_color(),
    };
    let stroke = Stroke::new(style.line_width * transform.scale, color);

    match annotation.body() {
        AnnotationBody::Pen { points }
        | AnnotationBody::Highlight { points }
        | AnnotationBody::EraserMark { points } => {
            let points: Vec<Pos2> = points.iter().map(|p| transform.to_screen(*p)).collect();
            if let [single] = points.as_slice() {
                painter.circle_filled(*single, stroke.width * 0.5, color);
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }
        AnnotationBody::Shape { variant, bounds } => {
            let screen = Rect::from_min_max(
                transform.to_screen(bounds.min),
                transform.to_screen(bounds.max),
            );
            paint_shape(painter, *variant, screen, stroke);
        }
        AnnotationBody::Text { content, bounds } => {
            let size = style.font.as_ref().map_or(DEFAULT_FONT_SIZE, |f| f.size);
            painter.text(
                transform.to_screen(bounds.min),
                Align2::LEFT_TOP,
                content,
                FontId::proportional(size * transform.scale),
                color,
            );
        }
    }
}

/// `drag` keeps the drag direction (min = where the drag started), which lines
/// and arrows need.
fn paint_shape(painter: &Painter, variant: ShapeVariant, drag: Rect, stroke: Stroke) {
    let normalized = Rect::from_two_pos(drag.min, drag.max);
    match variant {
        ShapeVariant::Rectangle => {
            painter.rect_stroke(normalized, 0.0, stroke);
        }
        ShapeVariant::Circle => {
            painter.circle_stroke(normalized.center(), normalized.size().min_elem() * 0.5, stroke);
        }
        ShapeVariant::Line => {
            painter.line_segment([drag.min, drag.max], stroke);
        }
        ShapeVariant::Arrow => {
            painter.arrow(drag.min, drag.max - drag.min, stroke);
        }
    }
}

fn text_draft_window(app: &mut AnnotatorApp, ctx: &egui::Context) {
    let Some(draft) = &mut app.canvas.text_draft else {
        return;
    };

    let mut commit = false;
    let mut cancel = false;
    egui::Window::new("Add note")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add(egui::TextEdit::multiline(&mut draft.text).desired_rows(3));
            ui.horizontal(|ui| {
                commit = ui.button("Add").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if commit {
        let height = app
            .engine
            .tools()
            .properties()
            .font_size
            .unwrap_or(DEFAULT_FONT_SIZE)
            * 1.4;
        let bounds = Rect::from_min_size(draft.at, Vec2::new(NOTE_WIDTH, height));
        let gesture = Gesture::text(draft.page, bounds, draft.text.clone());
        app.engine.commit_gesture(gesture);
    }
    if commit || cancel {
        app.canvas.text_draft = None;
    }
}
