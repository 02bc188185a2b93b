use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod gesture;
mod set;
mod style;

pub use gesture::{Geometry, Gesture};
pub use set::AnnotationSet;
pub use style::{AnnotationStyle, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FontStyle};

use crate::tool::ShapeVariant;

/// Stable identity of an annotation. Fresh for every annotation ever created,
/// so ids survive undo/redo without being handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat discriminant of an annotation, used where the payload doesn't matter
/// (gestures, logging, tool mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Pen,
    Highlight,
    EraserMark,
    Shape,
    Text,
}

impl AnnotationKind {
    /// Kinds drawn as freehand point sequences.
    pub fn is_stroke(self) -> bool {
        matches!(self, Self::Pen | Self::Highlight | Self::EraserMark)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlight => "highlight",
            Self::EraserMark => "eraser",
            Self::Shape => "shape",
            Self::Text => "text",
        }
    }
}

/// Geometry and kind-specific payload of an annotation.
///
/// Each variant carries exactly the geometry its kind is drawn with, so a
/// stroke can never have bounds and a shape can never have points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationBody {
    Pen { points: Vec<Pos2> },
    Highlight { points: Vec<Pos2> },
    EraserMark { points: Vec<Pos2> },
    Shape { variant: ShapeVariant, bounds: Rect },
    Text { content: String, bounds: Rect },
}

impl AnnotationBody {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Pen { .. } => AnnotationKind::Pen,
            Self::Highlight { .. } => AnnotationKind::Highlight,
            Self::EraserMark { .. } => AnnotationKind::EraserMark,
            Self::Shape { .. } => AnnotationKind::Shape,
            Self::Text { .. } => AnnotationKind::Text,
        }
    }

    pub fn points(&self) -> Option<&[Pos2]> {
        match self {
            Self::Pen { points } | Self::Highlight { points } | Self::EraserMark { points } => {
                Some(points)
            }
            _ => None,
        }
    }
}

/// One drawn object on one page. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    id: AnnotationId,
    page: u32,
    body: AnnotationBody,
    style: AnnotationStyle,
}

impl Annotation {
    /// Build an annotation with a fresh id.
    pub fn new(page: u32, body: AnnotationBody, style: AnnotationStyle) -> Self {
        Self {
            id: AnnotationId::new(),
            page,
            body,
            style,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// 1-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn kind(&self) -> AnnotationKind {
        self.body.kind()
    }

    pub fn body(&self) -> &AnnotationBody {
        &self.body
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    pub fn shape_variant(&self) -> Option<ShapeVariant> {
        match &self.body {
            AnnotationBody::Shape { variant, .. } => Some(*variant),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            AnnotationBody::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Bounding rectangle, widened by half the line width for strokes.
    ///
    /// Shape bounds are stored as dragged (min is the drag origin) so lines
    /// and arrows keep their direction; this returns them normalized.
    pub fn bounds(&self) -> Rect {
        match &self.body {
            AnnotationBody::Shape { bounds, .. } | AnnotationBody::Text { bounds, .. } => {
                Rect::from_two_pos(bounds.min, bounds.max)
            }
            body => body
                .points()
                .map(|points| calculate_bounds(points, self.style.line_width * 0.5))
                .unwrap_or(Rect::NOTHING),
        }
    }
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min = Pos2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for point in points {
        min = min.min(*point);
        max = max.max(*point);
    }

    Rect::from_min_max(min, max).expand(padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    fn style() -> AnnotationStyle {
        AnnotationStyle {
            color: Color32::RED,
            line_width: 4.0,
            opacity: 1.0,
            font: None,
        }
    }

    #[test]
    fn ids_are_fresh_per_annotation() {
        let body = AnnotationBody::Pen {
            points: vec![pos2(0.0, 0.0)],
        };
        let a = Annotation::new(1, body.clone(), style());
        let b = Annotation::new(1, body, style());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn stroke_bounds_include_half_width() {
        let body = AnnotationBody::Highlight {
            points: vec![pos2(10.0, 10.0), pos2(20.0, 30.0)],
        };
        let annotation = Annotation::new(2, body, style());
        let bounds = annotation.bounds();
        assert_eq!(bounds.min, pos2(8.0, 8.0));
        assert_eq!(bounds.max, pos2(22.0, 32.0));
        assert_eq!(annotation.kind(), AnnotationKind::Highlight);
        assert_eq!(annotation.shape_variant(), None);
    }

    #[test]
    fn shape_payload_is_exposed() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(5.0, 5.0));
        let body = AnnotationBody::Shape {
            variant: ShapeVariant::Arrow,
            bounds: rect,
        };
        let annotation = Annotation::new(3, body, style());
        assert_eq!(annotation.shape_variant(), Some(ShapeVariant::Arrow));
        assert_eq!(annotation.bounds(), rect);
        assert!(annotation.text().is_none());
    }

    #[test]
    fn reversed_drag_bounds_are_normalized() {
        let body = AnnotationBody::Shape {
            variant: ShapeVariant::Line,
            bounds: Rect::from_min_max(pos2(50.0, 40.0), pos2(10.0, 20.0)),
        };
        let annotation = Annotation::new(1, body, style());
        let bounds = annotation.bounds();
        assert_eq!(bounds.min, pos2(10.0, 20.0));
        assert_eq!(bounds.max, pos2(50.0, 40.0));
        assert!(bounds.contains(pos2(30.0, 30.0)));
    }
}
