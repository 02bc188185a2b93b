use egui::{Pos2, Rect};

use super::{AnnotationBody, AnnotationKind};
use crate::tool::ShapeVariant;

/// Shape of a finished pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Points(Vec<Pos2>),
    Bounds(Rect),
}

/// A completed pointer gesture reported by the viewer, not yet an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub page: u32,
    pub kind: AnnotationKind,
    pub geometry: Geometry,
    /// Typed content, for text gestures
    pub text: Option<String>,
}

impl Gesture {
    pub fn stroke(page: u32, kind: AnnotationKind, points: Vec<Pos2>) -> Self {
        Self {
            page,
            kind,
            geometry: Geometry::Points(points),
            text: None,
        }
    }

    pub fn shape(page: u32, bounds: Rect) -> Self {
        Self {
            page,
            kind: AnnotationKind::Shape,
            geometry: Geometry::Bounds(bounds),
            text: None,
        }
    }

    pub fn text(page: u32, bounds: Rect, content: impl Into<String>) -> Self {
        Self {
            page,
            kind: AnnotationKind::Text,
            geometry: Geometry::Bounds(bounds),
            text: Some(content.into()),
        }
    }

    /// Pair the gesture's geometry with its kind, or `None` if they don't fit
    /// together (points for a shape, an empty stroke, blank text, ...).
    pub fn into_body(self, variant: ShapeVariant) -> Option<AnnotationBody> {
        match (self.kind, self.geometry) {
            (kind, Geometry::Points(points)) if kind.is_stroke() => {
                if points.is_empty() || points.iter().any(|p| !p.is_finite()) {
                    return None;
                }
                Some(match kind {
                    AnnotationKind::Pen => AnnotationBody::Pen { points },
                    AnnotationKind::Highlight => AnnotationBody::Highlight { points },
                    _ => AnnotationBody::EraserMark { points },
                })
            }
            (AnnotationKind::Shape, Geometry::Bounds(bounds)) if bounds.is_finite() => {
                Some(AnnotationBody::Shape { variant, bounds })
            }
            (AnnotationKind::Text, Geometry::Bounds(bounds)) if bounds.is_finite() => {
                let content = self.text.filter(|t| !t.trim().is_empty())?;
                Some(AnnotationBody::Text { content, bounds })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn mismatched_geometry_is_rejected() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let pen_with_bounds = Gesture {
            page: 1,
            kind: AnnotationKind::Pen,
            geometry: Geometry::Bounds(rect),
            text: None,
        };
        assert!(pen_with_bounds.into_body(ShapeVariant::Rectangle).is_none());

        let shape_with_points = Gesture {
            page: 1,
            kind: AnnotationKind::Shape,
            geometry: Geometry::Points(vec![pos2(0.0, 0.0)]),
            text: None,
        };
        assert!(shape_with_points.into_body(ShapeVariant::Rectangle).is_none());
    }

    #[test]
    fn eraser_points_become_eraser_mark() {
        let gesture = Gesture::stroke(1, AnnotationKind::EraserMark, vec![pos2(3.0, 4.0)]);
        let body = gesture.into_body(ShapeVariant::Circle).unwrap();
        assert_eq!(body.kind(), AnnotationKind::EraserMark);
    }

    #[test]
    fn blank_text_is_rejected() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(Gesture::text(1, rect, "  ").into_body(ShapeVariant::Rectangle).is_none());
        assert!(Gesture::text(1, rect, "note").into_body(ShapeVariant::Rectangle).is_some());
    }
}
