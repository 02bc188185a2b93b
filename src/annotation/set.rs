use std::sync::Arc;

use super::{Annotation, AnnotationId};

/// Every annotation in the document at one point in history.
///
/// Immutable: edits produce a new set and leave this one untouched, so a
/// snapshot held by the history can never change underneath it. Clones share
/// storage. Order is insertion order, which is also paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    annotations: Arc<[Annotation]>,
}

impl AnnotationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new set with `annotation` appended on top.
    pub fn with(&self, annotation: Annotation) -> Self {
        let mut annotations = self.annotations.to_vec();
        annotations.push(annotation);
        Self {
            annotations: annotations.into(),
        }
    }

    /// A new set without the annotation `id`, or `None` if it isn't present.
    pub fn without(&self, id: AnnotationId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let annotations: Vec<Annotation> = self
            .annotations
            .iter()
            .filter(|a| a.id() != id)
            .cloned()
            .collect();
        Some(Self {
            annotations: annotations.into(),
        })
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Annotations on one page, bottom to top.
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.page() == page)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self {
            annotations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationBody, AnnotationStyle};
    use egui::{Color32, pos2};

    fn pen(page: u32) -> Annotation {
        Annotation::new(
            page,
            AnnotationBody::Pen {
                points: vec![pos2(1.0, 1.0), pos2(2.0, 2.0)],
            },
            AnnotationStyle {
                color: Color32::BLACK,
                line_width: 2.0,
                opacity: 1.0,
                font: None,
            },
        )
    }

    #[test]
    fn with_leaves_original_untouched() {
        let base = AnnotationSet::empty();
        let next = base.with(pen(1));
        assert!(base.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn without_missing_id_is_none() {
        let set = AnnotationSet::empty().with(pen(1));
        assert!(set.without(pen(1).id()).is_none());
        let id = set.as_slice()[0].id();
        let removed = set.without(id).unwrap();
        assert!(removed.is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn on_page_keeps_insertion_order() {
        let a = pen(1);
        let b = pen(2);
        let c = pen(1);
        let ids = [a.id(), c.id()];
        let set: AnnotationSet = [a, b, c].into_iter().collect();
        let on_first: Vec<_> = set.on_page(1).map(Annotation::id).collect();
        assert_eq!(on_first, ids);
    }
}
