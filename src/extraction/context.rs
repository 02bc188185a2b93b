use super::PageImage;
use crate::document::DocumentId;

/// Sequence number of a context request, increasing for the engine's lifetime.
pub type RequestId = u64;

/// A context request, tagged with the document it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextRequest {
    pub id: RequestId,
    pub document: DocumentId,
    pub pages: Vec<u32>,
}

/// What came back for a [`ContextRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct AiContext {
    pub request: ContextRequest,
    pub text: String,
    pub images: Vec<PageImage>,
    /// Some part failed and was replaced by an empty value
    pub degraded: bool,
}

impl AiContext {
    /// Neither text nor images made it through.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.images.is_empty()
    }
}

/// State of the assistant's page context as seen by the views.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContextStatus {
    #[default]
    Idle,
    /// Waiting on the viewer. Stays here for as long as the viewer takes.
    Pending(ContextRequest),
    Ready(AiContext),
    /// The viewer answered with nothing usable
    Unavailable(ContextRequest),
}

impl ContextStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Keeps only the answer to the newest request for the current document.
#[derive(Debug, Default)]
pub struct ContextTracker {
    next_id: RequestId,
    status: ContextStatus,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ContextStatus {
        &self.status
    }

    /// Issue a request. Any earlier request is superseded.
    pub fn begin(&mut self, document: DocumentId, pages: Vec<u32>) -> ContextRequest {
        self.next_id += 1;
        let request = ContextRequest {
            id: self.next_id,
            document,
            pages,
        };
        self.status = ContextStatus::Pending(request.clone());
        request
    }

    /// Store `context` if it answers the pending request for `document`.
    pub fn accept(&mut self, document: Option<DocumentId>, context: AiContext) -> bool {
        let ContextStatus::Pending(pending) = &self.status else {
            log::debug!("Dropping context {}: nothing pending", context.request.id);
            return false;
        };
        if Some(context.request.document) != document || context.request.id != pending.id {
            log::debug!(
                "Dropping stale context {} (waiting for {})",
                context.request.id,
                pending.id
            );
            return false;
        }

        self.status = if context.is_empty() {
            ContextStatus::Unavailable(context.request)
        } else {
            ContextStatus::Ready(context)
        };
        true
    }

    /// Forget everything, e.g. when a different document is loaded.
    pub fn clear(&mut self) {
        self.status = ContextStatus::Idle;
    }
}
