use std::cell::RefCell;
use crate::event::{EngineEvent, EventHandler};

/// A simple event bus for broadcasting engine events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// Handlers must not emit on the same bus from inside `handle_event`.
    pub fn emit(&self, event: EngineEvent) {
        log::trace!("event: {:?}", event);
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    struct Counter(Arc<Mutex<usize>>);

    impl EventHandler for Counter {
        fn handle_event(&mut self, _event: &EngineEvent) {
            *self.0.lock() += 1;
        }
    }

    #[test]
    fn every_handler_sees_every_event() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        bus.subscribe(Box::new(Counter(count.clone())));
        bus.subscribe(Box::new(Counter(count.clone())));
        assert_eq!(bus.handler_count(), 2);

        bus.emit(EngineEvent::PropertiesChanged);
        bus.emit(EngineEvent::ClearRequested);
        assert_eq!(*count.lock(), 4);
    }
}
