//! Store notifications
//!
//! Key principles:
//! - Handlers register for one event type and only see that type
//! - Events are delivered synchronously, in registration order
//! - Handler returns bool (true = consumed, stops forwarding)

use std::collections::HashMap;

use crate::scene::cube::{Cube, CubeId};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A cube was created
    CubeCreated,
    /// The selection changed (possibly to nothing)
    SelectionChanged,
    /// A cube was deleted
    CubeDeleted,
    /// A cube's position, color, size or theme changed
    CubeUpdated,
}

/// Notification emitted by the cube store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Full snapshot of the new cube
    Created(Cube),
    /// Newly selected cube, or `None` when the selection became empty
    SelectionChanged(Option<Cube>),
    /// Id of the removed cube
    Deleted(CubeId),
    /// Full snapshot of the changed cube
    Updated(Cube),
}

impl StoreEvent {
    /// The type used for handler registration
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Created(_) => EventType::CubeCreated,
            Self::SelectionChanged(_) => EventType::SelectionChanged,
            Self::Deleted(_) => EventType::CubeDeleted,
            Self::Updated(_) => EventType::CubeUpdated,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler: Send {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &StoreEvent) -> bool;
}

/// Adapter that lets a plain closure observe events without consuming them
struct FnHandler<F>(F);

impl<F> EventHandler for FnHandler<F>
where
    F: FnMut(&StoreEvent) + Send,
{
    fn on_event(&mut self, event: &StoreEvent) -> bool {
        (self.0)(event);
        false
    }
}

/// Identifies a registered handler so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Event system with per-type registration
/// Follows chain of responsibility pattern
pub struct EventSystem {
    handlers: HashMap<EventType, Vec<(HandlerId, Box<dyn EventHandler>)>>,
    next_handler_id: u64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_handler_id: 0,
        }
    }

    /// Register a handler for a specific event type
    /// Only handlers registered for this type will be notified
    pub fn register_handler(
        &mut self,
        event_type: EventType,
        handler: Box<dyn EventHandler>,
    ) -> HandlerId {
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        self.handlers.entry(event_type).or_default().push((id, handler));
        id
    }

    /// Register a closure that observes every event of a type
    pub fn observe<F>(&mut self, event_type: EventType, f: F) -> HandlerId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        self.register_handler(event_type, Box::new(FnHandler(f)))
    }

    /// Remove a handler; returns false when it was not registered
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(hid, _)| *hid == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Deliver an event to the handlers registered for its type
    /// Stops on first handler that returns true (consumed)
    pub fn emit(&mut self, event: &StoreEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type()) {
            for (_, handler) in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Number of handlers registered for a type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(event_type, handlers)| (*event_type, handlers.len()))
            .collect();
        counts.sort_by_key(|(event_type, _)| format!("{event_type:?}"));
        f.debug_struct("EventSystem").field("handlers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events_received: Arc<Mutex<Vec<EventType>>>,
        consume: bool,
    }

    impl TestHandler {
        fn new(consume: bool) -> (Self, Arc<Mutex<Vec<EventType>>>) {
            let received = Arc::new(Mutex::new(Vec::new()));
            let handler = Self {
                events_received: Arc::clone(&received),
                consume,
            };
            (handler, received)
        }
    }

    impl EventHandler for TestHandler {
        fn on_event(&mut self, event: &StoreEvent) -> bool {
            self.events_received.lock().unwrap().push(event.event_type());
            self.consume
        }
    }

    #[test]
    fn test_only_matching_type_is_delivered() {
        let mut system = EventSystem::new();
        let (handler, received) = TestHandler::new(false);
        system.register_handler(EventType::CubeDeleted, Box::new(handler));

        system.emit(&StoreEvent::SelectionChanged(None));
        system.emit(&StoreEvent::Deleted(CubeId::new("cube-1")));

        assert_eq!(*received.lock().unwrap(), vec![EventType::CubeDeleted]);
    }

    #[test]
    fn test_event_consumption() {
        let mut system = EventSystem::new();

        // First handler consumes
        let (first, first_received) = TestHandler::new(true);
        system.register_handler(EventType::SelectionChanged, Box::new(first));

        // Second handler should not receive
        let (second, second_received) = TestHandler::new(false);
        system.register_handler(EventType::SelectionChanged, Box::new(second));

        system.emit(&StoreEvent::SelectionChanged(None));

        assert_eq!(first_received.lock().unwrap().len(), 1);
        assert!(second_received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_observe_and_unregister() {
        let mut system = EventSystem::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        let id = system.observe(EventType::CubeDeleted, move |_| {
            *counter.lock().unwrap() += 1;
        });
        assert_eq!(system.handler_count(EventType::CubeDeleted), 1);

        system.emit(&StoreEvent::Deleted(CubeId::new("a")));
        assert!(system.unregister(id));
        assert!(!system.unregister(id));
        system.emit(&StoreEvent::Deleted(CubeId::new("b")));

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(system.handler_count(EventType::CubeDeleted), 0);
    }
}
