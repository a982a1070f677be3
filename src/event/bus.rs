use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{EventHandler, PresetEvent};

/// Broadcasts preset events to subscribed handlers, in emission order.
///
/// A handler may emit or subscribe while it is being notified. Events emitted
/// during delivery are queued and delivered once the current event has reached
/// every handler; handlers subscribed during delivery start with the next event.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
    queue: RefCell<VecDeque<PresetEvent>>,
    delivering: Cell<bool>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.borrow().len())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn emit(&self, event: PresetEvent) {
        log::debug!("Preset event: {:?}", event);
        self.queue.borrow_mut().push_back(event);
        if self.delivering.replace(true) {
            return;
        }

        loop {
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            // Handlers are moved out while they run so they can reach the bus
            let mut active = std::mem::take(&mut *self.handlers.borrow_mut());
            for handler in &mut active {
                handler.handle_event(&event);
            }
            let mut handlers = self.handlers.borrow_mut();
            let joined = std::mem::replace(&mut *handlers, active);
            handlers.extend(joined);
        }

        self.delivering.set(false);
    }
}
