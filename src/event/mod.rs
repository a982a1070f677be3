mod bus;
mod events;

pub use bus::EventBus;
pub use events::PresetEvent;

/// Receives every event emitted on the [`EventBus`] it is subscribed to
pub trait EventHandler {
    fn handle_event(&mut self, event: &PresetEvent);
}
