//! Event subscribers.
//!
//! Rendering, audio and UI register a [`GameListener`] with the game; every
//! event is handed to every listener in publication order.

use std::sync::mpsc::Sender;

use crate::models::GameEvent;

pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Forward events into a channel, e.g. to a render thread.
impl GameListener for Sender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            log::debug!("event receiver dropped, discarding {:?}", event);
        }
    }
}

/// Ordered fan-out to a fixed set of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn GameListener>>,
}

impl EventBus {
    pub fn new(listeners: Vec<Box<dyn GameListener>>) -> Self {
        Self { listeners }
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&mut self, events: &[GameEvent]) {
        for event in events {
            for listener in self.listeners.iter_mut() {
                listener.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}
