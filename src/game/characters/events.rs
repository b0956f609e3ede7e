// Discrete actor events for audio and effects consumers

use crate::core::Rect;

/// Something that happened to an actor during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorEvent {
    /// A jump was accepted
    Jumped,
    /// Ground contact resumed after being airborne
    Landed,
    /// An attack started
    AttackStarted,
    /// The attack's hit window is open with this world rectangle
    AttackHitActive(Rect),
}

impl ActorEvent {
    /// Name of the sound cue played for this event, if any
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            Self::Jumped => Some("jump"),
            Self::Landed => Some("land"),
            Self::AttackStarted => Some("attack"),
            Self::AttackHitActive(_) => None,
        }
    }
}

/// Receiver for actor events, injected into each step
pub trait EventSink {
    fn emit(&mut self, event: ActorEvent);
}

impl EventSink for Vec<ActorEvent> {
    fn emit(&mut self, event: ActorEvent) {
        self.push(event);
    }
}

/// Sink that writes every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: ActorEvent) {
        match event.sound_cue() {
            Some(cue) => log::debug!("{:?} (cue: {})", event, cue),
            None => log::trace!("{:?}", event),
        }
    }
}
