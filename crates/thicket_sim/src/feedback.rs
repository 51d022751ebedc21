//! Fire-and-forget hooks for audio and other feedback

/// Receives gameplay cues. Calls must not fail and must not feed back into
/// the simulation.
pub trait FeedbackSink {
    /// Player took contact damage
    fn on_player_hurt(&mut self);

    /// Player fired a projectile
    fn on_player_fire(&mut self);
}

/// Sink that ignores every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn on_player_hurt(&mut self) {}

    fn on_player_fire(&mut self) {}
}
