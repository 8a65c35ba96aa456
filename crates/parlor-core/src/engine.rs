use serde::{Deserialize, Serialize};

/// Core trait that all Parlor game engines implement.
///
/// The shell owns animation scheduling, raw input wiring, and drawing;
/// an engine is a synchronous state machine advanced by `step` and mutated
/// only through its input entry points. None of these methods block or
/// suspend, and no two may be invoked concurrently on the same instance —
/// the shell serializes calls, typically once per animation frame.
pub trait ParlorEngine: Send + Sync {
    /// Engine metadata for the arcade tab bar.
    fn metadata(&self) -> EngineMetadata;

    /// Advance simulated time by `dt_ms` milliseconds. Returns events that
    /// occurred during this step. No-op while paused or after game over.
    fn step(&mut self, dt_ms: f32) -> Vec<EngineEvent>;

    /// Restore the initial configuration-derived state.
    fn reset(&mut self);

    /// Decode and apply an engine-specific input record. Malformed bytes
    /// are dropped without error.
    fn apply_input(&mut self, input: &[u8]);

    /// Serialize the full observable state snapshot.
    fn serialize_state(&self) -> Vec<u8>;

    /// Apply a previously serialized state snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Whether the engine has reached its terminal state.
    fn is_game_over(&self) -> bool;

    /// Current score.
    fn score(&self) -> u32;

    /// Called when the tab loses focus. A paused engine ignores `step`.
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    /// Suggested step cadence in Hz. Grid games may run coarser.
    fn tick_rate(&self) -> f32 {
        60.0
    }
}

/// Engine metadata for the arcade tab bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMetadata {
    pub name: String,
    pub description: String,
    /// Suggested canvas size in CSS pixels.
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Events emitted by an engine during `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    ScoreUpdate { score: u32 },
    LapCompleted { laps: u32 },
    GameOver,
}

/// Generates the 6 boilerplate `ParlorEngine` methods that are identical
/// across all engines: `serialize_state`, `apply_state`, `pause`, `resume`,
/// `is_game_over`, `score`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have `game_over: bool` and
/// `score: u32` fields.
#[macro_export]
macro_rules! parlor_engine_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("engine state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_game_over(&self) -> bool {
            self.state.game_over
        }

        fn score(&self) -> u32 {
            self.state.score
        }
    };
}
