pub mod engine;
pub mod geom;
pub mod registry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::engine::{EngineEvent, ParlorEngine};

    /// Run N engine steps of `dt_ms` each, returning all accumulated events.
    pub fn run_steps(engine: &mut dyn ParlorEngine, n: usize, dt_ms: f32) -> Vec<EngineEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(engine.step(dt_ms));
        }
        all_events
    }

    /// Assert that the engine's serialized state differs from `before`.
    pub fn assert_engine_state_changed(engine: &dyn ParlorEngine, before: &[u8]) {
        let after = engine.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Engine state should have changed after operation"
        );
    }

    // ================================================================
    // Engine Trait Contract Tests
    // ================================================================
    // These functions form a generic test suite that every ParlorEngine
    // implementation must pass. Game crates call them from their own
    // #[cfg(test)] modules with a concrete engine instance and valid input.

    /// `step(dt > 0)` must advance the observable state (at minimum the
    /// elapsed-time accumulator).
    pub fn contract_step_advances_state(engine: &mut dyn ParlorEngine) {
        let before = engine.serialize_state();
        engine.step(16.0);
        let after = engine.serialize_state();
        assert_ne!(before, after, "step(dt>0) must advance engine state");
    }

    /// `apply_input` with valid data followed by `step` must change state.
    pub fn contract_apply_input_changes_state(engine: &mut dyn ParlorEngine, valid_input: &[u8]) {
        let before = engine.serialize_state();
        engine.apply_input(valid_input);
        engine.step(16.0);
        let after = engine.serialize_state();
        assert_ne!(before, after, "State must change after apply_input + step");
    }

    /// serialize_state → apply_state roundtrip: the engine must produce
    /// equivalent state after applying its own serialized output. We verify
    /// by doing serialize→apply→serialize→apply→serialize and checking the
    /// last two serializations are identical (stable after one roundtrip).
    pub fn contract_state_roundtrip_preserves(engine: &mut dyn ParlorEngine) {
        let state_a = engine.serialize_state();
        engine.apply_state(&state_a);
        let state_b = engine.serialize_state();
        engine.apply_state(&state_b);
        let state_c = engine.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze the state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(engine: &mut dyn ParlorEngine) {
        engine.pause();
        let before = engine.serialize_state();
        engine.step(16.0);
        let during_pause = engine.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        engine.resume();
        engine.step(16.0);
        let after_resume = engine.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// `step` on a terminal engine must return the frozen terminal state.
    /// The caller hands over an engine already in its game-over state.
    pub fn contract_terminal_state_is_frozen(engine: &mut dyn ParlorEngine) {
        assert!(
            engine.is_game_over(),
            "caller must provide an engine in its terminal state"
        );
        let before = engine.serialize_state();
        let events = engine.step(16.0);
        let after = engine.serialize_state();
        assert_eq!(before, after, "Terminal state must not change on step");
        assert!(events.is_empty(), "Terminal step must emit no events");
    }

    /// `reset` must clear the score and the terminal flag.
    pub fn contract_reset_clears_terminal(engine: &mut dyn ParlorEngine) {
        engine.reset();
        assert_eq!(engine.score(), 0, "reset must clear the score");
        assert!(!engine.is_game_over(), "reset must clear the terminal flag");
    }
}
