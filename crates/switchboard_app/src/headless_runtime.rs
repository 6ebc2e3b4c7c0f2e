//! Deterministic frame loop for headless scenario runs.
//!
//! Each frame moves the engine clock forward, firing every timer that falls
//! due, then hands the settled engine to the frame callback.

use anyhow::{bail, Result};
use switchboard_widgets::Engine;

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Probe sampling interval in frames (1 = every frame, 4 = every 4 frames).
    pub probe_every_frames: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
            probe_every_frames: 4,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// How far this frame moved the clock
    pub frame_ms: u64,
    /// Engine time after the frame
    pub now_ms: u64,
    /// Timers that fired during the frame
    pub fired_timers: usize,
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget against `engine`
    ///
    /// `frame_ms` gives each frame's clock step; without it frames step by
    /// `tick_ms`. Returns the total time advanced.
    pub fn run<A, F>(
        cfg: HeadlessRunConfig,
        engine: &mut Engine,
        mut frame_ms: A,
        mut on_frame: F,
    ) -> Result<u64>
    where
        A: FnMut(u32) -> Option<u64>,
        F: FnMut(&HeadlessContext, &Engine),
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        let mut advanced = 0u64;
        for frame in 0..cfg.max_frames {
            let step = frame_ms(frame).unwrap_or(cfg.tick_ms);
            let fired_timers = engine.advance(step);
            advanced = advanced.saturating_add(step);
            on_frame(
                &HeadlessContext {
                    frame_index: frame,
                    frame_ms: step,
                    now_ms: engine.now_ms(),
                    fired_timers,
                },
                engine,
            );
        }

        Ok(advanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use switchboard_dom::{Document, NodeSpec};
    use switchboard_widgets::EngineConfig;

    fn modal_engine() -> Engine {
        let doc = Document::from_specs(&[NodeSpec::new("div").id("m").class("modal")]);
        let mut engine = Engine::new(doc, EngineConfig::default());
        engine.init();
        engine
    }

    #[test]
    fn test_frames_advance_engine_clock() {
        let cfg = HeadlessRunConfig {
            max_frames: 3,
            tick_ms: 10,
            ..HeadlessRunConfig::default()
        };
        let mut engine = modal_engine();
        let mut seen = Vec::new();
        let advanced = HeadlessRuntime::run(cfg, &mut engine, |_| None, |ctx, _| {
            seen.push((ctx.frame_index, ctx.now_ms));
        })
        .unwrap();
        assert_eq!(advanced, 30);
        assert_eq!(seen, vec![(0, 10), (1, 20), (2, 30)]);
        assert_eq!(engine.now_ms(), 30);
    }

    #[test]
    fn test_frame_fires_due_timers() {
        let cfg = HeadlessRunConfig {
            max_frames: 10,
            tick_ms: 16,
            ..HeadlessRunConfig::default()
        };
        let mut engine = modal_engine();
        let m = engine.document().get_element_by_id("m").unwrap();
        engine.open_modal(m);
        engine.close_modal(m);

        let mut fired_at = Vec::new();
        HeadlessRuntime::run(cfg, &mut engine, |_| None, |ctx, engine| {
            if ctx.fired_timers > 0 {
                fired_at.push(ctx.frame_index);
                assert_eq!(engine.document().style(m, "display"), Some("none"));
            }
        })
        .unwrap();
        // 150 ms falls in the tenth 16 ms frame
        assert_eq!(fired_at, vec![9]);
    }

    #[test]
    fn test_custom_frame_steps() {
        let cfg = HeadlessRunConfig {
            max_frames: 2,
            ..HeadlessRunConfig::default()
        };
        let mut engine = modal_engine();
        let steps = [5, 1];
        let advanced = HeadlessRuntime::run(
            cfg,
            &mut engine,
            |frame| steps.get(frame as usize).copied(),
            |_, _| {},
        )
        .unwrap();
        assert_eq!(advanced, 6);
    }

    #[test]
    fn test_rejects_zero_budget() {
        let mut engine = modal_engine();
        let cfg = HeadlessRunConfig {
            max_frames: 0,
            ..HeadlessRunConfig::default()
        };
        assert!(HeadlessRuntime::run(cfg, &mut engine, |_| None, |_, _| {}).is_err());
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..HeadlessRunConfig::default()
        };
        assert!(HeadlessRuntime::run(cfg, &mut engine, |_| None, |_, _| {}).is_err());
        assert_eq!(engine.now_ms(), 0);
    }
}
