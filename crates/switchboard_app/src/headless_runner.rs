//! Scenario runner that drives the widget engine through headless steps.

use crate::config::AppConfig;
use crate::headless_assert::{
    evaluate_assert_attr, evaluate_assert_class, evaluate_assert_count, evaluate_assert_style,
    AssertionResult,
};
use crate::headless_report::{FrameSample, HeadlessReport};
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::{Context, Result};
use switchboard_dom::{Document, NodeId, Selector};
use switchboard_widgets::Engine;
use tracing::{debug, info};

/// Temporal context passed into diagnostics probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeContext {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub step_index: usize,
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn into_report(self) -> HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON, sampling engine state into the report.
pub fn run_scenario(input: &str, config: &AppConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, config)
}

/// Execute a pre-loaded scenario, sampling engine state into the report.
pub fn run_loaded_scenario(scenario: &HeadlessScenario, config: &AppConfig) -> Result<RunOutcome> {
    let mut samples = Vec::new();
    let mut probe = |ctx: &ProbeContext, engine: &Engine| {
        samples.push(FrameSample {
            frame: ctx.elapsed_frames,
            elapsed_ms: ctx.elapsed_ms,
            open_modals: engine.open_modals().len(),
            pending_timers: engine.pending_timers(),
        });
    };
    let outcome = run_loaded_scenario_with_probe(scenario, config, &mut probe)?;
    Ok(match outcome {
        RunOutcome::Passed { report } => RunOutcome::Passed {
            report: report.with_samples(samples),
        },
        RunOutcome::Failed { report } => RunOutcome::Failed {
            report: report.with_samples(samples),
        },
    })
}

/// Execute a pre-loaded scenario with a custom probe.
///
/// The probe runs every `probe_every_frames` frames during `wait` and
/// `tick` steps, and on the last frame of each such step.
pub fn run_loaded_scenario_with_probe<F>(
    scenario: &HeadlessScenario,
    config: &AppConfig,
    probe: &mut F,
) -> Result<RunOutcome>
where
    F: FnMut(&ProbeContext, &Engine),
{
    let mut engine = Engine::new(
        Document::from_specs(&scenario.document),
        config.engine_config(),
    );
    engine.init();
    info!(
        bindings = engine.registry().binding_count(),
        targets = engine.registry().target_count(),
        "scenario document loaded"
    );

    let mut run = RunState {
        engine,
        runtime_cfg: config.run_config(),
        elapsed_frames: 0,
        elapsed_ms: 0,
    };

    for (step_index, step) in scenario.steps.iter().enumerate() {
        debug!(step_index, step = step.name(), "scenario step");
        if let Err(failed) = run.step(step_index, step, probe)? {
            let (code, message) = match failed {
                AssertionResult::Failed { code, message } => (code, message),
                AssertionResult::Passed => continue,
            };
            let report = HeadlessReport::failed(
                step.name(),
                code,
                step_index,
                message,
                run.elapsed_frames,
                run.elapsed_ms,
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(run.elapsed_frames, run.elapsed_ms),
    })
}

struct RunState {
    engine: Engine,
    runtime_cfg: HeadlessRunConfig,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

/// Inner result: `Err` carries a step failure into the report
type StepResult = std::result::Result<(), AssertionResult>;

impl RunState {
    fn step<F>(&mut self, step_index: usize, step: &ScenarioStep, probe: &mut F) -> Result<StepResult>
    where
        F: FnMut(&ProbeContext, &Engine),
    {
        let selector = match step.selector() {
            Some(source) => Some(
                Selector::parse(source)
                    .with_context(|| format!("step {step_index} ({})", step.name()))?,
            ),
            None => None,
        };

        let result = match (step, selector.as_ref()) {
            (ScenarioStep::ClickOutside, _) => {
                self.engine.click_outside();
                Ok(())
            }
            (ScenarioStep::Key { key }, _) => {
                self.engine.key_down(*key);
                Ok(())
            }
            (ScenarioStep::Wait { ms }, _) => {
                let frames = wait_frames(*ms, self.runtime_cfg.tick_ms);
                let tick = self.runtime_cfg.tick_ms;
                let mut remaining_ms = *ms;
                self.run_sampled_frames(frames, step_index, probe, || {
                    let step_ms = remaining_ms.min(tick);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                })?;
                Ok(())
            }
            (ScenarioStep::Tick { frames }, _) => {
                let tick = self.runtime_cfg.tick_ms;
                self.run_sampled_frames(*frames, step_index, probe, || tick)?;
                Ok(())
            }
            (ScenarioStep::AssertCount { count, .. }, Some(selector)) => {
                into_step_result(evaluate_assert_count(self.engine.document(), selector, *count))
            }
            (step, Some(selector)) => self.element_step(step, selector),
            (_, None) => Ok(()),
        };
        Ok(result)
    }

    /// Steps acting on or checking the first element matching `selector`
    fn element_step(&mut self, step: &ScenarioStep, selector: &Selector) -> StepResult {
        let doc = self.engine.document();
        let Some(node) = doc.select(selector).into_iter().next() else {
            return Err(AssertionResult::Failed {
                code: "missing_element".to_string(),
                message: format!("{selector}: element not found"),
            });
        };

        match step {
            ScenarioStep::AssertClass { class, present, .. } => {
                into_step_result(evaluate_assert_class(doc, selector, class, *present))
            }
            ScenarioStep::AssertAttr { name, value, .. } => {
                into_step_result(evaluate_assert_attr(doc, selector, name, value.as_deref()))
            }
            ScenarioStep::AssertStyle {
                property, value, ..
            } => into_step_result(evaluate_assert_style(
                doc,
                selector,
                property,
                value.as_deref(),
            )),
            _ => {
                self.apply(step, node);
                Ok(())
            }
        }
    }

    fn apply(&mut self, step: &ScenarioStep, node: NodeId) {
        match step {
            ScenarioStep::Click { .. } => self.engine.click(node),
            ScenarioStep::PointerEnter { .. } => self.engine.pointer_enter(node),
            ScenarioStep::PointerLeave { .. } => self.engine.pointer_leave(node),
            ScenarioStep::Remove { .. } => {
                self.engine.remove_element(node);
            }
            ScenarioStep::OpenModal { .. } => {
                self.engine.open_modal(node);
            }
            ScenarioStep::CloseModal { .. } => {
                self.engine.close_modal(node);
            }
            _ => {}
        }
    }

    fn run_sampled_frames<F, A>(
        &mut self,
        frames: u32,
        step_index: usize,
        probe: &mut F,
        mut frame_ms: A,
    ) -> Result<()>
    where
        F: FnMut(&ProbeContext, &Engine),
        A: FnMut() -> u64,
    {
        if frames == 0 {
            probe(&self.probe_context(step_index), &self.engine);
            return Ok(());
        }

        let mut cfg = self.runtime_cfg;
        cfg.max_frames = frames;
        let probe_every = cfg.probe_every_frames.max(1);
        let elapsed_frames = &mut self.elapsed_frames;
        let elapsed_ms = &mut self.elapsed_ms;
        HeadlessRuntime::run(
            cfg,
            &mut self.engine,
            |_| Some(frame_ms()),
            |ctx, engine| {
                *elapsed_frames = elapsed_frames.saturating_add(1);
                *elapsed_ms = elapsed_ms.saturating_add(ctx.frame_ms);
                if ctx.fired_timers > 0 {
                    debug!(
                        frame = ctx.frame_index,
                        now_ms = ctx.now_ms,
                        fired = ctx.fired_timers,
                        "timers fired"
                    );
                }

                let sampled = ctx.frame_index + 1;
                if sampled % probe_every == 0 || sampled == frames {
                    let probe_ctx = ProbeContext {
                        elapsed_frames: *elapsed_frames,
                        elapsed_ms: *elapsed_ms,
                        step_index,
                    };
                    probe(&probe_ctx, engine);
                }
            },
        )?;

        Ok(())
    }

    fn probe_context(&self, step_index: usize) -> ProbeContext {
        ProbeContext {
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_ms,
            step_index,
        }
    }
}

fn into_step_result(result: AssertionResult) -> StepResult {
    match result {
        AssertionResult::Passed => Ok(()),
        failed => Err(failed),
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
