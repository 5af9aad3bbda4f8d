use crate::{
    direct::{
        directive::{TransitionDirective, verify_object_order},
        director::Director,
    },
    encode::sink::{DirectiveSink, SinkConfig},
    foundation::{
        core::{Fps, FrameRange},
        error::{ReelError, ReelResult},
    },
    layout::camera::Camera,
    scene::graph::SceneGraph,
    settings::ReelSettings,
    stage::{
        machine::{MachineState, SceneMachine, StageFailure, StageId},
        script::SceneScript,
    },
};

#[derive(Clone, Debug, serde::Serialize)]
/// One step as it ran: absolute timing within its stage and the directives it produced.
pub struct ExecutedStep {
    pub index: usize,
    pub label: String,
    pub start_s: f64,
    pub duration_s: f64,
    pub frames: FrameRange,
    pub directives: Vec<TransitionDirective>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct StageTimeline {
    pub stage: StageId,
    pub steps: Vec<ExecutedStep>,
    pub duration_s: f64,
    pub frames: FrameRange,
    /// Objects on screen when the stage ends, in painter's order.
    pub final_objects: SceneGraph,
    pub final_camera: Option<Camera>,
}

impl StageTimeline {
    pub fn directives(&self) -> impl Iterator<Item = &TransitionDirective> {
        self.steps.iter().flat_map(|s| s.directives.iter())
    }
}

/// The whole resolved plan handed to the rendering engine.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    pub fps: Fps,
    pub time_scale: f64,
    pub stages: Vec<StageTimeline>,
}

impl Timeline {
    pub fn stage(&self, id: StageId) -> Option<&StageTimeline> {
        self.stages.iter().find(|s| s.stage == id)
    }

    pub fn duration_s(&self) -> f64 {
        self.stages.iter().map(|s| s.duration_s).sum()
    }
}

/// Single-threaded executor: drives the stage machine and one director per stage.
#[derive(Debug)]
pub struct Pipeline {
    settings: ReelSettings,
    machine: SceneMachine,
}

impl Pipeline {
    pub fn new(settings: ReelSettings) -> ReelResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            machine: SceneMachine::new(),
        })
    }

    pub fn state(&self) -> &MachineState {
        self.machine.state()
    }

    /// Run every script in order, streaming directives into `sink`.
    ///
    /// The first failing step stops the run; the machine records the stage and step.
    #[tracing::instrument(skip(self, scripts, sink), fields(stages = scripts.len()))]
    pub fn run(
        &mut self,
        scripts: &[SceneScript],
        sink: &mut dyn DirectiveSink,
    ) -> ReelResult<Timeline> {
        let mut stages = Vec::with_capacity(scripts.len());
        for script in scripts {
            if let Err(e) = self.machine.enter(script.stage) {
                tracing::warn!(stage = %script.stage, error = %e, "stage out of order");
                self.machine.fail(StageFailure {
                    stage: script.stage,
                    step: None,
                    reason: e.to_string(),
                });
                return Err(e);
            }
            let mut cursor = None;
            match run_stage(&self.settings, script, sink, &mut cursor) {
                Ok(timeline) => {
                    tracing::info!(
                        stage = %script.stage,
                        steps = timeline.steps.len(),
                        duration_s = timeline.duration_s,
                        "stage finished"
                    );
                    self.machine.exit(script.stage)?;
                    stages.push(timeline);
                }
                Err(e) => {
                    tracing::warn!(stage = %script.stage, error = %e, "stage failed");
                    self.machine.fail(StageFailure {
                        stage: script.stage,
                        step: cursor,
                        reason: e.to_string(),
                    });
                    return Err(e);
                }
            }
        }
        if !self.machine.is_completed() {
            return Err(ReelError::validation(format!(
                "run ended while {}",
                self.machine.state()
            )));
        }
        Ok(Timeline {
            fps: self.settings.fps,
            time_scale: self.settings.time_scale,
            stages,
        })
    }
}

fn run_stage(
    settings: &ReelSettings,
    script: &SceneScript,
    sink: &mut dyn DirectiveSink,
    cursor: &mut Option<(usize, String)>,
) -> ReelResult<StageTimeline> {
    script.validate_steps().map_err(|(index, e)| {
        *cursor = script.steps.get(index).map(|s| (index, s.label.clone()));
        e
    })?;
    let fps = settings.fps;
    let mut director = Director::new(script.capabilities, script.camera, settings.time_scale)?;
    sink.begin_stage(SinkConfig {
        stage: script.stage,
        fps,
        camera: script.camera,
    })?;

    let mut clock_s = 0.0;
    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        *cursor = Some((index, step.label.clone()));
        let duration_s = director.scaled_duration(step);
        let directives = director.apply(step, clock_s)?;
        for d in &directives {
            sink.push_directive(d)?;
        }
        let frames = FrameRange::new(
            fps.secs_to_frame(clock_s),
            fps.secs_to_frame(clock_s + duration_s),
        )?;
        tracing::debug!(
            index,
            label = %step.label,
            start_s = clock_s,
            duration_s,
            frames = frames.len_frames(),
            directives = directives.len(),
            "step"
        );
        steps.push(ExecutedStep {
            index,
            label: step.label.clone(),
            start_s: clock_s,
            duration_s,
            frames,
            directives,
        });
        clock_s += duration_s;
    }
    *cursor = None;

    let all: Vec<TransitionDirective> = steps
        .iter()
        .flat_map(|s| s.directives.iter().cloned())
        .collect();
    verify_object_order(&all)?;
    sink.end_stage(clock_s)?;

    let frames = FrameRange::new(fps.secs_to_frame(0.0), fps.secs_to_frame(clock_s))?;
    let (final_objects, final_camera) = director.into_parts();
    Ok(StageTimeline {
        stage: script.stage,
        steps,
        duration_s: clock_s,
        frames,
        final_objects,
        final_camera,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stage/pipeline.rs"]
mod tests;
