use std::collections::BTreeSet;

use crate::{
    direct::{
        director::{Capabilities, check_step_conflicts},
        step::{Change, SceneStep, StepBody},
    },
    foundation::error::{ReelError, ReelResult},
    layout::camera::Camera,
    scene::model::ObjectId,
    stage::machine::StageId,
};

/// The ordered steps of one stage together with what the stage is allowed to do.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneScript {
    pub stage: StageId,
    pub capabilities: Capabilities,
    /// Starting viewport; required when any step moves the camera.
    pub camera: Option<Camera>,
    pub steps: Vec<SceneStep>,
}

impl SceneScript {
    pub fn new(stage: StageId, capabilities: Capabilities, camera: Option<Camera>) -> Self {
        Self {
            stage,
            capabilities,
            camera,
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: SceneStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn push(&mut self, step: SceneStep) {
        self.steps.push(step);
    }

    /// Unscaled script duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.steps.iter().map(SceneStep::duration_s).sum()
    }

    /// Check the script without resolving any geometry.
    ///
    /// Every referenced object must have been produced by an earlier step
    /// ([`ReelError::StepOrderViolation`]) and not removed since
    /// ([`ReelError::StaleReference`]). Camera steps must fit the stage's capabilities
    /// and waits must be finite and non-negative.
    pub fn validate(&self) -> ReelResult<()> {
        self.validate_steps().map_err(|(_, e)| e)
    }

    /// Like [`SceneScript::validate`], but also reports the index of the offending step.
    pub fn validate_steps(&self) -> Result<(), (usize, ReelError)> {
        let mut live: BTreeSet<&ObjectId> = BTreeSet::new();
        let mut removed: BTreeSet<&ObjectId> = BTreeSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            self.check_step(step, &mut live, &mut removed)
                .map_err(|e| (index, e))?;
        }
        Ok(())
    }

    fn check_step<'a>(
        &self,
        step: &'a SceneStep,
        live: &mut BTreeSet<&'a ObjectId>,
        removed: &mut BTreeSet<&'a ObjectId>,
    ) -> ReelResult<()> {
        if let StepBody::Wait { secs } = step.body
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(ReelError::validation(format!(
                "step '{}' waits {secs}s; waits must be finite and >= 0",
                step.label
            )));
        }
        check_step_conflicts(step)?;
        for play in step.plays() {
            let change = &play.change;
            if let Change::Camera { .. } = change {
                self.capabilities.permit(&step.label, change)?;
                if self.camera.is_none() {
                    return Err(ReelError::validation(format!(
                        "step '{}' moves the camera but stage {} has none",
                        step.label, self.stage
                    )));
                }
            }
            for id in change.references() {
                if live.contains(id) {
                    continue;
                }
                return Err(if removed.contains(id) {
                    ReelError::stale_reference(step.label.as_str(), id.as_str())
                } else {
                    ReelError::step_order(step.label.as_str(), id.as_str())
                });
            }
            for id in change.consumes() {
                live.remove(id);
                removed.insert(id);
            }
            for id in change.produces() {
                if !live.insert(id) {
                    return Err(ReelError::validation(format!(
                        "step '{}' produces '{id}' which is already in the scene",
                        step.label
                    )));
                }
                removed.remove(id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/script.rs"]
mod tests;
