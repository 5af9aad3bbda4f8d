use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    direct::{
        directive::{
            TransitionDirective, TransitionKind, Timing, plan_camera, plan_replace,
            plan_transition,
        },
        step::{Change, SceneStep, StepBody},
    },
    foundation::error::{ReelError, ReelResult},
    layout::camera::Camera,
    scene::{
        graph::SceneGraph,
        model::{ObjectId, Visual},
    },
};

/// Optional camera features a stage composes in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// The stage may pan the camera.
    pub camera: bool,
    /// The stage may change the camera frame width.
    pub zoom: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        camera: false,
        zoom: false,
    };
    pub const CAMERA: Self = Self {
        camera: true,
        zoom: false,
    };
    pub const CAMERA_AND_ZOOM: Self = Self {
        camera: true,
        zoom: true,
    };

    /// Check that a camera change only uses what the stage has.
    pub fn permit(self, step: &str, change: &Change) -> ReelResult<()> {
        if change.needs_pan() && !self.camera {
            return Err(ReelError::validation(format!(
                "step '{step}' pans the camera but the stage has no camera capability"
            )));
        }
        if change.needs_zoom() && !self.zoom {
            return Err(ReelError::validation(format!(
                "step '{step}' changes the camera width but the stage has no zoom capability"
            )));
        }
        Ok(())
    }
}

/// Reject steps in which two changes touch the same object.
pub fn check_step_conflicts(step: &SceneStep) -> ReelResult<()> {
    let mut seen: BTreeSet<&ObjectId> = BTreeSet::new();
    for play in step.plays() {
        for id in play.change.touches() {
            if !seen.insert(id) {
                return Err(ReelError::validation(format!(
                    "step '{}' changes '{id}' more than once",
                    step.label
                )));
            }
        }
    }
    Ok(())
}

/// Resolves scene steps against the live object set and emits timed directives.
///
/// The director owns the stage's [`SceneGraph`] and camera; both change only through
/// [`Director::apply`], one step at a time.
#[derive(Debug)]
pub struct Director {
    graph: SceneGraph,
    camera: Option<Camera>,
    caps: Capabilities,
    time_scale: f64,
}

impl Director {
    pub fn new(caps: Capabilities, camera: Option<Camera>, time_scale: f64) -> ReelResult<Self> {
        if !time_scale.is_finite() || time_scale <= 0.0 {
            return Err(ReelError::validation(format!(
                "time scale must be finite and > 0, got {time_scale}"
            )));
        }
        Ok(Self {
            graph: SceneGraph::new(),
            camera,
            caps,
            time_scale,
        })
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    pub fn into_parts(self) -> (SceneGraph, Option<Camera>) {
        (self.graph, self.camera)
    }

    /// Wall duration of `step` after time scaling.
    pub fn scaled_duration(&self, step: &SceneStep) -> f64 {
        step.duration_s() * self.time_scale
    }

    /// Resolve `step` starting at `clock_s` (seconds from stage start).
    ///
    /// Changes are resolved in declaration order and the registry reflects the step's end
    /// state afterwards. Waits emit nothing.
    #[tracing::instrument(skip(self, step), fields(step = %step.label))]
    pub fn apply(&mut self, step: &SceneStep, clock_s: f64) -> ReelResult<Vec<TransitionDirective>> {
        let StepBody::Play {
            plays,
            run_time_s,
            ease,
        } = &step.body
        else {
            return Ok(Vec::new());
        };
        check_step_conflicts(step)?;

        let mut out = Vec::new();
        for play in plays {
            let secs = play.run_time_s.unwrap_or(*run_time_s);
            if !secs.is_finite() || secs < 0.0 {
                return Err(ReelError::validation(format!(
                    "step '{}' has invalid run time {secs}",
                    step.label
                )));
            }
            let timing = Timing::new(clock_s, secs * self.time_scale, *ease)?;
            out.extend(self.apply_change(&step.label, &play.change, timing)?);
        }
        Ok(out)
    }

    fn apply_change(
        &mut self,
        step: &str,
        change: &Change,
        timing: Timing,
    ) -> ReelResult<Vec<TransitionDirective>> {
        let mut out = Vec::new();
        match change {
            Change::Add { objects } => self.appear(TransitionKind::Add, objects, timing, &mut out)?,
            Change::Create { objects } => {
                self.appear(TransitionKind::Create, objects, timing, &mut out)?
            }
            Change::FadeIn { objects } => {
                self.appear(TransitionKind::FadeIn, objects, timing, &mut out)?
            }
            Change::Remove { ids } => {
                self.vanish(step, TransitionKind::Remove, ids, timing, &mut out)?
            }
            Change::FadeOut { ids } => {
                self.vanish(step, TransitionKind::FadeOut, ids, timing, &mut out)?
            }
            Change::Replace { from, to } => {
                let sources = self.snapshot(step, from)?;
                out.extend(plan_replace(&sources, to, false, timing)?);
                for (id, _) in &sources {
                    self.graph.remove(id);
                }
                for (id, v) in to {
                    self.graph.insert(id.clone(), v.clone())?;
                }
            }
            Change::ReplaceFromCopy { from, to } => {
                let sources = self.snapshot(step, std::slice::from_ref(from))?;
                out.extend(plan_replace(&sources, std::slice::from_ref(to), true, timing)?);
                self.graph.insert(to.0.clone(), to.1.clone())?;
            }
            Change::Morph { id, to } => {
                let from = self.graph.require(step, id)?.clone();
                let next = from.with_primitive(to.clone());
                self.reshape(TransitionKind::Morph, id, from, next, timing, &mut out)?;
            }
            Change::MoveTo { id, center } => {
                let from = self.graph.require(step, id)?.clone();
                let next = from.with_primitive(from.primitive.moved_to(*center));
                self.reshape(TransitionKind::MoveTo, id, from, next, timing, &mut out)?;
            }
            Change::Shift { ids, by } => {
                for id in ids {
                    let from = self.graph.require(step, id)?.clone();
                    let next = from.with_primitive(from.primitive.shifted(*by));
                    self.reshape(TransitionKind::Shift, id, from, next, timing, &mut out)?;
                }
            }
            Change::Scale { id, factor } => {
                let from = self.graph.require(step, id)?.clone();
                let next = from.with_primitive(from.primitive.scaled(*factor)?);
                self.reshape(TransitionKind::Scale, id, from, next, timing, &mut out)?;
            }
            Change::Indicate {
                id,
                scale_factor,
                color,
            } => {
                // `to` carries the peak of the emphasis; the object ends where it started.
                let from = self.graph.require(step, id)?.clone();
                let peak =
                    from.with_primitive(from.primitive.scaled(*scale_factor)?.recolored(*color));
                let timing = Timing {
                    ease: Ease::ThereAndBack,
                    ..timing
                };
                out.extend(plan_transition(
                    TransitionKind::Indicate,
                    id.clone(),
                    Some(from),
                    Some(peak),
                    timing,
                )?);
            }
            Change::Camera { center, width } => {
                self.caps.permit(step, change)?;
                let from = self.camera.ok_or_else(|| {
                    ReelError::validation(format!("step '{step}' moves a camera the stage lacks"))
                })?;
                let mut to = from;
                if let Some(c) = center {
                    to = to.move_to(*c);
                }
                if let Some(w) = width {
                    to = to.set_width(*w)?;
                }
                self.camera = Some(to);
                out.extend(plan_camera(from, to, timing)?);
            }
        }
        Ok(out)
    }

    fn snapshot(&self, step: &str, ids: &[ObjectId]) -> ReelResult<Vec<(ObjectId, Visual)>> {
        ids.iter()
            .map(|id| Ok((id.clone(), self.graph.require(step, id)?.clone())))
            .collect()
    }

    fn appear(
        &mut self,
        kind: TransitionKind,
        objects: &[(ObjectId, Visual)],
        timing: Timing,
        out: &mut Vec<TransitionDirective>,
    ) -> ReelResult<()> {
        for (id, v) in objects {
            self.graph.insert(id.clone(), v.clone())?;
            out.extend(plan_transition(kind, id.clone(), None, Some(v.clone()), timing)?);
        }
        Ok(())
    }

    fn vanish(
        &mut self,
        step: &str,
        kind: TransitionKind,
        ids: &[ObjectId],
        timing: Timing,
        out: &mut Vec<TransitionDirective>,
    ) -> ReelResult<()> {
        for id in ids {
            let from = self.graph.require(step, id)?.clone();
            self.graph.remove(id);
            out.extend(plan_transition(kind, id.clone(), Some(from), None, timing)?);
        }
        Ok(())
    }

    fn reshape(
        &mut self,
        kind: TransitionKind,
        id: &ObjectId,
        from: Visual,
        to: Visual,
        timing: Timing,
        out: &mut Vec<TransitionDirective>,
    ) -> ReelResult<()> {
        self.graph.update(id, to.clone());
        out.extend(plan_transition(kind, id.clone(), Some(from), Some(to), timing)?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/direct/director.rs"]
mod tests;
