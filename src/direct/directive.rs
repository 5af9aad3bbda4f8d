//! Resolved, timed instructions for the rendering engine.

use std::collections::BTreeMap;
use std::fmt;

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{ReelError, ReelResult},
        math::nearly_equal,
    },
    layout::camera::Camera,
    scene::model::{ObjectId, Visual},
};

/// Object id used for camera directives.
pub const CAMERA_ID: &str = "camera";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Add,
    Remove,
    Create,
    FadeIn,
    FadeOut,
    Replace,
    ReplaceFromCopy,
    Morph,
    MoveTo,
    Shift,
    Scale,
    Indicate,
    Camera,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Create => "create",
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
            Self::Replace => "replace",
            Self::ReplaceFromCopy => "replace_from_copy",
            Self::Morph => "morph",
            Self::MoveTo => "move_to",
            Self::Shift => "shift",
            Self::Scale => "scale",
            Self::Indicate => "indicate",
            Self::Camera => "camera",
        }
    }

    /// Kinds that take effect immediately, whatever the step's run time.
    pub fn is_instant(self) -> bool {
        matches!(self, Self::Add | Self::Remove)
    }

    /// Kinds after which the target is no longer in the scene.
    pub fn removes_target(self) -> bool {
        matches!(self, Self::Remove | Self::FadeOut)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a directive runs, relative to the start of its stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub start_s: f64,
    pub duration_s: f64,
    pub ease: Ease,
}

impl Timing {
    pub fn new(start_s: f64, duration_s: f64, ease: Ease) -> ReelResult<Self> {
        let t = Self {
            start_s,
            duration_s,
            ease,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.start_s.is_finite() || self.start_s < 0.0 {
            return Err(ReelError::validation(format!(
                "directive start must be finite and >= 0, got {}",
                self.start_s
            )));
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(ReelError::validation(format!(
                "directive duration must be finite and >= 0, got {}",
                self.duration_s
            )));
        }
        Ok(())
    }

    pub fn end_s(&self) -> f64 {
        self.start_s + self.duration_s
    }
}

/// Start and end states carried by a directive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DirectiveState {
    /// Single-object change; `None` means "not in the scene".
    Visual {
        from: Option<Visual>,
        to: Option<Visual>,
    },
    /// Shape interpolation from one or more sources into the target.
    Morph {
        sources: Vec<ObjectId>,
        from: Vec<Visual>,
        to: Visual,
    },
    Camera { from: Camera, to: Camera },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionDirective {
    pub kind: TransitionKind,
    pub target: ObjectId,
    #[serde(flatten)]
    pub timing: Timing,
    #[serde(flatten)]
    pub state: DirectiveState,
}

impl TransitionDirective {
    /// Every object the directive reads or writes: morph sources first, then the target.
    pub fn objects(&self) -> Vec<&ObjectId> {
        match &self.state {
            DirectiveState::Morph { sources, .. } => {
                let mut out: Vec<&ObjectId> = sources.iter().collect();
                out.push(&self.target);
                out
            }
            _ => vec![&self.target],
        }
    }
}

/// Plan a single-object transition from `from` to `to`.
///
/// The endpoints must fit the kind: appearing kinds start from nothing, vanishing kinds
/// end in nothing, everything else needs both. Replacements and camera moves go through
/// [`plan_replace`] and [`plan_camera`].
pub fn plan_transition(
    kind: TransitionKind,
    target: ObjectId,
    from: Option<Visual>,
    to: Option<Visual>,
    timing: Timing,
) -> ReelResult<Vec<TransitionDirective>> {
    use TransitionKind as K;

    let fits = match kind {
        K::Add | K::Create | K::FadeIn => from.is_none() && to.is_some(),
        K::Remove | K::FadeOut => from.is_some() && to.is_none(),
        K::Morph | K::MoveTo | K::Shift | K::Scale | K::Indicate => {
            from.is_some() && to.is_some()
        }
        K::Replace | K::ReplaceFromCopy | K::Camera => {
            return Err(ReelError::validation(format!(
                "'{kind}' transitions are not single-object transitions"
            )));
        }
    };
    if !fits {
        return Err(ReelError::validation(format!(
            "'{kind}' transition for '{target}' has mismatched endpoints"
        )));
    }

    timing.validate()?;
    let timing = if kind.is_instant() {
        Timing {
            duration_s: 0.0,
            ..timing
        }
    } else {
        timing
    };

    Ok(vec![TransitionDirective {
        kind,
        target,
        timing,
        state: DirectiveState::Visual { from, to },
    }])
}

/// Plan a morph of `sources` into `targets`.
///
/// One target absorbs all sources; one source splits into all targets; equal counts pair up
/// in order. With `keep_sources` the sources stay in the scene (a copy morphs).
pub fn plan_replace(
    sources: &[(ObjectId, Visual)],
    targets: &[(ObjectId, Visual)],
    keep_sources: bool,
    timing: Timing,
) -> ReelResult<Vec<TransitionDirective>> {
    if sources.is_empty() || targets.is_empty() {
        return Err(ReelError::validation(
            "replacement needs at least one source and one target",
        ));
    }
    timing.validate()?;
    let kind = if keep_sources {
        TransitionKind::ReplaceFromCopy
    } else {
        TransitionKind::Replace
    };

    let directive = |src: &[(ObjectId, Visual)], (id, to): &(ObjectId, Visual)| {
        TransitionDirective {
            kind,
            target: id.clone(),
            timing,
            state: DirectiveState::Morph {
                sources: src.iter().map(|(s, _)| s.clone()).collect(),
                from: src.iter().map(|(_, v)| v.clone()).collect(),
                to: to.clone(),
            },
        }
    };

    if targets.len() == 1 {
        Ok(vec![directive(sources, &targets[0])])
    } else if sources.len() == 1 {
        Ok(targets.iter().map(|t| directive(sources, t)).collect())
    } else if sources.len() == targets.len() {
        Ok(sources
            .iter()
            .zip(targets)
            .map(|(s, t)| directive(std::slice::from_ref(s), t))
            .collect())
    } else {
        Err(ReelError::validation(format!(
            "cannot split {} sources across {} targets",
            sources.len(),
            targets.len()
        )))
    }
}

/// Plan a camera pan/zoom.
pub fn plan_camera(from: Camera, to: Camera, timing: Timing) -> ReelResult<Vec<TransitionDirective>> {
    timing.validate()?;
    Ok(vec![TransitionDirective {
        kind: TransitionKind::Camera,
        target: ObjectId::new(CAMERA_ID),
        timing,
        state: DirectiveState::Camera { from, to },
    }])
}

/// Check a directive sequence against the ordering contract.
///
/// Directives touching the same object must keep non-decreasing start times, and nothing may
/// touch an object after a directive removed it unless a later directive brings it back.
pub fn verify_object_order(directives: &[TransitionDirective]) -> ReelResult<()> {
    let mut last_start: BTreeMap<&ObjectId, f64> = BTreeMap::new();
    // Removed objects with the start time of the removing directive; the flag marks
    // replacement sources, which may still feed other targets starting at the same time.
    let mut gone: BTreeMap<&ObjectId, (f64, bool)> = BTreeMap::new();

    for (i, d) in directives.iter().enumerate() {
        let label = format!("directive #{i} ({})", d.kind);
        let brings_back = matches!(
            d.kind,
            TransitionKind::Add
                | TransitionKind::Create
                | TransitionKind::FadeIn
                | TransitionKind::Replace
                | TransitionKind::ReplaceFromCopy
        );

        for id in d.objects() {
            let is_target = id == &d.target;
            if let Some(&(removed_at, via_replace)) = gone.get(id) {
                let split_source = via_replace
                    && !is_target
                    && d.kind == TransitionKind::Replace
                    && nearly_equal(d.timing.start_s, removed_at);
                if !split_source && !(is_target && brings_back) {
                    return Err(ReelError::stale_reference(label, id.as_str()));
                }
            }
            if let Some(prev) = last_start.get(id)
                && d.timing.start_s < *prev
            {
                return Err(ReelError::step_order(label, id.as_str()));
            }
            last_start.insert(id, d.timing.start_s);
        }

        if d.kind.removes_target() {
            gone.insert(&d.target, (d.timing.start_s, false));
        } else {
            gone.remove(&d.target);
        }
        if d.kind == TransitionKind::Replace
            && let DirectiveState::Morph { sources, .. } = &d.state
        {
            for s in sources.iter().filter(|s| *s != &d.target) {
                gone.insert(s, (d.timing.start_s, true));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/direct/directive.rs"]
mod tests;
