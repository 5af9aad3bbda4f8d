use crate::{
    animation::ease::Ease,
    foundation::core::{Point3, Rgba8, Vec2},
    scene::model::{ObjectId, Primitive, Visual},
};

/// Run time of a `play` step when the script does not set one.
pub const DEFAULT_RUN_TIME_S: f64 = 1.0;

/// One requested change of the visual object set.
///
/// Group variants (`Create`, `FadeOut`, `Shift`, ...) act on every listed object at once.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    /// Put objects in the scene without animation.
    Add { objects: Vec<(ObjectId, Visual)> },
    /// Take objects out of the scene without animation.
    Remove { ids: Vec<ObjectId> },
    /// Draw objects stroke by stroke.
    Create { objects: Vec<(ObjectId, Visual)> },
    FadeIn { objects: Vec<(ObjectId, Visual)> },
    FadeOut { ids: Vec<ObjectId> },
    /// Morph `from` into `to`; the sources leave the scene, the targets enter it.
    Replace {
        from: Vec<ObjectId>,
        to: Vec<(ObjectId, Visual)>,
    },
    /// Morph a copy of `from` into `to`; the source stays.
    ReplaceFromCopy {
        from: ObjectId,
        to: (ObjectId, Visual),
    },
    /// The object keeps its identity and takes a new shape.
    Morph { id: ObjectId, to: Primitive },
    MoveTo { id: ObjectId, center: Point3 },
    Shift { ids: Vec<ObjectId>, by: Vec2 },
    Scale { id: ObjectId, factor: f64 },
    /// Temporary emphasis: grow by `scale_factor` in `color`, then return.
    Indicate {
        id: ObjectId,
        scale_factor: f64,
        color: Rgba8,
    },
    /// Pan (`center`) and/or zoom (`width`) the camera.
    Camera {
        center: Option<Point3>,
        width: Option<f64>,
    },
}

impl Change {
    pub fn add(id: impl Into<ObjectId>, visual: impl Into<Visual>) -> Self {
        Self::Add {
            objects: vec![(id.into(), visual.into())],
        }
    }

    pub fn create(id: impl Into<ObjectId>, visual: impl Into<Visual>) -> Self {
        Self::Create {
            objects: vec![(id.into(), visual.into())],
        }
    }

    pub fn fade_in(id: impl Into<ObjectId>, visual: impl Into<Visual>) -> Self {
        Self::FadeIn {
            objects: vec![(id.into(), visual.into())],
        }
    }

    pub fn fade_out(id: impl Into<ObjectId>) -> Self {
        Self::FadeOut {
            ids: vec![id.into()],
        }
    }

    pub fn replace(
        from: impl Into<ObjectId>,
        to: impl Into<ObjectId>,
        visual: impl Into<Visual>,
    ) -> Self {
        Self::Replace {
            from: vec![from.into()],
            to: vec![(to.into(), visual.into())],
        }
    }

    pub fn move_to(id: impl Into<ObjectId>, center: Point3) -> Self {
        Self::MoveTo {
            id: id.into(),
            center,
        }
    }

    pub fn morph(id: impl Into<ObjectId>, to: Primitive) -> Self {
        Self::Morph { id: id.into(), to }
    }

    /// Objects that must be live when the change runs.
    pub fn references(&self) -> Vec<&ObjectId> {
        match self {
            Self::Add { .. } | Self::Create { .. } | Self::FadeIn { .. } | Self::Camera { .. } => {
                Vec::new()
            }
            Self::Remove { ids } | Self::FadeOut { ids } | Self::Shift { ids, .. } => {
                ids.iter().collect()
            }
            Self::Replace { from, .. } => from.iter().collect(),
            Self::ReplaceFromCopy { from, .. } => vec![from],
            Self::Morph { id, .. }
            | Self::MoveTo { id, .. }
            | Self::Scale { id, .. }
            | Self::Indicate { id, .. } => vec![id],
        }
    }

    /// Objects the change takes out of the scene.
    pub fn consumes(&self) -> Vec<&ObjectId> {
        match self {
            Self::Remove { ids } | Self::FadeOut { ids } => ids.iter().collect(),
            Self::Replace { from, .. } => from.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Objects the change brings into the scene.
    pub fn produces(&self) -> Vec<&ObjectId> {
        match self {
            Self::Add { objects } | Self::Create { objects } | Self::FadeIn { objects } => {
                objects.iter().map(|(id, _)| id).collect()
            }
            Self::Replace { to, .. } => to.iter().map(|(id, _)| id).collect(),
            Self::ReplaceFromCopy { to, .. } => vec![&to.0],
            _ => Vec::new(),
        }
    }

    /// Every object the change touches, in declaration order.
    pub fn touches(&self) -> Vec<&ObjectId> {
        let mut out = self.references();
        for id in self.produces() {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    pub fn needs_pan(&self) -> bool {
        matches!(
            self,
            Self::Camera {
                center: Some(_),
                ..
            }
        )
    }

    pub fn needs_zoom(&self) -> bool {
        matches!(self, Self::Camera { width: Some(_), .. })
    }
}

/// A change inside a `play` step, optionally with its own run time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Play {
    pub change: Change,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time_s: Option<f64>,
}

impl Play {
    pub fn new(change: Change) -> Self {
        Self {
            change,
            run_time_s: None,
        }
    }

    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time_s = Some(secs);
        self
    }
}

impl From<Change> for Play {
    fn from(value: Change) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum StepBody {
    /// Changes animated together; the step lasts as long as its longest change.
    Play {
        plays: Vec<Play>,
        run_time_s: f64,
        ease: Ease,
    },
    /// Fixed pause with no visual change.
    Wait { secs: f64 },
}

/// One ordered unit of a stage script.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneStep {
    pub label: String,
    pub body: StepBody,
}

impl SceneStep {
    pub fn play<P: Into<Play>>(label: impl Into<String>, plays: impl IntoIterator<Item = P>) -> Self {
        Self {
            label: label.into(),
            body: StepBody::Play {
                plays: plays.into_iter().map(Into::into).collect(),
                run_time_s: DEFAULT_RUN_TIME_S,
                ease: Ease::Smooth,
            },
        }
    }

    /// Zero-duration step, for objects that appear or vanish between animations.
    pub fn instant(label: impl Into<String>, changes: impl IntoIterator<Item = Change>) -> Self {
        Self::play(label, changes).run_time(0.0)
    }

    pub fn wait(secs: f64) -> Self {
        Self {
            label: "wait".to_string(),
            body: StepBody::Wait { secs },
        }
    }

    /// Default run time for changes without their own.
    pub fn run_time(mut self, secs: f64) -> Self {
        if let StepBody::Play { run_time_s, .. } = &mut self.body {
            *run_time_s = secs;
        }
        self
    }

    pub fn ease(mut self, to: Ease) -> Self {
        if let StepBody::Play { ease, .. } = &mut self.body {
            *ease = to;
        }
        self
    }

    pub fn plays(&self) -> &[Play] {
        match &self.body {
            StepBody::Play { plays, .. } => plays,
            StepBody::Wait { .. } => &[],
        }
    }

    /// Unscaled step duration in seconds.
    pub fn duration_s(&self) -> f64 {
        match &self.body {
            StepBody::Play {
                plays, run_time_s, ..
            } => plays
                .iter()
                .map(|p| p.run_time_s.unwrap_or(*run_time_s))
                .fold(0.0, f64::max),
            StepBody::Wait { secs } => *secs,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/direct/step.rs"]
mod tests;
