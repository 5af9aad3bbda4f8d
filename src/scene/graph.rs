use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
    foundation::error::{ReelError, ReelResult},
    scene::model::{ObjectId, Visual},
};

/// The live visual object set of one stage, in painter's order (first inserted is drawn first).
///
/// Only the director mutates it; everyone else reads snapshots.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct SceneGraph {
    objects: IndexMap<ObjectId, Visual>,
    #[serde(skip)]
    removed: BTreeSet<ObjectId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Visual> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn was_removed(&self, id: &ObjectId) -> bool {
        self.removed.contains(id)
    }

    /// Look up `id` on behalf of step `step`.
    ///
    /// Objects that existed and were removed yield [`ReelError::StaleReference`]; objects
    /// nothing has produced yet yield [`ReelError::StepOrderViolation`].
    pub fn require(&self, step: &str, id: &ObjectId) -> ReelResult<&Visual> {
        match self.objects.get(id) {
            Some(v) => Ok(v),
            None if self.removed.contains(id) => Err(ReelError::stale_reference(step, id.as_str())),
            None => Err(ReelError::step_order(step, id.as_str())),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Visual)> {
        self.objects.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }

    pub(crate) fn insert(&mut self, id: ObjectId, visual: Visual) -> ReelResult<()> {
        if self.objects.contains_key(&id) {
            return Err(ReelError::validation(format!(
                "object '{id}' is already in the scene"
            )));
        }
        self.removed.remove(&id);
        self.objects.insert(id, visual);
        Ok(())
    }

    pub(crate) fn update(&mut self, id: &ObjectId, visual: Visual) {
        if let Some(slot) = self.objects.get_mut(id) {
            *slot = visual;
        }
    }

    pub(crate) fn remove(&mut self, id: &ObjectId) -> Option<Visual> {
        let out = self.objects.shift_remove(id);
        if out.is_some() {
            self.removed.insert(id.clone());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
