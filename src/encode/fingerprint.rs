use std::fmt;

use crate::{
    foundation::{
        error::{ReelError, ReelResult},
        math::Fnv1a64,
    },
    stage::pipeline::{StageTimeline, Timeline},
};

/// Stable 64-bit digest of a resolved plan, for snapshot checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PlanFingerprint(pub u64);

impl fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hash the canonical JSON form of the whole timeline.
pub fn timeline_fingerprint(timeline: &Timeline) -> ReelResult<PlanFingerprint> {
    let mut h = Fnv1a64::new_default();
    h.write_u64(timeline.stages.len() as u64);
    for stage in &timeline.stages {
        write_stage(&mut h, stage)?;
    }
    h.write_bytes(&timeline.time_scale.to_bits().to_le_bytes());
    h.write_u64(u64::from(timeline.fps.num));
    h.write_u64(u64::from(timeline.fps.den));
    Ok(PlanFingerprint(h.finish()))
}

pub fn stage_fingerprint(stage: &StageTimeline) -> ReelResult<PlanFingerprint> {
    let mut h = Fnv1a64::new_default();
    write_stage(&mut h, stage)?;
    Ok(PlanFingerprint(h.finish()))
}

fn write_stage(h: &mut Fnv1a64, stage: &StageTimeline) -> ReelResult<()> {
    let bytes = serde_json::to_vec(stage)
        .map_err(|e| ReelError::serde(format!("serialize stage {}: {e}", stage.stage)))?;
    h.write_u64(bytes.len() as u64);
    h.write_bytes(&bytes);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/fingerprint.rs"]
mod tests;
