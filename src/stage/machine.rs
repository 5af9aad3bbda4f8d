use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// The three scripted stages, in playback order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Introduction,
    DerivationGeometric,
    DerivationAlgebraic,
}

impl StageId {
    pub const ALL: [Self; 3] = [
        Self::Introduction,
        Self::DerivationGeometric,
        Self::DerivationAlgebraic,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Introduction => Some(Self::DerivationGeometric),
            Self::DerivationGeometric => Some(Self::DerivationAlgebraic),
            Self::DerivationAlgebraic => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::DerivationGeometric => "derivation_geometric",
            Self::DerivationAlgebraic => "derivation_algebraic",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageId {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "unknown stage '{s}' (expected introduction, derivation_geometric or derivation_algebraic)"
                ))
            })
    }
}

/// Where a run broke.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageFailure {
    pub stage: StageId,
    /// Index and label of the failing step, if the failure happened inside one.
    pub step: Option<(usize, String)>,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MachineState {
    Idle,
    Running { stage: StageId },
    Finished { stage: StageId },
    Completed,
    Failed(StageFailure),
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running { stage } => write!(f, "running {stage}"),
            Self::Finished { stage } => write!(f, "finished {stage}"),
            Self::Completed => f.write_str("completed"),
            Self::Failed(x) => write!(f, "failed in {}", x.stage),
        }
    }
}

/// Strictly forward stage sequencing: each stage is entered and exited exactly once,
/// in declared order, and any failure is terminal.
#[derive(Debug)]
pub struct SceneMachine {
    state: MachineState,
}

impl Default for SceneMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneMachine {
    pub fn new() -> Self {
        Self {
            state: MachineState::Idle,
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == MachineState::Completed
    }

    pub fn enter(&mut self, stage: StageId) -> ReelResult<()> {
        let allowed = match &self.state {
            MachineState::Idle => stage == StageId::Introduction,
            MachineState::Finished { stage: prev } => prev.next() == Some(stage),
            _ => false,
        };
        if !allowed {
            return Err(ReelError::validation(format!(
                "cannot enter stage {stage} while {}",
                self.state
            )));
        }
        self.state = MachineState::Running { stage };
        Ok(())
    }

    pub fn exit(&mut self, stage: StageId) -> ReelResult<()> {
        if self.state != (MachineState::Running { stage }) {
            return Err(ReelError::validation(format!(
                "cannot exit stage {stage} while {}",
                self.state
            )));
        }
        self.state = match stage.next() {
            Some(_) => MachineState::Finished { stage },
            None => MachineState::Completed,
        };
        Ok(())
    }

    pub fn fail(&mut self, failure: StageFailure) {
        self.state = MachineState::Failed(failure);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/machine.rs"]
mod tests;
