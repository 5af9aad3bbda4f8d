use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::{
    core::Fps,
    error::{ReelError, ReelResult},
};

/// Run-wide knobs: output frame rate and a global time stretch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReelSettings {
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Multiplier applied to every run time and wait (2.0 plays at half speed).
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

fn default_fps() -> Fps {
    Fps { num: 30, den: 1 }
}

fn default_time_scale() -> f64 {
    1.0
}

impl Default for ReelSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            time_scale: default_time_scale(),
        }
    }
}

impl ReelSettings {
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ReelError::validation(format!(
                "time_scale must be finite and > 0, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let out: Self = serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("parse settings JSON: {e}")))?;
        out.validate()?;
        Ok(out)
    }

    /// Parse and validate settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        let out: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("parse settings JSON: {e}")))?;
        out.validate()?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
