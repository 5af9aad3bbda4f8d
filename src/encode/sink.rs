use std::io::Write;

use crate::{
    direct::directive::TransitionDirective,
    foundation::{
        core::Fps,
        error::{ReelError, ReelResult},
    },
    layout::camera::Camera,
    stage::machine::StageId,
};

/// Configuration provided to a [`DirectiveSink`] at the start of each stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SinkConfig {
    pub stage: StageId,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Viewport at the start of the stage, if the stage has one.
    pub camera: Option<Camera>,
}

/// Consumer of resolved directives, standing in for the rendering engine.
///
/// Ordering contract: per stage, `begin_stage` comes first, then every directive in
/// execution order, then `end_stage`. Stages arrive in playback order.
pub trait DirectiveSink {
    fn begin_stage(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    fn push_directive(&mut self, directive: &TransitionDirective) -> ReelResult<()>;
    /// `duration_s` is the stage's total (scaled) duration.
    fn end_stage(&mut self, duration_s: f64) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    stages: Vec<(SinkConfig, Vec<TransitionDirective>)>,
    open: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured stages with their directives, in arrival order.
    pub fn stages(&self) -> &[(SinkConfig, Vec<TransitionDirective>)] {
        &self.stages
    }

    pub fn directives(&self, stage: StageId) -> Option<&[TransitionDirective]> {
        self.stages
            .iter()
            .find(|(cfg, _)| cfg.stage == stage)
            .map(|(_, d)| d.as_slice())
    }
}

impl DirectiveSink for InMemorySink {
    fn begin_stage(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if self.open {
            return Err(ReelError::validation("begin_stage called twice without end_stage"));
        }
        self.open = true;
        self.stages.push((cfg, Vec::new()));
        Ok(())
    }

    fn push_directive(&mut self, directive: &TransitionDirective) -> ReelResult<()> {
        match self.stages.last_mut() {
            Some((_, out)) if self.open => {
                out.push(directive.clone());
                Ok(())
            }
            _ => Err(ReelError::validation("push_directive called outside a stage")),
        }
    }

    fn end_stage(&mut self, _duration_s: f64) -> ReelResult<()> {
        if !self.open {
            return Err(ReelError::validation("end_stage called outside a stage"));
        }
        self.open = false;
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DirectiveSink for NullSink {
    fn begin_stage(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_directive(&mut self, _directive: &TransitionDirective) -> ReelResult<()> {
        Ok(())
    }

    fn end_stage(&mut self, _duration_s: f64) -> ReelResult<()> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    BeginStage(&'a SinkConfig),
    Directive(&'a TransitionDirective),
    EndStage { duration_s: f64 },
}

/// Streams one JSON object per line: `begin_stage`, `directive`..., `end_stage`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    lines: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &Event<'_>) -> ReelResult<()> {
        serde_json::to_writer(&mut self.out, event)
            .map_err(|e| ReelError::serde(format!("write directive line: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ReelError::Other(e.into()))?;
        self.lines += 1;
        Ok(())
    }
}

impl<W: Write> DirectiveSink for JsonLinesSink<W> {
    fn begin_stage(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.emit(&Event::BeginStage(&cfg))
    }

    fn push_directive(&mut self, directive: &TransitionDirective) -> ReelResult<()> {
        self.emit(&Event::Directive(directive))
    }

    fn end_stage(&mut self, duration_s: f64) -> ReelResult<()> {
        self.emit(&Event::EndStage { duration_s })?;
        self.out
            .flush()
            .map_err(|e| ReelError::Other(e.into()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
