//! devreel plans the scenes of an animated explainer of the standard-deviation formula.
//!
//! The crate does not draw anything. It turns three fixed stage scripts into a [`Timeline`]:
//! an ordered, fully resolved list of timed [`TransitionDirective`]s that an external
//! animation engine plays back.
//!
//! # Pipeline overview
//!
//! 1. **Aggregate**: `&[DataPoint] -> AggregateResult` (mean, SSD, sample variance, sd)
//! 2. **Lay out**: stage scripts place axes, dots, lines, squares and formulas through
//!    [`AxisFrame`] mappings and [`next_to`] placement
//! 3. **Direct**: a [`Director`] resolves each [`SceneStep`] against the live object set
//! 4. **Sequence**: the [`Pipeline`] walks `Introduction -> DerivationGeometric ->
//!    DerivationAlgebraic`, streaming directives into a [`DirectiveSink`]
//!
//! Everything is single-threaded and deterministic: the same dataset and settings always
//! produce the same [`timeline_fingerprint`].
#![forbid(unsafe_code)]

mod animation;
mod direct;
mod encode;
mod foundation;
mod layout;
mod scene;
mod settings;
mod stage;
mod stats;

/// The three scripted stages.
pub mod stages;
/// Logging setup.
pub mod telemetry;

pub use animation::ease::Ease;
pub use direct::directive::{
    CAMERA_ID, DirectiveState, Timing, TransitionDirective, TransitionKind, plan_camera,
    plan_replace, plan_transition, verify_object_order,
};
pub use direct::director::{Capabilities, Director, check_step_conflicts};
pub use direct::step::{Change, DEFAULT_RUN_TIME_S, Play, SceneStep, StepBody};
pub use encode::fingerprint::{PlanFingerprint, stage_fingerprint, timeline_fingerprint};
pub use encode::sink::{DirectiveSink, InMemorySink, JsonLinesSink, NullSink, SinkConfig};
pub use foundation::core::{
    Affine, DOWN, Fps, FrameIndex, FrameRange, LEFT, Point, Point3, RIGHT, Rgba8, UP, Vec2,
};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::axis::{AxisFrame, AxisRange, rotate, rotate_point};
pub use layout::camera::Camera;
pub use layout::place::{DEFAULT_BUFF, Extent, Side, next_to};
pub use scene::graph::SceneGraph;
pub use scene::model::{AxisPrimitive, ObjectId, Primitive, Visual};
pub use settings::ReelSettings;
pub use stage::machine::{MachineState, SceneMachine, StageFailure, StageId};
pub use stage::pipeline::{ExecutedStep, Pipeline, StageTimeline, Timeline};
pub use stage::script::SceneScript;
pub use stats::aggregate::{
    AggregateResult, DataPoint, HEIGHT_SAMPLE, compute_deviation_stats, format_quantity,
};

/// Build the reel for [`HEIGHT_SAMPLE`] and run it into `sink`.
pub fn plan_reel(settings: ReelSettings, sink: &mut dyn DirectiveSink) -> ReelResult<Timeline> {
    let scripts = stages::build_reel(&HEIGHT_SAMPLE)?;
    Pipeline::new(settings)?.run(&scripts, sink)
}
