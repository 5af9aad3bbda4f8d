pub mod directive;
pub mod director;
pub mod step;
