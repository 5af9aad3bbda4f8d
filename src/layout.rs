pub mod axis;
pub mod camera;
pub mod place;
