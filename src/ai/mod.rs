// Rod controllers: human stick input and the automatic opponent

mod auto;
mod controller;
mod prediction;

pub use auto::AutoController;
pub use controller::{Axis, ManualController, RodCommand, RodController};
pub use prediction::predict_ball_y;
