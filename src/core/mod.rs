pub mod anim;
pub mod engine;
pub mod names;
pub mod planner;
pub mod sheet;
pub mod timing;
pub mod wheel;
