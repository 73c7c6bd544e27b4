pub mod camera;
pub mod clock;
pub mod color;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gradient;
pub mod input;
pub mod scene;
pub mod section;
pub mod tween;

pub use camera::*;
pub use clock::*;
pub use color::*;
pub use command::*;
pub use config::*;
pub use constants::*;
pub use error::SceneError;
pub use frame::*;
pub use geometry::*;
pub use gradient::*;
pub use input::*;
pub use scene::*;
pub use section::*;
pub use tween::*;

// Shaders bundled as string constants
pub static TOON_WGSL: &str = include_str!("../shaders/toon.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
