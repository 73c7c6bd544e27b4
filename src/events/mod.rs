pub mod pointer;
pub mod window;

pub use pointer::wire_pointer;
pub use window::{queue_initial_samples, wire_window};
