pub mod panel;
pub mod reset;

pub use panel::{ControlPanel, ControlTarget};
pub use reset::{ResetHooks, reset_scene};
