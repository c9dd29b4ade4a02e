//! Ritual outcome hooks module

mod format;
mod hooks;
mod subject;

pub use format::*;
pub use hooks::*;
pub use subject::*;
