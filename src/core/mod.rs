//! Long-running process primitives

pub mod http;
pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
