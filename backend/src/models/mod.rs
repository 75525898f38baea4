//! Domain types shared by the pipeline and the HTTP layer.

pub mod request;
pub mod schedule;
pub mod task;

pub use request::*;
pub use schedule::*;
pub use task::*;
