//! Application layer: use cases built on the domain

pub mod demo;
pub mod error;

pub use demo::{run_demo, DemoReport};
pub use error::{ApplicationError, ApplicationResult};
