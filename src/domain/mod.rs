//! Domain layer: the organization chart and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{OrgChart, Preorder};
pub use entities::{Staff, StaffId, StaffKind};
pub use error::{DomainError, DomainResult};
pub use render::TreeRender;
