//! orgtree: an organization chart with hiring, firing and access levels.
//!
//! The core lives in [`domain::OrgChart`], an arena-backed tree of staff
//! members. Firing someone always names a replacement who inherits their
//! direct reports, so the chart stays connected.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
