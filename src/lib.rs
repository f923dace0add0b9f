//! exposed-dropdown library crate.

pub mod app;
pub mod config;
pub mod dropdown;
pub mod fixtures;
#[cfg(feature = "harness")]
pub mod harness;
pub mod logging;
pub mod ui;
