//! Coursectl library - exposes modules for testing

pub mod commands;
pub mod errors;
pub mod logging;
pub mod output;
pub mod scenario;
