//! pixfind library
//!
//! Exports the provider registry, search session and export formatters for
//! testing and potential reuse.

pub mod config;
pub mod event;
pub mod export;
pub mod logging;
pub mod search;
pub mod tui;
