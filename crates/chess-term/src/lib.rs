//! Terminal front end for two people playing chess at one keyboard.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration loading
//! - [`render`] - board drawing with Unicode or ASCII pieces
//! - [`prompt`] - interactive promotion choice
//! - [`session`] - command parsing and the game loop

pub mod config;
pub mod prompt;
pub mod render;
pub mod session;
