//! Core library for gatekey: configuration, form validation, session
//! persistence, and the authentication API client.
//!
//! Nothing in this crate touches the terminal; the TUI and CLI crates sit
//! on top of it.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod validation;
