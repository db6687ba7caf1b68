//! crxgen - Scaffolding generator for Chrome extension projects

pub mod commands;
pub mod config;
pub mod manifest;
pub mod models;
pub mod scaffold;
pub mod validation;
