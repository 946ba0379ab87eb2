//! Relwatch library - track the latest releases of GitHub projects
//!
//! This library provides the core functionality for the `relwatch` CLI tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod github;
pub mod report;
pub mod store;
pub mod telegram;
