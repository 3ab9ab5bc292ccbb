// src/application/commands/mod.rs
//
// Command handlers exposed to the presentation shell

pub mod catalog_commands;

pub use catalog_commands::*;
