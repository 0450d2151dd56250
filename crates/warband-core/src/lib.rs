//! Core types and definitions for the WARBAND battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input, snapshots, events, the class stat table
//! and constants. It has no dependency on an ECS or a renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod presentation;
pub mod state;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
