//! ascii-typewriter library crate.
//!
//! Renders images as coloured ASCII art and types the result into a
//! terminal at a steady pace. The binary wires these pieces to the command
//! line; they are exposed here for integration testing.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod player;
pub mod source;
pub mod typewriter;
