//! CLI interface and user interaction.

pub mod cli;
