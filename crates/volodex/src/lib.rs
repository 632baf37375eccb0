//! Volodex: browse commander-legal creature types in the terminal.

pub mod cli;
