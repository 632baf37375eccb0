//! CLI module for Volodex
//!
//! `run` opens the browser; `download` and `update` maintain the catalog it
//! reads; `config` shows where everything lives.

pub mod config;
pub mod decklist;
pub mod download;
pub mod error;
pub mod output;
pub mod run;
pub mod tui;
pub mod update;
