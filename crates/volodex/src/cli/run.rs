//! `volodex run`: load the catalog and browse it in the TUI.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;
use volodex_core::{Catalog, LoadError, Navigator, SubtypeReselect};

use super::config::VolodexConfig;
use super::decklist;
use super::error::HelpfulError;
use super::tui;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Deck list: a file path, or the deck text itself
    pub decklist: Option<String>,

    /// Keep the selected creature type when toggling the type order
    #[arg(long)]
    pub preserve_selection: bool,
}

pub fn run(args: RunArgs, config: &VolodexConfig, catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let deck_list = decklist::load(args.decklist.as_deref())?;

    let reselect = if args.preserve_selection {
        SubtypeReselect::PreserveIfPresent
    } else {
        config.reselect()
    };

    let navigator = Navigator::new(catalog, &deck_list, reselect)?;
    info!(
        cards = navigator.catalog().len(),
        banned = navigator.banned().len(),
        subtypes = navigator.type_index().len(),
        "starting browser"
    );

    let notices: Vec<String> = args
        .decklist
        .as_deref()
        .and_then(decklist::unreadable_location)
        .into_iter()
        .collect();
    tui::run(navigator, subtitle(args.decklist.as_deref()), notices)
}

/// Catalog load with CLI-friendly errors.
pub fn load_catalog(path: &Path) -> Result<Catalog, HelpfulError> {
    Catalog::load(path).map_err(|err| match err {
        LoadError::NotFound { .. } => HelpfulError::catalog_not_found(path),
        other => HelpfulError::catalog_malformed(path, &other.to_string()),
    })
}

/// Header subtitle: the deck-list argument, abbreviated when it is inline text.
fn subtitle(decklist: Option<&str>) -> String {
    match decklist {
        None => "no deck list".to_string(),
        Some(source) => {
            let first = source.lines().next().unwrap_or_default().trim();
            if source.lines().nth(1).is_some() {
                format!("{first} ...")
            } else {
                first.to_string()
            }
        }
    }
}
