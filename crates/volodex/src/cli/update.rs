//! `volodex update`: build the creature catalog from the MTGJSON bulk dataset.
//!
//! A card face is kept when it is commander-legal, a non-funny creature,
//! outside white, black and red, and carries neither default banned subtype.
//! Faces are de-duplicated by display name; the first one wins.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, info};
use volodex_core::{Card, DEFAULT_BANNED_SUBTYPES, UNRANKED_EDHREC_RANK};

use super::config::VolodexConfig;
use super::error::HelpfulError;
use super::output::format_number;

/// Colors whose presence in a color identity excludes the card.
const EXCLUDED_COLORS: &[char] = &['W', 'B', 'R'];

const MISSING_MANA_COST: &str = "/";

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Bulk dataset, xz-compressed or plain JSON (default: ~/.volodex/AtomicCards.json.xz)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Catalog to write (default: the resolved catalog path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Top level of AtomicCards.json
#[derive(Debug, Deserialize)]
pub struct AtomicCards {
    #[serde(default)]
    pub data: BTreeMap<String, Vec<AtomicCard>>,
}

/// One face of an atomic card, reduced to the fields the catalog needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtomicCard {
    pub name: String,
    pub face_name: Option<String>,
    pub legalities: BTreeMap<String, String>,
    #[serde(rename = "type")]
    pub type_line: String,
    pub is_funny: Option<bool>,
    pub color_identity: Vec<String>,
    pub subtypes: Vec<String>,
    pub mana_cost: Option<String>,
    pub mana_value: f64,
    pub edhrec_rank: Option<u32>,
    pub text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
}

impl AtomicCard {
    fn colors(&self) -> BTreeSet<char> {
        self.color_identity
            .iter()
            .filter_map(|c| c.chars().next())
            .collect()
    }

    fn display_name(&self) -> &str {
        self.face_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }

    /// Whether this face belongs in the catalog.
    pub fn is_kept(&self) -> bool {
        let legal = self
            .legalities
            .get("commander")
            .is_some_and(|status| status == "Legal");
        if !legal || !self.type_line.contains("Creature") || self.is_funny.unwrap_or(false) {
            return false;
        }
        if self.colors().iter().any(|c| EXCLUDED_COLORS.contains(c)) {
            return false;
        }
        !self
            .subtypes
            .iter()
            .any(|s| DEFAULT_BANNED_SUBTYPES.contains(&s.as_str()))
    }

    pub fn to_card(&self) -> Card {
        Card {
            name: self.display_name().to_string(),
            full_name: self.name.clone(),
            color_identity: self.colors(),
            mana_cost: self
                .mana_cost
                .clone()
                .unwrap_or_else(|| MISSING_MANA_COST.to_string()),
            mana_value: self.mana_value.max(0.0).floor() as u32,
            type_line: self.type_line.clone(),
            subtypes: self.subtypes.clone(),
            edhrec_rank: self.edhrec_rank.unwrap_or(UNRANKED_EDHREC_RANK),
            text: self.text.clone().unwrap_or_default(),
            power: self.power.clone(),
            toughness: self.toughness.clone(),
        }
    }
}

pub fn run(args: UpdateArgs, config: &VolodexConfig, catalog_path: &Path) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.bulk_path());
    let output = args.output.unwrap_or_else(|| catalog_path.to_path_buf());

    if !input.exists() {
        return Err(HelpfulError::bulk_not_found(&input).into());
    }

    let atomic = read_atomic_cards(&input)?;
    let progress = ProgressBar::new(atomic.data.len() as u64);
    let style = ProgressStyle::with_template("Updating volodex {wide_bar} {pos}/{len} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);

    let cards = build_catalog(&atomic, &progress);
    progress.finish_and_clear();

    write_catalog(&output, &cards)?;
    info!(output = %output.display(), cards = cards.len(), "catalog written");
    println!("Total Cards {}", format_number(cards.len()));
    Ok(())
}

/// Parse the bulk dataset; `.xz` files are decompressed on the fly.
pub fn read_atomic_cards(path: &Path) -> Result<AtomicCards> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "xz") {
        Box::new(xz2::read::XzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let atomic: AtomicCards = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("Failed to parse bulk dataset {}", path.display()))?;
    debug!(entries = atomic.data.len(), "bulk dataset parsed");
    Ok(atomic)
}

/// Kept faces in dataset key order.
pub fn build_catalog(atomic: &AtomicCards, progress: &ProgressBar) -> Vec<Card> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();

    for faces in atomic.data.values() {
        for face in faces.iter().filter(|f| f.is_kept()) {
            if seen.insert(face.display_name().to_string()) {
                cards.push(face.to_card());
            }
        }
        progress.inc(1);
    }

    cards
}

pub fn write_catalog(path: &Path, cards: &[Card]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cards)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
