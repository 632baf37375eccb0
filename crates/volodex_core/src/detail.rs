//! Detail pane projection.

use thiserror::Error;

use crate::card::{Card, Catalog};

/// Text shown in the detail pane when no creature is selected.
pub const NO_SELECTION_PLACEHOLDER: &str = "Select a creature to view details.";

/// Between the card name and its mana cost in the header line.
const HEADER_SEPARATOR: &str = " — ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    /// The name did not come from the creature list; indicates a navigation bug.
    #[error("card not found in catalog: {0}")]
    NotFound(String),
}

/// Display sections of a card. Every section is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub name: String,
    pub header: String,
    pub type_line: String,
    pub stats: String,
    pub text: String,
}

impl DetailRecord {
    /// Look up `card_name` in the full (unfiltered) catalog.
    pub fn resolve(catalog: &Catalog, card_name: &str) -> Result<Self, DetailError> {
        catalog
            .find(card_name)
            .map(Self::from_card)
            .ok_or_else(|| DetailError::NotFound(card_name.to_string()))
    }

    pub fn from_card(card: &Card) -> Self {
        let stats = match (card.power.as_deref(), card.toughness.as_deref()) {
            (None, None) => String::new(),
            (power, toughness) => {
                format!("{}/{}", power.unwrap_or_default(), toughness.unwrap_or_default())
            }
        };

        Self {
            name: card.name.clone(),
            header: format!("{}{}{}", card.name, HEADER_SEPARATOR, card.mana_cost),
            type_line: card.type_line.clone(),
            stats,
            text: card.text.clone(),
        }
    }

    /// Sections joined with blank lines.
    pub fn render(&self) -> String {
        [
            self.header.as_str(),
            self.type_line.as_str(),
            self.stats.as_str(),
            self.text.as_str(),
        ]
        .join("\n\n")
    }
}
