//! Banned subtype resolution.
//!
//! A card is hidden from browsing when any of its subtypes is banned. The
//! banned set always holds the default pair and grows with every subtype
//! carried by a deck-list card that also appears in the catalog.

use std::collections::BTreeSet;
use tracing::debug;

use crate::card::{Card, Catalog};

/// Subtypes that are excluded in every session.
pub const DEFAULT_BANNED_SUBTYPES: &[&str] = &["Human", "Wizard"];

/// Card names taken from an optional deck list.
pub type DeckListNames = BTreeSet<String>;

/// Immutable set of excluded subtypes, iterated in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedSubtypes {
    subtypes: BTreeSet<String>,
}

impl Default for BannedSubtypes {
    fn default() -> Self {
        Self {
            subtypes: DEFAULT_BANNED_SUBTYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BannedSubtypes {
    /// Defaults plus the subtypes of every catalog card named in `deck_list`.
    ///
    /// Deck-list names the catalog does not know are ignored.
    pub fn resolve(catalog: &Catalog, deck_list: &DeckListNames) -> Self {
        let mut banned = Self::default();
        if deck_list.is_empty() {
            return banned;
        }

        let mut matched = 0usize;
        for card in catalog.iter().filter(|card| deck_list.contains(&card.name)) {
            matched += 1;
            banned.subtypes.extend(card.subtypes.iter().cloned());
        }

        debug!(
            deck_cards = deck_list.len(),
            matched,
            banned = banned.subtypes.len(),
            "resolved banned subtypes"
        );
        banned
    }

    pub fn contains(&self, subtype: &str) -> bool {
        self.subtypes.contains(subtype)
    }

    /// True when none of the card's subtypes is banned.
    pub fn allows(&self, card: &Card) -> bool {
        !card.subtypes.iter().any(|s| self.subtypes.contains(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.subtypes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.subtypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtypes.is_empty()
    }
}

impl Catalog {
    /// Cards that survive `banned`, in catalog order.
    pub fn without_banned(&self, banned: &BannedSubtypes) -> Catalog {
        let kept: Vec<Card> = self.iter().filter(|card| banned.allows(card)).cloned().collect();
        debug!(
            total = self.len(),
            kept = kept.len(),
            "filtered catalog by banned subtypes"
        );
        Catalog::from_cards(kept)
    }
}
