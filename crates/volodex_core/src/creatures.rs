//! Creature selection for a single subtype.

use crate::card::{Card, Catalog};

/// How the creatures of a subtype are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreatureOrder {
    /// Most popular (lowest EDHREC rank) first.
    #[default]
    ByRank,
    /// Cheapest first.
    ByManaValue,
}

impl CreatureOrder {
    pub fn toggled(self) -> Self {
        match self {
            CreatureOrder::ByRank => CreatureOrder::ByManaValue,
            CreatureOrder::ByManaValue => CreatureOrder::ByRank,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreatureOrder::ByRank => "rank",
            CreatureOrder::ByManaValue => "mana value",
        }
    }
}

/// Cards of `filtered` listing `subtype`, sorted by `order`.
///
/// Ties keep catalog order. An unknown subtype yields an empty list.
pub fn select_creatures<'a>(
    filtered: &'a Catalog,
    subtype: &str,
    order: CreatureOrder,
) -> Vec<&'a Card> {
    let mut cards: Vec<&Card> = filtered.iter().filter(|c| c.has_subtype(subtype)).collect();
    match order {
        CreatureOrder::ByRank => cards.sort_by_key(|c| c.edhrec_rank),
        CreatureOrder::ByManaValue => cards.sort_by_key(|c| c.mana_value),
    }
    cards
}
