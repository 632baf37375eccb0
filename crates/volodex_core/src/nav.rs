//! Navigation controller.
//!
//! The [`Navigator`] owns the [`NavigationState`] and the three derived views
//! (subtype index, creature list, detail record). Every user action goes
//! through [`Navigator::dispatch`], which updates the state and fully rebuilds
//! whichever view depends on the changed part:
//!
//! ```text
//! ToggleAlnumSort ──► rebuild TypeIndex ──► SelectSubtype(first)
//!                                                │
//! ToggleManaValueSort ──► SelectSubtype(current) ┤
//!                                                ▼
//!                          rebuild creature list ──► SelectCreature(first)
//!                                                          │
//!                                                          ▼
//!                                                  resolve DetailRecord
//! ```
//!
//! `ToggleFocus` only moves keyboard focus between the two lists.

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::banned::{BannedSubtypes, DeckListNames};
use crate::card::{Card, Catalog};
use crate::creatures::{select_creatures, CreatureOrder};
use crate::detail::{DetailError, DetailRecord, NO_SELECTION_PLACEHOLDER};
use crate::lookup::card_lookup_url;
use crate::rows::ListRow;
use crate::type_index::{TypeIndex, TypeOrder};

/// Which list receives movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    TypeList,
    CreatureList,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::TypeList => Focus::CreatureList,
            Focus::CreatureList => Focus::TypeList,
        }
    }
}

/// What happens to the subtype selection when the subtype order flips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubtypeReselect {
    /// Always jump to the first group of the new order.
    #[default]
    ResetToFirst,
    /// Keep the selected subtype when it is still listed, else jump to the first group.
    PreserveIfPresent,
}

/// Selection, focus and sort flags of a browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub type_order: TypeOrder,
    pub creature_order: CreatureOrder,
    pub selected_subtype: Option<String>,
    pub selected_card: Option<String>,
    pub focus: Focus,
}

impl NavigationState {
    pub fn sort_alnum(&self) -> bool {
        self.type_order == TypeOrder::Alphabetical
    }

    pub fn sort_by_mana_value(&self) -> bool {
        self.creature_order == CreatureOrder::ByManaValue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    SelectSubtype(String),
    SelectCreature(String),
    ToggleAlnumSort,
    ToggleManaValueSort,
    ToggleFocus,
    /// Move the highlight one row down in the focused list.
    SelectNext,
    /// Move the highlight one row up in the focused list.
    SelectPrevious,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("detail lookup failed: {0}")]
    Detail(#[from] DetailError),
}

pub struct Navigator {
    catalog: Catalog,
    filtered: Catalog,
    banned: BannedSubtypes,
    reselect: SubtypeReselect,
    state: NavigationState,
    type_index: TypeIndex,
    creatures: Vec<Card>,
    /// Row of `selected_card` in `creatures`; names may repeat.
    selected_creature: Option<usize>,
    detail: Option<DetailRecord>,
}

impl Navigator {
    /// Resolve the banned set, filter the catalog and select the first subtype.
    pub fn new(
        catalog: Catalog,
        deck_list: &DeckListNames,
        reselect: SubtypeReselect,
    ) -> Result<Self, NavError> {
        let banned = BannedSubtypes::resolve(&catalog, deck_list);
        let filtered = catalog.without_banned(&banned);
        let state = NavigationState::default();
        let type_index = TypeIndex::build(&filtered, state.type_order);

        let mut nav = Self {
            catalog,
            filtered,
            banned,
            reselect,
            state,
            type_index,
            creatures: Vec::new(),
            selected_creature: None,
            detail: None,
        };
        let first = nav.type_index.first().map(|g| g.subtype.clone());
        nav.select_subtype(first)?;
        Ok(nav)
    }

    pub fn dispatch(&mut self, action: NavAction) -> Result<(), NavError> {
        debug!(?action, "navigation action");
        match action {
            NavAction::SelectSubtype(name) => self.select_subtype(Some(name)),
            NavAction::SelectCreature(name) => self.select_creature(name),
            NavAction::ToggleAlnumSort => {
                self.state.type_order = self.state.type_order.toggled();
                self.type_index = TypeIndex::build(&self.filtered, self.state.type_order);
                let target = match (self.reselect, self.state.selected_subtype.take()) {
                    (SubtypeReselect::PreserveIfPresent, Some(current))
                        if self.type_index.contains(&current) =>
                    {
                        Some(current)
                    }
                    _ => self.type_index.first().map(|g| g.subtype.clone()),
                };
                self.select_subtype(target)
            }
            NavAction::ToggleManaValueSort => {
                self.state.creature_order = self.state.creature_order.toggled();
                match self.state.selected_subtype.clone() {
                    Some(current) => self.select_subtype(Some(current)),
                    None => Ok(()),
                }
            }
            NavAction::ToggleFocus => {
                self.state.focus = self.state.focus.toggled();
                Ok(())
            }
            NavAction::SelectNext => self.step(1),
            NavAction::SelectPrevious => self.step(-1),
        }
    }

    fn select_subtype(&mut self, subtype: Option<String>) -> Result<(), NavError> {
        self.creatures = match subtype.as_deref() {
            Some(name) => select_creatures(&self.filtered, name, self.state.creature_order)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        self.state.selected_subtype = subtype;

        if self.creatures.is_empty() {
            self.state.selected_card = None;
            self.selected_creature = None;
            self.detail = None;
        } else {
            self.select_creature_at(0);
        }
        Ok(())
    }

    /// Select by name: the first matching row of the creature list, else a
    /// catalog lookup.
    fn select_creature(&mut self, name: String) -> Result<(), NavError> {
        if let Some(row) = self.creatures.iter().position(|c| c.name == name) {
            self.select_creature_at(row);
            return Ok(());
        }

        let resolved = DetailRecord::resolve(&self.catalog, &name);
        self.state.selected_card = Some(name);
        self.selected_creature = None;
        match resolved {
            Ok(record) => {
                self.detail = Some(record);
                Ok(())
            }
            Err(err) => {
                self.detail = None;
                Err(err.into())
            }
        }
    }

    fn select_creature_at(&mut self, row: usize) {
        let card = &self.creatures[row];
        self.state.selected_card = Some(card.name.clone());
        self.detail = Some(DetailRecord::from_card(card));
        self.selected_creature = Some(row);
    }

    fn step(&mut self, delta: isize) -> Result<(), NavError> {
        match self.state.focus {
            Focus::TypeList => {
                let current = self.selected_type_index();
                match step_index(current, delta, self.type_index.len()) {
                    Some(idx) if Some(idx) != current => {
                        let name = self.type_index.groups()[idx].subtype.clone();
                        self.select_subtype(Some(name))
                    }
                    _ => Ok(()),
                }
            }
            Focus::CreatureList => {
                let current = self.selected_creature_index();
                match step_index(current, delta, self.creatures.len()) {
                    Some(idx) if Some(idx) != current => {
                        self.select_creature_at(idx);
                        Ok(())
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filtered(&self) -> &Catalog {
        &self.filtered
    }

    pub fn banned(&self) -> &BannedSubtypes {
        &self.banned
    }

    pub fn type_index(&self) -> &TypeIndex {
        &self.type_index
    }

    /// Creatures of the selected subtype in the current order.
    pub fn creatures(&self) -> &[Card] {
        &self.creatures
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        self.detail.as_ref()
    }

    /// Detail pane text, or the placeholder when nothing is selected.
    pub fn detail_text(&self) -> String {
        self.detail
            .as_ref()
            .map(DetailRecord::render)
            .unwrap_or_else(|| NO_SELECTION_PLACEHOLDER.to_string())
    }

    pub fn selected_type_index(&self) -> Option<usize> {
        self.state
            .selected_subtype
            .as_deref()
            .and_then(|s| self.type_index.position(s))
    }

    pub fn selected_creature_index(&self) -> Option<usize> {
        self.selected_creature
    }

    /// The highlighted creature row, or the catalog card selected by name.
    pub fn selected_card(&self) -> Option<&Card> {
        match self.selected_creature {
            Some(row) => self.creatures.get(row),
            None => self
                .state
                .selected_card
                .as_deref()
                .and_then(|name| self.catalog.find(name)),
        }
    }

    /// Card reference URL for the selected creature.
    pub fn lookup_url(&self) -> Option<Url> {
        self.selected_card().map(|card| card_lookup_url(&card.name))
    }

    pub fn type_rows(&self) -> Vec<ListRow<'_>> {
        self.type_index
            .groups()
            .iter()
            .map(|g| ListRow::TypeRow {
                name: &g.subtype,
                count: g.count,
            })
            .collect()
    }

    pub fn creature_rows(&self) -> Vec<ListRow<'_>> {
        self.creatures
            .iter()
            .map(|card| ListRow::CardRow { card })
            .collect()
    }
}

/// Clamped move within a list of `len` rows. `None` only for an empty list.
fn step_index(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(current) = current else {
        return Some(0);
    };
    let max = len - 1;
    Some(current.saturating_add_signed(delta).min(max))
}
