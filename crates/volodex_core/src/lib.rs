//! Volodex core
//!
//! Everything the creature browser needs that is not I/O or drawing:
//!
//! - `card`: the immutable card catalog and its JSON store loader
//! - `banned`: default + deck-list derived banned subtypes
//! - `type_index`: subtype occurrence counts in two orderings
//! - `creatures`: per-subtype creature selection in two stable orderings
//! - `nav`: the navigation controller that keeps the three views in sync
//! - `detail`: detail pane projection of a single card
//! - `rows`: list row variants handed to the rendering layer
//! - `lookup`: card reference URL for the external browser

pub mod banned;
pub mod card;
pub mod creatures;
pub mod detail;
pub mod lookup;
pub mod nav;
pub mod rows;
pub mod type_index;

pub use banned::{BannedSubtypes, DeckListNames, DEFAULT_BANNED_SUBTYPES};
pub use card::{Card, Catalog, LoadError, UNRANKED_EDHREC_RANK};
pub use creatures::{select_creatures, CreatureOrder};
pub use detail::{DetailError, DetailRecord, NO_SELECTION_PLACEHOLDER};
pub use lookup::{card_lookup_url, CARD_SEARCH_URL};
pub use nav::{Focus, NavAction, NavError, NavigationState, Navigator, SubtypeReselect};
pub use rows::ListRow;
pub use type_index::{TypeGroup, TypeIndex, TypeOrder};
