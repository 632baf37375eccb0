//! Rows handed to the rendering layer.

use crate::card::Card;

/// One entry of either browse list. Renderers match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRow<'a> {
    TypeRow { name: &'a str, count: usize },
    CardRow { card: &'a Card },
}

impl<'a> ListRow<'a> {
    /// Key used to select this row through the navigator.
    pub fn key(&self) -> &'a str {
        match *self {
            ListRow::TypeRow { name, .. } => name,
            ListRow::CardRow { card } => &card.name,
        }
    }
}
