//! Card records and the catalog loader.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Rank stored for cards the popularity list does not cover.
pub const UNRANKED_EDHREC_RANK: u32 = 999_999;

/// Fields every catalog record must carry.
const REQUIRED_FIELDS: &[&str] = &["name", "subtypes", "manaValue", "edhrecRank", "type"];

/// A single creature card as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    /// Single-letter color codes, stored as a string such as `"GU"`.
    #[serde(default, with = "color_letters")]
    pub color_identity: BTreeSet<char>,
    #[serde(default)]
    pub mana_cost: String,
    pub mana_value: u32,
    #[serde(rename = "type")]
    pub type_line: String,
    pub subtypes: Vec<String>,
    pub edhrec_rank: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
}

impl Card {
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }
}

mod color_letters {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeSet;

    pub fn serialize<S: Serializer>(colors: &BTreeSet<char>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&colors.iter().collect::<String>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<char>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        Ok(raw.chars().filter(|c| c.is_ascii_alphabetic()).collect())
    }
}

/// Errors raised while loading the catalog store. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog store not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("catalog store is malformed: {detail}")]
    Malformed {
        /// Index of the offending record, when the failure is record-specific.
        record: Option<usize>,
        detail: String,
    },

    #[error("failed to read catalog store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn malformed_record(index: usize, detail: impl Into<String>) -> Self {
        LoadError::Malformed {
            record: Some(index),
            detail: format!("record {}: {}", index, detail.into()),
        }
    }
}

/// Immutable, ordered card collection. Load order is the tie-break for every stable sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Load the JSON array store at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let document: Value =
            serde_json::from_reader(BufReader::new(file)).map_err(|err| LoadError::Malformed {
                record: None,
                detail: err.to_string(),
            })?;

        let catalog = Self::from_json(document)?;
        debug!(path = %path.display(), cards = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from an already parsed JSON document.
    pub fn from_json(document: Value) -> Result<Self, LoadError> {
        let Value::Array(records) = document else {
            return Err(LoadError::Malformed {
                record: None,
                detail: "expected a sequence of card records".to_string(),
            });
        };

        let mut cards = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let Some(fields) = record.as_object() else {
                return Err(LoadError::malformed_record(index, "not an object"));
            };
            if let Some(missing) = REQUIRED_FIELDS
                .iter()
                .find(|field| fields.get(**field).map_or(true, Value::is_null))
            {
                return Err(LoadError::malformed_record(
                    index,
                    format!("missing required field `{}`", missing),
                ));
            }

            let mut card: Card = serde_json::from_value(record)
                .map_err(|err| LoadError::malformed_record(index, err.to_string()))?;
            if card.full_name.is_empty() {
                card.full_name = card.name.clone();
            }
            cards.push(card);
        }

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// First card carrying `name`. Duplicate names resolve to the earliest record.
    pub fn find(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(name: &str) -> Value {
        json!({
            "name": name,
            "fullName": name,
            "colorIdentity": "GU",
            "manaCost": "{1}{G}",
            "manaValue": 2,
            "type": "Creature — Elf Druid",
            "subtypes": ["Elf", "Druid"],
            "edhrecRank": 42,
            "text": "{T}: Add {G}.",
            "power": "1",
            "toughness": "1"
        })
    }

    #[test]
    fn test_from_json_preserves_order_and_fields() {
        let catalog = Catalog::from_json(json!([record("Llanowar Elves"), record("Elvish Mystic")]))
            .unwrap();

        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Llanowar Elves", "Elvish Mystic"]);

        let first = &catalog.cards()[0];
        assert_eq!(first.mana_value, 2);
        assert_eq!(first.edhrec_rank, 42);
        assert_eq!(first.type_line, "Creature — Elf Druid");
        assert_eq!(first.color_identity, ['G', 'U'].into_iter().collect());
        assert_eq!(first.power.as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        for field in REQUIRED_FIELDS {
            let mut bad = record("Broken");
            bad.as_object_mut().unwrap().remove(*field);
            let err = Catalog::from_json(json!([record("Fine"), bad])).unwrap_err();
            match err {
                LoadError::Malformed { record, detail } => {
                    assert_eq!(record, Some(1));
                    assert!(detail.contains(field), "detail should name {}: {}", field, detail);
                }
                other => panic!("expected Malformed, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_null_required_field_is_malformed() {
        let mut bad = record("Broken");
        bad["edhrecRank"] = Value::Null;
        assert!(matches!(
            Catalog::from_json(json!([bad])),
            Err(LoadError::Malformed { record: Some(0), .. })
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let catalog = Catalog::from_json(json!([{
            "name": "Bare",
            "manaValue": 0,
            "type": "Creature — Ooze",
            "subtypes": ["Ooze"],
            "edhrecRank": 999999,
            "power": null
        }]))
        .unwrap();

        let card = &catalog.cards()[0];
        assert_eq!(card.full_name, "Bare");
        assert!(card.color_identity.is_empty());
        assert_eq!(card.mana_cost, "");
        assert_eq!(card.text, "");
        assert_eq!(card.power, None);
        assert_eq!(card.toughness, None);
        assert_eq!(card.edhrec_rank, UNRANKED_EDHREC_RANK);
    }

    #[test]
    fn test_non_array_document_is_malformed() {
        assert!(matches!(
            Catalog::from_json(json!({"data": []})),
            Err(LoadError::Malformed { record: None, .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("volodex.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!([record("Llanowar Elves")])).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Llanowar Elves").is_some());
    }

    #[test]
    fn test_load_invalid_json_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{\"name\": ").unwrap();

        assert!(matches!(
            Catalog::load(file.path()),
            Err(LoadError::Malformed { record: None, .. })
        ));
    }

    #[test]
    fn test_find_returns_first_duplicate() {
        let mut second = record("Twin");
        second["edhrecRank"] = json!(7);
        let catalog = Catalog::from_json(json!([record("Twin"), second])).unwrap();

        assert_eq!(catalog.find("Twin").unwrap().edhrec_rank, 42);
    }

    #[test]
    fn test_serialize_round_trips_color_letters() {
        let catalog = Catalog::from_json(json!([record("Llanowar Elves")])).unwrap();
        let value = serde_json::to_value(&catalog.cards()[0]).unwrap();
        assert_eq!(value["colorIdentity"], json!("GU"));
        assert_eq!(value["type"], json!("Creature — Elf Druid"));
    }
}
