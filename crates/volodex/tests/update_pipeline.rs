//! Bulk dataset to catalog to navigator, on temp files.

use std::io::Write;

use indicatif::ProgressBar;
use serde_json::json;
use tempfile::TempDir;
use volodex::cli::update::{build_catalog, read_atomic_cards, write_catalog};
use volodex_core::{Catalog, DeckListNames, Navigator, SubtypeReselect, TypeOrder};

fn atomic_fixture() -> serde_json::Value {
    json!({
        "meta": { "version": "5.2.2" },
        "data": {
            "Elvish Archdruid": [{
                "name": "Elvish Archdruid",
                "type": "Creature — Elf Druid",
                "legalities": { "commander": "Legal", "modern": "Legal" },
                "colorIdentity": ["G"],
                "subtypes": ["Elf", "Druid"],
                "manaCost": "{1}{G}{G}",
                "manaValue": 3.0,
                "edhrecRank": 310,
                "text": "Other Elf creatures you control get +1/+1.",
                "power": "2",
                "toughness": "2"
            }],
            "Llanowar Elves": [{
                "name": "Llanowar Elves",
                "type": "Creature — Elf Druid",
                "legalities": { "commander": "Legal" },
                "colorIdentity": ["G"],
                "subtypes": ["Elf", "Druid"],
                "manaCost": "{G}",
                "manaValue": 1.0,
                "edhrecRank": 120,
                "text": "{T}: Add {G}.",
                "power": "1",
                "toughness": "1"
            }],
            "Merfolk Looter": [{
                "name": "Merfolk Looter",
                "type": "Creature — Merfolk Rogue",
                "legalities": { "commander": "Legal" },
                "colorIdentity": ["U"],
                "subtypes": ["Merfolk", "Rogue"],
                "manaCost": "{1}{U}",
                "manaValue": 2.0,
                "text": "{T}: Draw a card, then discard a card.",
                "power": "1",
                "toughness": "1"
            }],
            "Goblin Guide": [{
                "name": "Goblin Guide",
                "type": "Creature — Goblin Scout",
                "legalities": { "commander": "Legal" },
                "colorIdentity": ["R"],
                "subtypes": ["Goblin", "Scout"],
                "manaValue": 1.0
            }],
            "Snapcaster Mage": [{
                "name": "Snapcaster Mage",
                "type": "Creature — Human Wizard",
                "legalities": { "commander": "Legal" },
                "colorIdentity": ["U"],
                "subtypes": ["Human", "Wizard"],
                "manaValue": 2.0
            }],
            "Counterspell": [{
                "name": "Counterspell",
                "type": "Instant",
                "legalities": { "commander": "Legal" },
                "colorIdentity": ["U"],
                "manaValue": 2.0
            }]
        }
    })
}

fn write_xz(path: &std::path::Path, value: &serde_json::Value) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = xz2::write::XzEncoder::new(file, 6);
    encoder
        .write_all(serde_json::to_string(value).unwrap().as_bytes())
        .unwrap();
    encoder.finish().unwrap();
}

#[test]
fn xz_bulk_file_builds_a_loadable_catalog() {
    let temp = TempDir::new().unwrap();
    let bulk = temp.path().join("AtomicCards.json.xz");
    let store = temp.path().join("volodex.json");
    write_xz(&bulk, &atomic_fixture());

    let atomic = read_atomic_cards(&bulk).unwrap();
    let cards = build_catalog(&atomic, &ProgressBar::hidden());
    write_catalog(&store, &cards).unwrap();

    let catalog = Catalog::load(&store).unwrap();
    let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Elvish Archdruid", "Llanowar Elves", "Merfolk Looter"]);

    let looter = catalog.find("Merfolk Looter").unwrap();
    assert_eq!(looter.edhrec_rank, volodex_core::UNRANKED_EDHREC_RANK);
}

#[test]
fn plain_json_bulk_file_is_accepted() {
    let temp = TempDir::new().unwrap();
    let bulk = temp.path().join("AtomicCards.json");
    std::fs::write(&bulk, serde_json::to_string(&atomic_fixture()).unwrap()).unwrap();

    let atomic = read_atomic_cards(&bulk).unwrap();
    assert_eq!(build_catalog(&atomic, &ProgressBar::hidden()).len(), 3);
}

#[test]
fn generated_catalog_drives_the_navigator() {
    let temp = TempDir::new().unwrap();
    let bulk = temp.path().join("AtomicCards.json.xz");
    let store = temp.path().join("nested").join("volodex.json");
    write_xz(&bulk, &atomic_fixture());

    let atomic = read_atomic_cards(&bulk).unwrap();
    write_catalog(&store, &build_catalog(&atomic, &ProgressBar::hidden())).unwrap();

    let deck: DeckListNames = ["Merfolk Looter".to_string()].into_iter().collect();
    let nav = Navigator::new(
        Catalog::load(&store).unwrap(),
        &deck,
        SubtypeReselect::ResetToFirst,
    )
    .unwrap();

    assert!(nav.banned().contains("Merfolk"));
    assert!(nav.banned().contains("Rogue"));
    assert_eq!(nav.state().type_order, TypeOrder::ByCount);
    assert_eq!(nav.state().selected_subtype.as_deref(), Some("Elf"));
    assert_eq!(nav.state().selected_card.as_deref(), Some("Llanowar Elves"));
    assert!(nav.detail_text().starts_with("Llanowar Elves — {G}"));
}

#[test]
fn corrupt_bulk_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let bulk = temp.path().join("AtomicCards.json.xz");
    std::fs::write(&bulk, b"definitely not xz").unwrap();

    let err = read_atomic_cards(&bulk).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse bulk dataset"));
}
