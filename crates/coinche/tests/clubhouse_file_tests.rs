//! Clubhouse over a real JSON file
//!
//! Covers:
//! - State surviving a reopen
//! - Reports rendered from reloaded state
//! - Import through the clubhouse being persisted

use coinche::{report, Clubhouse, JsonFileStore, Store};
use coinche_core::{ImportPolicy, StatsSort, TableRef, Team};
use std::path::PathBuf;

fn temp_file(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("coinche-{}-{}.json", label, uuid::Uuid::new_v4()))
}

// =============================================================================
// Reopen
// =============================================================================

#[test]
fn test_evening_survives_reopen() {
    let path = temp_file("evening");

    let (session, round) = {
        let mut house = Clubhouse::open(JsonFileStore::new(&path), Some(11)).unwrap();
        let session = house.execute(|club| Ok(club.create_session(None))).unwrap();
        for name in ["Alexandre", "Marie", "Paul", "Luc", "Sophie"] {
            house
                .execute(|club| {
                    let id = club.add_player(name)?;
                    club.set_attendance(&session, &id, true)
                })
                .unwrap();
        }
        let round = house.create_round().unwrap();
        let at = TableRef::new(session.clone(), round.clone(), 0);
        house.execute(|club| club.set_winner(&at, Some(Team::B))).unwrap();
        (session, round)
    };

    let house = Clubhouse::open(JsonFileStore::new(&path), None).unwrap();
    let club = house.club();
    assert_eq!(club.players().len(), 5);
    assert_eq!(club.waiting_players().len(), 1);

    let table = club.table(&TableRef::new(session, round, 0)).unwrap();
    assert_eq!(table.winner, Some(Team::B));
    assert_eq!(table.loser_pays_per_player, Some(5));
    assert_eq!(club.total_pot(), 10);

    let stats = club.stats(StatsSort::Euros);
    assert_eq!(stats[0].euros, 5);
    assert!(report::stats_table(&stats).contains("5 €"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_no_temp_file_left_behind() {
    let path = temp_file("tmp");
    let mut house = Clubhouse::open(JsonFileStore::new(&path), None).unwrap();
    house.execute(|club| club.add_player("Chloé")).unwrap();

    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    assert!(path.exists());
    assert!(!PathBuf::from(tmp).exists());

    let _ = std::fs::remove_file(&path);
}

// =============================================================================
// Import
// =============================================================================

#[test]
fn test_replace_import_is_persisted() {
    let source = temp_file("source");
    let target = temp_file("target");

    let mut from = Clubhouse::open(JsonFileStore::new(&source), None).unwrap();
    from.execute(|club| club.add_player("Zoé")).unwrap();
    let exported = from.club().export_json().unwrap();

    let mut to = Clubhouse::open(JsonFileStore::new(&target), None).unwrap();
    to.execute(|club| club.add_player("Hugo")).unwrap();
    to.execute(|club| club.import_json(&exported, ImportPolicy::Replace))
        .unwrap();

    let saved = JsonFileStore::new(&target).load().unwrap();
    assert_eq!(saved.players.len(), 1);
    assert_eq!(saved.players[0].name, "Zoé");

    let _ = std::fs::remove_file(&source);
    let _ = std::fs::remove_file(&target);
}

#[test]
fn test_bad_import_leaves_file_untouched() {
    let path = temp_file("bad");
    let mut house = Clubhouse::open(JsonFileStore::new(&path), None).unwrap();
    house.execute(|club| club.add_player("Inès")).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(house
        .execute(|club| club.import_json("{\"players\": []}", ImportPolicy::Replace))
        .is_err());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    let _ = std::fs::remove_file(&path);
}
