use super::*;
use crate::store::MemoryStore;
use coinche_core::State;

/// Store whose writes always fail
struct BrokenStore;

impl Store for BrokenStore {
    fn load(&self) -> Result<State, StoreError> {
        Ok(State::default())
    }

    fn save(&mut self, _state: &State) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "broken".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }
}

fn seeded_house(players: usize) -> Clubhouse<MemoryStore> {
    let mut house = Clubhouse::open(MemoryStore::default(), Some(1)).unwrap();
    let session = house.execute(|club| Ok(club.create_session(None))).unwrap();
    for i in 0..players {
        house
            .execute(|club| {
                let id = club.add_player(&format!("Joueur {}", i))?;
                club.set_attendance(&session, &id, true)
            })
            .unwrap();
    }
    house
}

#[test]
fn test_successful_commands_are_saved() {
    let house = seeded_house(4);
    assert_eq!(house.store().saves, 5);
    assert_eq!(house.store().saved.as_ref(), Some(house.club().state()));
}

#[test]
fn test_failed_command_does_not_save() {
    let mut house = seeded_house(1);
    let saves = house.store().saves;

    let err = house.execute(|club| club.add_player("joueur 0")).unwrap_err();

    assert!(matches!(err, CommandError::Club(CoincheError::DuplicateName(_))));
    assert_eq!(house.store().saves, saves);
}

#[test]
fn test_round_commands() {
    let mut house = seeded_house(5);
    let saves = house.store().saves;

    house.create_round().unwrap();
    assert_eq!(house.store().saves, saves + 1);

    assert!(house.undo_round().unwrap().is_some());
    assert!(house.undo_round().unwrap().is_none());
    assert_eq!(house.store().saves, saves + 2);
}

#[test]
fn test_insufficient_players_reported() {
    let mut house = seeded_house(3);
    let err = house.create_round().unwrap_err();
    assert!(matches!(
        err,
        CommandError::Club(CoincheError::InsufficientPlayers { present: 3 })
    ));
}

#[test]
fn test_seeded_draws_repeat() {
    let mut first = seeded_house(8);
    let mut second = seeded_house(8);
    first.create_round().unwrap();
    second.create_round().unwrap();

    let seating = |house: &Clubhouse<MemoryStore>| {
        let state = house.club().state();
        let names: Vec<String> = state
            .tables()
            .flat_map(|t| t.members())
            .map(|id| state.player_name(id))
            .collect();
        names
    };
    assert_eq!(seating(&first), seating(&second));
}

#[test]
fn test_failed_save_rolls_back() {
    let mut house = Clubhouse::open(BrokenStore, None).unwrap();
    let err = house.execute(|club| club.add_player("Tom")).unwrap_err();

    assert!(matches!(err, CommandError::Store(_)));
    assert!(house.club().players().is_empty());
}
