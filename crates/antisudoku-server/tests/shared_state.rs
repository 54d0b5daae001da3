use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use antisudoku_server::events::SessionEvent;
use antisudoku_server::state;

#[test]
fn concurrent_registrations_fill_rooms_without_leftovers() {
    antisudoku_server::logging::init();
    let manager = state::shared::<String>();

    let ids = ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"];
    let workers: Vec<_> = ids
        .iter()
        .copied()
        .map(|id| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                manager
                    .lock()
                    .unwrap()
                    .register_player(id.to_string(), format!("conn-{id}"));
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let mut manager = manager.lock().unwrap();
    let events = manager.drain_events();

    let mut rooms = HashSet::new();
    let mut seated = 0;
    for event in &events {
        let SessionEvent::PlayerAssigned { room, .. } = event else {
            continue;
        };
        rooms.insert(room.clone());
        seated += 1;
    }
    assert_eq!(seated, 8, "every registrant ends up seated");
    assert_eq!(rooms.len(), 4, "eight players make four rooms");
    for id in ids {
        assert!(manager.room_id(id).is_some(), "{id} should be in a room");
    }
}

#[test]
fn each_room_seats_exactly_one_and_one_two() {
    let manager = state::shared::<String>();

    let workers: Vec<_> = ["alice", "bob"]
        .iter()
        .map(|id| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                manager
                    .lock()
                    .unwrap()
                    .register_player(id.to_string(), format!("conn-{id}"));
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let mut manager = manager.lock().unwrap();
    let seats: Vec<_> = manager
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::PlayerAssigned { room, number, .. } => Some((room, number)),
            _ => None,
        })
        .collect();

    assert_eq!(seats.len(), 2);
    assert_eq!(seats[0].0, seats[1].0, "one room for the pair");
    assert_ne!(seats[0].1, seats[1].1, "seats are distinct");
}
