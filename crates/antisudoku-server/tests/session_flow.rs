use antisudoku_core::board::WinKind;
use antisudoku_core::net::messages::{AssignedRoomMsg, ServerMessage};
use antisudoku_core::net::protocol::encode_server_message;
use antisudoku_core::player::PlayerNumber;
use antisudoku_server::events::SessionEvent;
use antisudoku_server::session::SessionManager;

fn register(manager: &mut SessionManager<String>, id: &str) {
    manager.register_player(id.to_string(), format!("conn-{id}"));
}

#[test]
fn pairing_produces_wire_ready_seat_assignments() {
    let mut manager = SessionManager::new();
    register(&mut manager, "alice");
    register(&mut manager, "bob");

    let mut seats = 0;
    for event in manager.drain_events() {
        let SessionEvent::PlayerAssigned { number, .. } = event else {
            continue;
        };
        let wire = encode_server_message(&ServerMessage::AssignedRoom(AssignedRoomMsg {
            player_number: number,
        }))
        .expect("assignment should encode");

        let value: serde_json::Value = serde_json::from_slice(&wire).unwrap();
        assert_eq!(value["event"], "assignedRoom");
        assert_eq!(value["playerNumber"], u8::from(number) as u64);
        seats += 1;
    }
    assert_eq!(seats, 2, "one assignment per member of the pair");
}

#[test]
fn a_full_game_runs_from_pairing_to_teardown() {
    let mut manager = SessionManager::new();
    register(&mut manager, "alice");
    register(&mut manager, "bob");
    let room = manager.room_id("alice").expect("alice is seated");
    assert_eq!(manager.room_id("bob").as_deref(), Some(room.as_str()));
    manager.drain_events();

    // Alternate legal placements until the first row is full. Alice opened,
    // so the ninth placement, and the win, are hers.
    for col in 0..9 {
        let id = if col % 2 == 0 { "alice" } else { "bob" };
        assert!(manager.place_number(id, col as u8 + 1, 0, col));
    }

    let events = manager.drain_events();
    let SessionEvent::GameWon {
        room: won_room,
        report,
    } = &events[0]
    else {
        panic!("expected a win, got {:?}", events[0]);
    };
    assert_eq!(*won_room, room);
    assert_eq!(report.player, PlayerNumber::One);
    assert_eq!(report.kind, WinKind::Row);

    let wire = encode_server_message(&ServerMessage::GameWon(report.clone()))
        .expect("win report should encode");
    let value: serde_json::Value = serde_json::from_slice(&wire).unwrap();
    assert_eq!(value["event"], "gameWon");
    assert_eq!(value["kind"], "row");

    assert!(manager.mark_room_complete(&room));
    assert!(!manager.place_number("bob", 1, 1, 0), "frozen after the win");

    manager.deregister_player("alice");
    let teardown = manager.drain_events();
    assert!(teardown.iter().any(|event| matches!(
        event,
        SessionEvent::PlayerKicked { player, .. } if player == "bob"
    )));
    assert!(
        teardown
            .iter()
            .any(|event| matches!(event, SessionEvent::RoomDestroyed { .. }))
    );
    assert_eq!(manager.room_id("bob"), None);
}

#[test]
fn rejected_attempts_leave_the_session_usable() {
    let mut manager = SessionManager::new();
    register(&mut manager, "alice");
    register(&mut manager, "bob");

    assert!(!manager.place_number("ghost", 5, 0, 0), "never registered");
    assert!(!manager.place_number("bob", 5, 0, 0), "alice opens");
    assert!(!manager.place_number("alice", 0, 0, 0), "zero is not placeable");
    assert!(!manager.place_number("alice", 5, 9, 0), "row out of range");
    assert!(!manager.remove_number("alice", 0, 0), "nothing there yet");
    assert!(!manager.move_number("alice", 0, 0, 0, 1), "nothing to move");

    assert!(manager.place_number("alice", 5, 0, 0));
    assert!(manager.place_number("bob", 6, 0, 1));
    assert_eq!(manager.drain_events().len(), 2, "only the two assignments");
}
