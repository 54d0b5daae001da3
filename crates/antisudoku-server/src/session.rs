use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use antisudoku_core::board::{Board, WinReport};
use antisudoku_core::player::{PlayerId, PlayerNumber};

use crate::events::SessionEvent;

/// Room identifier, derived from the instant the pair was formed.
pub type RoomId = String;

/// Seats per room. Pairing triggers the moment this many players wait.
pub const ROOM_CAPACITY: usize = 2;

struct PlayerRecord<H> {
    handle: H,
    room: Option<RoomId>,
    number: Option<PlayerNumber>,
}

struct RoomEntry {
    board: Board,
    win_slot: Arc<Mutex<Option<WinReport>>>,
    complete: bool,
}

/// Pairs anonymous players into two-seat rooms and polices whose turn it is.
///
/// `H` is the host's transport handle (a socket wrapper, a channel sender).
/// The manager never looks inside it; it only hands it back in the events
/// drained after each operation so the host knows where to send what.
pub struct SessionManager<H> {
    players: HashMap<PlayerId, PlayerRecord<H>>,
    waiting: Vec<PlayerId>,
    rooms: HashMap<RoomId, RoomEntry>,
    outbound: Vec<SessionEvent<H>>,
}

impl<H: Clone> Default for SessionManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone> SessionManager<H> {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            waiting: Vec::new(),
            rooms: HashMap::new(),
            outbound: Vec::new(),
        }
    }

    /// Admit a player to the waiting queue, pairing them the moment a second
    /// player is available. A player who registers again while still known is
    /// torn down first, exactly as if they had disconnected.
    pub fn register_player(&mut self, id: PlayerId, handle: H) {
        if self.players.contains_key(&id) {
            self.deregister_player(&id);
        }

        self.players.insert(
            id.clone(),
            PlayerRecord {
                handle,
                room: None,
                number: None,
            },
        );
        self.waiting.push(id);
        tracing::debug!(waiting = self.waiting.len(), "Player queued for pairing");

        if self.waiting.len() == ROOM_CAPACITY {
            self.pair_waiting();
        }
    }

    /// Remove a player. If they were seated, the whole room goes with them:
    /// the board is dropped, every other member is kicked and forgotten, and
    /// a `RoomDestroyed` event closes the cascade.
    pub fn deregister_player(&mut self, id: &str) {
        self.waiting.retain(|waiting| waiting != id);

        let Some(room_id) = self.players.get(id).and_then(|record| record.room.clone()) else {
            if self.players.remove(id).is_some() {
                tracing::debug!(player = id, "Player removed before pairing");
            }
            return;
        };

        self.rooms.remove(&room_id);

        let members: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(_, record)| record.room.as_deref() == Some(room_id.as_str()))
            .map(|(member, _)| member.clone())
            .collect();

        for member in members {
            let Some(record) = self.players.remove(&member) else {
                continue;
            };
            if member != id {
                self.outbound.push(SessionEvent::PlayerKicked {
                    player: member,
                    handle: record.handle,
                    room: room_id.clone(),
                });
            }
        }

        tracing::info!(room = %room_id, initiator = id, "Room torn down");
        self.outbound.push(SessionEvent::RoomDestroyed { room: room_id });
    }

    /// Room the player is currently seated in, if any.
    pub fn room_id(&self, id: &str) -> Option<RoomId> {
        self.players.get(id).and_then(|record| record.room.clone())
    }

    /// Place `num` at `(row, col)` on behalf of `id`. Fails closed when the
    /// player is unknown, unseated, out of turn, or the room is complete.
    pub fn place_number(&mut self, id: &str, num: u8, row: usize, col: usize) -> bool {
        self.with_turn(id, |board| board.place_number(num, row, col, true))
    }

    /// Remove the player's own number at `(row, col)`.
    pub fn remove_number(&mut self, id: &str, row: usize, col: usize) -> bool {
        self.with_turn(id, |board| board.remove_number(row, col, true))
    }

    /// Relocate the player's own number within its row, column or nonet.
    pub fn move_number(
        &mut self,
        id: &str,
        src_row: usize,
        src_col: usize,
        dst_row: usize,
        dst_col: usize,
    ) -> bool {
        self.with_turn(id, |board| {
            board.move_number(src_row, src_col, dst_row, dst_col, true)
        })
    }

    /// Freeze a room after its win has been relayed. Further moves in the
    /// room fail until a member deregisters and tears it down.
    pub fn mark_room_complete(&mut self, room_id: &str) -> bool {
        let Some(entry) = self.rooms.get_mut(room_id) else {
            return false;
        };
        entry.complete = true;
        tracing::debug!(room = room_id, "Room marked complete");
        true
    }

    /// Take every event queued since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<SessionEvent<H>> {
        std::mem::take(&mut self.outbound)
    }

    /// Run a board operation for `id`, but only if the player is seated and
    /// it is their turn. A win produced by the operation is lifted out of the
    /// room's slot and queued for the host.
    fn with_turn(&mut self, id: &str, op: impl FnOnce(&mut Board) -> bool) -> bool {
        let Some(record) = self.players.get(id) else {
            return false;
        };
        let (Some(room_id), Some(number)) = (record.room.clone(), record.number) else {
            return false;
        };
        let Some(entry) = self.rooms.get_mut(&room_id) else {
            return false;
        };
        if entry.complete || entry.board.current_player() != number {
            return false;
        }
        if !op(&mut entry.board) {
            return false;
        }

        if let Some(report) = entry.win_slot.lock().unwrap().take() {
            tracing::info!(room = %room_id, winner = %report.player, "Game won");
            self.outbound.push(SessionEvent::GameWon {
                room: room_id,
                report,
            });
        }
        true
    }

    fn pair_waiting(&mut self) {
        let room_id = unique_room_id(&self.rooms);
        let win_slot = Arc::new(Mutex::new(None));

        let mut board = Board::new();
        let slot = Arc::clone(&win_slot);
        board.set_win_handler(move |report| {
            *slot.lock().unwrap() = Some(report.clone());
        });
        self.rooms.insert(
            room_id.clone(),
            RoomEntry {
                board,
                win_slot,
                complete: false,
            },
        );

        let mut number = PlayerNumber::One;
        for id in std::mem::take(&mut self.waiting) {
            let Some(record) = self.players.get_mut(&id) else {
                continue;
            };
            record.room = Some(room_id.clone());
            record.number = Some(number);
            let handle = record.handle.clone();
            self.outbound.push(SessionEvent::PlayerAssigned {
                player: id,
                handle,
                room: room_id.clone(),
                number,
            });
            number = number.other();
        }

        tracing::info!(room = %room_id, "Paired waiting players into a new room");
    }
}

/// Millisecond timestamp of the pairing, salted only when two pairings land
/// inside the same millisecond.
fn unique_room_id(existing: &HashMap<RoomId, RoomEntry>) -> RoomId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let base = millis.to_string();
    if !existing.contains_key(&base) {
        return base;
    }

    let mut rng = rand::rng();
    loop {
        let id = format!("{base}-{:03}", rng.random_range(0..1000));
        if !existing.contains_key(&id) {
            return id;
        }
    }
}
