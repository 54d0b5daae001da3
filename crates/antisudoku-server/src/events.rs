use antisudoku_core::board::WinReport;
use antisudoku_core::player::{PlayerId, PlayerNumber};

use crate::session::RoomId;

/// Broadcast-worthy outcome of a session operation. The manager queues these
/// and the host drains them after each call, relaying each one over whatever
/// transport owns the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent<H> {
    /// Two waiting players were paired; emitted once per member.
    PlayerAssigned {
        player: PlayerId,
        handle: H,
        room: RoomId,
        number: PlayerNumber,
    },
    /// The player's room was torn down by the other member leaving.
    PlayerKicked {
        player: PlayerId,
        handle: H,
        room: RoomId,
    },
    /// The room and its board no longer exist.
    RoomDestroyed { room: RoomId },
    /// A placement completed a row, column or nonet.
    GameWon { room: RoomId, report: WinReport },
}
