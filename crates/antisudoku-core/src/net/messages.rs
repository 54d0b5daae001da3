use serde::{Deserialize, Serialize};

use crate::board::WinReport;
use crate::player::PlayerNumber;

/// Payload for placing a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceNumberMsg {
    pub num: u8,
    pub row: u8,
    pub col: u8,
}

/// Payload for removing a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveNumberMsg {
    pub row: u8,
    pub col: u8,
}

/// Payload for sliding a number along its row, column or nonet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNumberMsg {
    pub src_row: u8,
    pub src_col: u8,
    pub dst_row: u8,
    pub dst_col: u8,
}

/// Payload telling a newly paired client its seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedRoomMsg {
    pub player_number: PlayerNumber,
}

/// Requests a client sends, tagged by event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientMessage {
    NewGame,
    PlaceNumber(PlaceNumberMsg),
    RemoveNumber(RemoveNumberMsg),
    MoveNumber(MoveNumberMsg),
    Disconnect,
}

/// Notifications relayed to clients. The `Number*` variants echo the payload
/// of the request they confirm and are broadcast to the rest of the room only
/// after the session layer accepted the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerMessage {
    AssignedRoom(AssignedRoomMsg),
    Kicked,
    NumberPlaced(PlaceNumberMsg),
    NumberRemoved(RemoveNumberMsg),
    NumberMoved(MoveNumberMsg),
    GameWon(WinReport),
}
