use serde::{Deserialize, Serialize};

/// Opaque identifier the transport layer assigns to each connection.
pub type PlayerId = String;

/// Seat inside a room. Player one is the first of the pair to have
/// registered and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl From<PlayerNumber> for u8 {
    fn from(number: PlayerNumber) -> Self {
        match number {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }
}

impl TryFrom<u8> for PlayerNumber {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("invalid player number: {other}")),
        }
    }
}

impl std::fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
