pub mod board;
pub mod net;
pub mod player;
