pub mod events;
pub mod logging;
pub mod session;
pub mod state;
