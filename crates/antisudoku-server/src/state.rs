use std::sync::{Arc, Mutex};

use crate::session::SessionManager;

/// Handle for hosts that process transport events on more than one thread.
/// The mutex is what keeps the pair-at-exactly-two trigger atomic; a
/// single-threaded host can own a `SessionManager` directly instead.
pub type SharedSessionManager<H> = Arc<Mutex<SessionManager<H>>>;

/// Create an empty manager behind its lock.
pub fn shared<H: Clone>() -> SharedSessionManager<H> {
    Arc::new(Mutex::new(SessionManager::new()))
}
