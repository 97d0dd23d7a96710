//! The presence registries and the operations over them.
//!
//! Online users are reference-counted per connection; typing users carry the
//! time of their last signal. Both maps live behind one `RwLock` so a
//! disconnect clears typing in the same critical section and every list is a
//! consistent sorted copy.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::time::{Duration, Instant};

/// Both registries, always locked together.
#[derive(Debug, Default)]
struct Registries {
    /// username -> open connection count (>= 1 while present)
    online: HashMap<String, u64>,
    /// username -> last typing signal
    typing: HashMap<String, Instant>,
}

impl Registries {
    fn online_sorted(&self) -> Vec<String> {
        sorted_keys(self.online.keys())
    }

    fn typing_sorted(&self) -> Vec<String> {
        sorted_keys(self.typing.keys())
    }
}

fn sorted_keys<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = keys.cloned().collect();
    out.sort_unstable();
    out
}

/// Point-in-time view of both registries taken under one read lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub online: Vec<String>,
    pub typing: Vec<String>,
}

/// In-memory presence store: online users (reference-counted) and typing users.
///
/// Construct once per process and share via `Arc`. Mutations take the write
/// lock; list queries take the read lock. Every operation is total.
#[derive(Debug, Default)]
pub struct PresenceStore {
    inner: RwLock<Registries>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more connection for `username` and return the online list
    /// as it stands right after the increment.
    pub fn connect(&self, username: &str) -> Vec<String> {
        let mut reg = self.inner.write();
        let count = reg.online.entry(username.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        reg.online_sorted()
    }

    /// Drop one connection for `username`.
    ///
    /// The last connection removes the user and their typing entry in the same
    /// critical section. Unknown users are a no-op.
    pub fn disconnect(&self, username: &str) {
        let mut guard = self.inner.write();
        let reg = &mut *guard;
        match reg.online.get_mut(username) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                reg.online.remove(username);
                reg.typing.remove(username);
            }
        }
    }

    /// Start (or refresh) or stop the typing signal for `username`.
    ///
    /// The user does not have to be online; such entries are still swept.
    pub fn set_typing(&self, username: &str, is_typing: bool) {
        let mut reg = self.inner.write();
        if is_typing {
            reg.typing.insert(username.to_string(), Instant::now());
        } else {
            reg.typing.remove(username);
        }
    }

    pub fn online_users(&self) -> Vec<String> {
        self.inner.read().online_sorted()
    }

    pub fn typing_users(&self) -> Vec<String> {
        self.inner.read().typing_sorted()
    }

    pub fn snapshot(&self) -> PresenceSnapshot {
        let reg = self.inner.read();
        PresenceSnapshot {
            online: reg.online_sorted(),
            typing: reg.typing_sorted(),
        }
    }

    /// Remove typing entries older than `ttl` as of `now`. Returns how many
    /// entries were evicted.
    pub fn sweep_typing(&self, now: Instant, ttl: Duration) -> usize {
        let mut reg = self.inner.write();
        let before = reg.typing.len();
        reg.typing
            .retain(|_, last| now.saturating_duration_since(*last) <= ttl);
        before - reg.typing.len()
    }

    #[cfg(test)]
    pub(crate) fn backdate_typing(&self, username: &str, at: Instant) {
        self.inner.write().typing.insert(username.to_string(), at);
    }
}
