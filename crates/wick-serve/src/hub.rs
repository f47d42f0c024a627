//! Reload broadcast hub for Server-Sent-Events clients.
//!
//! The hub owns the only shared mutable state in the server: the list of
//! currently-connected reload subscribers. Registration hands out a drop
//! guard so a client is removed from the list the moment its response
//! stream is dropped, which keeps broadcasts from ever targeting a stale
//! entry twice.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message pushed to every subscriber on a reload broadcast.
///
/// On the wire this becomes `data: reload\n\n`.
pub const RELOAD_MESSAGE: &str = "reload";

/// Per-client channel depth. Reload notifications are tiny and rare; a
/// client this far behind is effectively gone.
const CLIENT_CHANNEL_CAPACITY: usize = 16;

struct HubInner {
    clients: HashMap<usize, mpsc::Sender<String>>,
    next_id: usize,
    closed: bool,
}

/// Owns the set of connected reload subscribers.
///
/// All operations are safe to call from any task. Broadcasting on a closed
/// hub is a no-op, never an error: a watch cycle that finishes after
/// shutdown simply has nobody left to tell.
pub struct ReloadHub {
    inner: RwLock<HubInner>,
}

impl ReloadHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HubInner {
                clients: HashMap::new(),
                next_id: 0,
                closed: false,
            }),
        }
    }

    /// Register a new subscriber.
    ///
    /// Returns the client's receiver plus a [`ClientHandle`] guard; dropping
    /// the guard removes the client from the list synchronously. Returns
    /// `None` once the hub has been closed.
    pub fn register(self: &Arc<Self>) -> Option<(ClientHandle, mpsc::Receiver<String>)> {
        let mut inner = self.inner.write();
        if inner.closed {
            return None;
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let (tx, rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
        inner.clients.insert(id, tx);

        Some((
            ClientHandle {
                hub: Arc::clone(self),
                id,
            },
            rx,
        ))
    }

    /// Send one reload message to every registered subscriber.
    ///
    /// A failed send (client mid-disconnect, channel full) is ignored; the
    /// client's own guard removes it from the list. Failures never prevent
    /// delivery to the remaining subscribers.
    pub async fn broadcast(&self) {
        let clients: Vec<(usize, mpsc::Sender<String>)> = {
            let inner = self.inner.read();
            if inner.closed {
                return;
            }
            inner.clients.iter().map(|(id, tx)| (*id, tx.clone())).collect()
        };

        for (id, tx) in clients {
            if tx.send(RELOAD_MESSAGE.to_string()).await.is_err() {
                tracing::debug!(client = id, "reload not delivered, client is closing");
            }
        }
    }

    /// End every open subscription and refuse new ones.
    ///
    /// Dropping the senders ends each client's response stream. Idempotent:
    /// closing an empty or already-closed hub does nothing.
    pub fn close_all(&self) {
        let mut inner = self.inner.write();
        inner.closed = true;
        inner.clients.clear();
    }

    /// Number of currently-registered subscribers.
    pub fn client_count(&self) -> usize {
        self.inner.read().clients.len()
    }

    /// Whether the hub has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.read().closed
    }

    fn unregister(&self, id: usize) {
        self.inner.write().clients.remove(&id);
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration guard for one subscriber.
///
/// Lives inside the client's response stream; when the connection closes
/// and the stream is dropped, the guard removes the client from the hub.
pub struct ClientHandle {
    hub: Arc<ReloadHub>,
    id: usize,
}

impl ClientHandle {
    /// This client's id.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}
