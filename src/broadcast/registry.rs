use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tracing::debug;

/// Opaque handle identifying one subscription within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// Maps a session id to the set of live connections subscribed to its
/// events. Membership bookkeeping only: connection lifecycle is owned by the
/// connection handler, which must unsubscribe on close.
///
/// The group map is guarded independently of the session store, so no
/// operation ever needs both locks.
#[derive(Clone)]
pub struct BroadcastRegistry {
    groups: Arc<RwLock<HashMap<String, HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>>,
    next_id: Arc<AtomicU64>,
}

impl BroadcastRegistry {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a new connection under session `session_id`, creating the
    /// group if it does not exist. Returns the membership handle and the
    /// receiving end the connection drains into its socket.
    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        let mut groups = self.groups.write().await;
        groups
            .entry(session_id.to_string())
            .or_default()
            .insert(id, tx);

        debug!("Connection {:?} subscribed to session {}", id, session_id);
        (id, rx)
    }

    /// Remove the connection from the session's group; the group entry itself
    /// is dropped once empty. Idempotent: unknown ids and double-unsubscribe
    /// are no-ops.
    pub async fn unsubscribe(&self, session_id: &str, id: ConnectionId) {
        let mut groups = self.groups.write().await;
        if let Some(group) = groups.get_mut(session_id) {
            group.remove(&id);
            if group.is_empty() {
                groups.remove(session_id);
            }
        }
        debug!("Connection {:?} unsubscribed from session {}", id, session_id);
    }

    /// Deliver `message` to every connection currently in the session's
    /// group. Delivery is best-effort per connection: a closed receiver does
    /// not prevent delivery to the rest. Returns the number of connections
    /// the message was handed to.
    pub async fn publish(&self, session_id: &str, message: &str) -> usize {
        // Snapshot the senders under the read lock; actual sends happen on
        // the clones so a slow subscriber never holds up the lock.
        let senders: Vec<mpsc::UnboundedSender<String>> = {
            let groups = self.groups.read().await;
            match groups.get(session_id) {
                Some(group) => group.values().cloned().collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;
        for tx in senders {
            if tx.send(message.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of live subscribers for a session.
    pub async fn group_size(&self, session_id: &str) -> usize {
        let groups = self.groups.read().await;
        groups.get(session_id).map(|g| g.len()).unwrap_or(0)
    }
}

impl Default for BroadcastRegistry {
    fn default() -> Self {
        Self::new()
    }
}
