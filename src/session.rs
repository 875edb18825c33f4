//! Server-side session store
//!
//! In-process map of opaque session ids to session records. Expiry is
//! lazy: the read that discovers an expired record removes it; no
//! background sweep runs. Sessions that expire and are never read again
//! stay in memory until a later read or delete (accepted tradeoff).
//!
//! The store assumes a single process instance. All operations go
//! through one lock; running multiple instances requires a shared
//! backing store instead.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::user::{UserInfo, UserInfoClient};

/// A logged-in browser session
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Bearer token for resource server calls
    pub access_token: String,
    /// Cached profile, refreshed on session update
    pub user_info: UserInfo,
    /// Instant past which the record is treated as absent
    pub expires_at: Instant,
}

/// Source of fresh session ids; injectable so tests can force collisions
type IdSource = Box<dyn Fn() -> String + Send + Sync>;

/// Keyed store of active sessions
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    user_info: UserInfoClient,
    id_source: IdSource,
}

impl SessionStore {
    /// Create a store that issues UUID v4 session ids.
    #[must_use]
    pub fn new(user_info: UserInfoClient) -> Self {
        Self::with_id_source(user_info, Box::new(|| Uuid::new_v4().to_string()))
    }

    /// Create a store with a custom id source.
    #[must_use]
    pub fn with_id_source(user_info: UserInfoClient, id_source: IdSource) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            user_info,
            id_source,
        }
    }

    /// Create a session for a freshly obtained access token.
    ///
    /// Generates a fresh id, retrying on collision with a live key, then
    /// fetches the user's profile and stores the record with
    /// `expires_at = now + max_age`. The returned id is the opaque value
    /// handed to the browser as the session cookie.
    pub async fn create(&self, access_token: &str, max_age: Duration) -> String {
        let session_id = loop {
            let candidate = (self.id_source)();
            // Check-and-reserve under one write lock so two concurrent
            // creates can never claim the same id.
            let mut sessions = self.sessions.write();
            match sessions.entry(candidate.clone()) {
                Entry::Occupied(_) => {
                    debug!("Session id collision, retrying");
                }
                Entry::Vacant(entry) => {
                    entry.insert(SessionRecord {
                        access_token: access_token.to_string(),
                        user_info: UserInfo::default(),
                        expires_at: Instant::now() + max_age,
                    });
                    break candidate;
                }
            }
        };

        // Fill in the profile; create is an update of a reserved id.
        self.update(&session_id, access_token, max_age).await;
        session_id
    }

    /// Look up a live session.
    ///
    /// A present, unexpired record is returned by value. A present but
    /// expired record is removed and reported as absent.
    pub fn get(&self, session_id: &str) -> Option<SessionRecord> {
        {
            let sessions = self.sessions.read();
            match sessions.get(session_id) {
                None => {
                    debug!(session_id, "Session not found");
                    return None;
                }
                Some(record) if Instant::now() <= record.expires_at => {
                    return Some(record.clone());
                }
                Some(_) => {}
            }
        }

        debug!(session_id, "Deleting expired session");
        self.sessions.write().remove(session_id);
        None
    }

    /// Refresh a session's token, profile, and expiry.
    ///
    /// Fetches the profile again and resets `expires_at`. Writes the
    /// record whether or not the id currently exists (an upsert): the
    /// login flow relies on this to fill the record reserved by
    /// [`create`](Self::create), and an update racing a logout simply
    /// re-creates the session for its remaining lifetime.
    pub async fn update(&self, session_id: &str, access_token: &str, max_age: Duration) {
        let user_info = self.user_info.fetch_user_info(access_token).await;

        self.sessions.write().insert(
            session_id.to_string(),
            SessionRecord {
                access_token: access_token.to_string(),
                user_info,
                expires_at: Instant::now() + max_age,
            },
        );
    }

    /// Remove a session. Removing an unknown id is a no-op.
    pub fn delete(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }

    /// Number of stored records, including expired-but-unread ones.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
