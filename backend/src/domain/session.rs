//! Server-side session model.
//!
//! A browser holds only an opaque [`SessionToken`] inside an encrypted cookie.
//! The [`Session`] it points at lives in the session store until logout.
//! Sessions never expire server side; [`Session::is_stale`] is advisory.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tokio::sync::broadcast;
use tracing::debug;

use super::{EmailAddress, FullName, UserId, UserIdentity};

const TOKEN_BYTES: usize = 32;
const EVENT_CAPACITY: usize = 16;

/// Age after which a session is reported as stale.
pub const SESSION_STALE_AFTER: TimeDelta = TimeDelta::hours(1);

/// Opaque 256-bit session token, hex encoded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a fresh token from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Accept a token read back from a session cookie.
    ///
    /// Returns `None` for values that cannot have been minted by
    /// [`SessionToken::generate`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_owned()))
    }

    /// Token text as written into the cookie.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// SHA-256 digest used as the storage key, so a leaked session table
    /// cannot be replayed as cookies.
    #[must_use]
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// The identity a browser is signed in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `identity` at `now`.
    #[must_use]
    pub fn for_identity(identity: UserIdentity, now: DateTime<Utc>) -> Self {
        Self {
            user_id: identity.id,
            full_name: identity.full_name,
            email: identity.email,
            established_at: now,
        }
    }

    /// True once the session is older than [`SESSION_STALE_AFTER`].
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.established_at) > SESSION_STALE_AFTER
    }

    /// Identity view of the session.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.user_id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Payload-free notice that session state may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionChanged;

/// In-process broadcast of [`SessionChanged`] notices.
///
/// Publishing never fails: with no subscribers the notice is dropped, and a
/// lagging subscriber only misses intermediate notices.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionChanged>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }
}

impl SessionEvents {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionChanged> {
        self.sender.subscribe()
    }

    /// Announce that session state may have changed.
    pub fn publish(&self) {
        if self.sender.send(SessionChanged).is_err() {
            debug!("no session change subscribers");
        }
    }
}
