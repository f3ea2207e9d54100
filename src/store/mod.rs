//! Persisted local state (key-value) and the session store built on it.

pub mod kv;
pub mod session;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::SessionStore;

/// Storage key names as constants.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    /// Serialized user record (JSON)
    pub const USER: &str = "user";
    pub const PUSH_TOKEN: &str = "push_token";
}
