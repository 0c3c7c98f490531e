//! Client-side auth state
//!
//! The browser half of the admin gate: reads the readable flag, keeps it
//! alive, and clears both cookies on logout. Storage and navigation are
//! traits so a WebAssembly front end can back them with `document.cookie`
//! and the history API.

pub mod hook;
pub mod storage;

pub use hook::{AuthStateHook, ClientAuthConfig, MountedHook, Navigator};
pub use storage::{ClientStorage, MemoryCookieStore, StorageError, StoredCookie};
