//! Auth-State Hook
//!
//! Mirrors the gate's admin decision in UI state. On mount it reads the
//! readable flag, slides its expiry, and starts an hourly keep-alive that
//! lives exactly as long as the returned [`MountedHook`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::application::config::AuthConfig;
use crate::application::issue_session::FLAG_VALUE;
use crate::client::storage::ClientStorage;
use crate::domain::route::RoutePolicy;
use crate::error::AuthResult;

/// Client-side navigation
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, url: &str);
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, url: &str) {
        (**self).navigate(url)
    }
}

#[derive(Debug, Clone)]
pub struct ClientAuthConfig {
    pub admin_flag_cookie: String,
    pub admin_session_cookie: String,
    pub flag_ttl: Duration,
    /// Keep-alive period (1 hour)
    pub refresh_interval: Duration,
    pub routes: RoutePolicy,
}

impl From<&AuthConfig> for ClientAuthConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            admin_flag_cookie: config.admin_flag_cookie.clone(),
            admin_session_cookie: config.admin_session_cookie.clone(),
            flag_ttl: config.session_ttl,
            refresh_interval: Duration::from_secs(3600),
            routes: config.routes.clone(),
        }
    }
}

impl Default for ClientAuthConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

struct HookInner<S, N> {
    storage: S,
    navigator: N,
    config: ClientAuthConfig,
    is_admin: AtomicBool,
}

impl<S: ClientStorage, N: Navigator> HookInner<S, N> {
    fn try_refresh(&self) -> AuthResult<bool> {
        let name = &self.config.admin_flag_cookie;
        if self.storage.read(name)?.as_deref() != Some(FLAG_VALUE) {
            return Ok(false);
        }
        self.storage.write(name, FLAG_VALUE, self.config.flag_ttl)?;
        Ok(true)
    }

    fn refresh(&self) -> bool {
        let is_admin = self.try_refresh().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Cookie storage failed, treating as signed out");
            false
        });
        self.is_admin.store(is_admin, Ordering::SeqCst);
        is_admin
    }
}

pub struct AuthStateHook<S, N> {
    inner: Arc<HookInner<S, N>>,
}

impl<S, N> Clone for AuthStateHook<S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: ClientStorage, N: Navigator> AuthStateHook<S, N> {
    pub fn new(storage: S, navigator: N, config: ClientAuthConfig) -> Self {
        Self {
            inner: Arc::new(HookInner {
                storage,
                navigator,
                config,
                is_admin: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.inner.is_admin.load(Ordering::SeqCst)
    }

    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Re-read the flag and, if present, extend its TTL.
    pub fn refresh(&self) -> bool {
        self.inner.refresh()
    }

    /// Run the mount logic and start the keep-alive.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn mount(&self, current_path: &str) -> MountedHook {
        let is_admin = self.refresh();
        let routes = &self.inner.config.routes;

        if !is_admin && routes.classify(current_path).admin_protected {
            self.inner
                .navigator
                .navigate(&routes.login_redirect(current_path, true));
        }

        MountedHook {
            keep_alive: spawn_keep_alive(
                Arc::downgrade(&self.inner),
                self.inner.config.refresh_interval,
            ),
        }
    }

    /// Clear both admin cookies and go to the sign-in page.
    pub fn logout(&self) {
        let config = &self.inner.config;
        for name in [&config.admin_flag_cookie, &config.admin_session_cookie] {
            if let Err(e) = self.inner.storage.remove(name) {
                tracing::warn!(cookie = %name, error = %e, "Failed to clear cookie");
            }
        }
        self.inner.is_admin.store(false, Ordering::SeqCst);
        self.inner.navigator.navigate(&config.routes.auth_page);
    }
}

fn spawn_keep_alive<S: ClientStorage, N: Navigator>(
    inner: Weak<HookInner<S, N>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            // The hook itself is gone; nothing left to keep alive.
            let Some(inner) = inner.upgrade() else { break };
            let still_admin = inner.refresh();
            tracing::debug!(still_admin, "Admin flag keep-alive tick");
        }
    })
}

/// Mounted hook scope. Dropping it stops the keep-alive.
#[must_use = "dropping the guard immediately stops the keep-alive"]
pub struct MountedHook {
    keep_alive: JoinHandle<()>,
}

impl MountedHook {
    pub fn unmount(self) {}

    pub fn is_running(&self) -> bool {
        !self.keep_alive.is_finished()
    }
}

impl Drop for MountedHook {
    fn drop(&mut self) {
        self.keep_alive.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::{MemoryCookieStore, StorageError};
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.visited.lock().unwrap().push(url.to_string());
        }
    }

    /// Counts writes so keep-alive ticks are observable
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryCookieStore,
        writes: AtomicUsize,
    }

    impl ClientStorage for CountingStore {
        fn read(&self, name: &str) -> Result<Option<String>, StorageError> {
            self.inner.read(name)
        }

        fn write(&self, name: &str, value: &str, max_age: Duration) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.write(name, value, max_age)
        }

        fn remove(&self, name: &str) -> Result<(), StorageError> {
            self.inner.remove(name)
        }
    }

    fn signed_in_store() -> Arc<MemoryCookieStore> {
        let store = Arc::new(MemoryCookieStore::new());
        store.write("admin-auth", "true", Duration::from_secs(60)).unwrap();
        store.write("admin-session", "payload.sig", Duration::from_secs(60)).unwrap();
        store
    }

    #[tokio::test]
    async fn test_mount_with_flag_sets_admin_and_refreshes() {
        let store = signed_in_store();
        let before = store.entry("admin-auth").unwrap().expires_at;
        let navigator = Arc::new(RecordingNavigator::default());
        let hook = AuthStateHook::new(store.clone(), navigator.clone(), ClientAuthConfig::default());

        let _mounted = hook.mount("/admin/resources");

        assert!(hook.is_admin());
        let after = store.entry("admin-auth").unwrap();
        assert_eq!(after.value, "true");
        assert_eq!(after.max_age_secs, 7 * 24 * 3600);
        assert!(after.expires_at > before);
        assert!(navigator.visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mount_without_flag_on_admin_route_redirects() {
        let store = Arc::new(MemoryCookieStore::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let hook = AuthStateHook::new(store, navigator.clone(), ClientAuthConfig::default());

        let _mounted = hook.mount("/admin");

        assert!(!hook.is_admin());
        assert_eq!(
            navigator.visited.lock().unwrap().as_slice(),
            ["/auth?callbackUrl=%2Fadmin&mode=admin".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mount_without_flag_on_public_route_stays() {
        let navigator = Arc::new(RecordingNavigator::default());
        let hook = AuthStateHook::new(
            Arc::new(MemoryCookieStore::new()),
            navigator.clone(),
            ClientAuthConfig::default(),
        );

        let _mounted = hook.mount("/courses");

        assert!(!hook.is_admin());
        assert!(navigator.visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let store = signed_in_store();
        let hook = AuthStateHook::new(
            store.clone(),
            Arc::new(RecordingNavigator::default()),
            ClientAuthConfig::default(),
        );

        assert!(hook.refresh());
        let first = store.entry("admin-auth").unwrap();
        assert!(hook.refresh());
        let second = store.entry("admin-auth").unwrap();

        assert_eq!(first.value, "true");
        assert_eq!(second.value, "true");
        assert!(second.expires_at >= first.expires_at);
    }

    #[tokio::test]
    async fn test_logout_clears_both_cookies() {
        let store = signed_in_store();
        let navigator = Arc::new(RecordingNavigator::default());
        let hook = AuthStateHook::new(store.clone(), navigator.clone(), ClientAuthConfig::default());
        let _mounted = hook.mount("/admin");
        assert!(hook.is_admin());

        hook.logout();

        assert!(!hook.is_admin());
        for name in ["admin-auth", "admin-session"] {
            let entry = store.entry(name).unwrap();
            assert_eq!(entry.value, "");
            assert!(entry.max_age_secs < 0);
        }
        assert_eq!(navigator.visited.lock().unwrap().last().unwrap(), "/auth");
    }

    #[tokio::test]
    async fn test_storage_failure_degrades_to_signed_out() {
        let store = signed_in_store();
        store.set_disabled(true);
        let navigator = Arc::new(RecordingNavigator::default());
        let hook = AuthStateHook::new(store.clone(), navigator.clone(), ClientAuthConfig::default());

        let _mounted = hook.mount("/admin");
        assert!(!hook.is_admin());
        assert_eq!(navigator.visited.lock().unwrap().len(), 1);

        hook.logout();
        assert!(!hook.is_admin());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_ticks_until_unmounted() {
        let store = Arc::new(CountingStore::default());
        store
            .inner
            .write("admin-auth", "true", Duration::from_secs(7 * 24 * 3600))
            .unwrap();
        let hook = AuthStateHook::new(
            store.clone(),
            Arc::new(RecordingNavigator::default()),
            ClientAuthConfig::default(),
        );

        let mounted = hook.mount("/admin");
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(3600 + 1)).await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 3);
        assert!(mounted.is_running());

        mounted.unmount();
        tokio::time::sleep(Duration::from_secs(5 * 3600)).await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_notices_expired_flag() {
        let store = signed_in_store();
        let hook = AuthStateHook::new(
            store.clone(),
            Arc::new(RecordingNavigator::default()),
            ClientAuthConfig::default(),
        );
        let _mounted = hook.mount("/admin");
        assert!(hook.is_admin());

        store.remove("admin-auth").unwrap();
        tokio::time::sleep(Duration::from_secs(3600 + 1)).await;

        assert!(!hook.is_admin());
    }
}
