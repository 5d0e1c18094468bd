//! Session gate for guarded views
//!
//! Every entry starts at `Checking` and asks the service whether the session
//! is valid. The verdict is held back for a short minimum display time so fast
//! answers do not flash. A denied session is redirected to the lock page.

use std::sync::Arc;

use futures_util::future;
use studydeck_domain::AuthState;
use tokio::sync::watch;

use crate::ports::outbound::{DocumentApiPort, Navigator, SleepProvider};
use crate::routes::Route;

pub const DEFAULT_MIN_DISPLAY_MS: u64 = 200;

pub struct AuthGate {
    api: Arc<dyn DocumentApiPort>,
    sleep: Arc<dyn SleepProvider>,
    navigator: Arc<dyn Navigator>,
    min_display_ms: u64,
    state: watch::Sender<AuthState>,
}

impl AuthGate {
    pub fn new(
        api: Arc<dyn DocumentApiPort>,
        sleep: Arc<dyn SleepProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Checking);
        Self {
            api,
            sleep,
            navigator,
            min_display_ms: DEFAULT_MIN_DISPLAY_MS,
            state,
        }
    }

    pub fn with_min_display_ms(mut self, min_display_ms: u64) -> Self {
        self.min_display_ms = min_display_ms;
        self
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Run the session check for a navigation to `route`.
    ///
    /// Open routes resolve to `Authenticated` without a request.
    pub async fn enter(&self, route: Route) -> AuthState {
        self.state.send_replace(AuthState::Checking);
        if !route.is_guarded() {
            self.state.send_replace(AuthState::Authenticated);
            return AuthState::Authenticated;
        }

        let (verdict, ()) = future::join(
            self.api.verify_session(),
            self.sleep.sleep_ms(self.min_display_ms),
        )
        .await;

        let next = match verdict {
            Ok(()) => {
                tracing::debug!(route = %route, "Session verified");
                AuthState::Authenticated
            }
            Err(e) => {
                tracing::info!(route = %route, error = %e, "Session denied");
                AuthState::Denied
            }
        };
        self.state.send_replace(next);

        if next == AuthState::Denied {
            self.navigator.redirect(Route::Lock.path());
        }
        next
    }

    /// Re-run the check for wherever the navigator currently is.
    pub async fn on_path_change(&self) -> AuthState {
        let route = Route::from_path(&self.navigator.current_path());
        self.enter(route.resolve()).await
    }
}
