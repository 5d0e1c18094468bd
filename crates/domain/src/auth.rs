/// Session gate state for a guarded view.
///
/// Every mount or path change starts again at `Checking`; results are never
/// carried over from a previous navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Checking,
    Authenticated,
    Denied,
}

impl AuthState {
    pub fn display_text(&self) -> &'static str {
        match self {
            AuthState::Checking => "Checking session...",
            AuthState::Authenticated => "Signed in",
            AuthState::Denied => "Access Locked",
        }
    }
}
