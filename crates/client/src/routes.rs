//! Client routes and which of them sit behind the session gate.

/// A navigable destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, which immediately redirects to the summary view
    Root,
    Summary,
    Flashcards,
    Settings,
    Login,
    Signup,
    Lock,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = trimmed.trim_end_matches('/');
        match trimmed {
            "" => Route::Root,
            "/summary" => Route::Summary,
            "/flashcards" => Route::Flashcards,
            "/settings" => Route::Settings,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/lock" => Route::Lock,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Summary => "/summary",
            Route::Flashcards => "/flashcards",
            Route::Settings => "/settings",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Lock => "/lock",
            Route::NotFound => "/404",
        }
    }

    /// Views reachable only after the session check succeeds.
    pub fn is_guarded(&self) -> bool {
        matches!(self, Route::Summary | Route::Flashcards | Route::Settings)
    }

    /// Where the navigator should land when this route is requested.
    pub fn resolve(self) -> Self {
        match self {
            Route::Root => Route::Summary,
            other => other,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
