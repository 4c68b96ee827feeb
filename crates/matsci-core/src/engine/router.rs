use std::fmt;
use tracing::debug;

/// The screens reachable from the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Materials,
    PeriodicTable,
    Calculator,
    Chatbot,
    Computation,
}

impl Route {
    pub const DEFAULT: Route = Route::Computation;

    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Materials,
        Route::PeriodicTable,
        Route::Calculator,
        Route::Chatbot,
        Route::Computation,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Materials => "/materials",
            Route::PeriodicTable => "/periodic-table",
            Route::Calculator => "/calculator",
            Route::Chatbot => "/chatbot",
            Route::Computation => "/computation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Materials => "Materials Database",
            Route::PeriodicTable => "Periodic Table",
            Route::Calculator => "Calculator",
            Route::Chatbot => "Chatbot",
            Route::Computation => "Materials Computation",
        }
    }

    /// Maps a URL-like path to a screen.
    ///
    /// Case, surrounding whitespace, query strings and trailing slashes are ignored.
    /// The root path redirects to [`Route::DEFAULT`], and so does anything unknown.
    pub fn resolve(path: &str) -> Route {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let normalized = format!("/{}", path.trim_matches('/').to_ascii_lowercase());
        match Route::ALL.into_iter().find(|r| r.path() == normalized) {
            Some(route) => route,
            None => {
                if normalized != "/" {
                    debug!(path = %path, "Unknown path, falling back to the default screen");
                }
                Route::DEFAULT
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_computation() {
        assert_eq!(Route::resolve("/"), Route::Computation);
        assert_eq!(Route::resolve(""), Route::Computation);
    }

    #[test]
    fn known_paths_resolve_with_normalisation() {
        assert_eq!(Route::resolve("/materials"), Route::Materials);
        assert_eq!(Route::resolve("/Periodic-Table/"), Route::PeriodicTable);
        assert_eq!(Route::resolve("calculator"), Route::Calculator);
        assert_eq!(Route::resolve("/chatbot?tab=1"), Route::Chatbot);
    }

    #[test]
    fn unknown_paths_fall_back_silently() {
        assert_eq!(Route::resolve("/does/not/exist"), Route::Computation);
        assert_eq!(Route::resolve("/materialsx"), Route::Computation);
    }

    #[test]
    fn every_route_resolves_to_itself() {
        for route in Route::ALL {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }
}
