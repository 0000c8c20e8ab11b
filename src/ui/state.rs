use crate::ui::components::toast::Toast;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub viewport_width: u16,
    pub toast: Option<Toast>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    AlbumDetail(String),
    Registration,
}

impl Route {
    /// Resolves a path such as `/album/<id>`. Anything unknown lands on home.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');

        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["registration"] => Route::Registration,
            ["album", id] if !id.is_empty() => Route::AlbumDetail(id.to_string()),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::AlbumDetail(id) => format!("/album/{id}"),
            Route::Registration => "/registration".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::AlbumDetail(_) => "Album Details",
            Route::Registration => "User Registration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/registration"), Route::Registration);
        assert_eq!(
            Route::parse("/album/6dVIqQ8qmQ5GBnJ9shOYGE"),
            Route::AlbumDetail("6dVIqQ8qmQ5GBnJ9shOYGE".to_string())
        );
        assert_eq!(
            Route::parse("/album/abc/?utm=1"),
            Route::AlbumDetail("abc".to_string())
        );
    }

    #[test]
    fn test_unknown_paths_redirect_home() {
        assert_eq!(Route::parse("/albums"), Route::Home);
        assert_eq!(Route::parse("/album/"), Route::Home);
        assert_eq!(Route::parse("/album/a/b"), Route::Home);
        assert_eq!(Route::parse("/nope"), Route::Home);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::Registration,
            Route::AlbumDetail("xyz".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(Route::Home.title(), "Home");
        assert_eq!(Route::AlbumDetail("x".into()).title(), "Album Details");
        assert_eq!(Route::Registration.title(), "User Registration");
    }
}
