use std::fmt;
use uuid::Uuid;

/// Entries of the site navigation bar.
pub const NAVIGATION: [(&str, &str); 3] = [
    ("/", "Home"),
    ("/tributes", "Tribute Wall"),
    ("/comic", "The Comic"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Story,
    Gallery,
    Letters,
    Letter(Uuid),
    WriteLetter,
    Comic,
    /// Served at both `/messages` and `/tributes`.
    Wall,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        let segments: Vec<&str> = normalized.split('/').skip(1).collect();
        if !trimmed.starts_with('/') {
            return Route::NotFound(path.to_string());
        }
        match segments.as_slice() {
            [] => Route::Home,
            ["story"] => Route::Story,
            ["gallery"] => Route::Gallery,
            ["letters"] => Route::Letters,
            ["letters", id] => match Uuid::parse_str(id) {
                Ok(id) => Route::Letter(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["write-letter"] => Route::WriteLetter,
            ["comic"] => Route::Comic,
            ["messages"] | ["tributes"] => Route::Wall,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Story => "/story".into(),
            Route::Gallery => "/gallery".into(),
            Route::Letters => "/letters".into(),
            Route::Letter(id) => format!("/letters/{}", id),
            Route::WriteLetter => "/write-letter".into(),
            Route::Comic => "/comic".into(),
            Route::Wall => "/tributes".into(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_pages() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::NotFound("".into()));
        assert_eq!(Route::parse("/story"), Route::Story);
        assert_eq!(Route::parse("/gallery/"), Route::Gallery);
        assert_eq!(Route::parse("/letters"), Route::Letters);
        assert_eq!(Route::parse("/write-letter"), Route::WriteLetter);
        assert_eq!(Route::parse("/comic"), Route::Comic);
        assert_eq!(Route::parse("/messages"), Route::Wall);
        assert_eq!(Route::parse("/tributes"), Route::Wall);
    }

    #[test]
    fn letter_detail_needs_an_id() {
        let id = Uuid::new_v4();
        assert_eq!(Route::parse(&format!("/letters/{}", id)), Route::Letter(id));
        assert_eq!(
            Route::parse("/letters/nope"),
            Route::NotFound("/letters/nope".into())
        );
    }

    #[test]
    fn unknown_paths() {
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".into()));
        assert_eq!(Route::parse("comic"), Route::NotFound("comic".into()));
        assert_eq!(
            Route::parse("/comic/extra"),
            Route::NotFound("/comic/extra".into())
        );
    }

    #[test]
    fn paths_round_trip() {
        for (path, _) in NAVIGATION {
            assert_eq!(Route::parse(path).path(), path);
        }
    }
}
