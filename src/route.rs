// src/route.rs
// Request path → (base color?, background color?, subject).

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Bare `/`: print usage.
    Usage,
    Chart(ChartRequest),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartRequest {
    pub base: Option<String>,
    pub background: Option<String>,
    pub subject: String,
}

/// `/<user>`, `/<base>/<user>`, `/<base>/<bg>/<user…>`.
/// With three or more segments everything after the background is the subject.
pub fn parse_path(path: &str) -> Route {
    let parts: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => Route::Usage,
        [user] => Route::Chart(ChartRequest { subject: s!(*user), ..Default::default() }),
        [base, user] => Route::Chart(ChartRequest {
            base: Some(s!(*base)),
            background: None,
            subject: s!(*user),
        }),
        [base, bg, rest @ ..] => Route::Chart(ChartRequest {
            base: Some(s!(*base)),
            background: Some(s!(*bg)),
            subject: rest.join("/"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(base: Option<&str>, bg: Option<&str>, subject: &str) -> Route {
        Route::Chart(ChartRequest {
            base: base.map(String::from),
            background: bg.map(String::from),
            subject: s!(subject),
        })
    }

    #[test]
    fn segment_counts() {
        assert_eq!(parse_path("/"), Route::Usage);
        assert_eq!(parse_path(""), Route::Usage);
        assert_eq!(parse_path("/octocat/"), chart(None, None, "octocat"));
        assert_eq!(parse_path("/teal/octocat"), chart(Some("teal"), None, "octocat"));
        assert_eq!(parse_path("/409ba5/222222/octocat"), chart(Some("409ba5"), Some("222222"), "octocat"));
        assert_eq!(parse_path("//a//b/c/d"), chart(Some("a"), Some("b"), "c/d"));
    }
}
