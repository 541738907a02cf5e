// src/fetch.rs
//! Revalidating fetch of the contributions page.
//!
//! cache read → conditional GET → conditional cache write, strictly in that order.
//! The only component here that touches the network or the cache.

use url::Url;

use crate::config::consts::{ORIGIN_BASE, ORIGIN_SUFFIX};
use crate::core::net::Origin;
use crate::error::ChartError;
use crate::store::{CacheStore, CachedPage};

pub struct Fetcher<O, S> {
    origin: O,
    store: S,
    base: String,
}

impl<O: Origin, S: CacheStore> Fetcher<O, S> {
    pub fn new(origin: O, store: S) -> Self {
        Self { origin, store, base: s!(ORIGIN_BASE) }
    }

    /// `base` is everything before the subject segment, e.g. `https://github.com/users/`.
    /// Anything but an absolute http(s) URL is rejected.
    pub fn with_base(origin: O, store: S, base: &str) -> Result<Self, ChartError> {
        let bad = || ChartError::BaseUrl { base: s!(base) };
        let url = Url::parse(base).map_err(|_| bad())?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(bad());
        }
        Ok(Self { origin, store, base: s!(base) })
    }

    /// Page URL for `subject`; doubles as its cache key.
    pub fn page_url(&self, subject: &str) -> Result<String, ChartError> {
        page_url(&self.base, subject)
    }

    /// Raw markup for `subject`, revalidated against the stored copy.
    pub fn fetch(&self, subject: &str) -> Result<String, ChartError> {
        let key = self.page_url(subject)?;
        let cached = self.store.get(&key);
        let stored = cached.as_ref().map(|c| c.validators.clone()).unwrap_or_default();

        logd!(
            "Fetch {key}: cache {}, etag={:?}, last-modified={:?}",
            if cached.is_some() { "hit" } else { "miss" },
            stored.etag,
            stored.last_modified
        );

        let resp = self.origin.get(&key, &stored)?;
        logd!("Fetch {key}: status {}", resp.status);

        if resp.is_not_modified() {
            let Some(page) = cached else {
                loge!("Fetch {key}: 304 without a cached body");
                return Err(ChartError::StaleCache { key });
            };
            let refreshed = resp.validators.or(&stored);
            if refreshed != stored {
                logf!("Fetch {key}: validators refreshed on 304");
                self.persist(&key, &CachedPage { html: page.html.clone(), validators: refreshed });
            }
            return Ok(page.html);
        }

        if !resp.is_success() {
            return Err(ChartError::Origin { status: resp.status });
        }

        let html = resp.body.unwrap_or_default();
        let validators = resp.validators.or(&stored);
        self.persist(&key, &CachedPage { html: html.clone(), validators });
        Ok(html)
    }

    // Best effort: a failed write leaves the old entry, which still matches
    // the validators we sent, so the next request stays consistent.
    fn persist(&self, key: &str, page: &CachedPage) {
        if let Err(e) = self.store.put(key, page) {
            loge!("Cache write {key}: {e}");
        }
    }
}

/// `base` + percent-encoded `subject` + `/contributions`.
///
/// `""`, `"."` and `".."` are refused: URL parsing collapses dot segments
/// (encoded or not), so they would address the parent path instead.
pub fn page_url(base: &str, subject: &str) -> Result<String, ChartError> {
    if matches!(subject, "" | "." | "..") {
        return Err(ChartError::Subject { subject: s!(subject) });
    }
    let mut url = Url::parse(base).map_err(|_| ChartError::BaseUrl { base: s!(base) })?;
    url.path_segments_mut()
        .map_err(|_| ChartError::BaseUrl { base: s!(base) })?
        .pop_if_empty()
        .push(subject)
        .push(ORIGIN_SUFFIX);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::{OriginResponse, Validators};
    use crate::store::MemoryStore;

    const BASE: &str = "https://github.com/users/";

    struct Unreachable;

    impl Origin for Unreachable {
        fn get(&self, url: &str, _: &Validators) -> Result<OriginResponse, ChartError> {
            panic!("unexpected request to {url}")
        }
    }

    #[test]
    fn url_encodes_subject_as_one_segment() {
        assert_eq!(page_url(BASE, "octocat").unwrap(), "https://github.com/users/octocat/contributions");
        let odd = page_url(BASE, "a b/c").unwrap();
        assert_eq!(odd, "https://github.com/users/a%20b%2Fc/contributions");
        assert_ne!(odd, page_url(BASE, "a b").unwrap());
        assert_eq!(page_url(BASE, "...").unwrap(), "https://github.com/users/.../contributions");
        assert_ne!(page_url(BASE, "%2E").unwrap(), page_url(BASE, "%2E%2E").unwrap());
    }

    #[test]
    fn dot_subjects_are_refused() {
        for subject in ["", ".", ".."] {
            let err = page_url(BASE, subject).unwrap_err();
            assert!(matches!(err, ChartError::Subject { .. }), "{subject:?}");
            assert_eq!(err.status(), 400);
        }
    }

    #[test]
    fn dot_subject_never_reaches_origin() {
        let fetcher = Fetcher::new(Unreachable, MemoryStore::new());
        assert!(matches!(fetcher.fetch(".."), Err(ChartError::Subject { .. })));
    }

    #[test]
    fn base_must_be_absolute_http() {
        assert!(Fetcher::with_base(Unreachable, MemoryStore::new(), "http://localhost:8080/u/").is_ok());
        for base in ["users/", "mailto:me@example.com", "file:///tmp/"] {
            let r = Fetcher::with_base(Unreachable, MemoryStore::new(), base);
            assert!(matches!(r, Err(ChartError::BaseUrl { .. })), "{base}");
        }
    }
}
