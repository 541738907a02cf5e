// src/runner.rs
//! Top-level pipeline: colors → fetch → extract → weeks → SVG,
//! plus a transport-neutral `Reply` for whatever serves it.

use std::error::Error;

use crate::{
    calendar::build_weeks,
    chart::{build_scheme, render_svg, ChartSpec},
    config::{consts::*, ChartOptions},
    core::net::Origin,
    error::ChartError,
    fetch::Fetcher,
    route::{parse_path, ChartRequest, Route},
    specs::contributions,
    store::CacheStore,
};

pub const USAGE: &str = "Use /<user> or /<base>/<bg>/<user> to render a chart.\nExample: /409ba5/222222/octocat";
pub const NOT_FOUND: &str = "No contribution data found for that user.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self { status, content_type: TEXT_CONTENT_TYPE, cache_control: None, body: body.into() }
    }

    fn svg(body: String) -> Self {
        Self { status: 200, content_type: SVG_CONTENT_TYPE, cache_control: Some(SVG_CACHE_CONTROL), body }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub struct Runner<O, S> {
    fetcher: Fetcher<O, S>,
    chart: ChartOptions,
}

impl<O: Origin, S: CacheStore> Runner<O, S> {
    pub fn new(fetcher: Fetcher<O, S>, chart: ChartOptions) -> Self {
        Self { fetcher, chart }
    }

    /// `Ok(None)` when the page has no day cells.
    /// Colors are checked before any network traffic.
    pub fn render(&self, req: &ChartRequest) -> Result<Option<String>, ChartError> {
        let scheme = build_scheme(req.base.as_deref(), req.background.as_deref())?;
        let html = self.fetcher.fetch(&req.subject)?;
        let bundle = contributions::parse_doc(&html);
        let weeks = build_weeks(&bundle.records);

        if weeks.is_empty() {
            logf!("Render {}: no contribution data", req.subject);
            return Ok(None);
        }

        let spec = ChartSpec { weeks, scheme, subject: req.subject.clone(), total: bundle.total };
        Ok(Some(render_svg(&spec, &self.chart)))
    }

    /// Full request handling, path in, reply out.
    pub fn handle(&self, path: &str) -> Reply {
        match parse_path(path) {
            Route::Usage => Reply::text(200, USAGE),
            Route::Chart(req) => self.respond(&req),
        }
    }

    /// Reply for an already-routed request.
    pub fn respond(&self, req: &ChartRequest) -> Reply {
        match self.render(req) {
            Ok(Some(svg)) => Reply::svg(svg),
            Ok(None) => Reply::text(404, NOT_FOUND),
            Err(e) => {
                loge!("{}: {e}{}", req.subject, e.source().map(|s| format!(" ({s})")).unwrap_or_default());
                Reply::text(e.status(), e.to_string())
            }
        }
    }
}
