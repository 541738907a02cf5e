// src/cli.rs
use std::{fs, io::Write, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{bail, Result};

use crate::{
    config::{self, consts::DEFAULT_CONFIG_FILE, AppOptions},
    core::{net::HttpOrigin, sanitize::sanitize_filename},
    fetch::Fetcher,
    route::{parse_path, ChartRequest, Route},
    runner::{Runner, USAGE},
    store::{CacheStore, FileStore, MemoryStore},
};

#[derive(Parser, Debug)]
#[command(name = "contrib_chart", version)]
#[command(about = "Render a GitHub contributions calendar as SVG", long_about = None)]
pub struct Args {
    /// Subject (e.g. octocat), or a route path like /409ba5/222222/octocat
    #[arg(required_unless_present = "write_config")]
    pub target: Option<String>,

    /// Base color (3/6 hex digits) or preset: default, halloween, teal
    #[arg(long)]
    pub base: Option<String>,

    /// Background color for level 0 (3/6 hex digits)
    #[arg(long)]
    pub background: Option<String>,

    /// Output file [default: <subject>.svg]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write the SVG to stdout instead of a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,

    /// Append "by <subject>" to the header
    #[arg(long)]
    pub show_subject: bool,

    /// Revalidation cache directory
    #[arg(long, conflicts_with = "no_store")]
    pub store_dir: Option<PathBuf>,

    /// Keep the cache in memory only (every run downloads)
    #[arg(long)]
    pub no_store: bool,

    /// key=value config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the effective options to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Config file first, flags on top.
    pub fn options(&self) -> AppOptions {
        let mut opts = config::file::load(&self.config_path());
        if self.show_subject { opts.chart.show_subject = true; }
        if let Some(dir) = &self.store_dir { opts.fetch.store_dir = Some(dir.clone()); }
        if self.no_store { opts.fetch.store_dir = None; }
        opts
    }

    /// `None` for a bare route path (usage) or no target at all.
    pub fn request(&self) -> Option<ChartRequest> {
        let target = self.target.as_deref()?;
        let mut req = if target.contains('/') {
            match parse_path(target) {
                Route::Usage => return None,
                Route::Chart(req) => req,
            }
        } else {
            ChartRequest { subject: s!(target), ..Default::default() }
        };
        if req.base.is_none() { req.base = self.base.clone(); }
        if req.background.is_none() { req.background = self.background.clone(); }
        Some(req)
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    let opts = args.options();
    if let Some(log) = &opts.log_file {
        crate::log::set_log_file(log.clone());
    }

    if args.write_config {
        let path = args.config_path();
        config::file::save(&path, &opts)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let Some(req) = args.request() else {
        eprintln!("{USAGE}");
        return Ok(());
    };

    let store: Box<dyn CacheStore> = match &opts.fetch.store_dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::new()),
    };
    let origin = HttpOrigin::new(&opts.fetch)?;
    let fetcher = Fetcher::with_base(origin, store, &opts.fetch.origin_base)?;
    let runner = Runner::new(fetcher, opts.chart.clone());

    logf!("CLI: rendering {}", req.subject);
    let reply = runner.respond(&req);
    if !reply.is_ok() {
        bail!("{} ({})", reply.body, reply.status);
    }

    if args.stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(reply.body.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(join!(&sanitize_filename(&req.subject), ".svg")));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, &reply.body)?;
    println!("Wrote {}", path.display());
    Ok(())
}
