// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod calendar;
pub mod chart;
pub mod fetch;
pub mod route;
pub mod runner;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::ChartError;
pub use fetch::Fetcher;
pub use runner::{Reply, Runner};
