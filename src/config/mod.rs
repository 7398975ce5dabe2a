//! Configuration for scraping and serving
//!
//! `ScrapeConfig` carries the timing and browser knobs of one scrape and is
//! built through `ScrapeConfigBuilder`. `ServerConfig` is read from the
//! environment by the HTTP binary.

pub mod builder;
pub mod getters;
pub mod server;
pub mod types;

pub use builder::ScrapeConfigBuilder;
pub use server::{ConfigError, ServerConfig};
pub use types::ScrapeConfig;
