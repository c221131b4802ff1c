//! Serve DASH manifests whose content protection is rebuilt around the key id
//! found in the audio init segment.
//!
//! The pipeline for one channel is
//! [`directory`] lookup, [`dash::fetch_manifest`], [`dash::fetch_key_id`] and
//! [`dash::rewrite`], driven by [`handler::manifest`]. [`server`] binds the
//! handlers to http routes.

mod commands;
mod error;

pub mod dash;
pub mod directory;
pub mod filter;
pub mod handler;
pub mod logger;
pub mod playlist;
pub mod server;

#[doc(hidden)]
pub use commands::{Args, Commands};
pub use error::{Error, Result};
pub use reqwest;
