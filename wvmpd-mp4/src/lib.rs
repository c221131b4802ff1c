#![cfg_attr(docsrs, feature(doc_cfg))]

//! This crate locates `PSSH` boxes inside mp4 initialization segments and builds
//! canonical Widevine `PSSH` boxes from a key id.
//!
//! It is not a general mp4 parser. Only the first `pssh` signature in a buffer is
//! looked at and the key id is read from a fixed offset inside that box.
//!
//! # Optional Features
//!
//! The following are a list of [Cargo features](https://doc.rust-lang.org/stable/cargo/reference/features.html#the-features-section) that can be
//! enabled or disabled:
//!
//! - **pssh** (default): Enables scanning and building `PSSH` boxes.

#[cfg(feature = "pssh")]
#[cfg_attr(docsrs, doc(cfg(feature = "pssh")))]
pub mod pssh;

mod error;
mod reader;

pub use error::Error;
pub use reader::Reader;

/// A `Result` alias where the `Err` case is `wvmpd_mp4::Error`.
pub type Result<T> = std::result::Result<T, Error>;
