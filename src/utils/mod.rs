//! Utility Module Implementation
//!
//! Aggregates internal helpers for file IO and logging setup.

pub mod io;
pub mod logger;

pub use self::{
    io::{decode_skipping_invalid, has_allowed_extension, is_empty_dir, read_text_lossy},
    logger::init_logging,
};
