//! # osu-db-core
//!
//! Decoder for osu!stable's `osu!.db` beatmap database.
//!
//! The file is a positional binary format: a short header (format version,
//! folder count, account metadata, player name) followed by one record per
//! indexed beatmap, read back-to-back with no per-record framing. This crate
//! decodes a fully-buffered file image into strongly-typed values in a
//! single forward pass.
//!
//! ## Modules
//!
//! - [`db`] - The osu!.db cursor, record decoders and decoded data model
//! - [`error`] - Error types and Result alias
//!
//! ## Example
//!
//! ```no_run
//! use osu_db_core::OsuDbReader;
//!
//! let db = OsuDbReader::read("osu!.db").expect("Failed to decode");
//! println!("{} beatmaps for {}", db.beatmaps.len(), db.player_name);
//! ```

// Module declarations
pub mod db;
pub mod error;

// Re-export key types for convenience

// Error types
pub use error::{Error, Result};

// Database decoding
pub use db::{
    BeatmapEntry, ByteCursor, GameMode, ModStarRating, ModStarRatings, OsuDatabase, OsuDbReader,
    ReadOptions, TimingPoint,
};
