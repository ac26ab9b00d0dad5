//! Top-level osu!.db decoder
//!
//! The osu!.db file uses the following binary format:
//! - u32: Format version (e.g., 20150203)
//! - u32: Folder count in the Songs directory
//! - bool: Account unlocked flag
//! - i64: Account unlock date (.NET ticks)
//! - String: Player name (0x0b marker, ULEB128 length, UTF-8 bytes)
//! - u32: Number of beatmaps
//! - For each beatmap: one record in the layout decoded by [`super::beatmap`]

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

use super::beatmap::read_beatmap;
use super::cursor::ByteCursor;
use super::model::OsuDatabase;

/// Options recognized by the decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Retain the per-rule-set mod/star-rating blocks instead of only
    /// consuming them to keep the cursor aligned (default: false)
    pub include_mod_star_ratings: bool,
}

/// Reader for osu!stable osu!.db files
pub struct OsuDbReader;

impl OsuDbReader {
    /// Read and decode an osu!.db file with default options.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<OsuDatabase> {
        Self::read_with(path, &ReadOptions::default())
    }

    /// Read and decode an osu!.db file.
    ///
    /// The file is buffered into memory in full before decoding starts; the
    /// decoder itself performs no I/O.
    pub fn read_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<OsuDatabase> {
        let bytes = fs::read(path)?;
        Self::parse_with(&bytes, options)
    }

    /// Decode a fully-buffered osu!.db image with default options.
    pub fn parse(bytes: &[u8]) -> Result<OsuDatabase> {
        Self::parse_with(bytes, &ReadOptions::default())
    }

    /// Decode a fully-buffered osu!.db image.
    ///
    /// One forward pass over the buffer. The header's format version is
    /// threaded into every record decode, since pre-20140609 files lay out
    /// their difficulty fields differently. Either the whole database
    /// decodes or the first failing field aborts with its byte offset; no
    /// partial database is ever returned.
    pub fn parse_with(bytes: &[u8], options: &ReadOptions) -> Result<OsuDatabase> {
        let mut cursor = ByteCursor::new(bytes);

        let version = cursor.read_u32()?;
        let folder_count = cursor.read_u32()?;
        let account_unlocked = cursor.read_bool()?;
        let unlock_date = cursor.read_i64()?;
        let player_name = cursor.read_string()?;
        let beatmap_count = cursor.read_u32()?;

        let mut beatmaps = Vec::with_capacity(beatmap_count as usize);
        for _ in 0..beatmap_count {
            beatmaps.push(read_beatmap(&mut cursor, version, options)?);
        }

        debug!(
            version,
            beatmaps = beatmaps.len(),
            trailing = cursor.remaining(),
            "decoded osu!.db"
        );

        Ok(OsuDatabase {
            version,
            folder_count,
            account_unlocked,
            unlock_date,
            player_name,
            beatmaps,
        })
    }
}
