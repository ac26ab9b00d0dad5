//! Decoded osu!.db data structures
//!
//! These are plain value types: one decode call produces one immutable
//! [`OsuDatabase`] with no references back into the input buffer.

use serde::{Deserialize, Serialize};

/// Represents a game mode in osu!
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Osu
    }
}

impl From<u8> for GameMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Osu,
            1 => Self::Taiko,
            2 => Self::Catch,
            3 => Self::Mania,
            _ => Self::Osu,
        }
    }
}

/// One timing point: 17 bytes on the wire (two f64 + one bool).
///
/// Values are passed through unvalidated; negative BPM or NaN is the
/// caller's problem, not the decoder's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub bpm: f64,
    /// Offset into the song, in milliseconds
    pub offset: f64,
    /// True for red (uninherited) timing points
    pub uninherited: bool,
}

/// Star rating pre-computed for one mod combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModStarRating {
    /// Mod bitmask the rating was computed for
    pub mods: u32,
    pub stars: f32,
}

/// Per-rule-set star rating blocks, in the fixed wire order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModStarRatings {
    pub standard: Vec<ModStarRating>,
    pub taiko: Vec<ModStarRating>,
    pub catch: Vec<ModStarRating>,
    pub mania: Vec<ModStarRating>,
}

impl ModStarRatings {
    /// Ratings for one rule-set
    pub fn for_mode(&self, mode: GameMode) -> &[ModStarRating] {
        match mode {
            GameMode::Osu => &self.standard,
            GameMode::Taiko => &self.taiko,
            GameMode::Catch => &self.catch,
            GameMode::Mania => &self.mania,
        }
    }
}

/// Metadata for a single beatmap difficulty, in osu!.db wire order.
///
/// Fields mirror the file byte-for-byte; timestamps stay in the raw .NET
/// tick values the client writes and grade/status bytes keep their encoded
/// form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatmapEntry {
    /// Romanized artist name
    pub artist: String,
    /// Unicode artist name (empty if the map has none)
    pub artist_unicode: String,
    /// Romanized song title
    pub title: String,
    /// Unicode song title (empty if the map has none)
    pub title_unicode: String,
    /// Beatmap creator username
    pub creator: String,
    /// Difficulty name, e.g. "Insane"
    pub version: String,
    /// Audio filename relative to the beatmap folder
    pub audio_file: String,
    /// MD5 hash of the .osu file
    pub md5_hash: String,
    /// .osu filename relative to the beatmap folder
    pub osu_file: String,
    /// Ranked status byte as stored by the client
    pub ranked_status: u8,
    pub num_circles: u16,
    pub num_sliders: u16,
    pub num_spinners: u16,
    /// Last modification time (.NET ticks)
    pub last_modified: i64,
    /// Approach rate; a whole-number byte in pre-20140609 files
    pub approach_rate: f32,
    /// Circle size; a whole-number byte in pre-20140609 files
    pub circle_size: f32,
    /// HP drain rate; a whole-number byte in pre-20140609 files
    pub hp_drain: f32,
    /// Overall difficulty; a whole-number byte in pre-20140609 files
    pub overall_difficulty: f32,
    pub slider_velocity: f64,
    /// Pre-computed per-mod star ratings, retained only when
    /// [`ReadOptions::include_mod_star_ratings`] is set
    ///
    /// [`ReadOptions::include_mod_star_ratings`]: super::ReadOptions::include_mod_star_ratings
    pub mod_star_ratings: Option<ModStarRatings>,
    /// Drain time in seconds
    pub drain_time: u32,
    /// Total time in milliseconds
    pub total_time: u32,
    /// Audio preview start in milliseconds
    pub preview_time: u32,
    pub timing_points: Vec<TimingPoint>,
    pub beatmap_id: u32,
    pub beatmap_set_id: u32,
    pub thread_id: u32,
    /// Best grade achieved per rule-set, encoded bytes
    pub grade_standard: u8,
    pub grade_taiko: u8,
    pub grade_catch: u8,
    pub grade_mania: u8,
    /// Local audio offset in milliseconds
    pub local_offset: u16,
    pub stack_leniency: f32,
    /// Rule-set byte as stored; see [`BeatmapEntry::mode`]
    pub gameplay_mode: u8,
    /// Source (game, anime, etc.)
    pub song_source: String,
    /// Space-separated search tags
    pub song_tags: String,
    /// Online audio offset in milliseconds
    pub online_offset: u16,
    /// Font used for the title on the song select screen
    pub title_font: String,
    pub is_unplayed: bool,
    /// Last played time (.NET ticks)
    pub last_played: u64,
    /// True if the map is stored in osz2 form
    pub is_osz2: bool,
    /// Folder name relative to the Songs directory
    pub folder_name: String,
    /// Last online check time (.NET ticks)
    pub last_checked: u64,
    pub ignore_sounds: bool,
    pub ignore_skin: bool,
    pub disable_storyboard: bool,
    pub disable_video: bool,
    pub visual_override: bool,
    /// Second last-modified field the client keeps alongside the first
    pub last_modified2: u32,
    /// Mania scroll speed
    pub scroll_speed: u8,
}

impl BeatmapEntry {
    /// Rule-set this difficulty was mapped for
    pub fn mode(&self) -> GameMode {
        GameMode::from(self.gameplay_mode)
    }

    /// Get display title (unicode if available, otherwise romanized)
    pub fn display_title(&self) -> &str {
        if self.title_unicode.is_empty() {
            &self.title
        } else {
            &self.title_unicode
        }
    }

    /// Get display artist (unicode if available, otherwise romanized)
    pub fn display_artist(&self) -> &str {
        if self.artist_unicode.is_empty() {
            &self.artist
        } else {
            &self.artist_unicode
        }
    }
}

/// A fully-decoded osu!.db file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsuDatabase {
    /// Format version, e.g. 20150203
    pub version: u32,
    /// Number of folders in the Songs directory
    pub folder_count: u32,
    /// False while the account is locked for multi-account abuse
    pub account_unlocked: bool,
    /// When the account unlocks (.NET ticks); zero if unlocked
    pub unlock_date: i64,
    pub player_name: String,
    /// Every indexed beatmap difficulty, in file order
    pub beatmaps: Vec<BeatmapEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_from_byte() {
        assert_eq!(GameMode::from(0), GameMode::Osu);
        assert_eq!(GameMode::from(1), GameMode::Taiko);
        assert_eq!(GameMode::from(2), GameMode::Catch);
        assert_eq!(GameMode::from(3), GameMode::Mania);
        // Unknown bytes fall back to standard
        assert_eq!(GameMode::from(200), GameMode::Osu);
    }

    #[test]
    fn test_display_metadata_prefers_unicode() {
        let entry = BeatmapEntry {
            title: "Romanized".to_string(),
            title_unicode: "ユニコード".to_string(),
            artist: "Artist".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.display_title(), "ユニコード");
        assert_eq!(entry.display_artist(), "Artist");
    }
}
