//! Per-beatmap record decoding
//!
//! A record is a flat run of positional fields with no tags and no framing:
//! every field must be consumed in wire order, because one width mistake
//! desynchronizes the cursor for the rest of the file.

use crate::error::Result;

use super::cursor::ByteCursor;
use super::model::{BeatmapEntry, ModStarRating, ModStarRatings, TimingPoint};
use super::reader::ReadOptions;

/// Files from this version on store difficulty values as f32 instead of
/// whole-number bytes. The only schema fork in the format.
const FLOAT_DIFFICULTY_VERSION: u32 = 20140609;

/// Read one 17-byte timing point (f64 bpm, f64 offset, bool uninherited).
pub(super) fn read_timing_point(cursor: &mut ByteCursor<'_>) -> Result<TimingPoint> {
    Ok(TimingPoint {
        bpm: cursor.read_f64()?,
        offset: cursor.read_f64()?,
        uninherited: cursor.read_bool()?,
    })
}

/// Read one per-rule-set star rating block: a u32 entry count, then
/// {u32 mod bitmask, 2 reserved bytes, f32 stars} per entry.
///
/// The 2-byte slot between bitmask and rating has no documented meaning;
/// it is consumed to keep the cursor aligned and otherwise ignored. Entries
/// are only collected when `retain` is set, but the block is always read in
/// full.
pub(super) fn read_mod_stars(
    cursor: &mut ByteCursor<'_>,
    retain: bool,
) -> Result<Vec<ModStarRating>> {
    let count = cursor.read_u32()?;
    let mut entries = Vec::with_capacity(if retain { count as usize } else { 0 });

    for _ in 0..count {
        let mods = cursor.read_u32()?;
        cursor.skip(2)?;
        let stars = cursor.read_f32()?;
        if retain {
            entries.push(ModStarRating { mods, stars });
        }
    }

    Ok(entries)
}

/// Decode a single beatmap record.
///
/// `db_version` comes from the file header and selects the difficulty field
/// encoding; everything else is version-independent.
pub(super) fn read_beatmap(
    cursor: &mut ByteCursor<'_>,
    db_version: u32,
    options: &ReadOptions,
) -> Result<BeatmapEntry> {
    let artist = cursor.read_string()?;
    let artist_unicode = cursor.read_string()?;
    let title = cursor.read_string()?;
    let title_unicode = cursor.read_string()?;
    let creator = cursor.read_string()?;
    let version = cursor.read_string()?;
    let audio_file = cursor.read_string()?;
    let md5_hash = cursor.read_string()?;
    let osu_file = cursor.read_string()?;

    let ranked_status = cursor.read_u8()?;
    let num_circles = cursor.read_u16()?;
    let num_sliders = cursor.read_u16()?;
    let num_spinners = cursor.read_u16()?;
    let last_modified = cursor.read_i64()?;

    let (approach_rate, circle_size, hp_drain, overall_difficulty) =
        if db_version < FLOAT_DIFFICULTY_VERSION {
            (
                cursor.read_u8()? as f32,
                cursor.read_u8()? as f32,
                cursor.read_u8()? as f32,
                cursor.read_u8()? as f32,
            )
        } else {
            (
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
            )
        };

    let slider_velocity = cursor.read_f64()?;

    // Fixed rule-set order: standard, taiko, catch, mania
    let retain = options.include_mod_star_ratings;
    let standard = read_mod_stars(cursor, retain)?;
    let taiko = read_mod_stars(cursor, retain)?;
    let catch = read_mod_stars(cursor, retain)?;
    let mania = read_mod_stars(cursor, retain)?;
    let mod_star_ratings = retain.then(|| ModStarRatings {
        standard,
        taiko,
        catch,
        mania,
    });

    let drain_time = cursor.read_u32()?;
    let total_time = cursor.read_u32()?;
    let preview_time = cursor.read_u32()?;

    let timing_point_count = cursor.read_u32()?;
    let mut timing_points = Vec::with_capacity(timing_point_count as usize);
    for _ in 0..timing_point_count {
        timing_points.push(read_timing_point(cursor)?);
    }

    let beatmap_id = cursor.read_u32()?;
    let beatmap_set_id = cursor.read_u32()?;
    let thread_id = cursor.read_u32()?;
    let grade_standard = cursor.read_u8()?;
    let grade_taiko = cursor.read_u8()?;
    let grade_catch = cursor.read_u8()?;
    let grade_mania = cursor.read_u8()?;
    let local_offset = cursor.read_u16()?;
    let stack_leniency = cursor.read_f32()?;
    let gameplay_mode = cursor.read_u8()?;
    let song_source = cursor.read_string()?;
    let song_tags = cursor.read_string()?;
    let online_offset = cursor.read_u16()?;
    let title_font = cursor.read_string()?;
    let is_unplayed = cursor.read_bool()?;
    let last_played = cursor.read_u64()?;
    let is_osz2 = cursor.read_bool()?;
    let folder_name = cursor.read_string()?;
    let last_checked = cursor.read_u64()?;
    let ignore_sounds = cursor.read_bool()?;
    let ignore_skin = cursor.read_bool()?;
    let disable_storyboard = cursor.read_bool()?;
    let disable_video = cursor.read_bool()?;
    let visual_override = cursor.read_bool()?;
    let last_modified2 = cursor.read_u32()?;
    let scroll_speed = cursor.read_u8()?;

    Ok(BeatmapEntry {
        artist,
        artist_unicode,
        title,
        title_unicode,
        creator,
        version,
        audio_file,
        md5_hash,
        osu_file,
        ranked_status,
        num_circles,
        num_sliders,
        num_spinners,
        last_modified,
        approach_rate,
        circle_size,
        hp_drain,
        overall_difficulty,
        slider_velocity,
        mod_star_ratings,
        drain_time,
        total_time,
        preview_time,
        timing_points,
        beatmap_id,
        beatmap_set_id,
        thread_id,
        grade_standard,
        grade_taiko,
        grade_catch,
        grade_mania,
        local_offset,
        stack_leniency,
        gameplay_mode,
        song_source,
        song_tags,
        online_offset,
        title_font,
        is_unplayed,
        last_played,
        is_osz2,
        folder_name,
        last_checked,
        ignore_sounds,
        ignore_skin,
        disable_storyboard,
        disable_video,
        visual_override,
        last_modified2,
        scroll_speed,
    })
}

/// Byte-builders for synthetic fixtures, shared by the decoder test modules.
#[cfg(test)]
pub(super) mod fixtures {
    pub(in crate::db) fn write_uleb128(buf: &mut Vec<u8>, mut value: u64) {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    pub(in crate::db) fn write_string(buf: &mut Vec<u8>, s: &str) {
        if s.is_empty() {
            buf.push(0x00);
        } else {
            buf.push(0x0b);
            write_uleb128(buf, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
    }

    pub(in crate::db) fn write_mod_star_block(buf: &mut Vec<u8>, entries: &[(u32, f32)]) {
        buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        for &(mods, stars) in entries {
            buf.extend_from_slice(&mods.to_le_bytes());
            buf.extend_from_slice(&0u16.to_le_bytes()); // reserved slot
            buf.extend_from_slice(&stars.to_le_bytes());
        }
    }

    pub(in crate::db) fn write_timing_point(buf: &mut Vec<u8>, bpm: f64, offset: f64, uninherited: bool) {
        buf.extend_from_slice(&bpm.to_le_bytes());
        buf.extend_from_slice(&offset.to_le_bytes());
        buf.push(uninherited as u8);
    }

    /// Append one complete beatmap record with fixed recognizable values,
    /// encoded for `db_version`.
    pub(in crate::db) fn write_beatmap(buf: &mut Vec<u8>, db_version: u32) {
        write_string(buf, "Artist");
        write_string(buf, "");
        write_string(buf, "Title");
        write_string(buf, "タイトル");
        write_string(buf, "Creator");
        write_string(buf, "Hard");
        write_string(buf, "audio.mp3");
        write_string(buf, "d41d8cd98f00b204e9800998ecf8427e");
        write_string(buf, "map.osu");

        buf.push(4); // ranked status
        buf.extend_from_slice(&100u16.to_le_bytes()); // circles
        buf.extend_from_slice(&50u16.to_le_bytes()); // sliders
        buf.extend_from_slice(&2u16.to_le_bytes()); // spinners
        buf.extend_from_slice(&636000000000000000i64.to_le_bytes()); // last modified

        if db_version < 20140609 {
            buf.extend_from_slice(&[9, 4, 5, 8]); // AR, CS, HP, OD as bytes
        } else {
            buf.extend_from_slice(&9.0f32.to_le_bytes());
            buf.extend_from_slice(&4.0f32.to_le_bytes());
            buf.extend_from_slice(&5.0f32.to_le_bytes());
            buf.extend_from_slice(&8.0f32.to_le_bytes());
        }

        buf.extend_from_slice(&1.4f64.to_le_bytes()); // slider velocity

        write_mod_star_block(buf, &[]); // standard
        write_mod_star_block(buf, &[]); // taiko
        write_mod_star_block(buf, &[]); // catch
        write_mod_star_block(buf, &[]); // mania

        buf.extend_from_slice(&90u32.to_le_bytes()); // drain time
        buf.extend_from_slice(&120_000u32.to_le_bytes()); // total time
        buf.extend_from_slice(&30_500u32.to_le_bytes()); // preview time

        buf.extend_from_slice(&1u32.to_le_bytes()); // timing point count
        write_timing_point(buf, 375.0, 250.0, true);

        buf.extend_from_slice(&12345u32.to_le_bytes()); // beatmap id
        buf.extend_from_slice(&678u32.to_le_bytes()); // beatmap set id
        buf.extend_from_slice(&0u32.to_le_bytes()); // thread id
        buf.extend_from_slice(&[9, 9, 9, 9]); // grades
        buf.extend_from_slice(&0u16.to_le_bytes()); // local offset
        buf.extend_from_slice(&0.7f32.to_le_bytes()); // stack leniency
        buf.push(3); // gameplay mode: mania
        write_string(buf, "");
        write_string(buf, "tag1 tag2");
        buf.extend_from_slice(&0u16.to_le_bytes()); // online offset
        write_string(buf, "");
        buf.push(1); // unplayed
        buf.extend_from_slice(&0u64.to_le_bytes()); // last played
        buf.push(0); // osz2
        write_string(buf, "678 Artist - Title");
        buf.extend_from_slice(&0u64.to_le_bytes()); // last checked
        buf.extend_from_slice(&[0, 0, 0, 0, 0]); // five flag bytes
        buf.extend_from_slice(&0u32.to_le_bytes()); // last modified 2
        buf.push(4); // scroll speed
    }
}
