//! osu!.db binary format decoding

mod beatmap;
mod cursor;
mod model;
mod reader;

pub use cursor::ByteCursor;
pub use model::{BeatmapEntry, GameMode, ModStarRating, ModStarRatings, OsuDatabase, TimingPoint};
pub use reader::{OsuDbReader, ReadOptions};
