//! osudb - inspect osu!stable osu!.db files
//!
//! Usage:
//!   osudb <path>             Print a summary of the database
//!   osudb --json <path>      Dump the decoded database as JSON
//!   osudb --mod-stars <path> Also retain per-mod star rating blocks
//!   osudb --help             Show help

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use osu_db_core::{GameMode, OsuDbReader, ReadOptions};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // Decoder warnings (e.g. truncated varints) go to stderr so --json
    // output stays pipeable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut json = false;
    let mut options = ReadOptions::default();
    let mut path = None;

    for arg in &args {
        match arg.as_str() {
            "--json" => json = true,
            "--mod-stars" => options.include_mod_star_ratings = true,
            other if !other.starts_with('-') => path = Some(other.to_string()),
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    }

    let Some(path) = path else {
        eprintln!("Error: no osu!.db path given");
        eprintln!();
        print_help();
        std::process::exit(1);
    };

    let db = OsuDbReader::read_with(&path, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&db)?);
        return Ok(());
    }

    println!("osu!.db version {}", db.version);
    println!(
        "Player:       {}",
        if db.player_name.is_empty() {
            "(not set)"
        } else {
            &db.player_name
        }
    );
    println!("Song folders: {}", db.folder_count);
    println!("Beatmaps:     {}", db.beatmaps.len());

    for (mode, label) in [
        (GameMode::Osu, "osu!"),
        (GameMode::Taiko, "taiko"),
        (GameMode::Catch, "catch"),
        (GameMode::Mania, "mania"),
    ] {
        let count = db.beatmaps.iter().filter(|m| m.mode() == mode).count();
        if count > 0 {
            println!("  {:<8} {}", label, count);
        }
    }

    let unplayed = db.beatmaps.iter().filter(|m| m.is_unplayed).count();
    println!("Unplayed:     {}", unplayed);

    Ok(())
}

fn print_help() {
    println!("osudb - inspect osu!stable osu!.db files");
    println!();
    println!("Usage:");
    println!("  osudb <path>             Print a summary of the database");
    println!("  osudb --json <path>      Dump the decoded database as JSON");
    println!("  osudb --mod-stars <path> Also retain per-mod star rating blocks");
    println!("  osudb --help             Show this help");
}
