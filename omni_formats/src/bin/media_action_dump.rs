use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use omni_formats::{MediaAction, Streamable};

/// Decode a single serialized media action and print its fields.
#[derive(Parser)]
struct Args {
    /// Path to a file holding exactly one media action record
    path: PathBuf,

    /// Layout version tag the record was written with
    #[arg(long, default_value_t = 1)]
    version_tag: i16,

    /// Emit the decoded record as pretty-printed JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let record = MediaAction::open(&args.path, args.version_tag)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let action = record.action();
    println!("{} ({:?})", record.class_name(), record.layout());
    println!("object id:          {}", action.object_id);
    println!("flags:              {:#010x}", action.flags);
    println!(
        "timing:             start {} duration {} loops {}",
        action.start_time, action.duration, action.loop_count
    );
    println!(
        "source path:        {}",
        record
            .media_source_path()
            .map(|path| path.to_string_lossy())
            .unwrap_or_else(|| String::from("<none>"))
    );
    println!("frames per second:  {}", record.frames_per_second());
    println!("media format:       {}", record.media_format());
    println!("palette management: {}", record.palette_management());
    println!("sustain time:       {}", record.sustain_time());
    println!(
        "size on disk:       {} ({} media)",
        record.size_on_disk(),
        record.recorded_size()
    );
    Ok(())
}
