//! Interactive viewer binary.
//!
//! Opens a window, animates the ornament tree, and loads any photo files
//! given on the command line into the photo cloud. Without a webcam
//! classifier attached, gestures come from the keyboard: hold F to
//! gather, O to scatter (cursor steers), V to grab a photo.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use garland::{viewer, Experience, OrnamentLayout};

#[derive(Parser, Debug)]
#[command(name = "garland", about = "Gesture-driven holiday particle choreography", version)]
struct Args {
    /// Photo files (png/jpeg) to hang on the tree.
    photos: Vec<PathBuf>,

    /// Number of ornaments.
    #[arg(long, default_value_t = 350)]
    ornaments: u32,

    /// Seed for the scatter layout; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut experience = Experience::new().with_ornament_layout(OrnamentLayout {
        count: args.ornaments,
        ..Default::default()
    });
    if let Some(seed) = args.seed {
        experience = experience.with_seed(seed);
    }

    for path in &args.photos {
        experience.add_photo(path.to_string_lossy());
    }

    match viewer::run(experience) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
