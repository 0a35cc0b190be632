//! Replays recorded telemetry through dynamic FOV and prints the FOV of every frame.
//!
//! The telemetry file has one JSON object per line, for example:
//!
//! ```text
//! {"speed_kmh": 132.5, "longitudinal_g": -0.8, "camera_mode": {"drivable": "chase"}}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, Context};
use fov_curve::CameraCategory;
use speed_fov::host::{CameraSink, HostSample, Telemetry};
use speed_fov::logging;
use speed_fov::modules::dynamic_fov::DynamicFov;
use speed_fov::modules::MODULES;
use speed_fov::settings::{JsonFileStore, MemoryStore, SettingsStore};
use tracing::info;

#[derive(Parser)]
#[clap(version, about = "Replays recorded telemetry through dynamic FOV.")]
struct Args {
    /// Telemetry file, one JSON sample per line.
    telemetry: PathBuf,

    /// Settings file to read. Without it, the defaults are used.
    #[clap(long)]
    settings: Option<PathBuf>,

    /// Write the seeded defaults back to the settings file.
    #[clap(long, requires = "settings")]
    save: bool,

    /// Game FOV of the first-person cameras.
    #[clap(long, default_value_t = 56.)]
    first_person_fov: f32,

    /// Game FOV of the third-person cameras.
    #[clap(long, default_value_t = 56.)]
    third_person_fov: f32,
}

struct Recorded(HostSample);

impl Telemetry for Recorded {
    fn sample(&self) -> HostSample {
        self.0
    }
}

struct ReplaySink {
    first_person: f32,
    third_person: f32,
}

impl CameraSink for ReplaySink {
    fn fov(&self, category: CameraCategory) -> f32 {
        match category {
            CameraCategory::FirstPerson => self.first_person,
            _ => self.third_person,
        }
    }

    fn set_fov(&mut self, category: CameraCategory, fov: f32) {
        match category {
            CameraCategory::FirstPerson => self.first_person = fov,
            CameraCategory::ThirdPerson => self.third_person = fov,
            CameraCategory::Other => (),
        }
    }
}

fn read_samples(args: &Args) -> eyre::Result<Vec<HostSample>> {
    let file = File::open(&args.telemetry)
        .wrap_err_with(|| format!("could not open {}", args.telemetry.display()))?;

    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.wrap_err("could not read the telemetry file")?;
        if line.trim().is_empty() {
            continue;
        }

        let sample = serde_json::from_str(&line)
            .wrap_err_with(|| format!("invalid sample on line {}", index + 1))?;
        samples.push(sample);
    }

    Ok(samples)
}

fn replay(args: &Args, samples: &[HostSample], store: &mut dyn SettingsStore) {
    let mut sink = ReplaySink {
        first_person: args.first_person_fov,
        third_person: args.third_person_fov,
    };
    let mut dynamic_fov = DynamicFov::new(&sink, store);

    for module in MODULES {
        let state = if module.is_enabled(store) { "on" } else { "off" };
        info!("{}: {state}", module.name());
    }

    println!("frame\tcamera\tspeed_kmh\tlongitudinal_g\tfov");
    for (frame, sample) in samples.iter().enumerate() {
        let fov = dynamic_fov.on_frame(&Recorded(*sample), &mut sink, store);
        let fov = fov.map_or_else(|| "-".to_owned(), |fov| format!("{fov:.2}"));

        println!(
            "{frame}\t{:?}\t{}\t{}\t{fov}",
            sample.camera_mode, sample.speed_kmh, sample.longitudinal_g
        );
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let args = Args::parse();
    let samples = read_samples(&args)?;
    info!("replaying {} frames", samples.len());

    match &args.settings {
        Some(path) => {
            let mut store = JsonFileStore::open(path)?;
            replay(&args, &samples, &mut store);

            if args.save {
                store.save()?;
                info!("saved settings to {}", store.path().display());
            }
        }
        None => replay(&args, &samples, &mut MemoryStore::new()),
    }

    Ok(())
}
