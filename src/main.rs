use clap::{Parser, Subcommand};
use frame_cycle::cache::cache_location;
use frame_cycle::imaging::{ImageBackend, RustBackend};
use frame_cycle::naming::safe_id;
use frame_cycle::settings::{IMAGE_INDEX, Settings};
use frame_cycle::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frame-cycle")]
#[command(about = "Pick and prepare the next image for a photo frame")]
#[command(long_about = "\
Pick and prepare the next image for a photo frame

Originals live under <root>/saved/, processed copies under <root>/cached/:

  /srv/frame/
  ├── saved/
  │   ├── dawn.jpg                 # Upload, listed in imageFiles[]
  │   └── tall.png
  └── cached/
      └── dawn.jpg                 # Resized to the panel, reused next time

Settings (JSON object, shared with the frame host):
  imageFiles[]        list of source paths
  image_index         next position to show (sequential mode)
  randomize           \"true\" to pick at random
  padImage            \"true\" to letterbox instead of filling the panel
  backgroundColor     letterbox color: name, #hex, rgb(...), or [r, g, b]
  crop_settings[<id>] JSON crop record for the image with that safe id

Run 'frame-cycle gen-config' to generate a documented device.toml.")]
#[command(version = env!("FRAME_CYCLE_VERSION"))]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one cycle: select, load, transform, cache
    Render {
        /// Settings JSON file; the advanced index is written back to it
        #[arg(long, default_value = "settings.json")]
        settings: PathBuf,

        /// Device configuration
        #[arg(long, default_value = "device.toml")]
        device: PathBuf,

        /// Where to write the rendered bitmap (PNG)
        #[arg(long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Print the safe id used to key per-image settings
    SafeId {
        /// Source image path
        path: String,
    },
    /// Print where the processed copy of an image is cached
    CachePath {
        /// Source image path
        path: PathBuf,
    },
    /// Print a stock device.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            settings: settings_path,
            device,
            output: output_path,
        } => {
            let mut settings = Settings::load(&settings_path)?;
            let device = config::load_config(&device)?;
            let images = settings.image_files().ok().flatten().unwrap_or_default();
            let index_before = settings.get(IMAGE_INDEX).cloned();

            let backend = RustBackend::new();
            let result = pipeline::generate_image(&backend, &mut settings, &device);

            // A failed cycle may still have advanced the index.
            if settings.get(IMAGE_INDEX) != index_before.as_ref() {
                settings.save(&settings_path)?;
            }
            let render = result?;
            backend.save(&render.bitmap, &output_path)?;
            output::print_render_output(&render, &images, settings.image_index());
        }
        Command::SafeId { path } => {
            println!("{}", safe_id(Some(path.as_str())));
        }
        Command::CachePath { path } => {
            println!("{}", cache_location(&path).display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
