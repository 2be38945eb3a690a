// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use viewfinder::Config;
use viewfinder::backends::permissions::{Permission, StaticPermissions};

mod cli;

#[derive(Parser)]
#[command(name = "viewfinder")]
#[command(about = "Camera viewfinder with photo and video capture modes")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Answer the camera permission request with "denied"
    #[arg(long, global = true)]
    deny_camera: bool,

    /// Answer the microphone permission request with "denied"
    #[arg(long, global = true)]
    deny_microphone: bool,

    /// Answer the media library permission request with "denied"
    #[arg(long, global = true)]
    deny_library: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run in terminal mode (default)
    Terminal,

    /// Take a photo
    Photo {
        /// Use the front camera
        #[arg(short, long)]
        front: bool,

        /// Library directory to save into (default: ~/Pictures/viewfinder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a video
    Video {
        /// Recording duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,

        /// Use the front camera
        #[arg(short, long)]
        front: bool,

        /// Library directory to save into (default: ~/Pictures/viewfinder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

impl Cli {
    fn permissions(&self) -> StaticPermissions {
        let mut permissions = StaticPermissions::granting_all();
        if self.deny_camera {
            permissions = permissions.deny(Permission::Camera);
        }
        if self.deny_microphone {
            permissions = permissions.deny(Permission::Microphone);
        }
        if self.deny_library {
            permissions = permissions.deny(Permission::MediaLibrary);
        }
        permissions
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=viewfinder=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let permissions = cli.permissions();

    match cli.command {
        None | Some(Commands::Terminal) => viewfinder::terminal::run(config, permissions),
        Some(Commands::Photo { front, output }) => {
            cli::take_photo(config, permissions, front, output)
        }
        Some(Commands::Video {
            duration,
            front,
            output,
        }) => cli::record_video(config, permissions, duration, front, output),
        Some(Commands::Config) => cli::print_config(&config),
    }
}
