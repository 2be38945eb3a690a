// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Taking photos
//! - Recording videos
//! - Printing the effective configuration
//!
//! Both capture commands drive the same viewfinder the terminal frontend
//! uses, so they go through the same permission and capture rules.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use viewfinder::app::{Runtime, Viewfinder};
use viewfinder::backends::Backends;
use viewfinder::backends::camera::FileCamera;
use viewfinder::backends::media_store::LibraryDirectory;
use viewfinder::backends::permissions::{Permission, StaticPermissions};
use viewfinder::{CaptureMode, Config, Message};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Take a photo
pub fn take_photo(
    config: Config,
    permissions: StaticPermissions,
    front: bool,
    output: Option<PathBuf>,
) -> CliResult {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (mut app, mut runtime) = mount(config, permissions, output).await?;
        prepare(&mut app, &runtime, CaptureMode::Photo, front);

        println!("Using camera: {}", app.backends().camera.name());
        println!("Capturing...");
        runtime.dispatch(&mut app, Message::Capture);
        run_until(&mut app, &mut runtime, |app| {
            !app.session().photo_in_flight()
                && !app.has_pending_saves()
                && (app.session().last_media().is_some() || app.banner().is_some())
        })
        .await?;

        report(&app, "Photo")
    })
}

/// Record a video for `duration` seconds (Ctrl+C stops early)
pub fn record_video(
    config: Config,
    permissions: StaticPermissions,
    duration: u64,
    front: bool,
    output: Option<PathBuf>,
) -> CliResult {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (mut app, mut runtime) = mount(config, permissions, output).await?;
        prepare(&mut app, &runtime, CaptureMode::Video, front);

        println!("Using camera: {}", app.backends().camera.name());
        println!("Duration: {} seconds", duration);
        println!();
        println!("Recording... (press Ctrl+C to stop early)");
        runtime.dispatch(&mut app, Message::Capture);

        let start = Instant::now();
        let deadline = start + Duration::from_secs(duration);
        let mut progress = tokio::time::interval(Duration::from_millis(100));

        while app.session().is_recording() && !app.session().recording().stop_requested() {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    println!("Stopping early...");
                    break;
                }
                Some(message) = runtime.next() => runtime.dispatch(&mut app, message),
                _ = progress.tick() => {
                    let elapsed = start.elapsed().as_secs();
                    print!("\rRecording: {:02}:{:02}", elapsed / 60, elapsed % 60);
                    std::io::stdout().flush()?;
                }
            }
        }
        println!();

        if app.session().is_recording() {
            runtime.dispatch(&mut app, Message::Capture);
        }
        run_until(&mut app, &mut runtime, |app| {
            !app.session().is_recording() && !app.has_pending_saves()
        })
        .await?;

        report(&app, "Video")
    })
}

/// Print the effective configuration
pub fn print_config(config: &Config) -> CliResult {
    match Config::path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (no config directory)"),
    }
    println!("{}", config.to_json()?);
    Ok(())
}

/// Wire a viewfinder to the test-pattern camera and wait for permissions
async fn mount(
    mut config: Config,
    permissions: StaticPermissions,
    output: Option<PathBuf>,
) -> Result<(Viewfinder, Runtime), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        config.library_dir = Some(dir);
        config.save_to_library = true;
    }

    let backends = Backends {
        camera: std::sync::Arc::new(FileCamera::new(config.capture_directory())),
        permissions: std::sync::Arc::new(permissions),
        media_store: std::sync::Arc::new(LibraryDirectory::new(config.library_directory())),
    };

    let mut runtime = Runtime::new(tokio::runtime::Handle::current());
    let (mut app, init) = Viewfinder::new(config, backends);
    runtime.spawn(init);
    run_until(&mut app, &mut runtime, |app| app.permissions().is_resolved()).await?;

    if !app.permissions().is_granted(Permission::Camera) {
        return Err("No access to camera".into());
    }
    Ok((app, runtime))
}

fn prepare(app: &mut Viewfinder, runtime: &Runtime, mode: CaptureMode, front: bool) {
    runtime.dispatch(app, Message::SetMode(mode));
    if front != (app.session().facing() == viewfinder::Facing::Front) {
        runtime.dispatch(app, Message::FlipCamera);
    }
}

/// Apply messages until `done` holds
async fn run_until(
    app: &mut Viewfinder,
    runtime: &mut Runtime,
    done: impl Fn(&Viewfinder) -> bool,
) -> CliResult {
    while !done(app) {
        let Some(message) = runtime.next().await else {
            return Err("event loop closed".into());
        };
        runtime.dispatch(app, message);
    }
    Ok(())
}

fn report(app: &Viewfinder, what: &str) -> CliResult {
    if let Some(banner) = app.banner() {
        return Err(banner.text().into());
    }

    match (app.session().last_media(), app.last_saved()) {
        (_, Some(saved)) => println!("{} saved: {}", what, saved),
        (Some(media), None) => println!("{} captured: {}", what, media.uri),
        (None, None) => return Err(format!("{} was not captured", what).into()),
    }
    Ok(())
}
