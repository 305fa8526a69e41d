// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;
use std::process;
use std::sync::mpsc;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use inky_frame::buttons;
use inky_frame::config::{self, Config};
use inky_frame::frame::Frame;
use inky_frame::immich::{ImmichClient, RemotePhotos};
use inky_frame::photo::PhotoSource;
use inky_frame::scheduler::Scheduler;
use inky_frame::screen::PngScreen;
use inky_frame::store::LocalStore;

#[derive(Parser)]
#[command(name = "inky-frame")]
#[command(about = "An e-ink photo frame driven by buttons and an Immich server")]
struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "file", default_value_t = String::from("inky-frame.yaml"))]
    config: String,

    /// Minutes between automatic photo changes, 0 to disable
    #[arg(short, long, value_name = "minutes")]
    interval: Option<u64>,

    /// Don't read button commands from stdin
    #[arg(long)]
    no_keyboard: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(_) => (),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let mut cfg = config::load(&args.config)?;
    if let Some(interval) = args.interval {
        cfg.interval = interval;
        cfg.validate()?;
    }
    log::info!("using config: {}", args.config);

    let screen = PngScreen::new(cfg.display.width, cfg.display.height, &cfg.display.output)
        .with_command(cfg.display.command.clone());
    let mut frame = Frame::new(screen, photo_source(&cfg)?);

    let (tx, rx) = mpsc::channel();

    #[cfg(feature = "gpio")]
    let _buttons = buttons::GpioButtons::new(&cfg.buttons, tx.clone())?;

    if !args.no_keyboard {
        buttons::spawn_keyboard(tx.clone());
    }

    // The scheduler stops once every sender is gone; holding one here keeps
    // the frame running after stdin closes, until "q" or a signal.
    let _keepalive = tx;

    match cfg.period() {
        Some(period) => log::info!("photo interval: {} minutes", period.as_secs() / 60),
        None => log::info!("photo interval: disabled"),
    }

    let mut scheduler = Scheduler::new(rx, cfg.period());
    scheduler.start(&mut frame);

    Ok(())
}

fn photo_source(cfg: &Config) -> Result<Box<dyn PhotoSource>, Box<dyn Error>> {
    if let Some(immich) = &cfg.source.immich {
        log::info!("connecting to immich at {}", immich.url);
        let client = ImmichClient::new(&immich.url, &immich.api_key, immich.batch)?;
        return Ok(Box::new(RemotePhotos::new(client, immich.attempts)));
    }

    match &cfg.source.library {
        Some(path) => {
            log::info!("reading photos from {}", path.display());
            Ok(Box::new(LocalStore::new(path)))
        }
        None => Err("no photo source configured".into()),
    }
}
