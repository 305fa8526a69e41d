// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;
use std::process;

use clap::Parser;
use simple_logger::SimpleLogger;

use inky_frame::compose::compose;
use inky_frame::screen::PngScreen;
use inky_frame::{Orientation, OrientedImage, Screen};

#[derive(Parser)]
#[command(name = "display")]
#[command(about = "Show a single image on the photo frame")]
struct Args {
    /// Panel width in pixels
    #[arg(long, value_name = "pixels", default_value_t = 800)]
    width: usize,

    /// Panel height in pixels
    #[arg(long, value_name = "pixels", default_value_t = 480)]
    height: usize,

    /// Compose for a portrait-mounted panel
    #[arg(short, long)]
    portrait: bool,

    /// Where to write the composed frame
    #[arg(short, long, value_name = "file", default_value_t = String::from("/tmp/inky-frame.png"))]
    output: String,

    /// Panel command, run with the output file as its last argument
    #[arg(short, long, value_name = "command")]
    command: Option<String>,

    #[arg(value_name = "filename")]
    image: String,
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
    SimpleLogger::new().init()?;

    log::info!("decoding {}", args.image);
    let photo = OrientedImage::open(&args.image)?;

    let command = args
        .command
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let mut scr = PngScreen::new(args.width, args.height, &args.output).with_command(command);
    let (width, height) = scr.screen_size();
    let orientation = if args.portrait {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };
    let (width, height) = orientation.canvas_size(width, height);

    let canvas = compose(photo.image(), width, height)?;
    scr.render(&canvas)?;

    log::info!("display updated: {} on {}x{}", photo.name(), width, height);

    Ok(())
}
