// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Canvas, Error, Res, Screen};

/// Writes each canvas to a PNG file and optionally hands the file to an
/// external panel command, e.g. a vendor script driving the e-ink panel.
pub struct PngScreen {
    width: usize,
    height: usize,
    path: PathBuf,
    command: Vec<String>,
}

impl PngScreen {
    pub fn new<P: AsRef<Path>>(width: usize, height: usize, path: P) -> Self {
        Self {
            width,
            height,
            path: path.as_ref().to_path_buf(),
            command: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run_command(&self) -> Res<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(());
        };

        log::debug!("running {program} {args:?} {}", self.path.display());
        let output = Command::new(program)
            .args(args)
            .arg(&self.path)
            .output()
            .map_err(|err| Error::DisplayIo(format!("cannot run {program}: {err}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{program}: {}", stdout.trim());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::DisplayIo(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Screen for PngScreen {
    fn screen_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn render(&mut self, canvas: &Canvas) -> Res<()> {
        lodepng::encode24_file(&self.path, canvas.pixels(), canvas.width(), canvas.height())?;
        log::debug!("wrote {}", self.path.display());
        self.run_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::Rgb;

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut scr = PngScreen::new(4, 3, &path);
        assert_eq!(scr.screen_size(), (4, 3));

        scr.render(&Canvas::new(4, 3, WHITE)).unwrap();

        let bitmap = lodepng::decode24_file(&path).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (4, 3));
        assert!(bitmap.buffer.iter().all(|&p| p == Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_render_portrait_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let mut scr = PngScreen::new(4, 3, dir.path().join("frame.png"));

        scr.render(&Canvas::new(3, 4, WHITE)).unwrap();

        let bitmap = lodepng::decode24_file(scr.path()).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (3, 4));
    }

    #[test]
    fn test_render_bad_path() {
        let mut scr = PngScreen::new(2, 2, "/nonexistent/dir/frame.png");
        assert!(matches!(
            scr.render(&Canvas::new(2, 2, WHITE)),
            Err(Error::DisplayIo(_))
        ));
    }

    #[test]
    fn test_render_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let canvas = Canvas::new(2, 2, WHITE);

        for tc in vec![
            (vec!["true"], true),
            (vec!["false"], false),
            (vec!["test", "-f"], true),
            (vec!["/nonexistent/panel-driver"], false),
        ] {
            let command = tc.0.iter().map(|s| s.to_string()).collect();
            let mut scr = PngScreen::new(2, 2, &path).with_command(command);
            assert_eq!(scr.render(&canvas).is_ok(), tc.1, "{:?}", tc.0);
        }
    }
}
