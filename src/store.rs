// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};

use crate::photo::{OrientedImage, Photo, PhotoSource};
use crate::{Error, Res};

const EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic"];

/// A directory of image files, visited in path order.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// List image files under the store root, sorted by path.
    pub fn scan(&self) -> Res<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root).map_err(|_| Error::NotFound(self.root.clone()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image(path))
            .collect();
        paths.sort();

        Ok(paths)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl PhotoSource for LocalStore {
    /// Advance past `current` with wrap-around. Files that fail to load
    /// are skipped, at most once around the list.
    fn next_photo(&mut self, current: Option<usize>) -> Res<Photo> {
        let paths = self.scan()?;
        if paths.is_empty() {
            return Err(Error::NotFound(self.root.clone()));
        }

        let start = current.map_or(0, |i| i + 1);
        let mut last_err = None;
        for step in 0..paths.len() {
            let index = (start + step) % paths.len();
            match OrientedImage::open(&paths[index]) {
                Ok(image) => {
                    return Ok(Photo {
                        image,
                        index: Some(index),
                    })
                }
                Err(err) => {
                    log::warn!("skipping {}: {err}", paths[index].display());
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or(Error::NotFound(self.root.clone())))
    }
}
