// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use image::DynamicImage;

use crate::orientation::{self, Rotation};
use crate::{Error, Res};

/// A decoded image with its EXIF orientation already corrected.
#[derive(Debug, Clone)]
pub struct OrientedImage {
    name: String,
    image: DynamicImage,
}

impl OrientedImage {
    pub fn new(name: &str, image: DynamicImage) -> Self {
        Self {
            name: name.to_string(),
            image,
        }
    }

    pub fn decode(name: &str, bytes: &[u8]) -> Res<Self> {
        let image = image::load_from_memory(bytes)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::InvalidImage(format!("{name} has no pixels")));
        }

        let tag = orientation::exif_orientation(bytes);
        let rotation = tag.map_or(Rotation::R0, Rotation::from_exif);
        log::debug!(
            "decoded {name}: {}x{}, exif orientation {tag:?}",
            image.width(),
            image.height()
        );

        Ok(Self::new(name, rotation.apply(&image)))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Res<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|_| Error::NotFound(path.to_path_buf()))?;
        Self::decode(&path.display().to_string(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// A freshly loaded photo, and where it sits in its source.
#[derive(Debug)]
pub struct Photo {
    pub image: OrientedImage,
    pub index: Option<usize>,
}

/// Anything that can hand out the next photo to show. `current` is the
/// index of the photo on screen, if the source is indexed.
pub trait PhotoSource {
    fn next_photo(&mut self, current: Option<usize>) -> Res<Photo>;
}

impl<P: PhotoSource + ?Sized> PhotoSource for Box<P> {
    fn next_photo(&mut self, current: Option<usize>) -> Res<Photo> {
        (**self).next_photo(current)
    }
}
