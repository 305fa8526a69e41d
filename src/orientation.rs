// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Cursor;
use std::ops::Add;

use image::DynamicImage;

/// Counter-clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

// EXIF orientation tag value to the rotation that corrects it.
const EXIF_ROTATIONS: &[(u32, Rotation)] = &[
    (3, Rotation::R180),
    (6, Rotation::R270),
    (8, Rotation::R90),
];

impl Rotation {
    pub fn from_degrees(deg: u32) -> Self {
        match deg % 360 {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Total over all tag values: anything but 3, 6 or 8 is left alone.
    pub fn from_exif(tag: u32) -> Self {
        EXIF_ROTATIONS
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(Rotation::R0, |(_, r)| *r)
    }

    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Rotation::R0 => image.clone(),
            Rotation::R90 => image.rotate270(),
            Rotation::R180 => image.rotate180(),
            Rotation::R270 => image.rotate90(),
        }
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, other: Rotation) -> Rotation {
        Rotation::from_degrees(self.degrees() + other.degrees())
    }
}

/// Read the EXIF orientation tag from an encoded image, if it has one.
pub fn exif_orientation(bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

/// Landscape/portrait flag. Portrait swaps the canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn toggle(self) -> Self {
        match self {
            Orientation::Landscape => Orientation::Portrait,
            Orientation::Portrait => Orientation::Landscape,
        }
    }

    pub fn canvas_size(&self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Orientation::Landscape => (width, height),
            Orientation::Portrait => (height, width),
        }
    }
}
