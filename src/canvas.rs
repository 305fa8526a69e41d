// SPDX-License-Identifier: GPL-3.0-or-later

use image::RgbImage;

use crate::{Coord, Rect, Rgb, Size};

/// Fixed-size RGB bitmap pushed to a screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            buffer: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.buffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.buffer[y * self.width + x])
    }

    /// Copy `image` onto the canvas at `dest`, clipping whatever falls
    /// outside the canvas.
    pub fn copy_image(&mut self, image: &RgbImage, dest: &Coord) {
        let iw = image.width() as usize;
        let area = Rect::new(dest.x, dest.y, iw, image.height() as usize)
            .clip(self.width, self.height);

        let src = image.as_raw();
        for y in 0..area.h {
            let offset = (area.y + y) * self.width + area.x;
            let src_offset = y * iw * 3;
            let row = &src[src_offset..src_offset + area.w * 3];
            for (px, chunk) in self.buffer[offset..offset + area.w]
                .iter_mut()
                .zip(row.chunks_exact(3))
            {
                *px = Rgb::new(chunk[0], chunk[1], chunk[2]);
            }
        }
    }
}
