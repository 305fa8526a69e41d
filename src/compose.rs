// SPDX-License-Identifier: GPL-3.0-or-later

//! Letterbox an image onto a fixed-size canvas.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::colors::WHITE;
use crate::{Canvas, Error, Res, Size};

/// Scale `image` to fit `width` x `height` without cropping and center it
/// on a white canvas of exactly that size.
pub fn compose(image: &DynamicImage, width: usize, height: usize) -> Res<Canvas> {
    let source = Size::new(image.width() as usize, image.height() as usize);
    let bounds = Size::new(width, height);

    let fitted = source.fit_within(&bounds).ok_or_else(|| {
        Error::InvalidImage(format!("cannot fit {source} into {bounds}"))
    })?;

    let resized = if fitted == source {
        image.to_rgb8()
    } else {
        image
            .resize_exact(fitted.w as u32, fitted.h as u32, FilterType::Lanczos3)
            .to_rgb8()
    };

    let pos = fitted.center_in(&bounds);
    log::debug!("compose {source} -> {fitted}{pos} on {bounds}");

    let mut canvas = Canvas::new(width, height, WHITE);
    canvas.copy_image(&resized, &pos);

    Ok(canvas)
}
