// SPDX-License-Identifier: GPL-3.0-or-later

pub type Rgb = rgb::RGB<u8>;

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
