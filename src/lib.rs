// SPDX-License-Identifier: GPL-3.0-or-later

pub use crate::canvas::Canvas;
pub use crate::colors::Rgb;
pub use crate::error::Error;
pub use crate::geometry::{Coord, Rect, Size};
pub use crate::orientation::{Orientation, Rotation};
pub use crate::photo::{OrientedImage, PhotoSource};
pub use crate::state::{ButtonEvent, FrameState};

pub mod buttons;
mod canvas;
pub mod colors;
pub mod compose;
pub mod config;
mod error;
pub mod frame;
mod geometry;
pub mod immich;
pub mod orientation;
pub mod photo;
pub mod scheduler;
pub mod screen;
pub mod state;
pub mod store;

type Res<T> = Result<T, Error>;

/// A display sink. The panel geometry is queried once per push.
pub trait Screen {
    fn screen_size(&self) -> (usize, usize);
    fn render(&mut self, canvas: &Canvas) -> Res<()>;
}

impl<S: Screen + ?Sized> Screen for Box<S> {
    fn screen_size(&self) -> (usize, usize) {
        (**self).screen_size()
    }

    fn render(&mut self, canvas: &Canvas) -> Res<()> {
        (**self).render(canvas)
    }
}
