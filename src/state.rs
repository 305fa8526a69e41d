// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use image::DynamicImage;

use crate::photo::PhotoSource;
use crate::{Error, Orientation, OrientedImage, Res, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    NextPhoto,
    Rotate90,
    Rotate180,
    ToggleOrientation,
}

impl std::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ButtonEvent::NextPhoto => "next photo",
            ButtonEvent::Rotate90 => "rotate 90",
            ButtonEvent::Rotate180 => "rotate 180",
            ButtonEvent::ToggleOrientation => "toggle orientation",
        };
        write!(f, "{name}")
    }
}

/// What the frame is showing. Transitions build a new state and leave
/// the old one untouched, so a failed push can simply drop the new one.
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub photo: Option<Rc<OrientedImage>>,
    pub rotation: Rotation,
    pub orientation: Orientation,
    pub index: Option<usize>,
}

impl FrameState {
    pub fn apply<P: PhotoSource + ?Sized>(&self, event: ButtonEvent, source: &mut P) -> Res<Self> {
        match event {
            ButtonEvent::NextPhoto => self.next_photo(source),
            ButtonEvent::Rotate90 => self.rotate(Rotation::R90),
            ButtonEvent::Rotate180 => self.rotate(Rotation::R180),
            ButtonEvent::ToggleOrientation => self.toggle_orientation(),
        }
    }

    pub fn next_photo<P: PhotoSource + ?Sized>(&self, source: &mut P) -> Res<Self> {
        let photo = source.next_photo(self.index)?;
        Ok(Self {
            photo: Some(Rc::new(photo.image)),
            rotation: Rotation::R0,
            orientation: Orientation::Landscape,
            index: photo.index,
        })
    }

    pub fn rotate(&self, by: Rotation) -> Res<Self> {
        self.current()?;
        Ok(Self {
            rotation: self.rotation + by,
            ..self.clone()
        })
    }

    pub fn toggle_orientation(&self) -> Res<Self> {
        self.current()?;
        Ok(Self {
            orientation: self.orientation.toggle(),
            ..self.clone()
        })
    }

    pub fn current(&self) -> Res<&OrientedImage> {
        self.photo.as_deref().ok_or(Error::NoPhoto)
    }

    /// The current photo with the user rotation applied.
    pub fn view(&self) -> Res<DynamicImage> {
        Ok(self.rotation.apply(self.current()?.image()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::Photo;
    use image::RgbImage;

    struct Counter {
        next: usize,
        fail: bool,
    }

    impl PhotoSource for Counter {
        fn next_photo(&mut self, current: Option<usize>) -> Res<Photo> {
            if self.fail {
                return Err(Error::Fetch("offline".to_string()));
            }
            assert_eq!(current.map_or(0, |i| i + 1), self.next);
            let index = self.next;
            self.next += 1;
            let image = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
            Ok(Photo {
                image: OrientedImage::new(&format!("{index}.png"), image),
                index: Some(index),
            })
        }
    }

    fn loaded() -> FrameState {
        let mut src = Counter { next: 0, fail: false };
        FrameState::default().next_photo(&mut src).unwrap()
    }

    #[test]
    fn test_next_photo_resets() {
        let mut src = Counter { next: 0, fail: false };
        let state = FrameState::default()
            .next_photo(&mut src)
            .and_then(|s| s.rotate(Rotation::R90))
            .and_then(|s| s.toggle_orientation())
            .unwrap();
        assert_eq!(state.rotation, Rotation::R90);
        assert_eq!(state.orientation, Orientation::Portrait);

        let state = state.apply(ButtonEvent::NextPhoto, &mut src).unwrap();
        assert_eq!(state.rotation, Rotation::R0);
        assert_eq!(state.orientation, Orientation::Landscape);
        assert_eq!(state.index, Some(1));
        assert_eq!(state.current().unwrap().name(), "1.png");
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut src = Counter { next: 1, fail: false };
        let mut state = loaded();
        for tc in vec![
            (ButtonEvent::Rotate90, 90, (2, 4)),
            (ButtonEvent::Rotate180, 270, (2, 4)),
            (ButtonEvent::Rotate90, 0, (4, 2)),
            (ButtonEvent::Rotate180, 180, (4, 2)),
        ] {
            state = state.apply(tc.0, &mut src).unwrap();
            assert_eq!(state.rotation.degrees(), tc.1);
            let view = state.view().unwrap();
            assert_eq!((view.width(), view.height()), tc.2);
        }
    }

    #[test]
    fn test_failed_transition_leaves_state() {
        let state = loaded();
        let mut src = Counter { next: 1, fail: true };
        assert!(matches!(state.next_photo(&mut src), Err(Error::Fetch(_))));
        assert_eq!(state.index, Some(0));
        assert_eq!(state.current().unwrap().name(), "0.png");
    }

    #[test]
    fn test_no_photo() {
        let state = FrameState::default();
        assert!(matches!(state.rotate(Rotation::R90), Err(Error::NoPhoto)));
        assert!(matches!(state.toggle_orientation(), Err(Error::NoPhoto)));
        assert!(matches!(state.view(), Err(Error::NoPhoto)));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ButtonEvent::NextPhoto.to_string(), "next photo");
        assert_eq!(ButtonEvent::ToggleOrientation.to_string(), "toggle orientation");
    }
}
