// SPDX-License-Identifier: GPL-3.0-or-later

use crate::compose::compose;
use crate::photo::PhotoSource;
use crate::{ButtonEvent, FrameState, Res, Screen};

/// Ties the frame state to a photo source and a screen.
pub struct Frame<S: Screen, P: PhotoSource> {
    screen: S,
    source: P,
    state: FrameState,
}

impl<S: Screen, P: PhotoSource> Frame<S, P> {
    pub fn new(screen: S, source: P) -> Self {
        Self {
            screen,
            source,
            state: FrameState::default(),
        }
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Apply `event` and push the result. The new state is kept only if
    /// the screen accepted it.
    pub fn handle(&mut self, event: ButtonEvent) -> Res<()> {
        let next = self.state.apply(event, &mut self.source)?;
        self.show(&next)?;
        self.state = next;
        Ok(())
    }

    /// Like `handle`, but errors are logged and dropped.
    pub fn dispatch(&mut self, event: ButtonEvent) {
        log::debug!("event: {event}");
        if let Err(err) = self.handle(event) {
            log::warn!("{event} failed: {err}");
        }
    }

    fn show(&mut self, state: &FrameState) -> Res<()> {
        let (width, height) = self.screen.screen_size();
        let (width, height) = state.orientation.canvas_size(width, height);

        let view = state.view()?;
        let canvas = compose(&view, width, height)?;
        self.screen.render(&canvas)?;

        log::info!(
            "showing {} ({}°, {:?}) on {}x{}",
            state.current().map_or("?", |p| p.name()),
            state.rotation.degrees(),
            state.orientation,
            width,
            height
        );
        Ok(())
    }
}
