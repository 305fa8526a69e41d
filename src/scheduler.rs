// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::frame::Frame;
use crate::photo::PhotoSource;
use crate::{ButtonEvent, Screen};

/// Messages sent by input producers to the frame's single consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Button(ButtonEvent),
    Quit,
}

/// Consumes button events one at a time and advances to the next photo
/// when `period` passes without one.
pub struct Scheduler {
    ch: mpsc::Receiver<Message>,
    period: Option<Duration>,
}

impl Scheduler {
    pub fn new(ch: mpsc::Receiver<Message>, period: Option<Duration>) -> Self {
        Self { ch, period }
    }

    /// Run until every producer has hung up or a quit message arrives.
    pub fn start<S: Screen, P: PhotoSource>(&mut self, frame: &mut Frame<S, P>) {
        log::info!("start scheduler");
        frame.dispatch(ButtonEvent::NextPhoto);
        let mut last_advance = Instant::now();

        loop {
            let msg = match self.period {
                Some(period) => {
                    let timeout = period.saturating_sub(last_advance.elapsed());
                    match self.ch.recv_timeout(timeout) {
                        Ok(msg) => msg,
                        Err(mpsc::RecvTimeoutError::Timeout) => {
                            log::debug!("no input for {:?}, advancing", period);
                            Message::Button(ButtonEvent::NextPhoto)
                        }
                        Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.ch.recv() {
                    Ok(msg) => msg,
                    Err(_) => break,
                },
            };

            match msg {
                Message::Button(event) => {
                    frame.dispatch(event);
                    if event == ButtonEvent::NextPhoto {
                        last_advance = Instant::now();
                    }
                }
                Message::Quit => break,
            }
        }

        log::info!("scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::tests::{ListSource, MockScreen};
    use crate::Rotation;

    fn frame() -> Frame<MockScreen, ListSource> {
        Frame::new(
            MockScreen::new(40, 24),
            ListSource {
                sizes: vec![(20, 10), (10, 20), (30, 30)],
                offline: false,
            },
        )
    }

    #[test]
    fn test_runs_events_in_order() {
        let (tx, rx) = mpsc::channel();
        for event in [ButtonEvent::NextPhoto, ButtonEvent::Rotate90, ButtonEvent::Rotate180] {
            tx.send(Message::Button(event)).unwrap();
        }
        drop(tx);

        let mut f = frame();
        Scheduler::new(rx, None).start(&mut f);

        // startup photo plus three events
        assert_eq!(f.screen().shown.len(), 4);
        assert_eq!(f.state().index, Some(1));
        assert_eq!(f.state().rotation, Rotation::R270);
    }

    #[test]
    fn test_quit_stops_loop() {
        let (tx, rx) = mpsc::channel();
        tx.send(Message::Quit).unwrap();
        tx.send(Message::Button(ButtonEvent::NextPhoto)).unwrap();

        let mut f = frame();
        Scheduler::new(rx, None).start(&mut f);

        assert_eq!(f.screen().shown.len(), 1);
        assert_eq!(f.state().index, Some(0));
    }

    #[test]
    fn test_auto_advance() {
        let (tx, rx) = mpsc::channel();
        let producer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(300));
            tx.send(Message::Quit).unwrap();
        });

        let mut f = frame();
        Scheduler::new(rx, Some(Duration::from_millis(40))).start(&mut f);
        producer.join().unwrap();

        // the startup photo plus at least one timed advance
        assert!(f.screen().shown.len() >= 2);
    }
}
