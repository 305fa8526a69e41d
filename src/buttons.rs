// SPDX-License-Identifier: GPL-3.0-or-later

//! Input producers feeding the scheduler's event queue.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use crate::scheduler::Message;
use crate::ButtonEvent;

/// Map a typed command to a message. Accepts the key or its long name.
pub fn parse_key(line: &str) -> Option<Message> {
    let msg = match line.trim().to_lowercase().as_str() {
        "n" | "next" => Message::Button(ButtonEvent::NextPhoto),
        "r" | "90" => Message::Button(ButtonEvent::Rotate90),
        "u" | "180" => Message::Button(ButtonEvent::Rotate180),
        "o" | "orientation" => Message::Button(ButtonEvent::ToggleOrientation),
        "q" | "quit" => Message::Quit,
        _ => return None,
    };
    Some(msg)
}

/// Forward commands read from `input`, one per line, until it closes.
pub fn read_keys<R: BufRead>(input: R, tx: &mpsc::Sender<Message>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("keyboard read error: {err}");
                break;
            }
        };
        match parse_key(&line) {
            Some(msg) => {
                if tx.send(msg).is_err() {
                    break;
                }
            }
            None if line.trim().is_empty() => (),
            None => log::warn!("unknown key {:?} (n, r, u, o, q)", line.trim()),
        }
    }
}

/// Read commands from stdin on a background thread.
pub fn spawn_keyboard(tx: mpsc::Sender<Message>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        read_keys(stdin.lock(), &tx);
        log::debug!("keyboard closed");
    })
}

#[cfg(feature = "gpio")]
pub use self::gpio::GpioButtons;

#[cfg(feature = "gpio")]
mod gpio {
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use rppal::gpio::{Gpio, InputPin, Trigger};

    use crate::config::ButtonPins;
    use crate::scheduler::Message;
    use crate::{ButtonEvent, Error};

    const DEBOUNCE: Duration = Duration::from_millis(250);

    /// Active-low push buttons. The pins must stay alive for their
    /// interrupts to keep firing.
    pub struct GpioButtons {
        _pins: Vec<InputPin>,
    }

    impl GpioButtons {
        pub fn new(pins: &ButtonPins, tx: mpsc::Sender<Message>) -> Result<Self, Error> {
            let gpio = Gpio::new().map_err(|err| Error::Config(format!("gpio: {err}")))?;

            let mut inputs = Vec::new();
            for (bcm, event) in [
                (pins.next, ButtonEvent::NextPhoto),
                (pins.rotate90, ButtonEvent::Rotate90),
                (pins.rotate180, ButtonEvent::Rotate180),
                (pins.orientation, ButtonEvent::ToggleOrientation),
            ] {
                let mut pin = gpio
                    .get(bcm)
                    .map_err(|err| Error::Config(format!("gpio {bcm}: {err}")))?
                    .into_input_pullup();

                let tx = tx.clone();
                let mut last = Instant::now() - DEBOUNCE;
                pin.set_async_interrupt(Trigger::FallingEdge, move |_| {
                    if last.elapsed() < DEBOUNCE {
                        return;
                    }
                    last = Instant::now();
                    if let Err(err) = tx.send(Message::Button(event)) {
                        log::warn!("button {bcm}: {err}");
                    }
                })
                .map_err(|err| Error::Config(format!("gpio {bcm} interrupt: {err}")))?;

                log::info!("button on gpio {bcm}: {event}");
                inputs.push(pin);
            }

            Ok(Self { _pins: inputs })
        }
    }
}
