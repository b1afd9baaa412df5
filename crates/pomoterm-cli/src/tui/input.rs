use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event};
use pomoterm_core::{Command, Message};
use tokio::sync::mpsc;

use super::keymap::command_for;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Reads terminal events on a dedicated thread and posts them to the
/// runtime queue as commands and redraw requests.
pub struct InputPump {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl InputPump {
    pub fn spawn(tx: mpsc::UnboundedSender<Message>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();
        let join = std::thread::spawn(move || input_loop(&stop2, &tx));
        Self {
            stop,
            join: Some(join),
        }
    }

    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::UnboundedSender<Message>) {
    while !stop.load(Ordering::Acquire) {
        let message = match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => command_for(key).map(Message::Command),
                Ok(Event::Resize(..)) => Some(Message::Redraw),
                Ok(_) => None,
                Err(e) => {
                    tracing::error!(error = %e, "terminal read failed");
                    Some(Message::Command(Command::Quit))
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::error!(error = %e, "terminal poll failed");
                Some(Message::Command(Command::Quit))
            }
        };
        if let Some(message) = message {
            let quit = message == Message::Command(Command::Quit);
            if tx.send(message).is_err() || quit {
                break;
            }
        }
    }
}
