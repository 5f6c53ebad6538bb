use crate::controller::LookupState;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    /// The controller published a new state.
    StateChanged,
}

pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancellation_token: CancellationToken,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, mut state: watch::Receiver<LookupState>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();
        let token = cancellation_token.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            use futures::StreamExt;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        break;
                    }
                    Some(Ok(event)) = reader.next() => {
                        if let CrosstermEvent::Key(key) = event {
                            // Windows reports releases too
                            if key.kind != KeyEventKind::Press {
                                continue;
                            }
                            if sender.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(()) = state.changed() => {
                        if sender.send(Event::StateChanged).is_err() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(tick_rate) => {
                        if sender.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            receiver,
            cancellation_token,
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    pub fn stop(&self) {
        self.cancellation_token.cancel();
    }
}
