//! One-way command channel to the text-to-speech engine.
//!
//! Commands are never acknowledged. The channel holds a single slot, so a
//! command the engine has not picked up yet is replaced by the next one.

use crate::preferences::Language;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationCommand {
    Speak { text: String, language: Language },
    Stop,
}

/// Sending half, owned by the view layer.
#[derive(Debug)]
pub struct NarrationSender {
    tx: watch::Sender<Option<NarrationCommand>>,
}

/// Receiving half, owned by the narration engine.
#[derive(Debug)]
pub struct NarrationReceiver {
    rx: watch::Receiver<Option<NarrationCommand>>,
}

/// Create a connected sender/receiver pair.
pub fn narration_channel() -> (NarrationSender, NarrationReceiver) {
    let (tx, rx) = watch::channel(None);
    (NarrationSender { tx }, NarrationReceiver { rx })
}

impl NarrationSender {
    /// Send a command, replacing any command not yet observed.
    pub fn send(&self, command: NarrationCommand) {
        tracing::debug!(?command, "narration command");
        self.tx.send_replace(Some(command));
    }

    pub fn speak(&self, text: impl Into<String>, language: Language) {
        self.send(NarrationCommand::Speak {
            text: text.into(),
            language,
        });
    }

    pub fn stop(&self) {
        self.send(NarrationCommand::Stop);
    }
}

impl NarrationReceiver {
    /// Wait for the latest unseen command, or `None` once the sender is gone.
    pub async fn next(&mut self) -> Option<NarrationCommand> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            if let Some(command) = self.rx.borrow_and_update().clone() {
                return Some(command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[tokio::test]
    async fn newer_command_supersedes_unseen_one() {
        let (tx, mut rx) = narration_channel();
        tx.speak("Guten Morgen", Language::De);
        tx.speak("Добро утро", Language::Bg);

        assert_eq!(
            rx.next().await,
            Some(NarrationCommand::Speak {
                text: "Добро утро".to_string(),
                language: Language::Bg,
            })
        );
    }

    #[tokio::test]
    async fn stop_after_speak() {
        let (tx, mut rx) = narration_channel();
        tx.speak("Hello", Language::En);
        assert!(matches!(rx.next().await, Some(NarrationCommand::Speak { .. })));

        tx.stop();
        assert_eq!(rx.next().await, Some(NarrationCommand::Stop));
    }

    #[tokio::test]
    async fn closed_after_sender_dropped() {
        let (tx, mut rx) = narration_channel();
        tx.stop();
        drop(tx);

        assert_eq!(rx.next().await, Some(NarrationCommand::Stop));
        assert_eq!(rx.next().await, None);
    }

    #[test]
    fn send_without_receiver_does_not_fail() {
        let (tx, rx) = narration_channel();
        drop(rx);
        tx.speak("Hello", Language::En);
    }

    #[test]
    fn waits_until_a_command_arrives() {
        let (tx, mut rx) = narration_channel();
        let mut next = task::spawn(rx.next());
        assert_pending!(next.poll());

        tx.stop();
        assert!(next.is_woken());
        assert_ready_eq!(next.poll(), Some(NarrationCommand::Stop));
    }
}
