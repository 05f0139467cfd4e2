//! The one legitimate cross-tree signal: the host page needs to know when
//! the viewer goes fullscreen so it can hide its navigation chrome. A
//! typed channel replaces the original global DOM event bus.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;

/// Sent to the host page chrome on every immersive-mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChromeSignal {
    pub immersive: bool,
}

pub type ChromeReceiver = Receiver<ChromeSignal>;

/// Fans immersive-mode changes out to subscribers. Consecutive duplicates
/// are suppressed so a panorama-to-panorama jump stays silent.
#[derive(Debug, Default)]
pub struct ChromeNotifier {
    subscribers: Vec<Sender<ChromeSignal>>,
    last_sent: Option<bool>,
}

impl ChromeNotifier {
    pub fn subscribe(&mut self) -> ChromeReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Seed the dedupe baseline with the entry state's flag so construction
    /// itself never emits.
    pub fn prime(&mut self, immersive: bool) {
        self.last_sent = Some(immersive);
    }

    pub fn notify(&mut self, immersive: bool) {
        if self.last_sent == Some(immersive) {
            return;
        }
        self.last_sent = Some(immersive);
        self.subscribers
            .retain(|tx| tx.send(ChromeSignal { immersive }).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_notifications_are_suppressed() {
        let mut notifier = ChromeNotifier::default();
        notifier.prime(false);
        let rx = notifier.subscribe();

        notifier.notify(false);
        assert!(rx.try_recv().is_err());

        notifier.notify(true);
        assert_eq!(rx.try_recv().unwrap(), ChromeSignal { immersive: true });

        notifier.notify(true);
        assert!(rx.try_recv().is_err());

        notifier.notify(false);
        assert_eq!(rx.try_recv().unwrap(), ChromeSignal { immersive: false });
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut notifier = ChromeNotifier::default();
        notifier.prime(false);
        let rx = notifier.subscribe();
        drop(rx);
        notifier.notify(true);
        assert!(notifier.subscribers.is_empty());
    }
}
