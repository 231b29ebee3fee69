//! Completion - 一度だけ発火する完了シグナル
//!
//! `tokio::sync::oneshot` の薄いラッパーです。送信側が何も送らずに drop された場合は
//! `T::default()`（EditSession なら Cancelled）として扱います。

use tokio::sync::oneshot;

/// Sending half, owned by the session. Consumed on first use.
pub(crate) struct Signal<T> {
    tx: Option<oneshot::Sender<T>>,
}

impl<T> Signal<T> {
    /// Returns false if the signal already fired.
    pub(crate) fn fire(&mut self, value: T) -> bool {
        match self.tx.take() {
            // A dropped receiver means nobody waits; still counts as fired.
            Some(tx) => {
                let _ = tx.send(value);
                true
            }
            None => false,
        }
    }
}

/// Receiving half, handed to whoever waits for the outcome.
#[derive(Debug)]
pub struct Completion<T> {
    rx: oneshot::Receiver<T>,
}

impl<T: Default> Completion<T> {
    /// Wait for the single outcome.
    pub async fn wait(self) -> T {
        self.rx.await.unwrap_or_default()
    }

    /// Non-blocking check; `None` while the session is still open.
    pub fn try_outcome(&mut self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(T::default()),
        }
    }
}

pub(crate) fn channel<T>() -> (Signal<T>, Completion<T>) {
    let (tx, rx) = oneshot::channel();
    (Signal { tx: Some(tx) }, Completion { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_once() {
        let (mut signal, completion) = channel::<u8>();

        assert!(signal.fire(7));
        assert!(!signal.fire(9));

        assert_eq!(completion.wait().await, 7);
    }

    #[tokio::test]
    async fn dropped_signal_yields_default() {
        let (signal, completion) = channel::<Option<bool>>();
        drop(signal);
        assert_eq!(completion.wait().await, None);
    }

    #[test]
    fn try_outcome_is_empty_until_fired() {
        let (mut signal, mut completion) = channel::<u8>();
        assert_eq!(completion.try_outcome(), None);
        signal.fire(1);
        assert_eq!(completion.try_outcome(), Some(1));
    }
}
