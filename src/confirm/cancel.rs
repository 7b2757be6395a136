//! Host-side cancellation of a pending confirmation

use futures::channel::oneshot;
use futures::future::pending;

/// Held by the transport; aborting resolves the pending flow to cancelled
#[derive(Debug)]
pub struct CancelHandle(oneshot::Sender<()>);

/// Held by the confirmation flow
#[derive(Debug)]
pub struct CancelSignal {
    rx: Option<oneshot::Receiver<()>>,
    fired: bool,
}

/// Create a connected handle/signal pair
pub fn cancel_channel() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = oneshot::channel();
    (
        CancelHandle(tx),
        CancelSignal {
            rx: Some(rx),
            fired: false,
        },
    )
}

impl CancelHandle {
    /// Abort the confirmation, e.g. on host disconnect
    pub fn abort(self) {
        if self.0.send(()).is_err() {
            log::debug!("abort after confirmation already finished");
        }
    }
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        Self {
            rx: None,
            fired: false,
        }
    }

    /// Resolves once the host aborts. Dropping the handle without
    /// aborting leaves this pending forever.
    pub async fn cancelled(&mut self) {
        if self.fired {
            return;
        }
        let Some(rx) = self.rx.as_mut() else {
            return pending().await;
        };
        match rx.await {
            Ok(()) => self.fired = true,
            Err(oneshot::Canceled) => {
                self.rx = None;
                pending::<()>().await
            }
        }
    }

    /// Non-blocking check for an abort
    pub fn is_cancelled(&mut self) -> bool {
        if !self.fired {
            if let Some(rx) = self.rx.as_mut() {
                match rx.try_recv() {
                    Ok(Some(())) => self.fired = true,
                    Ok(None) => {}
                    Err(oneshot::Canceled) => self.rx = None,
                }
            }
        }
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{select, Either};
    use futures::pin_mut;

    #[test]
    fn test_abort_fires() {
        let (handle, mut signal) = cancel_channel();
        assert!(!signal.is_cancelled());
        handle.abort();
        block_on(signal.cancelled());
        assert!(signal.is_cancelled());
        // Stays fired
        block_on(signal.cancelled());
    }

    #[test]
    fn test_dropped_handle_never_fires() {
        let (handle, mut signal) = cancel_channel();
        drop(handle);
        assert!(!signal.is_cancelled());

        let cancelled = signal.cancelled();
        let ready = futures::future::ready(7);
        pin_mut!(cancelled, ready);
        match block_on(select(cancelled, ready)) {
            Either::Left(_) => panic!("dropped handle must not cancel"),
            Either::Right((value, _)) => assert_eq!(value, 7),
        }
    }

    #[test]
    fn test_never() {
        let mut signal = CancelSignal::never();
        assert!(!signal.is_cancelled());
    }
}
