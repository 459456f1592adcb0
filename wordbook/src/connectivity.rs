use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;

/// Best-effort view of network reachability. Only consulted to decide
/// whether a remote attempt is worth making; never authoritative.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Waits until the network comes up or the timeout elapses, whichever
    /// happens first. Returns the connectivity state at that moment.
    async fn wait_for_connection(&self, timeout: Duration) -> bool;
}

/// Reachability state fed from the outside (the platform's network monitor,
/// a poller, a test). Every pending `wait_for_connection` call is resolved
/// exactly once: either woken by a transition to connected or by its own
/// timeout.
pub struct ConnectivityMonitor {
    connected: AtomicBool,
    waiters: Mutex<Vec<oneshot::Sender<bool>>>,
}

impl ConnectivityMonitor {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
            waiters: Mutex::new(Vec::new()),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
        if connected {
            let waiters = std::mem::take(&mut *self.waiters.lock().unwrap());
            for waiter in waiters {
                // The receiver may have timed out and gone away already.
                let _ = waiter.send(true);
            }
        } else {
            // Timed-out waiters leave dead senders behind; drop them so the
            // list cannot grow for as long as the network stays down.
            self.waiters.lock().unwrap().retain(|waiter| !waiter.is_closed());
        }
    }
}

#[async_trait]
impl ConnectivityProbe for ConnectivityMonitor {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn wait_for_connection(&self, timeout: Duration) -> bool {
        let (sender, receiver) = oneshot::channel();
        {
            let mut waiters = self.waiters.lock().unwrap();
            // Checked under the lock so a transition cannot slip between the
            // check and the registration.
            if self.is_connected() {
                return true;
            }
            waiters.retain(|waiter| !waiter.is_closed());
            waiters.push(sender);
        }
        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(connected)) => connected,
            // Timed out, or the monitor was dropped while we waited.
            _ => self.is_connected(),
        }
    }
}

/// Probe for callers without a reachability source: always reports up, so
/// the repository always tries the network.
pub struct AlwaysOnline;

#[async_trait]
impl ConnectivityProbe for AlwaysOnline {
    fn is_connected(&self) -> bool {
        true
    }

    async fn wait_for_connection(&self, _timeout: Duration) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn returns_immediately_when_connected() {
        let monitor = ConnectivityMonitor::new(true);
        assert!(monitor.wait_for_connection(Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn times_out_while_offline() {
        let monitor = ConnectivityMonitor::new(false);
        assert!(!monitor.wait_for_connection(Duration::from_millis(20)).await);
    }

    #[tokio::test]
    async fn woken_by_a_transition_to_connected() {
        let monitor = Arc::new(ConnectivityMonitor::new(false));
        let background = Arc::clone(&monitor);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            background.set_connected(true);
        });
        assert!(monitor.wait_for_connection(Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn every_waiter_is_woken() {
        let monitor = Arc::new(ConnectivityMonitor::new(false));
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let monitor = Arc::clone(&monitor);
                tokio::spawn(
                    async move { monitor.wait_for_connection(Duration::from_secs(5)).await },
                )
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(10)).await;
        monitor.set_connected(true);
        for waiter in waiters {
            assert!(waiter.await.unwrap());
        }
    }

    #[tokio::test]
    async fn timed_out_waiters_do_not_accumulate() {
        let monitor = Arc::new(ConnectivityMonitor::new(false));
        for _ in 0..4 {
            assert!(!monitor.wait_for_connection(Duration::from_millis(5)).await);
        }
        // Dead senders are swept when a new waiter registers.
        let background = Arc::clone(&monitor);
        let waiter = tokio::spawn(async move {
            background.wait_for_connection(Duration::from_secs(5)).await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(monitor.waiters.lock().unwrap().len(), 1);

        // And on a transition that stays offline.
        waiter.abort();
        tokio::time::sleep(Duration::from_millis(20)).await;
        monitor.set_connected(false);
        assert!(monitor.waiters.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn going_offline_does_not_wake_waiters() {
        let monitor = Arc::new(ConnectivityMonitor::new(false));
        let background = Arc::clone(&monitor);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            background.set_connected(false);
        });
        assert!(!monitor.wait_for_connection(Duration::from_millis(50)).await);
    }
}
