//! AlertDispatcher - observer hub broadcasting alerts to subscribers

use std::sync::{Arc, Mutex, PoisonError};

use contracts::{AlertMessage, ContractError, Subscriber};
use tracing::{debug, error, instrument, warn};

use crate::metrics::DispatcherMetrics;

/// Alert dispatcher
///
/// Holds subscribers in insertion order. Subscribers are identified by the
/// `Arc` they were registered with, so the same instance is never stored
/// twice.
///
/// `notify_all` copies the list under the lock and delivers outside it, which
/// lets a subscriber call back into the dispatcher without deadlocking.
/// Subscribers added or removed during a broadcast only affect later
/// broadcasts.
#[derive(Default)]
pub struct AlertDispatcher {
    subscribers: Mutex<Vec<Arc<dyn Subscriber>>>,
    metrics: DispatcherMetrics,
}

impl AlertDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber
    ///
    /// Idempotent: returns `false` if this instance is already registered.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> bool {
        let mut subscribers = self.lock();
        if subscribers.iter().any(|s| same_subscriber(s, &subscriber)) {
            debug!(subscriber = subscriber.name(), "already subscribed");
            return false;
        }
        debug!(subscriber = subscriber.name(), "subscribed");
        subscribers.push(subscriber);
        true
    }

    /// Remove a subscriber
    ///
    /// No-op (returns `false`) if it was not registered.
    pub fn unsubscribe(&self, subscriber: &Arc<dyn Subscriber>) -> bool {
        let mut subscribers = self.lock();
        match subscribers.iter().position(|s| same_subscriber(s, subscriber)) {
            Some(idx) => {
                subscribers.remove(idx);
                debug!(subscriber = subscriber.name(), "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Deliver `message` to every current subscriber, in subscription order
    ///
    /// Returns the number of subscribers notified.
    ///
    /// # Errors
    /// The first subscriber error is returned as-is; subscribers after the
    /// failing one are not notified for this message.
    #[instrument(name = "dispatcher_notify_all", skip(self, message), fields(severity = ?message.severity()))]
    pub fn notify_all(&self, message: &AlertMessage) -> Result<usize, ContractError> {
        let snapshot: Vec<Arc<dyn Subscriber>> = self.lock().clone();
        self.metrics.inc_broadcast_count();

        if snapshot.is_empty() {
            warn!(alert = %message, "alert raised with no subscribers");
            return Ok(0);
        }

        for subscriber in &snapshot {
            if let Err(e) = subscriber.notify(message) {
                self.metrics.inc_failure_count();
                error!(
                    subscriber = subscriber.name(),
                    error = %e,
                    "subscriber failed, aborting broadcast"
                );
                return Err(e);
            }
            self.metrics.inc_delivery_count();
        }

        debug!(delivered = snapshot.len(), "alert broadcast complete");
        Ok(snapshot.len())
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn metrics(&self) -> &DispatcherMetrics {
        &self.metrics
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn Subscriber>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.lock().iter().map(|s| s.name().to_string()).collect();
        f.debug_struct("AlertDispatcher")
            .field("subscribers", &names)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}

/// Identity comparison on the data pointer only (vtable pointers may differ)
fn same_subscriber(a: &Arc<dyn Subscriber>, b: &Arc<dyn Subscriber>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every message it receives into a shared log
    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl Subscriber for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn notify(&self, message: &AlertMessage) -> Result<(), ContractError> {
            self.log
                .lock()
                .unwrap()
                .push((self.name.clone(), message.text().to_string()));
            Ok(())
        }
    }

    struct Failing;

    impl Subscriber for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn notify(&self, _message: &AlertMessage) -> Result<(), ContractError> {
            Err(ContractError::subscriber("failing", "mock failure"))
        }
    }

    fn recorder(name: &str, log: &Arc<Mutex<Vec<(String, String)>>>) -> Arc<dyn Subscriber> {
        Arc::new(Recorder {
            name: name.to_string(),
            log: Arc::clone(log),
        })
    }

    #[test]
    fn test_notify_all_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = AlertDispatcher::new();
        dispatcher.subscribe(recorder("a", &log));
        dispatcher.subscribe(recorder("b", &log));
        dispatcher.subscribe(recorder("c", &log));

        let delivered = dispatcher
            .notify_all(&AlertMessage::critical("smoke"))
            .unwrap();

        assert_eq!(delivered, 3);
        let log = log.lock().unwrap();
        let order: Vec<&str> = log.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert!(log.iter().all(|(_, m)| m == "smoke"));
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = AlertDispatcher::new();
        let sub = recorder("a", &log);

        assert!(dispatcher.subscribe(Arc::clone(&sub)));
        assert!(!dispatcher.subscribe(Arc::clone(&sub)));
        assert_eq!(dispatcher.subscriber_count(), 1);

        dispatcher.notify_all(&AlertMessage::critical("once")).unwrap();
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = AlertDispatcher::new();
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        dispatcher.subscribe(Arc::clone(&a));
        dispatcher.subscribe(Arc::clone(&b));

        assert!(dispatcher.unsubscribe(&a));
        assert!(!dispatcher.unsubscribe(&a));

        dispatcher.notify_all(&AlertMessage::critical("x")).unwrap();
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, "b");
    }

    #[test]
    fn test_distinct_instances_with_same_name_both_kept() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = AlertDispatcher::new();
        dispatcher.subscribe(recorder("dup", &log));
        dispatcher.subscribe(recorder("dup", &log));
        assert_eq!(dispatcher.subscriber_count(), 2);
    }

    #[test]
    fn test_failure_propagates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = AlertDispatcher::new();
        dispatcher.subscribe(recorder("first", &log));
        dispatcher.subscribe(Arc::new(Failing));
        dispatcher.subscribe(recorder("after", &log));

        let err = dispatcher
            .notify_all(&AlertMessage::critical("boom"))
            .unwrap_err();

        assert!(matches!(err, ContractError::Subscriber { .. }));
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, "first");
        assert_eq!(dispatcher.metrics().failure_count(), 1);
    }

    #[test]
    fn test_no_subscribers() {
        let dispatcher = AlertDispatcher::new();
        assert_eq!(dispatcher.notify_all(&AlertMessage::critical("x")).unwrap(), 0);
        assert_eq!(dispatcher.metrics().broadcast_count(), 1);
    }

    /// Unsubscribes itself while being notified
    struct SelfRemoving {
        dispatcher: Arc<AlertDispatcher>,
        me: Mutex<Option<Arc<dyn Subscriber>>>,
    }

    impl Subscriber for SelfRemoving {
        fn name(&self) -> &str {
            "self_removing"
        }

        fn notify(&self, _message: &AlertMessage) -> Result<(), ContractError> {
            if let Some(me) = self.me.lock().unwrap().take() {
                self.dispatcher.unsubscribe(&me);
            }
            Ok(())
        }
    }

    #[test]
    fn test_reentrant_unsubscribe_does_not_deadlock() {
        let dispatcher = Arc::new(AlertDispatcher::new());
        let sub = Arc::new(SelfRemoving {
            dispatcher: Arc::clone(&dispatcher),
            me: Mutex::new(None),
        });
        let as_dyn: Arc<dyn Subscriber> = sub.clone();
        *sub.me.lock().unwrap() = Some(Arc::clone(&as_dyn));
        dispatcher.subscribe(as_dyn);

        assert_eq!(dispatcher.notify_all(&AlertMessage::critical("x")).unwrap(), 1);
        assert_eq!(dispatcher.subscriber_count(), 0);
    }

    /// Counts how often each distinct message text was delivered
    #[derive(Default)]
    struct Tally {
        seen: Mutex<std::collections::HashMap<String, usize>>,
    }

    impl Subscriber for Tally {
        fn name(&self) -> &str {
            "tally"
        }

        fn notify(&self, message: &AlertMessage) -> Result<(), ContractError> {
            *self
                .seen
                .lock()
                .unwrap()
                .entry(message.text().to_string())
                .or_default() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_concurrent_subscribe_unsubscribe_and_broadcast() {
        use std::thread;

        const BROADCASTS: usize = 200;
        const CHURNERS: usize = 4;

        let dispatcher = Arc::new(AlertDispatcher::new());
        let steady = Arc::new(Tally::default());
        dispatcher.subscribe(steady.clone());

        let churners: Vec<Arc<Tally>> = (0..CHURNERS).map(|_| Arc::new(Tally::default())).collect();
        let handles: Vec<_> = churners
            .iter()
            .map(|tally| {
                let dispatcher = Arc::clone(&dispatcher);
                let sub: Arc<dyn Subscriber> = tally.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(dispatcher.subscribe(Arc::clone(&sub)));
                        assert!(dispatcher.unsubscribe(&sub));
                    }
                    dispatcher.subscribe(sub);
                })
            })
            .collect();

        let broadcaster = {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                for i in 0..BROADCASTS {
                    dispatcher
                        .notify_all(&AlertMessage::critical(format!("alert-{i}")))
                        .unwrap();
                }
            })
        };

        for h in handles {
            h.join().unwrap();
        }
        broadcaster.join().unwrap();

        assert_eq!(dispatcher.subscriber_count(), 1 + CHURNERS);
        assert_eq!(dispatcher.metrics().broadcast_count(), BROADCASTS as u64);

        let steady_seen = steady.seen.lock().unwrap();
        assert_eq!(steady_seen.len(), BROADCASTS);
        assert!(steady_seen.values().all(|&n| n == 1));
        for tally in &churners {
            assert!(tally.seen.lock().unwrap().values().all(|&n| n <= 1));
        }
    }
}
