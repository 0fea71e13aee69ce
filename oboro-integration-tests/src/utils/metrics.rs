//! Tools to help testing metrics

use cadence::{SpyMetricSink, StatsdClient};
use crossbeam_channel::Receiver;
use statsd_parser::{Counter, Message, Metric};

/// Helper to collect metrics during tests, and make assertions about them.
pub struct MetricsWatcher {
    /// Crossbeam channel that receives metrics lines as bytes.
    rx: Receiver<Vec<u8>>,

    /// Metrics received by the watcher from [`rx`].
    messages: Vec<Message>,
}

impl MetricsWatcher {
    /// Make a new metrics watcher, attach it to a [`StatsdClient`] and return both.
    pub fn new_with_client() -> (Self, StatsdClient) {
        let (rx, spy_sink) = SpyMetricSink::new();
        let metrics_client = StatsdClient::from_sink("", spy_sink);
        let metrics_watcher = Self {
            rx,
            messages: vec![],
        };

        (metrics_watcher, metrics_client)
    }

    /// Consume any waiting events from `rx` and parse them as metrics.
    fn process_events(&mut self) {
        self.messages.extend(self.rx.try_iter().map(|bytes| {
            let s = String::from_utf8(bytes).expect("Invalid UTF8 in metric message");
            statsd_parser::parse(s).expect("Metric message parse error")
        }));
    }

    /// Get a list of all the metrics seen by this watcher, primarily for debugging.
    pub fn all_messages(&mut self) -> &[Message] {
        self.process_events();
        self.messages.as_slice()
    }

    /// Test if any metric this watcher received matches `predicate`.
    ///
    /// # Example
    ///
    /// ```
    /// # use oboro_integration_tests::MetricsWatcher;
    /// # use cadence::CountedExt;
    /// # let (mut metrics_watcher, metrics_client) = MetricsWatcher::new_with_client();
    /// #
    /// metrics_client.incr("a-metric").unwrap();
    ///
    /// assert!(metrics_watcher.has(|msg| msg.name == "a-metric"));
    /// ```
    pub fn has<F>(&mut self, predicate: F) -> bool
    where
        F: FnMut(&Message) -> bool,
    {
        self.all_messages().iter().any(predicate)
    }

    /// Sum the values of every counter received with the given name.
    pub fn count(&mut self, name: &str) -> f64 {
        self.all_messages()
            .iter()
            .filter(|msg| msg.name == name)
            .filter_map(|msg| match &msg.metric {
                Metric::Counter(Counter { value, .. }) => Some(*value),
                _ => None,
            })
            .sum()
    }
}
