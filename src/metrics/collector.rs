use crate::metrics::{CounterKind, GaugeKind, MetricMsg, Metrics, PhaseTimeKind, SqlTimeKind};
use crossbeam_channel::{bounded, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

// The channel depth bounds worst-case memory; bursts block producers
// briefly, which is acceptable because the producers are I/O-completing
// tasks whose next step would otherwise block on the aggregator lock.
const METRICS_CHANNEL_DEPTH: usize = 25;

enum ChannelMsg {
    Sample(MetricMsg),
    Shutdown,
}

/// Receives metric samples over a bounded channel and applies them to the
/// aggregator from a single consumer thread.
///
/// Closing (or dropping) the collector drains the samples that are already
/// in the channel before the consumer exits; samples sent afterwards are
/// silently dropped.
#[derive(Debug)]
pub struct MetricsCollector {
    tx: Sender<ChannelMsg>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ChannelMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Sample(msg) => write!(f, "Sample({msg:?})"),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

impl MetricsCollector {
    /// Spawns the consumer thread.
    ///
    /// # Panics
    ///
    /// Panics if the thread cannot be spawned.
    pub fn new(metrics: Arc<Metrics>) -> Self {
        let (tx, rx) = bounded::<ChannelMsg>(METRICS_CHANNEL_DEPTH);
        let handle = std::thread::Builder::new()
            .name("hdbwire-metrics".to_string())
            .spawn(move || {
                for msg in rx {
                    match msg {
                        ChannelMsg::Sample(sample) => metrics.handle(&sample),
                        ChannelMsg::Shutdown => break,
                    }
                }
            })
            .expect("cannot spawn the metrics collector thread");
        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Returns a cloneable handle with which producers submit samples.
    pub fn sender(&self) -> MetricsSender {
        MetricsSender(self.tx.clone())
    }

    /// Drains in-flight samples and stops the consumer thread.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            // everything enqueued before the shutdown marker is still applied
            let _ = self.tx.send(ChannelMsg::Shutdown);
            if let Err(e) = handle.join() {
                warn!("metrics collector thread panicked: {e:?}");
            }
        }
    }
}

impl Drop for MetricsCollector {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Producer-side handle of a [`MetricsCollector`].
#[derive(Clone, Debug)]
pub struct MetricsSender(Sender<ChannelMsg>);

impl MetricsSender {
    pub fn add_counter(&self, kind: CounterKind, v: u64) {
        self.send(MetricMsg::Counter { kind, v });
    }

    pub fn add_gauge(&self, kind: GaugeKind, delta: i64) {
        self.send(MetricMsg::Gauge { kind, delta });
    }

    pub fn add_time(&self, kind: PhaseTimeKind, d: Duration) {
        self.send(MetricMsg::Time { kind, d });
    }

    pub fn add_sql_time(&self, kind: SqlTimeKind, d: Duration) {
        self.send(MetricMsg::SqlTime { kind, d });
    }

    fn send(&self, msg: MetricMsg) {
        // may block briefly when the channel is full; errors mean the
        // collector is already closed and the sample is dropped
        if self.0.send(ChannelMsg::Sample(msg)).is_err() {
            trace!("metrics collector is closed, sample dropped");
        }
    }
}

#[cfg(test)]
mod test {
    use super::MetricsCollector;
    use crate::metrics::{CounterKind, Metrics, SqlTimeKind, TimeUnit};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_collector_applies_and_drains() {
        let metrics = Arc::new(Metrics::new(None, TimeUnit::Microseconds, &[10.0, 100.0]));
        let collector = MetricsCollector::new(Arc::clone(&metrics));
        let sender = collector.sender();

        for _ in 0..100 {
            sender.add_counter(CounterKind::BytesWritten, 10);
        }
        sender.add_sql_time(SqlTimeKind::Exec, Duration::from_micros(50));

        // close() drains everything that was sent before
        collector.close();

        let stats = metrics.stats();
        assert_eq!(stats.bytes_written, 1000);
        assert_eq!(stats.sql_times[SqlTimeKind::Exec as usize].1.count, 1);

        // sending after close is a no-op
        sender.add_counter(CounterKind::BytesWritten, 10);
        assert_eq!(metrics.stats().bytes_written, 1000);
    }
}
