//! Driver metrics: counters, gauges, and duration histograms, fed through a
//! bounded channel so that aggregation stays off the I/O path.
//!
//! Each connection owns a [`MetricsCollector`] whose [`Metrics`] aggregator
//! can be chained to a process-wide parent; every sample a child receives
//! also advances the parent.

mod collector;
mod histogram;

pub use self::collector::{MetricsCollector, MetricsSender};
pub use self::histogram::StatsHistogram;

use self::histogram::Histogram;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Unit in which an aggregator keeps its durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    fn divider(self) -> f64 {
        match self {
            Self::Nanoseconds => 1.0,
            Self::Microseconds => 1_000.0,
            Self::Milliseconds => 1_000_000.0,
            Self::Seconds => 1_000_000_000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }
}

/// Monotonic byte counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    BytesRead = 0,
    BytesWritten = 1,
}
const NUM_COUNTERS: usize = 2;

/// Gauges of currently open entities; moved by ±1 deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaugeKind {
    Connections = 0,
    Transactions = 1,
    Statements = 2,
}
const NUM_GAUGES: usize = 3;

/// Histograms of the I/O and authentication phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseTimeKind {
    Read = 0,
    Write = 1,
    Auth = 2,
}
const NUM_PHASE_TIMES: usize = 3;

/// Histograms of the SQL phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlTimeKind {
    Query = 0,
    Prepare = 1,
    Exec = 2,
    Call = 3,
    Fetch = 4,
    FetchLob = 5,
    Rollback = 6,
    Commit = 7,
}
const NUM_SQL_TIMES: usize = 8;

const SQL_TIME_TEXTS: [&str; NUM_SQL_TIMES] = [
    "query", "prepare", "exec", "call", "fetch", "fetchLob", "rollback", "commit",
];

impl SqlTimeKind {
    pub fn as_str(self) -> &'static str {
        SQL_TIME_TEXTS[self as usize]
    }
}

/// One metric sample.
#[derive(Clone, Copy, Debug)]
pub enum MetricMsg {
    Counter { kind: CounterKind, v: u64 },
    Gauge { kind: GaugeKind, delta: i64 },
    Time { kind: PhaseTimeKind, d: Duration },
    SqlTime { kind: SqlTimeKind, d: Duration },
}

#[derive(Debug)]
struct MetricsInner {
    counters: [u64; NUM_COUNTERS],
    gauges: [i64; NUM_GAUGES],
    times: Vec<Histogram>,
    sql_times: Vec<Histogram>,
}

/// Aggregated metric state, with an optional parent that receives every
/// sample as well (for process-wide rollup over all connections).
#[derive(Debug)]
pub struct Metrics {
    parent: Option<Arc<Metrics>>,
    time_unit: TimeUnit,
    divider: f64,
    inner: RwLock<MetricsInner>,
}

impl Metrics {
    /// `time_upper_bounds` are the ascending histogram bounds, in units of
    /// `time_unit`.
    pub fn new(parent: Option<Arc<Metrics>>, time_unit: TimeUnit, time_upper_bounds: &[f64]) -> Self {
        Self {
            parent,
            time_unit,
            divider: time_unit.divider(),
            inner: RwLock::new(MetricsInner {
                counters: [0; NUM_COUNTERS],
                gauges: [0; NUM_GAUGES],
                times: (0..NUM_PHASE_TIMES)
                    .map(|_| Histogram::new(time_upper_bounds))
                    .collect(),
                sql_times: (0..NUM_SQL_TIMES)
                    .map(|_| Histogram::new(time_upper_bounds))
                    .collect(),
            }),
        }
    }

    /// Applies one sample to this aggregator and to its parent chain.
    #[allow(clippy::cast_precision_loss)]
    pub fn handle(&self, msg: &MetricMsg) {
        {
            let mut inner = self.inner.write().expect("metrics lock is poisoned");
            match *msg {
                MetricMsg::Counter { kind, v } => inner.counters[kind as usize] += v,
                MetricMsg::Gauge { kind, delta } => inner.gauges[kind as usize] += delta,
                MetricMsg::Time { kind, d } => {
                    let v = d.as_nanos() as f64 / self.divider;
                    inner.times[kind as usize].add(v);
                }
                MetricMsg::SqlTime { kind, d } => {
                    let v = d.as_nanos() as f64 / self.divider;
                    inner.sql_times[kind as usize].add(v);
                }
            }
        }

        if let Some(ref parent) = self.parent {
            parent.handle(msg);
        }
    }

    /// Takes a consistent snapshot of all scalars and histograms.
    pub fn stats(&self) -> Stats {
        let inner = self.inner.read().expect("metrics lock is poisoned");
        Stats {
            open_connections: inner.gauges[GaugeKind::Connections as usize],
            open_transactions: inner.gauges[GaugeKind::Transactions as usize],
            open_statements: inner.gauges[GaugeKind::Statements as usize],
            bytes_read: inner.counters[CounterKind::BytesRead as usize],
            bytes_written: inner.counters[CounterKind::BytesWritten as usize],
            time_unit: self.time_unit,
            read_time: inner.times[PhaseTimeKind::Read as usize].stats(),
            write_time: inner.times[PhaseTimeKind::Write as usize].stats(),
            auth_time: inner.times[PhaseTimeKind::Auth as usize].stats(),
            sql_times: inner
                .sql_times
                .iter()
                .enumerate()
                .map(|(i, h)| (SQL_TIME_TEXTS[i], h.stats()))
                .collect(),
        }
    }
}

/// Snapshot of a [`Metrics`] aggregator.
#[derive(Clone, Debug)]
pub struct Stats {
    pub open_connections: i64,
    pub open_transactions: i64,
    pub open_statements: i64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub time_unit: TimeUnit,
    pub read_time: StatsHistogram,
    pub write_time: StatsHistogram,
    pub auth_time: StatsHistogram,
    pub sql_times: Vec<(&'static str, StatsHistogram)>,
}
