// Copyright 2026 The NanoVC Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! High-precision relative timestamps.
//!
//! Reading a wall clock is comparatively expensive and coarse; reading a
//! monotonic nano counter is cheap. An [`Epoch`] ties one wall-clock reading
//! to the nano counter so that subsequent [`Timestamp`]s only need the cheap
//! counter. A clock reuses its epoch while the counter stays within a
//! configured window around the epoch's reading and rebuilds it otherwise,
//! which keeps every stored nano delta within 32 bits at the default window.

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;
use std::time::Instant;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

/// A reference point relating the monotonic nano counter to a global
/// wall-clock instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Epoch {
    /// Full form: the nano counter was read immediately before and after the
    /// global instant, bounding the uncertainty of the global measurement.
    WithVmNanos {
        /// Nano counter reading just before the global instant was taken.
        nanos_before: i64,
        /// The global wall-clock instant.
        global: DateTime<Utc>,
        /// Nano counter reading just after the global instant was taken.
        nanos_after: i64,
    },
    /// Downgraded form that keeps only the uncertainty width. Timestamps on
    /// such an epoch can no longer be related to timestamps on other epochs.
    WithUncertaintyWindow {
        /// The global wall-clock instant.
        global: DateTime<Utc>,
        /// Width of the measurement uncertainty in nanoseconds.
        uncertainty_nanos: i64,
    },
}

impl Epoch {
    /// The global wall-clock instant this epoch is anchored to.
    pub fn global_instant(&self) -> DateTime<Utc> {
        match self {
            Self::WithVmNanos { global, .. } | Self::WithUncertaintyWindow { global, .. } => {
                *global
            }
        }
    }

    /// The uncertainty of the global measurement in nanoseconds.
    pub fn uncertainty_nanos(&self) -> i64 {
        match self {
            Self::WithVmNanos {
                nanos_before,
                nanos_after,
                ..
            } => nanos_after - nanos_before,
            Self::WithUncertaintyWindow {
                uncertainty_nanos, ..
            } => *uncertainty_nanos,
        }
    }

    /// The nano counter reading the epoch is anchored at, if this epoch
    /// still carries one.
    pub fn nanos_before(&self) -> Option<i64> {
        match self {
            Self::WithVmNanos { nanos_before, .. } => Some(*nanos_before),
            Self::WithUncertaintyWindow { .. } => None,
        }
    }

    /// Downgrades to the uncertainty-window form.
    pub fn downgrade(&self) -> Self {
        Self::WithUncertaintyWindow {
            global: self.global_instant(),
            uncertainty_nanos: self.uncertainty_nanos(),
        }
    }
}

/// A point in time: an epoch plus a nano counter reading.
#[derive(Clone, Debug)]
pub struct Timestamp {
    epoch: Arc<Epoch>,
    nanos: i64,
}

impl Timestamp {
    /// Creates a timestamp from an epoch and a nano counter reading.
    pub fn new(epoch: Arc<Epoch>, nanos: i64) -> Self {
        Self { epoch, nanos }
    }

    /// The epoch this timestamp is relative to. Timestamps taken while a
    /// clock reused its epoch share the epoch instance.
    pub fn epoch(&self) -> &Arc<Epoch> {
        &self.epoch
    }

    /// The nano counter reading at the time of measurement.
    pub fn nanos(&self) -> i64 {
        self.nanos
    }

    /// The effective global instant: the epoch's instant advanced by the
    /// nanos elapsed since the epoch was anchored. A downgraded epoch has no
    /// anchor, so its timestamps resolve to the epoch's instant itself.
    pub fn instant(&self) -> DateTime<Utc> {
        match self.epoch.nanos_before() {
            Some(nanos_before) => {
                self.epoch.global_instant() + TimeDelta::nanoseconds(self.nanos - nanos_before)
            }
            None => self.epoch.global_instant(),
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant().cmp(&other.instant())
    }
}

/// Source of [`Timestamp`]s.
///
/// A clock mutates its epoch cache on every reading, so a clock instance is
/// not safe for concurrent use; use one clock per writer or wrap it in a
/// mutex.
pub trait Clock {
    /// Takes a timestamp.
    fn now(&mut self) -> Timestamp;
}

/// Default epoch-reuse window: deltas stay within `i32` range (about ±2s)
/// so they can be stored compactly.
pub const DEFAULT_MIN_RANGE: i64 = i32::MIN as i64;
/// See [`DEFAULT_MIN_RANGE`].
pub const DEFAULT_MAX_RANGE: i64 = i32::MAX as i64;

/// Clock backed by [`Instant`] for nanos and [`Utc::now`] for global
/// instants.
pub struct SystemClock {
    origin: Instant,
    min_range: i64,
    max_range: i64,
    last_epoch: Option<Arc<Epoch>>,
}

impl SystemClock {
    /// Creates a clock with the default epoch-reuse window.
    pub fn new() -> Self {
        Self::with_range(DEFAULT_MIN_RANGE, DEFAULT_MAX_RANGE)
    }

    /// Creates a clock that rebuilds its epoch whenever the nano delta
    /// leaves `min_range..=max_range`.
    pub fn with_range(min_range: i64, max_range: i64) -> Self {
        Self {
            origin: Instant::now(),
            min_range,
            max_range,
            last_epoch: None,
        }
    }

    fn read_nanos(&self) -> i64 {
        // Wraps after ~292 years of process uptime.
        self.origin.elapsed().as_nanos() as i64
    }

    fn build_epoch(&self) -> Arc<Epoch> {
        let nanos_before = self.read_nanos();
        let global = Utc::now();
        let nanos_after = self.read_nanos();
        Arc::new(Epoch::WithVmNanos {
            nanos_before,
            global,
            nanos_after,
        })
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SystemClock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClock")
            .field("min_range", &self.min_range)
            .field("max_range", &self.max_range)
            .finish()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Timestamp {
        let nanos_now = self.read_nanos();
        let epoch = match &self.last_epoch {
            Some(epoch) => match epoch.nanos_before() {
                Some(nanos_before)
                    if (self.min_range..=self.max_range).contains(&(nanos_now - nanos_before)) =>
                {
                    epoch.clone()
                }
                _ => {
                    let rebuilt = self.build_epoch();
                    self.last_epoch = Some(rebuilt.clone());
                    rebuilt
                }
            },
            None => {
                let built = self.build_epoch();
                self.last_epoch = Some(built.clone());
                built
            }
        };
        Timestamp::new(epoch, nanos_now)
    }
}

/// Clock whose nano source is a scripted sequence and whose epochs are
/// anchored to a fixed global instant, for deterministic tests.
#[derive(Debug)]
pub struct SimulatedClock {
    nanos: Vec<i64>,
    next: usize,
    global: DateTime<Utc>,
    min_range: i64,
    max_range: i64,
    last_epoch: Option<Arc<Epoch>>,
}

impl SimulatedClock {
    /// Creates a clock that returns the given nano readings in order, with
    /// the default epoch-reuse window.
    pub fn with_nanos(nanos: impl Into<Vec<i64>>) -> Self {
        Self::with_nanos_and_range(nanos, DEFAULT_MIN_RANGE, DEFAULT_MAX_RANGE)
    }

    /// Creates a clock with scripted nano readings and an explicit
    /// epoch-reuse window.
    pub fn with_nanos_and_range(nanos: impl Into<Vec<i64>>, min_range: i64, max_range: i64) -> Self {
        Self {
            nanos: nanos.into(),
            next: 0,
            global: DateTime::UNIX_EPOCH,
            min_range,
            max_range,
            last_epoch: None,
        }
    }

    /// Anchors simulated epochs at `global` instead of the Unix epoch.
    pub fn at_global_instant(mut self, global: DateTime<Utc>) -> Self {
        self.global = global;
        self
    }
}

impl Clock for SimulatedClock {
    fn now(&mut self) -> Timestamp {
        assert!(
            self.next < self.nanos.len(),
            "simulated clock ran out of scripted nano readings"
        );
        let nanos_now = self.nanos[self.next];
        self.next += 1;
        let reusable = self
            .last_epoch
            .as_ref()
            .and_then(|epoch| epoch.nanos_before())
            .is_some_and(|nanos_before| {
                (self.min_range..=self.max_range).contains(&(nanos_now - nanos_before))
            });
        let epoch = if reusable {
            self.last_epoch.as_ref().unwrap().clone()
        } else {
            let built = Arc::new(Epoch::WithVmNanos {
                nanos_before: nanos_now,
                global: self.global + TimeDelta::nanoseconds(nanos_now),
                nanos_after: nanos_now,
            });
            self.last_epoch = Some(built.clone());
            built
        };
        Timestamp::new(epoch, nanos_now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_reused_within_window() {
        let mut clock = SimulatedClock::with_nanos_and_range(
            [1000, 2000, 3000],
            -1_000_000_000,
            1_000_000_000,
        );
        let a = clock.now();
        let b = clock.now();
        let c = clock.now();
        assert!(Arc::ptr_eq(a.epoch(), b.epoch()));
        assert!(Arc::ptr_eq(b.epoch(), c.epoch()));
    }

    #[test]
    fn test_epoch_rebuilt_outside_window() {
        let mut clock = SimulatedClock::with_nanos_and_range(
            [0, 10_000_000, 20_000_000],
            -5_000_000,
            5_000_000,
        );
        let a = clock.now();
        let b = clock.now();
        let c = clock.now();
        assert!(!Arc::ptr_eq(a.epoch(), b.epoch()));
        assert!(!Arc::ptr_eq(b.epoch(), c.epoch()));
        assert!(!Arc::ptr_eq(a.epoch(), c.epoch()));
    }

    #[test]
    fn test_effective_instant_advances_with_nanos() {
        let mut clock = SimulatedClock::with_nanos([500, 800]);
        let a = clock.now();
        let b = clock.now();
        // Same epoch, so the instants differ by exactly the nano delta.
        assert!(Arc::ptr_eq(a.epoch(), b.epoch()));
        assert_eq!(b.instant() - a.instant(), TimeDelta::nanoseconds(300));
    }

    #[test]
    fn test_downgraded_epoch_keeps_uncertainty() {
        let epoch = Epoch::WithVmNanos {
            nanos_before: 100,
            global: DateTime::UNIX_EPOCH,
            nanos_after: 175,
        };
        assert_eq!(epoch.uncertainty_nanos(), 75);
        let downgraded = epoch.downgrade();
        assert_eq!(downgraded.uncertainty_nanos(), 75);
        assert_eq!(downgraded.nanos_before(), None);
        assert_eq!(downgraded.global_instant(), epoch.global_instant());
    }

    #[test]
    fn test_system_clock_reuses_epoch_for_rapid_calls() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        // Two immediate readings land well within the ±2s default window.
        assert!(Arc::ptr_eq(a.epoch(), b.epoch()));
        assert!(b.nanos() >= a.nanos());
    }

    #[test]
    fn test_system_clock_rebuilds_epoch_with_tiny_window() {
        // An empty window can never contain the (non-negative) delta, so
        // every reading rebuilds.
        let mut clock = SystemClock::with_range(-2, -1);
        let a = clock.now();
        let b = clock.now();
        assert!(!Arc::ptr_eq(a.epoch(), b.epoch()));
    }

    #[test]
    fn test_timestamp_ordering_follows_instants() {
        let mut clock = SimulatedClock::with_nanos([100, 200]);
        let a = clock.now();
        let b = clock.now();
        assert!(a < b);
        assert_eq!(a, a.clone());
    }
}
