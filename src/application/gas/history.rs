//! # Gas History Buffer
//!
//! Fixed-capacity time series of gas-price samples.
//!
//! Insertion always appends; at capacity the oldest sample is evicted
//! (FIFO). Samples are kept in arrival order with no reordering and no
//! deduplication; duplicate labels are valid and retained. Synthetic
//! seed samples are superseded only by eviction, never replaced in
//! place.

use crate::domain::value_objects::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity of the gas history series: 24 points.
pub const GAS_HISTORY_CAPACITY: usize = 24;

/// Synthetic seed price band in gwei.
const SEED_PRICE_MIN_GWEI: f64 = 5.0;
const SEED_PRICE_MAX_GWEI: f64 = 8.0;

/// One labelled gas-price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasSample {
    /// Display label of the observation time (`HH:MM`).
    pub label: String,
    /// Observed gas price in gwei.
    pub price_gwei: f64,
}

impl GasSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(label: impl Into<String>, price_gwei: f64) -> Self {
        Self {
            label: label.into(),
            price_gwei,
        }
    }

    /// Creates a sample labelled with the given observation time.
    #[must_use]
    pub fn at(observed_at: Timestamp, price_gwei: f64) -> Self {
        Self::new(observed_at.hour_minute_label(), price_gwei)
    }
}

/// Fixed-capacity FIFO series of gas samples.
#[derive(Debug, Clone)]
pub struct GasHistoryBuffer {
    samples: VecDeque<GasSample>,
    capacity: usize,
}

impl GasHistoryBuffer {
    /// Creates an empty buffer with the standard capacity of 24.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(GAS_HISTORY_CAPACITY)
    }

    /// Creates an empty buffer with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Replaces the contents with up to `capacity` seed samples.
    ///
    /// Called once at startup so the series has a shape before live data
    /// arrives. When more samples are supplied than fit, the trailing
    /// window is kept, consistent with FIFO eviction.
    pub fn seed<I: IntoIterator<Item = GasSample>>(&mut self, samples: I) {
        self.samples.clear();
        for sample in samples {
            self.push(sample);
        }
    }

    /// Appends a sample, evicting the oldest at capacity.
    ///
    /// The only mutator after seeding.
    pub fn append(&mut self, sample: GasSample) {
        self.push(sample);
    }

    fn push(&mut self, sample: GasSample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Returns the number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&GasSample> {
        self.samples.back()
    }

    /// Iterates the samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GasSample> {
        self.samples.iter()
    }

    /// Returns the samples oldest first as an owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<GasSample> {
        self.samples.iter().cloned().collect()
    }
}

impl Default for GasHistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates 24 synthetic seed samples spanning the trailing hourly
/// labels up to `now`, with prices drawn uniformly from the 5–8 gwei
/// band.
///
/// The values are placeholders: any bounded generator producing 24
/// points with monotonically increasing time labels would do.
#[must_use]
pub fn synthetic_seed(now: Timestamp) -> Vec<GasSample> {
    let mut rng = rand::rng();
    (0..GAS_HISTORY_CAPACITY)
        .map(|i| {
            let hours_back = (GAS_HISTORY_CAPACITY - 1 - i) as i64;
            GasSample::at(
                now.sub_hours(hours_back),
                rng.random_range(SEED_PRICE_MIN_GWEI..SEED_PRICE_MAX_GWEI),
            )
        })
        .collect()
}
