//! # Gas Collector
//!
//! Feeds the [`GasHistoryBuffer`] from its two producers: a periodic
//! network-statistics poll and the gateway's gas-price push stream.
//!
//! The collector is the buffer's only mutator after activation. The push
//! connection is established on activation and released on deactivation
//! by dropping its handle; an abrupt stream failure is logged and ends
//! consumption without restarting (reconnection policy is layered
//! outside this engine, if at all).

use crate::domain::value_objects::Timestamp;
use crate::infrastructure::gateway::{GatewayApi, StreamChannel, StreamEvent, StreamSource};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::history::{synthetic_seed, GasHistoryBuffer, GasSample};

/// Default interval of the statistics poll.
pub const DEFAULT_STATS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a [`GasCollector`].
#[derive(Debug, Clone)]
pub struct GasCollectorConfig {
    /// Interval between statistics polls.
    pub stats_poll_interval: Duration,
    /// Whether to seed the buffer with synthetic samples on activation.
    pub seed_on_activate: bool,
}

impl Default for GasCollectorConfig {
    fn default() -> Self {
        Self {
            stats_poll_interval: DEFAULT_STATS_POLL_INTERVAL,
            seed_on_activate: true,
        }
    }
}

impl GasCollectorConfig {
    /// Sets the statistics poll interval.
    #[must_use]
    pub const fn with_stats_poll_interval(mut self, interval: Duration) -> Self {
        self.stats_poll_interval = interval;
        self
    }

    /// Disables synthetic seeding on activation.
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.seed_on_activate = false;
        self
    }
}

/// Continuously updates the gas history from poll and stream producers.
#[derive(Debug)]
pub struct GasCollector {
    gateway: Arc<dyn GatewayApi>,
    streams: Arc<dyn StreamSource>,
    config: GasCollectorConfig,
    buffer: Arc<RwLock<GasHistoryBuffer>>,
    alive: Arc<AtomicBool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl GasCollector {
    /// Creates a collector over the given gateway and stream source.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn GatewayApi>,
        streams: Arc<dyn StreamSource>,
        config: GasCollectorConfig,
    ) -> Self {
        Self {
            gateway,
            streams,
            config,
            buffer: Arc::new(RwLock::new(GasHistoryBuffer::new())),
            alive: Arc::new(AtomicBool::new(true)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Seeds the buffer and starts both producers.
    ///
    /// Idempotent while already active.
    pub async fn activate(&self) {
        {
            let mut tasks = lock_tasks(&self.tasks);
            tasks.retain(|task| !task.is_finished());
            if !tasks.is_empty() {
                return;
            }
        }
        self.alive.store(true, Ordering::SeqCst);

        if self.config.seed_on_activate {
            let mut buffer = self.buffer.write().await;
            if buffer.is_empty() {
                buffer.seed(synthetic_seed(Timestamp::now()));
            }
        }

        let poll_task = tokio::spawn(Self::poll_loop(
            Arc::clone(&self.gateway),
            Arc::clone(&self.buffer),
            Arc::clone(&self.alive),
            self.config.stats_poll_interval,
        ));
        let stream_task = tokio::spawn(Self::stream_loop(
            Arc::clone(&self.streams),
            Arc::clone(&self.buffer),
            Arc::clone(&self.alive),
        ));

        let mut tasks = lock_tasks(&self.tasks);
        tasks.push(poll_task);
        tasks.push(stream_task);
    }

    /// Stops both producers and releases the stream handle.
    ///
    /// The collected history stays readable.
    pub fn deactivate(&self) {
        self.alive.store(false, Ordering::SeqCst);
        for task in lock_tasks(&self.tasks).drain(..) {
            task.abort();
        }
    }

    /// Returns a snapshot of the history, oldest first.
    pub async fn history(&self) -> Vec<GasSample> {
        self.buffer.read().await.to_vec()
    }

    /// Returns the most recent sample, if any.
    pub async fn latest(&self) -> Option<GasSample> {
        self.buffer.read().await.latest().cloned()
    }

    /// Polls network statistics and appends the reported gas price.
    async fn poll_loop(
        gateway: Arc<dyn GatewayApi>,
        buffer: Arc<RwLock<GasHistoryBuffer>>,
        alive: Arc<AtomicBool>,
        interval: Duration,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !alive.load(Ordering::SeqCst) {
                break;
            }
            match gateway.network_stats().await {
                Ok(stats) => {
                    if !alive.load(Ordering::SeqCst) {
                        break;
                    }
                    let sample = GasSample::at(Timestamp::now(), stats.gas_price_gwei);
                    buffer.write().await.append(sample);
                }
                Err(error) => {
                    warn!(error = %error, "network statistics poll failed");
                }
            }
        }
    }

    /// Consumes the gas-price push stream until it ends or fails.
    async fn stream_loop(
        streams: Arc<dyn StreamSource>,
        buffer: Arc<RwLock<GasHistoryBuffer>>,
        alive: Arc<AtomicBool>,
    ) {
        let mut events = match streams.subscribe(StreamChannel::GasPrices).await {
            Ok(events) => events,
            Err(error) => {
                warn!(error = %error, "gas stream subscription failed");
                return;
            }
        };

        while let Some(event) = events.next().await {
            if !alive.load(Ordering::SeqCst) {
                break;
            }
            match event {
                Ok(StreamEvent::GasUpdate(gas)) => {
                    let sample = GasSample::at(Timestamp::now(), gas.gas_price_gwei);
                    buffer.write().await.append(sample);
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(error = %error, "gas stream failed; not restarting");
                    break;
                }
            }
        }
        debug!("gas stream ended");
    }
}

impl Drop for GasCollector {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Locks the task list, recovering from a poisoned lock.
fn lock_tasks(tasks: &Mutex<Vec<JoinHandle<()>>>) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
    match tasks.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{BlockDetail, BlockSummary, Transaction, TransactionReceipt};
    use crate::domain::value_objects::{Address, BlockHeight, TxHash};
    use crate::infrastructure::gateway::{
        ChannelStreamSource, GasPriceEvent, GatewayError, GatewayResult, NetworkStats,
    };
    use crate::infrastructure::gateway::GatewayApi;
    use async_trait::async_trait;
    use tokio::time::advance;

    /// Gateway double serving only the statistics endpoint.
    #[derive(Debug)]
    struct StatsGateway {
        gas_price_gwei: f64,
    }

    #[async_trait]
    impl GatewayApi for StatsGateway {
        async fn latest_blocks(&self, _count: usize) -> GatewayResult<Vec<BlockSummary>> {
            Err(GatewayError::internal("not served"))
        }
        async fn block_by_number(&self, _height: BlockHeight) -> GatewayResult<BlockDetail> {
            Err(GatewayError::internal("not served"))
        }
        async fn latest_transactions(&self, _count: usize) -> GatewayResult<Vec<Transaction>> {
            Err(GatewayError::internal("not served"))
        }
        async fn transaction(&self, _hash: &TxHash) -> GatewayResult<Transaction> {
            Err(GatewayError::internal("not served"))
        }
        async fn transaction_receipt(
            &self,
            _hash: &TxHash,
        ) -> GatewayResult<Option<TransactionReceipt>> {
            Err(GatewayError::internal("not served"))
        }
        async fn account_balance(&self, _address: &Address) -> GatewayResult<u128> {
            Err(GatewayError::internal("not served"))
        }
        async fn token_balance(
            &self,
            _token: &Address,
            _wallet: &Address,
        ) -> GatewayResult<u128> {
            Err(GatewayError::internal("not served"))
        }
        async fn network_stats(&self) -> GatewayResult<NetworkStats> {
            Ok(NetworkStats {
                latest_block_number: 100,
                latest_block_timestamp: 1_700_000_000,
                latest_block_tx_count: 1,
                gas_price_gwei: self.gas_price_gwei,
                avg_block_time: 3.0,
            })
        }
    }

    fn gas_event(gwei: f64) -> StreamEvent {
        StreamEvent::GasUpdate(GasPriceEvent {
            gas_price_wei: (gwei * 1e9) as u128,
            gas_price_gwei: gwei,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn activation_seeds_and_polls() {
        let source = Arc::new(ChannelStreamSource::new());
        let _handle = source.push_handle(StreamChannel::GasPrices).unwrap();
        let collector = GasCollector::new(
            Arc::new(StatsGateway { gas_price_gwei: 6.5 }),
            source,
            GasCollectorConfig::default(),
        );

        collector.activate().await;
        tokio::task::yield_now().await;

        // Seeded to capacity, with the first poll already applied on the
        // immediate tick.
        let history = collector.history().await;
        assert_eq!(history.len(), 24);
        assert_eq!(collector.latest().await.unwrap().price_gwei, 6.5);

        advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert_eq!(collector.latest().await.unwrap().price_gwei, 6.5);

        collector.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn stream_events_append_in_arrival_order() {
        let source = Arc::new(ChannelStreamSource::new());
        let handle = source.push_handle(StreamChannel::GasPrices).unwrap();
        let collector = GasCollector::new(
            Arc::new(StatsGateway { gas_price_gwei: 5.0 }),
            source,
            GasCollectorConfig::default()
                .without_seed()
                .with_stats_poll_interval(Duration::from_secs(3600)),
        );

        collector.activate().await;
        tokio::task::yield_now().await;
        let baseline = collector.history().await.len();

        for gwei in [6.0, 6.5, 6.25] {
            handle.send(Ok(gas_event(gwei))).unwrap();
        }
        tokio::task::yield_now().await;

        let history = collector.history().await;
        let streamed: Vec<f64> = history
            .iter()
            .skip(baseline)
            .map(|s| s.price_gwei)
            .collect();
        assert_eq!(streamed, vec![6.0, 6.5, 6.25]);

        collector.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn stream_failure_stops_consumption_without_restart() {
        let source = Arc::new(ChannelStreamSource::new());
        let handle = source.push_handle(StreamChannel::GasPrices).unwrap();
        let collector = GasCollector::new(
            Arc::new(StatsGateway { gas_price_gwei: 5.0 }),
            source,
            GasCollectorConfig::default()
                .without_seed()
                .with_stats_poll_interval(Duration::from_secs(3600)),
        );

        collector.activate().await;
        tokio::task::yield_now().await;
        let baseline = collector.history().await.len();

        handle.send(Ok(gas_event(6.0))).unwrap();
        handle
            .send(Err(GatewayError::connection("socket reset")))
            .unwrap();
        handle.send(Ok(gas_event(9.0))).unwrap();
        tokio::task::yield_now().await;

        // The event after the failure is never consumed.
        let history = collector.history().await;
        assert_eq!(history.len(), baseline + 1);
        assert_eq!(collector.latest().await.unwrap().price_gwei, 6.0);

        collector.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn deactivate_stops_the_poll() {
        let source = Arc::new(ChannelStreamSource::new());
        let _handle = source.push_handle(StreamChannel::GasPrices).unwrap();
        let collector = GasCollector::new(
            Arc::new(StatsGateway { gas_price_gwei: 5.0 }),
            source,
            GasCollectorConfig::default().without_seed(),
        );

        collector.activate().await;
        tokio::task::yield_now().await;
        let after_first_poll = collector.history().await.len();

        collector.deactivate();
        advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;

        assert_eq!(collector.history().await.len(), after_first_poll);
    }
}
