use crate::error::{config_error, Error};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// One refresh cycle, started fresh on every tick
pub type RefreshJob = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Wrap an async closure as a [`RefreshJob`]
pub fn refresh_job<F, Fut>(job: F) -> RefreshJob
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || Box::pin(job()))
}

/// What a tick does when the previous cycle has not completed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Start another cycle anyway; the last one to complete wins
    #[default]
    Overlap,
    /// Skip the tick while a cycle is in flight
    Skip,
}

impl FromStr for RefreshPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overlap" => Ok(RefreshPolicy::Overlap),
            "skip" => Ok(RefreshPolicy::Skip),
            other => Err(config_error(&format!("Unknown refresh policy: {}", other))),
        }
    }
}

/// Clears the in-flight flag when a cycle ends, including by panic
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Periodic driver for a widget's pipeline
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    name: &'static str,
    period: Duration,
    policy: RefreshPolicy,
}

/// Handle to a running refresh loop
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    token: CancellationToken,
    started: Arc<AtomicU64>,
    skipped: Arc<AtomicU64>,
}

impl RefreshHandle {
    /// Stop ticking; cycles already in flight run to completion
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Whether the loop has been stopped
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Number of cycles started so far
    pub fn cycles_started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of ticks dropped by the in-flight guard
    pub fn cycles_skipped(&self) -> u64 {
        self.skipped.load(Ordering::SeqCst)
    }
}

impl RefreshScheduler {
    pub fn new(name: &'static str, period: Duration, policy: RefreshPolicy) -> Self {
        Self { name, period, policy }
    }

    /// Run the job now and then once per period until stopped
    pub fn start(self, job: RefreshJob) -> RefreshHandle {
        let handle = RefreshHandle {
            token: CancellationToken::new(),
            started: Arc::new(AtomicU64::new(0)),
            skipped: Arc::new(AtomicU64::new(0)),
        };

        let loop_handle = handle.clone();
        tokio::spawn(async move {
            self.run_loop(job, loop_handle).await;
        });

        handle
    }

    async fn run_loop(self, job: RefreshJob, handle: RefreshHandle) {
        info!(
            "Starting {} refresh loop (every {:?}, policy {:?})",
            self.name, self.period, self.policy
        );

        // The first tick completes immediately, which gives the startup run
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let in_flight = Arc::new(AtomicBool::new(false));

        loop {
            tokio::select! {
                biased;
                _ = handle.token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match self.policy {
                RefreshPolicy::Overlap => {
                    handle.started.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(job());
                }
                RefreshPolicy::Skip => {
                    if in_flight.swap(true, Ordering::SeqCst) {
                        handle.skipped.fetch_add(1, Ordering::SeqCst);
                        debug!("{} refresh still in flight, skipping tick", self.name);
                        continue;
                    }

                    handle.started.fetch_add(1, Ordering::SeqCst);
                    let cycle = job();
                    let guard = InFlightGuard(Arc::clone(&in_flight));
                    tokio::spawn(async move {
                        let _guard = guard;
                        cycle.await;
                    });
                }
            }
        }

        info!("{} refresh loop stopped", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn counting_job(counter: Arc<AtomicU64>, work: Duration) -> RefreshJob {
        refresh_job(move || {
            let counter = Arc::clone(&counter);
            async move {
                sleep(work).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("overlap".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::Overlap);
        assert_eq!("SKIP".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::Skip);
        assert!("coalesce".parse::<RefreshPolicy>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_at_startup_and_every_period() {
        let completed = Arc::new(AtomicU64::new(0));
        let scheduler = RefreshScheduler::new("test", Duration::from_secs(30), RefreshPolicy::Overlap);
        let handle = scheduler.start(counting_job(Arc::clone(&completed), Duration::from_millis(10)));

        // Ticks at 0s, 30s and 60s
        sleep(Duration::from_secs(65)).await;
        assert_eq!(handle.cycles_started(), 3);
        assert_eq!(completed.load(Ordering::SeqCst), 3);
        assert_eq!(handle.cycles_skipped(), 0);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlap_starts_cycles_while_previous_pending() {
        let completed = Arc::new(AtomicU64::new(0));
        let scheduler = RefreshScheduler::new("slow", Duration::from_secs(30), RefreshPolicy::Overlap);
        let handle = scheduler.start(counting_job(Arc::clone(&completed), Duration::from_secs(45)));

        sleep(Duration::from_secs(65)).await;
        assert_eq!(handle.cycles_started(), 3);
        // Only the first cycle (0s + 45s) has finished
        assert_eq!(completed.load(Ordering::SeqCst), 1);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_policy_guards_in_flight_cycle() {
        let completed = Arc::new(AtomicU64::new(0));
        let scheduler = RefreshScheduler::new("guarded", Duration::from_secs(30), RefreshPolicy::Skip);
        let handle = scheduler.start(counting_job(Arc::clone(&completed), Duration::from_secs(45)));

        // 0s starts, 30s is skipped, 60s starts again
        sleep(Duration::from_secs(65)).await;
        assert_eq!(handle.cycles_started(), 2);
        assert_eq!(handle.cycles_skipped(), 1);
        assert_eq!(completed.load(Ordering::SeqCst), 1);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_policy_recovers_after_panicking_cycle() {
        let scheduler = RefreshScheduler::new("panicky", Duration::from_secs(30), RefreshPolicy::Skip);
        let handle = scheduler.start(refresh_job(|| async {
            sleep(Duration::from_secs(1)).await;
            panic!("cycle failed");
        }));

        // Every tick still starts a cycle once the failed one is gone
        sleep(Duration::from_secs(65)).await;
        assert_eq!(handle.cycles_started(), 3);
        assert_eq!(handle.cycles_skipped(), 0);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let completed = Arc::new(AtomicU64::new(0));
        let scheduler = RefreshScheduler::new("stopped", Duration::from_secs(1), RefreshPolicy::Overlap);
        let handle = scheduler.start(counting_job(Arc::clone(&completed), Duration::ZERO));

        sleep(Duration::from_millis(2500)).await;
        handle.stop();
        assert!(handle.is_stopped());
        let started = handle.cycles_started();
        assert_eq!(started, 3);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(handle.cycles_started(), started);
    }
}
