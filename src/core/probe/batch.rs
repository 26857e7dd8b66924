/*!
Batch prober: concurrent reachability checks over a set of endpoints.

`BatchProber` owns the status map - the only shared mutable state of the
prober. Each check task writes only the entry keyed by its own normalized
locator, first `Checking` and then its terminal status. Every write is a
whole-value replacement and is broadcast as a `StatusUpdate`, so a display
layer can either subscribe or poll `snapshot()`.

## Concurrency

- One tokio task per endpoint; tasks never read each other's entries
- At most one check per locator at a time: a second request for a locator
  that is already being checked waits for that check's result
- Batches run one at a time; a re-check started before the current batch
  only writes its entry if the batch's key set contains it
- No batch-wide deadline: each attempt carries its own timeout
- Cancellation aborts in-flight tasks and leaves unfinished entries at their
  last status (`Unknown` or `Checking`)
- A check task that panics ends as `Offline(Generic)`
*/

use crate::core::probe::checker::check;
use crate::core::probe::client::ProbeClient;
use crate::core::probe::config::ProbeOptions;
use crate::core::probe::debug_logger::{get_debug_logger, EnhancedDebugLogger};
use crate::core::probe::types::{
    Endpoint, OfflineReason, ProbeError, ReachabilityStatus, StatusMap, StatusUpdate,
};
use crate::core::probe::url::normalize_locator;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tokio::sync::{broadcast, watch, Mutex as AsyncMutex};
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

/// Capacity of the change notification channel per subscriber
const UPDATE_CHANNEL_CAPACITY: usize = 256;

type ResultReceiver = watch::Receiver<Option<ReachabilityStatus>>;

/// Status map plus the checks currently running
#[derive(Default)]
struct ProbeState {
    statuses: StatusMap,
    in_flight: HashMap<String, InFlight>,
    /// Bumped whenever a batch replaces the key set
    generation: u64,
    next_claim: u64,
}

struct InFlight {
    claim: u64,
    result: ResultReceiver,
}

enum Claim {
    Owner(ClaimGuard),
    Joined(ResultReceiver),
}

/// Exclusive ownership of one entry while its check runs
///
/// Dropping the guard (task aborted or panicked) releases the entry and
/// wakes anyone waiting on the result.
struct ClaimGuard {
    state: Arc<RwLock<ProbeState>>,
    key: String,
    claim: u64,
    generation: u64,
    result: watch::Sender<Option<ReachabilityStatus>>,
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        release(&mut state, &self.key, self.claim);
    }
}

fn release(state: &mut ProbeState, key: &str, claim: u64) {
    if state.in_flight.get(key).is_some_and(|running| running.claim == claim) {
        state.in_flight.remove(key);
    }
}

/// Concurrent prober owning the status map
#[derive(Clone)]
pub struct BatchProber {
    client: Arc<dyn ProbeClient>,
    options: ProbeOptions,
    state: Arc<RwLock<ProbeState>>,
    updates: broadcast::Sender<StatusUpdate>,
    batch_lock: Arc<AsyncMutex<()>>,
}

impl BatchProber {
    pub fn new(client: Arc<dyn ProbeClient>, options: ProbeOptions) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            client,
            options,
            state: Arc::new(RwLock::new(ProbeState::default())),
            updates,
            batch_lock: Arc::new(AsyncMutex::new(())),
        }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Receive every status write made after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StatusUpdate> {
        self.updates.subscribe()
    }

    /// Copy of the current status map
    pub fn snapshot(&self) -> StatusMap {
        self.read_state().statuses.clone()
    }

    /// Current status of one locator (bare host or URL)
    pub fn status(&self, locator: &str) -> Option<ReachabilityStatus> {
        self.read_state()
            .statuses
            .get(&normalize_locator(locator))
            .copied()
    }

    /// Probe every endpoint concurrently and wait for all of them
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::DuplicateLocator` if two endpoints normalize to the
    /// same URL. Nothing is written in that case.
    pub async fn probe_all(&self, endpoints: &[Endpoint]) -> Result<StatusMap, ProbeError> {
        self.probe_all_with_cancel(endpoints, CancellationToken::new())
            .await
    }

    /// Probe every endpoint concurrently until done or cancelled
    ///
    /// The returned map holds exactly one entry per endpoint. After a
    /// cancellation, entries whose check had not finished keep `Unknown` or
    /// `Checking`. A batch started while another is running waits for it.
    pub async fn probe_all_with_cancel(
        &self,
        endpoints: &[Endpoint],
        cancel: CancellationToken,
    ) -> Result<StatusMap, ProbeError> {
        let keys = unique_keys(endpoints)?;
        let _batch = self.batch_lock.lock().await;

        let debug_logger = get_debug_logger();
        let start = Instant::now();
        debug_logger.batch_start(keys.len());

        // Key set is fixed before any task starts
        {
            let mut state = self.write_state();
            state.generation += 1;
            state.statuses.clear();
            for key in &keys {
                let initial = if state.in_flight.contains_key(key) {
                    ReachabilityStatus::Checking
                } else {
                    ReachabilityStatus::Unknown
                };
                state.statuses.insert(key.clone(), initial);
                self.notify(key, initial);
            }
        }

        let mut tasks = JoinSet::new();
        let mut task_keys: HashMap<Id, String> = HashMap::with_capacity(keys.len());
        for key in &keys {
            let prober = self.clone();
            let task_key = key.clone();
            let handle = tasks.spawn(async move { prober.run_check(&task_key).await });
            task_keys.insert(handle.id(), key.clone());
        }

        let mut completed = 0usize;
        let mut failed = 0usize;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    let pending = tasks.len();
                    tasks.abort_all();
                    // Drain so no write lands after we return
                    while let Some(joined) = tasks.join_next_with_id().await {
                        match joined {
                            Ok(_) => completed += 1,
                            Err(e) if e.is_panic() => {
                                failed += 1;
                                self.record_task_failure(&task_keys, &e, &debug_logger);
                            }
                            Err(_) => {}
                        }
                    }
                    debug_logger.batch_cancelled(completed, pending);
                    break;
                }
                joined = tasks.join_next_with_id() => match joined {
                    Some(Ok(_)) => completed += 1,
                    Some(Err(e)) => {
                        failed += 1;
                        self.record_task_failure(&task_keys, &e, &debug_logger);
                    }
                    None => {
                        let statuses = self.batch_statuses(&keys);
                        let online = statuses.values().filter(|s| **s == ReachabilityStatus::Online).count();
                        debug_logger.batch_complete(online, statuses.len() - online, failed, start.elapsed().as_millis() as u64);
                        return Ok(statuses);
                    }
                }
            }
        }

        Ok(self.batch_statuses(&keys))
    }

    /// Re-check one endpoint without touching other entries
    ///
    /// Returns the endpoint's normalized locator and its terminal status. If
    /// the locator is already being checked, no request is issued: the
    /// running check's result is returned instead.
    pub async fn probe_one(&self, endpoint: &Endpoint) -> (String, ReachabilityStatus) {
        let key = endpoint.key();
        let status = self.run_check(&key).await;
        (key, status)
    }

    async fn run_check(&self, key: &str) -> ReachabilityStatus {
        match self.claim(key) {
            Claim::Owner(guard) => {
                let status = check(key, &self.options, self.client.as_ref()).await;
                self.finish(guard, status);
                status
            }
            Claim::Joined(result) => self.join_in_flight(key, result).await,
        }
    }

    /// Take ownership of `key` and mark it `Checking`, or join the running check
    fn claim(&self, key: &str) -> Claim {
        let mut state = self.write_state();
        if let Some(running) = state.in_flight.get(key) {
            return Claim::Joined(running.result.clone());
        }

        state.next_claim += 1;
        let claim = state.next_claim;
        let (result, receiver) = watch::channel(None);
        state.in_flight.insert(
            key.to_string(),
            InFlight {
                claim,
                result: receiver,
            },
        );
        state.statuses.insert(key.to_string(), ReachabilityStatus::Checking);
        self.notify(key, ReachabilityStatus::Checking);

        Claim::Owner(ClaimGuard {
            state: Arc::clone(&self.state),
            key: key.to_string(),
            claim,
            generation: state.generation,
            result,
        })
    }

    fn finish(&self, guard: ClaimGuard, status: ReachabilityStatus) {
        {
            let mut state = self.write_state();
            // A newer batch owns the key set; stay out of it unless it includes us
            if state.generation == guard.generation || state.statuses.contains_key(&guard.key) {
                state.statuses.insert(guard.key.clone(), status);
                self.notify(&guard.key, status);
            }
            release(&mut state, &guard.key, guard.claim);
        }
        // No waiters is fine
        let _ = guard.result.send(Some(status));
    }

    async fn join_in_flight(&self, key: &str, mut result: ResultReceiver) -> ReachabilityStatus {
        loop {
            let current = *result.borrow_and_update();
            if let Some(status) = current {
                return status;
            }
            if result.changed().await.is_err() {
                // Owner went away without a result
                return self
                    .read_state()
                    .statuses
                    .get(key)
                    .copied()
                    .unwrap_or_default();
            }
        }
    }

    fn record_task_failure(
        &self,
        task_keys: &HashMap<Id, String>,
        error: &JoinError,
        debug_logger: &EnhancedDebugLogger,
    ) {
        let Some(key) = task_keys.get(&error.id()) else {
            return;
        };
        debug_logger.error_sync(
            "BatchProber",
            "task_failed",
            &format!("Check task for {} failed: {}", key, error),
        );

        let status = ReachabilityStatus::Offline(OfflineReason::Generic);
        let mut state = self.write_state();
        if state.statuses.contains_key(key) {
            state.statuses.insert(key.clone(), status);
            self.notify(key, status);
        }
    }

    fn notify(&self, key: &str, status: ReachabilityStatus) {
        // No subscribers is fine
        let _ = self.updates.send(StatusUpdate {
            locator: key.to_string(),
            status,
        });
    }

    fn batch_statuses(&self, keys: &[String]) -> StatusMap {
        let state = self.read_state();
        keys.iter()
            .map(|key| {
                let status = state.statuses.get(key).copied().unwrap_or_default();
                (key.clone(), status)
            })
            .collect()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ProbeState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ProbeState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Normalized keys in endpoint order, rejecting collisions
fn unique_keys(endpoints: &[Endpoint]) -> Result<Vec<String>, ProbeError> {
    let mut seen = HashSet::with_capacity(endpoints.len());
    let mut keys = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let key = endpoint.key();
        if !seen.insert(key.clone()) {
            return Err(ProbeError::DuplicateLocator(key));
        }
        keys.push(key);
    }
    Ok(keys)
}
