//! Readiness gate: at-most-once, concurrent initialization of the external
//! capabilities (text generation + document store).
//!
//! ## State machine
//!
//! `NotAttempted -> Attempting -> Completed(result)`; there is no way out of
//! `Completed`. A capability that failed stays failed for the lifetime of the
//! gate, and callers are expected to degrade instead of retrying.
//!
//! ## Single flight
//!
//! The first [`ensure_ready`](ReadinessGate::ensure_ready) call creates one
//! shared attempt future. Every other caller clones and awaits that same
//! future, so setup runs once no matter how many requests race, and a caller
//! that is cancelled mid-wait does not abandon or restart the attempt.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{info, warn};

use shopadvisor_ai::TextGenerator;
use shopadvisor_core::CapabilityError;

use crate::store::DocumentStore;

/// Outcome of the single initialization attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadinessResult {
    pub text_service_ready: bool,
    pub store_service_ready: bool,
}

/// Observable gate state (health reporting).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateState {
    NotAttempted,
    Attempting,
    Completed(ReadinessResult),
}

type Attempt = Shared<BoxFuture<'static, ReadinessResult>>;

pub struct ReadinessGate {
    text: Arc<dyn TextGenerator>,
    store: Arc<dyn DocumentStore>,
    in_flight: Mutex<Option<Attempt>>,
    completed: Arc<OnceLock<ReadinessResult>>,
}

impl ReadinessGate {
    pub fn new(text: Arc<dyn TextGenerator>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            text,
            store,
            in_flight: Mutex::new(None),
            completed: Arc::new(OnceLock::new()),
        }
    }

    /// Run (or join, or read back) the one initialization attempt.
    pub async fn ensure_ready(&self) -> ReadinessResult {
        if let Some(result) = self.completed.get() {
            return *result;
        }

        let attempt = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            slot.get_or_insert_with(|| self.start_attempt()).clone()
        };
        attempt.await
    }

    /// Snapshot; `false` until the attempt has completed.
    pub fn is_text_service_ready(&self) -> bool {
        self.completed.get().is_some_and(|r| r.text_service_ready)
    }

    /// Snapshot; `false` until the attempt has completed.
    pub fn is_store_service_ready(&self) -> bool {
        self.completed.get().is_some_and(|r| r.store_service_ready)
    }

    pub fn state(&self) -> GateState {
        if let Some(result) = self.completed.get() {
            return GateState::Completed(*result);
        }
        let started = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        if started {
            GateState::Attempting
        } else {
            GateState::NotAttempted
        }
    }

    fn start_attempt(&self) -> Attempt {
        let text = Arc::clone(&self.text);
        let store = Arc::clone(&self.store);
        let completed = Arc::clone(&self.completed);

        async move {
            info!(text = text.name(), store = store.name(), "initializing external services");

            // Both run to completion; neither outcome cancels the other.
            let (text_service_ready, store_service_ready) =
                tokio::join!(init_text(text.as_ref()), init_store(store.as_ref()));

            let result = ReadinessResult {
                text_service_ready,
                store_service_ready,
            };
            // Only this future ever sets the cell.
            let _ = completed.set(result);
            info!(text_service_ready, store_service_ready, "external service initialization complete");
            result
        }
        .boxed()
        .shared()
    }
}

async fn init_text(text: &dyn TextGenerator) -> bool {
    let outcome = AssertUnwindSafe(text.initialize()).catch_unwind().await;
    report("text", text.name(), outcome)
}

async fn init_store(store: &dyn DocumentStore) -> bool {
    let outcome = AssertUnwindSafe(async {
        store.connect().await?;
        let count = store
            .count()
            .await
            .map_err(|e| CapabilityError::probe(e.to_string()))?;
        info!(store = store.name(), products = count, "document store probe succeeded");
        Ok::<(), CapabilityError>(())
    })
    .catch_unwind()
    .await;
    report("store", store.name(), outcome)
}

fn report(
    capability: &'static str,
    name: &'static str,
    outcome: Result<Result<(), CapabilityError>, Box<dyn std::any::Any + Send>>,
) -> bool {
    match outcome {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(capability, name, kind = e.kind(), error = %e, "capability unavailable");
            false
        }
        Err(_) => {
            warn!(capability, name, "capability initialization panicked");
            false
        }
    }
}
