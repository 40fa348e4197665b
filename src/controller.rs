//! Remote-backed pagination controller.
//!
//! The controller owns the current [`QueryParams`] and the state of the most
//! recent fetch. Every parameter change or refresh bumps a generation counter
//! and dispatches a fetch on the Tokio runtime. A completion is applied only
//! when its generation is still the latest one, so responses arriving out of
//! order never overwrite newer state. Superseded results are dropped at
//! application time; the underlying request is not aborted.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::query::{PageResult, QueryParams, QueryPatch};
use crate::repository::RemoteDataSource;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// State of the most recently dispatched fetch.
#[derive(Clone, Debug)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Loaded(Arc<PageResult<T>>),
    Failed(RepositoryError),
}

/// Snapshot published to subscribers after every transition.
#[derive(Clone, Debug)]
pub struct PaginationState<T> {
    /// Params of the latest dispatch.
    pub params: QueryParams,
    /// Generation of the latest dispatch, `0` before the first one.
    pub generation: u64,
    pub request: RequestState<T>,
    /// Last successfully loaded page. Kept while a newer fetch is in flight
    /// or after it failed.
    pub data: Option<Arc<PageResult<T>>>,
    /// Failure of the latest fetch, cleared on the next dispatch.
    pub error: Option<RepositoryError>,
}

impl<T> PaginationState<T> {
    fn idle(params: QueryParams) -> Self {
        Self {
            params,
            generation: 0,
            request: RequestState::Idle,
            data: None,
            error: None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.request, RequestState::Loading)
    }
}

/// Result of applying a completed fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Terminal state of one dispatched fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The fetch was still the latest one and its outcome reached the state.
    Applied(Outcome),
    /// A newer fetch was dispatched, or the controller was closed, before
    /// this one completed. Its outcome was discarded.
    Superseded,
}

/// Handle of a dispatched fetch.
///
/// Dropping it does not cancel the fetch.
#[must_use = "await `settled` to observe the outcome, or drop to detach"]
pub struct Dispatch {
    params: QueryParams,
    generation: u64,
    task: Option<JoinHandle<Settlement>>,
}

impl Dispatch {
    /// Params the fetch was issued with.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits until the fetch completes and reports how it was applied.
    pub async fn settled(self) -> Settlement {
        let Some(task) = self.task else {
            return Settlement::Superseded;
        };

        match task.await {
            Ok(settlement) => settlement,
            Err(err) => {
                log::error!(
                    "Fetch task of generation {} did not complete: {err}",
                    self.generation
                );
                Settlement::Superseded
            }
        }
    }
}

struct Shared<T> {
    state: watch::Sender<PaginationState<T>>,
    closed: AtomicBool,
}

impl<T> Shared<T> {
    fn settle(&self, generation: u64, outcome: RepositoryResult<PageResult<T>>) -> Settlement {
        let mut settlement = Settlement::Superseded;

        self.state.send_if_modified(|state| {
            if self.closed.load(Ordering::Acquire) || state.generation != generation {
                return false;
            }

            match outcome {
                Ok(page) => {
                    if page.results.len() > state.params.page_size.get() {
                        log::warn!(
                            "Data source returned {} rows for a page of {}",
                            page.results.len(),
                            state.params.page_size
                        );
                    }
                    let page = Arc::new(page);
                    state.data = Some(Arc::clone(&page));
                    state.error = None;
                    state.request = RequestState::Loaded(page);
                    settlement = Settlement::Applied(Outcome::Success);
                }
                Err(err) => {
                    log::error!("Fetch of generation {generation} failed: {err}");
                    state.error = Some(err.clone());
                    state.request = RequestState::Failed(err);
                    settlement = Settlement::Applied(Outcome::Failure);
                }
            }
            true
        });

        if settlement == Settlement::Superseded {
            log::debug!("Discarding stale response of generation {generation}");
        }

        settlement
    }
}

fn fingerprint<D: Hash + ?Sized>(deps: &D) -> u64 {
    let mut hasher = DefaultHasher::new();
    deps.hash(&mut hasher);
    hasher.finish()
}

/// Drives one paginated listing from a [`RemoteDataSource`].
///
/// Methods that dispatch a fetch spawn it with [`tokio::spawn`] and therefore
/// must be called from within a Tokio runtime.
pub struct PaginationController<S: RemoteDataSource> {
    source: Arc<S>,
    shared: Arc<Shared<S::Item>>,
    deps: AtomicU64,
}

impl<S: RemoteDataSource> PaginationController<S> {
    /// Creates an idle controller. Nothing is fetched until the first
    /// [`refresh`](Self::refresh) or [`merge_params`](Self::merge_params).
    pub fn new(source: S, defaults: QueryParams) -> Self {
        let (state, _) = watch::channel(PaginationState::idle(defaults));

        Self {
            source: Arc::new(source),
            shared: Arc::new(Shared {
                state,
                closed: AtomicBool::new(false),
            }),
            deps: AtomicU64::new(fingerprint(&())),
        }
    }

    /// Creates a controller and dispatches the initial fetch with `defaults`.
    ///
    /// `deps` are the external values the listing depends on; see
    /// [`watch`](Self::watch).
    pub fn mount<D: Hash + ?Sized>(source: S, defaults: QueryParams, deps: &D) -> Self {
        let controller = Self::new(source, defaults);
        controller.deps.store(fingerprint(deps), Ordering::Release);
        drop(controller.refresh());
        controller
    }

    pub fn params(&self) -> QueryParams {
        self.shared.state.borrow().params.clone()
    }

    pub fn loading(&self) -> bool {
        self.shared.state.borrow().loading()
    }

    pub fn data(&self) -> Option<Arc<PageResult<S::Item>>> {
        self.shared.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<RepositoryError> {
        self.shared.state.borrow().error.clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.state.borrow().generation
    }

    pub fn snapshot(&self) -> PaginationState<S::Item> {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState<S::Item>> {
        self.shared.state.subscribe()
    }

    /// Waits until no fetch is outstanding and returns the resulting state.
    pub async fn wait_idle(&self) -> PaginationState<S::Item> {
        let mut receiver = self.shared.state.subscribe();
        match receiver.wait_for(|state| !state.loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Merges `patch` into the current params and fetches the result.
    pub fn merge_params(&self, patch: QueryPatch) -> Dispatch {
        self.dispatch(|current| current.merged(&patch))
    }

    /// Fetches again with the current params unchanged.
    pub fn refresh(&self) -> Dispatch {
        self.dispatch(QueryParams::clone)
    }

    /// Refetches from the first page when `deps` differ from the ones seen
    /// last. Returns `None` when nothing changed.
    pub fn watch<D: Hash + ?Sized>(&self, deps: &D) -> Option<Dispatch> {
        let next = fingerprint(deps);
        if self.deps.swap(next, Ordering::AcqRel) == next {
            return None;
        }

        Some(self.dispatch(|current| QueryParams {
            page: 0,
            ..current.clone()
        }))
    }

    /// Marks the listing as unmounted. In-flight fetches are ignored when they
    /// complete and no further fetch is dispatched.
    pub fn close(&self) {
        if self.shared.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        self.shared.state.send_if_modified(|state| {
            if state.loading() {
                state.request = RequestState::Idle;
                true
            } else {
                false
            }
        });
        log::debug!("Pagination controller closed");
    }

    fn dispatch(&self, next: impl FnOnce(&QueryParams) -> QueryParams) -> Dispatch {
        let mut ticket = (self.generation(), self.params());

        if self.is_closed() {
            log::debug!("Ignoring dispatch on a closed pagination controller");
            return Dispatch {
                params: ticket.1,
                generation: ticket.0,
                task: None,
            };
        }

        self.shared.state.send_modify(|state| {
            let params = next(&state.params);
            state.generation += 1;
            state.params = params.clone();
            state.request = RequestState::Loading;
            state.error = None;
            ticket = (state.generation, params);
        });

        let (generation, params) = ticket;
        log::debug!("Dispatching fetch of generation {generation}");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        let request = params.clone();
        let task = tokio::spawn(async move {
            // A panicking data source must still settle its generation.
            let fetch = tokio::spawn(async move { source.fetch(&request).await });
            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("Fetch task of generation {generation} aborted: {err}");
                    Err(RepositoryError::Unexpected(format!("Fetch aborted: {err}")))
                }
            };
            shared.settle(generation, outcome)
        });

        Dispatch {
            params,
            generation,
            task: Some(task),
        }
    }
}

impl<S: RemoteDataSource> Drop for PaginationController<S> {
    fn drop(&mut self) {
        self.close();
    }
}
