use futures::future::{join_all, BoxFuture, FutureExt};
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::debug;

use super::aggregate::aggregate;
use crate::error::{OrgError, OrgResult};

/// A set of fetch tasks that run concurrently and finish at one join point.
///
/// Tasks are either independent, or depend on exactly one task declared
/// before them. A dependent task waits for its prerequisite to finish and
/// only does its own work if the prerequisite produced a value; otherwise it
/// is skipped without touching the remote service. Every task, skipped or
/// not, signals completion, so [`FetchPlan::join`] always returns once the
/// slowest remote call returns.
///
/// ```no_run
/// # use org_cli::fetch::FetchPlan;
/// # use org_cli::client::ResourceClient;
/// # use org_cli::models::Id;
/// # async fn demo(client: &dyn ResourceClient, org_id: &Id) -> org_cli::OrgResult<()> {
/// let mut plan = FetchPlan::new();
/// let session = plan.independent("session", || client.who_am_i());
/// let teams = plan.independent("teams", || client.list_teams(org_id));
/// let mine = plan.dependent("session memberships", &session, move |session| async move {
///     client.list_memberships(org_id, None, Some(&session.id)).await
/// });
///
/// let fetched = plan.join().await.into_result()?;
/// let (teams, mine) = (fetched.take(teams)?, fetched.take(mine)?);
/// # let _ = (teams, mine);
/// # Ok(())
/// # }
/// ```
pub struct FetchPlan<'a> {
    tasks: Vec<PlannedTask<'a>>,
}

struct PlannedTask<'a> {
    label: &'static str,
    run: BoxFuture<'a, Option<OrgError>>,
}

/// Write-once result cell owned by a single task.
///
/// Only the owning task writes it. Dependents read it after the owner's
/// completion latch fires; callers read it through [`Fetched::take`] after
/// the join.
pub struct Slot<T> {
    index: usize,
    label: &'static str,
    value: Arc<OnceLock<T>>,
    done: watch::Receiver<bool>,
}

impl<T> Slot<T> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Declaration index of the owning task.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'a> Default for FetchPlan<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FetchPlan<'a> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedule a task that needs nothing but what the caller already knows.
    pub fn independent<T, F, Fut>(&mut self, label: &'static str, work: F) -> Slot<T>
    where
        T: Send + Sync + 'a,
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = OrgResult<T>> + Send + 'a,
    {
        let (slot, cell, done) = self.open_slot(label);

        let run = async move {
            debug!(task = label, "fetch started");
            let error = store(label, &cell, work().await);
            done.send_replace(true);
            error
        }
        .boxed();

        self.tasks.push(PlannedTask { label, run });
        slot
    }

    /// Schedule a task that consumes the value produced by `prerequisite`.
    ///
    /// If the prerequisite fails, `work` is never called. The failure is
    /// reported once, by the prerequisite; the skipped task adds nothing.
    pub fn dependent<P, T, F, Fut>(
        &mut self,
        label: &'static str,
        prerequisite: &Slot<P>,
        work: F,
    ) -> Slot<T>
    where
        P: Clone + Send + Sync + 'a,
        T: Send + Sync + 'a,
        F: FnOnce(P) -> Fut + Send + 'a,
        Fut: Future<Output = OrgResult<T>> + Send + 'a,
    {
        let upstream = Arc::clone(&prerequisite.value);
        let upstream_label = prerequisite.label;
        let mut upstream_done = prerequisite.done.clone();
        let (slot, cell, done) = self.open_slot(label);

        let run = async move {
            let finished = upstream_done.wait_for(|finished| *finished).await.is_ok();
            let input = if finished { upstream.get().cloned() } else { None };

            let error = match input {
                Some(input) => {
                    debug!(task = label, after = upstream_label, "fetch started");
                    store(label, &cell, work(input).await)
                }
                None => {
                    debug!(task = label, after = upstream_label, "skipped, prerequisite failed");
                    None
                }
            };
            done.send_replace(true);
            error
        }
        .boxed();

        self.tasks.push(PlannedTask { label, run });
        slot
    }

    fn open_slot<T>(
        &self,
        label: &'static str,
    ) -> (Slot<T>, Arc<OnceLock<T>>, watch::Sender<bool>) {
        let value = Arc::new(OnceLock::new());
        let (done_tx, done_rx) = watch::channel(false);
        let slot = Slot {
            index: self.tasks.len(),
            label,
            value: Arc::clone(&value),
            done: done_rx,
        };
        (slot, value, done_tx)
    }

    /// Run every task to completion. Nothing is cancelled when a task fails.
    pub async fn join(self) -> Joined {
        let labels: Vec<&'static str> = self.tasks.iter().map(|t| t.label).collect();
        debug!(tasks = labels.len(), "joining fetch plan");

        let errors = join_all(self.tasks.into_iter().map(|t| t.run)).await;

        Joined {
            outcomes: labels
                .into_iter()
                .zip(errors)
                .map(|(label, error)| TaskOutcome { label, error })
                .collect(),
        }
    }
}

fn store<T>(label: &'static str, cell: &OnceLock<T>, outcome: OrgResult<T>) -> Option<OrgError> {
    match outcome {
        Ok(value) => {
            debug!(task = label, "fetch finished");
            // The owning task is the only writer, so the cell is still empty.
            let _ = cell.set(value);
            None
        }
        Err(e) => {
            debug!(task = label, error = %e, "fetch failed");
            Some(e)
        }
    }
}

#[derive(Debug)]
pub struct TaskOutcome {
    pub label: &'static str,
    pub error: Option<OrgError>,
}

/// Every task has signaled completion. Holds one error slot per task, in
/// declaration order.
#[derive(Debug)]
pub struct Joined {
    outcomes: Vec<TaskOutcome>,
}

impl Joined {
    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    pub fn failed_labels(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.label)
            .collect()
    }

    /// Reduce the error slots to one outcome. Any failure discards all
    /// results.
    pub fn into_result(self) -> OrgResult<Fetched> {
        let failed = self.failed_labels();
        if !failed.is_empty() {
            debug!(?failed, "fetch plan finished with failures");
        }
        aggregate(self.outcomes.into_iter().map(|o| o.error))?;
        Ok(Fetched { _joined: () })
    }
}

/// Proof that a plan joined without failures. Slots are read through it.
#[derive(Debug)]
pub struct Fetched {
    _joined: (),
}

impl Fetched {
    pub fn take<T>(&self, slot: Slot<T>) -> OrgResult<T> {
        let Slot { label, value, .. } = slot;
        Arc::try_unwrap(value)
            .ok()
            .and_then(OnceLock::into_inner)
            .ok_or_else(|| OrgError::StateError(format!("no result recorded for '{}'", label)))
    }
}
