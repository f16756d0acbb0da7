use crate::error::BridgeError;
use std::thread;
use tokio::sync::{mpsc, oneshot};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Serialized execution context for gateway session construction.
///
/// The gateway SDK requires client construction on one designated thread.
/// This executor owns that thread for the life of the bridge: jobs run one
/// at a time, in submission order. Dropping the executor shuts the thread
/// down by closing the job channel.
pub struct UiExecutor {
    jobs: mpsc::UnboundedSender<Job>,
}

impl UiExecutor {
    pub fn new() -> Self {
        let (jobs, mut queue) = mpsc::unbounded_channel::<Job>();
        thread::spawn(move || {
            while let Some(job) = queue.blocking_recv() {
                job();
            }
        });
        Self { jobs }
    }

    /// Runs `job` on the executor thread and awaits its result.
    pub async fn run<T, F>(&self, job: F) -> Result<T, BridgeError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply, outcome) = oneshot::channel();
        let job: Job = Box::new(move || {
            let _ = reply.send(job());
        });
        self.jobs
            .send(job)
            .map_err(|_| BridgeError::Initialization("session executor has shut down".into()))?;
        outcome
            .await
            .map_err(|_| BridgeError::Initialization("session executor dropped the job".into()))
    }
}

impl Default for UiExecutor {
    fn default() -> Self {
        Self::new()
    }
}
