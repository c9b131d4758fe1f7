//! Debounced draft autosave.
//!
//! Form edits arrive in bursts. Each [`DraftAutosaver::schedule`] call
//! replaces the pending draft and restarts the quiet period; only when the
//! quiet period passes without another edit is the latest draft written.

use crate::recommendation::RecommendationService;
use award_core::RecommendationData;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

const COMMAND_QUEUE_SIZE: usize = 64;

/// Save indicator shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutosaveStatus {
    Idle,
    Saving,
    Saved,
}

impl AutosaveStatus {
    pub fn label(self) -> &'static str {
        match self {
            AutosaveStatus::Idle => "",
            AutosaveStatus::Saving => "저장 중...",
            AutosaveStatus::Saved => "자동 저장됨",
        }
    }
}

enum Command {
    Schedule(Box<RecommendationData>),
    Flush(oneshot::Sender<()>),
}

/// Background task that coalesces draft writes.
///
/// Dropping the autosaver closes its queue; the task writes any pending
/// draft and then exits. Use [`DraftAutosaver::shutdown`] to wait for that.
pub struct DraftAutosaver {
    tx: mpsc::Sender<Command>,
    status: watch::Receiver<AutosaveStatus>,
    task: JoinHandle<()>,
}

impl DraftAutosaver {
    /// Spawn the autosave task. Must be called inside a tokio runtime.
    pub fn new(service: RecommendationService, quiet_period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (status_tx, status) = watch::channel(AutosaveStatus::Idle);

        let task = tokio::spawn(async move {
            Self::run(service, quiet_period, rx, status_tx).await;
        });

        tracing::debug!(
            quiet_period_ms = quiet_period.as_millis() as u64,
            "Draft autosaver started"
        );

        Self { tx, status, task }
    }

    /// Queue `draft` to be written once edits go quiet
    pub async fn schedule(&self, draft: RecommendationData) {
        if self
            .tx
            .send(Command::Schedule(Box::new(draft)))
            .await
            .is_err()
        {
            tracing::warn!("Draft autosaver has stopped, edit not scheduled");
        }
    }

    /// Write the pending draft now, if there is one
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).await.is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    pub fn status(&self) -> AutosaveStatus {
        *self.status.borrow()
    }

    /// Close the queue and wait until the pending draft is written
    pub async fn shutdown(self) {
        let Self { tx, task, .. } = self;
        drop(tx);
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Draft autosaver task failed");
        }
    }

    async fn run(
        service: RecommendationService,
        quiet_period: Duration,
        mut rx: mpsc::Receiver<Command>,
        status: watch::Sender<AutosaveStatus>,
    ) {
        let mut pending: Option<RecommendationData> = None;

        loop {
            let command = if pending.is_some() {
                match tokio::time::timeout(quiet_period, rx.recv()).await {
                    Ok(command) => command,
                    Err(_) => {
                        Self::write(&service, &status, pending.take()).await;
                        continue;
                    }
                }
            } else {
                rx.recv().await
            };

            match command {
                Some(Command::Schedule(draft)) => {
                    pending = Some(*draft);
                    status.send_replace(AutosaveStatus::Saving);
                }
                Some(Command::Flush(done)) => {
                    Self::write(&service, &status, pending.take()).await;
                    let _ = done.send(());
                }
                None => {
                    Self::write(&service, &status, pending.take()).await;
                    break;
                }
            }
        }

        tracing::debug!("Draft autosaver stopped");
    }

    async fn write(
        service: &RecommendationService,
        status: &watch::Sender<AutosaveStatus>,
        draft: Option<RecommendationData>,
    ) {
        let Some(draft) = draft else {
            return;
        };

        match service.save_draft(&draft).await {
            Ok(()) => {
                status.send_replace(AutosaveStatus::Saved);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Draft autosave failed");
                status.send_replace(AutosaveStatus::Idle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{complete_recommendation, RecordingStore};

    const QUIET: Duration = Duration::from_millis(500);

    fn draft_with_reason(reason: &str) -> RecommendationData {
        RecommendationData {
            reason: reason.to_string(),
            ..complete_recommendation()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_writes_once() {
        let store = RecordingStore::new();
        let service = RecommendationService::with_default_extensions(store.clone());
        let autosaver = DraftAutosaver::new(service.clone(), QUIET);

        for reason in ["a", "ab", "abc"] {
            autosaver.schedule(draft_with_reason(reason)).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(RecordingStore::count(&store.draft_saves), 0);
        assert_eq!(autosaver.status(), AutosaveStatus::Saving);

        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(RecordingStore::count(&store.draft_saves), 1);
        assert_eq!(service.load_draft().await, Some(draft_with_reason("abc")));
        assert_eq!(autosaver.status(), AutosaveStatus::Saved);
        assert_eq!(autosaver.status().label(), "자동 저장됨");
    }

    #[tokio::test(start_paused = true)]
    async fn flush_writes_without_waiting() {
        let store = RecordingStore::new();
        let service = RecommendationService::with_default_extensions(store.clone());
        let autosaver = DraftAutosaver::new(service.clone(), QUIET);

        autosaver.flush().await;
        assert_eq!(RecordingStore::count(&store.draft_saves), 0);

        autosaver.schedule(draft_with_reason("now")).await;
        autosaver.flush().await;
        assert_eq!(RecordingStore::count(&store.draft_saves), 1);
        assert_eq!(service.load_draft().await, Some(draft_with_reason("now")));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(RecordingStore::count(&store.draft_saves), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_writes_pending_draft() {
        let store = RecordingStore::new();
        let service = RecommendationService::with_default_extensions(store.clone());
        let autosaver = DraftAutosaver::new(service.clone(), QUIET);

        assert_eq!(autosaver.status(), AutosaveStatus::Idle);
        autosaver.schedule(draft_with_reason("last")).await;
        autosaver.shutdown().await;

        assert_eq!(RecordingStore::count(&store.draft_saves), 1);
        assert_eq!(service.load_draft().await, Some(draft_with_reason("last")));
    }
}
