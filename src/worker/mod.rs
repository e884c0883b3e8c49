//! Out-of-band work spawned after Slack has been acknowledged.
//!
//! Routing decides *what* to do synchronously and returns [`Job`]s; each job
//! runs on its own task so the webhook response never waits on extraction or
//! generation.

pub mod deliver;
pub mod ingest;

use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::core::models::{ExtractedContent, PendingKey, VoiceProfile};
use crate::core::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Fetch a shared link (web page or video) and offer the voice picker.
    Url { key: PendingKey, url: String },
    /// Download an uploaded PDF and offer the voice picker.
    Pdf {
        key: PendingKey,
        file_url: String,
        file_name: String,
    },
    /// A voice was chosen and the pending content already claimed.
    Draft {
        key: PendingKey,
        voice: VoiceProfile,
        picker_ts: Option<String>,
        content: ExtractedContent,
    },
    /// A voice was chosen but nothing was pending for the thread.
    Expired { key: PendingKey },
}

impl Job {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Job::Url { .. } => "url",
            Job::Pdf { .. } => "pdf",
            Job::Draft { .. } => "draft",
            Job::Expired { .. } => "expired",
        }
    }

    #[must_use]
    pub fn key(&self) -> &PendingKey {
        match self {
            Job::Url { key, .. }
            | Job::Pdf { key, .. }
            | Job::Draft { key, .. }
            | Job::Expired { key } => key,
        }
    }
}

/// Run one job to completion. Failures are reported in-thread and logged,
/// never returned.
pub async fn run_job(state: &AppState, job: Job) {
    let correlation_id = Uuid::new_v4().to_string();
    let span = info_span!(
        "job",
        correlation_id = %correlation_id,
        kind = job.kind(),
        key = %job.key(),
    );

    async move {
        info!("Starting job");
        match job {
            Job::Url { key, url } => ingest::ingest_url(state, &key, &url).await,
            Job::Pdf {
                key,
                file_url,
                file_name,
            } => ingest::ingest_pdf(state, &key, &file_url, &file_name).await,
            Job::Draft {
                key,
                voice,
                picker_ts,
                content,
            } => deliver::deliver_drafts(state, &key, voice, picker_ts.as_deref(), &content).await,
            Job::Expired { key } => deliver::deliver_expired(state, &key).await,
        }
        info!("Job finished");
    }
    .instrument(span)
    .await;
}

/// Spawn every job on the runtime without waiting for it.
pub fn spawn_jobs(state: &AppState, jobs: Vec<Job>) {
    for job in jobs {
        let state = state.clone();
        tokio::spawn(async move {
            run_job(&state, job).await;
        });
    }
}
