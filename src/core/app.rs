use crate::core::extractor::PreferenceExtractor;
use crate::core::panel::ResultsPanel;
use crate::core::{ConfigProvider, FormFields, LearningPathResult, Recommender, ResultRenderer};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// What happened to a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The result was written to the results panel.
    Rendered {
        ticket: u64,
        result: LearningPathResult,
    },
    /// A newer submission started while this one was waiting; nothing was written.
    Superseded { ticket: u64 },
}

impl SubmissionOutcome {
    pub fn result(&self) -> Option<&LearningPathResult> {
        match self {
            SubmissionOutcome::Rendered { result, .. } => Some(result),
            SubmissionOutcome::Superseded { .. } => None,
        }
    }
}

/// Application context: one per session, owning the results panel.
///
/// Submissions compute their learning path right away and only hold the
/// loading message on screen for `min_loading` in total. Every submission
/// takes a ticket; after the wait only the newest ticket may write to the
/// panel, so overlapping submissions resolve to the last one.
pub struct EduVisionApp<R: Recommender, V: ResultRenderer> {
    recommender: R,
    renderer: V,
    extractor: PreferenceExtractor,
    panel: Mutex<ResultsPanel>,
    latest_ticket: AtomicU64,
    min_loading: Duration,
}

impl<R: Recommender, V: ResultRenderer> EduVisionApp<R, V> {
    /// Loads recommender data, then returns the ready application.
    pub async fn initialize<C: ConfigProvider + ?Sized>(
        mut recommender: R,
        renderer: V,
        config: &C,
    ) -> Result<Self> {
        if let Err(e) = recommender.load_data().await {
            tracing::error!("❌ Failed to load recommender data: {}", e);
            return Err(e);
        }

        tracing::info!("EduVision AI is ready! 🚀");

        Ok(Self {
            recommender,
            renderer,
            extractor: PreferenceExtractor::new(),
            panel: Mutex::new(ResultsPanel::new()),
            latest_ticket: AtomicU64::new(0),
            min_loading: config.min_loading_duration(),
        })
    }

    pub async fn handle_submit<F: FormFields + ?Sized>(&self, form: &F) -> Result<SubmissionOutcome> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();
        tracing::debug!("Submission #{} received", ticket);

        self.panel().show(self.renderer.render_loading());

        let preferences = match self.extractor.extract(form) {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("Submission #{} rejected: {}", ticket, e);
                let mut panel = self.panel();
                if self.is_latest(ticket) {
                    panel.show(self.renderer.render_error(&e));
                }
                return Err(e);
            }
        };

        let result = self.recommender.generate_learning_sequence(&preferences);

        // 只補足剩餘的載入顯示時間
        tokio::time::sleep_until(started + self.min_loading).await;

        let mut panel = self.panel();
        if !self.is_latest(ticket) {
            tracing::debug!("Submission #{} superseded, dropping its result", ticket);
            return Ok(SubmissionOutcome::Superseded { ticket });
        }

        panel.show(self.renderer.render_results(&result));
        tracing::info!(
            "✅ Rendered learning path: {} resources, {} minutes",
            result.resources_count(),
            result.total_estimated_time()
        );

        Ok(SubmissionOutcome::Rendered { ticket, result })
    }

    /// Hides the results panel and cancels every submission still waiting to render.
    pub fn reset(&self) {
        let mut panel = self.panel();
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        panel.hide();
        tracing::debug!("Results panel reset at ticket #{}", ticket);
    }

    /// Runs the recommender directly, without touching the panel.
    pub fn recommend<F: FormFields + ?Sized>(&self, form: &F) -> Result<LearningPathResult> {
        let preferences = self.extractor.extract(form)?;
        Ok(self.recommender.generate_learning_sequence(&preferences))
    }

    pub fn panel_snapshot(&self) -> ResultsPanel {
        self.panel().clone()
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn min_loading(&self) -> Duration {
        self.min_loading
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    fn panel(&self) -> MutexGuard<'_, ResultsPanel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
