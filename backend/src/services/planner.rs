//! Request-level orchestration of the planning pipeline.
//!
//! ```text
//! request ──► schedule prompt ──► model ──► extract ──► normalize
//!         ──► align(today) ──► horizon ──► select topics
//!         ──► [tip prompt ──► model ──► parse tips] ──► correlate ──► response
//! ```
//!
//! A schedule-call failure aborts the request. The bracketed tip round trip only
//! runs when at least one study topic was selected, and any failure in it is
//! logged and replaced by an empty tip list.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::PlannerSettings;
use crate::error::{PlannerError, PlannerResult};
use crate::llm::{GenerativeModel, PromptBuilder};
use crate::models::{DaySchedule, ScheduleRequest, ScheduleResponse, StudyTip};
use crate::services::calendar_aligner::{align, AlignedDay};
use crate::services::extractor::{parse_payload, PayloadShape};
use crate::services::horizon::HorizonWindow;
use crate::services::normalizer::normalize;
use crate::services::tip_correlator::{
    correlate, parse_tips, select_topics, KeywordClassifier, StudyClassifier, StudyTopics,
};

/// Turns a [`ScheduleRequest`] into a [`ScheduleResponse`]. Shared across requests.
pub struct SchedulePlanner {
    model: Arc<dyn GenerativeModel>,
    classifier: Arc<dyn StudyClassifier>,
    prompts: PromptBuilder,
    window: HorizonWindow,
    max_tip_topics: usize,
}

impl std::fmt::Debug for SchedulePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulePlanner")
            .field("model", &self.model.name())
            .field("window", &self.window)
            .field("max_tip_topics", &self.max_tip_topics)
            .finish()
    }
}

impl SchedulePlanner {
    pub fn new(model: Arc<dyn GenerativeModel>, settings: &PlannerSettings) -> Self {
        Self {
            model,
            classifier: Arc::new(KeywordClassifier::with_extra(&settings.extra_study_keywords)),
            prompts: PromptBuilder::new(),
            window: settings.horizon(),
            max_tip_topics: settings.max_tip_topics,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn StudyClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the whole pipeline for one request.
    pub async fn plan(
        &self,
        request: &ScheduleRequest,
        today: NaiveDate,
    ) -> PlannerResult<ScheduleResponse> {
        let span = info_span!("plan", request_id = %Uuid::new_v4(), %today);
        self.run(request, today).instrument(span).await
    }

    async fn run(&self, request: &ScheduleRequest, today: NaiveDate) -> PlannerResult<ScheduleResponse> {
        request.validate()?;
        info!(
            tasks = request.tasks.len(),
            events = request.events.len(),
            model = self.model.name(),
            "Generating schedule"
        );

        let prompt = self.prompts.schedule_request(request, today);
        let raw = self.model.complete(&prompt).await?;
        let days = parse_schedule(&raw)?;
        debug!(entries = days.len(), "Normalized model schedule");

        let aligned = align(days, today);
        let kept = self.window.apply(aligned, &request.tasks, today);
        debug!(
            kept = kept.len(),
            cutoff = %self.window.cutoff(&request.tasks, today),
            "Applied horizon window"
        );
        let mut days: Vec<DaySchedule> = kept.into_iter().map(AlignedDay::into_schedule).collect();

        let topics = select_topics(&days, self.classifier.as_ref(), self.max_tip_topics);
        let study_tips = self.fetch_tips(&topics).await;
        let attached = correlate(&mut days, &study_tips);

        info!(
            days = days.len(),
            topics = topics.len(),
            tips = study_tips.len(),
            attached,
            "Schedule ready"
        );
        Ok(ScheduleResponse { days, study_tips })
    }

    /// Second round trip. Never fails: problems yield an empty list.
    async fn fetch_tips(&self, topics: &StudyTopics) -> Vec<StudyTip> {
        if topics.is_empty() {
            debug!("No study topics, skipping tip request");
            return Vec::new();
        }

        let prompt = self.prompts.tip_request(topics);
        let result = match self.model.complete(&prompt).await {
            Ok(raw) => parse_tips(&raw),
            Err(e) => Err(PlannerError::from(e)),
        };

        match result {
            Ok(tips) => tips,
            Err(e) => {
                warn!(error = %e, "Tip generation failed, continuing without tips");
                Vec::new()
            }
        }
    }
}

/// Extract and normalize the schedule text. Failures log the raw model output.
fn parse_schedule(raw: &str) -> PlannerResult<Vec<DaySchedule>> {
    parse_payload(raw, PayloadShape::Object)
        .and_then(|value| normalize(&value))
        .map_err(|e| {
            warn!(error = %e, raw, "Unusable schedule from model");
            e
        })
}
