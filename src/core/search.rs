use crate::core::pipeline::{EventPipeline, PipelineReport};
use crate::domain::model::{EventQuery, Notice};
use crate::domain::ports::EventSource;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Rejected,
    Completed(PipelineReport),
}

pub struct SearchController<S: EventSource> {
    pipeline: Arc<EventPipeline<S>>,
}

impl<S: EventSource> SearchController<S> {
    pub fn new(pipeline: Arc<EventPipeline<S>>) -> Self {
        Self { pipeline }
    }

    /// Blank input only prompts the user; no request is made. Anything else is
    /// sent as typed.
    pub async fn on_search(&self, input: &str) -> SearchOutcome {
        if input.trim().is_empty() {
            tracing::debug!("Empty city search rejected");
            self.pipeline.context().notify(Notice::EmptySearch);
            return SearchOutcome::Rejected;
        }

        tracing::info!("🔎 Searching events in {}", input);
        let context = self.pipeline.context();
        let ticket = context.issue_ticket();
        context.scroll_results_into_view().await;

        let report = self
            .pipeline
            .run_with_ticket(ticket, EventQuery::City(input.to_string()))
            .await;
        SearchOutcome::Completed(report)
    }
}
