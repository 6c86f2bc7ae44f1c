use crate::core::list_renderer::EventListRenderer;
use crate::core::marker_renderer::MapMarkerRenderer;
use crate::core::render_context::{RenderContext, Ticket};
use crate::domain::model::{EventQuery, FetchOutcome, Notice};
use crate::domain::ports::EventSource;
use std::sync::Arc;

/// How a single fetch-and-render run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineReport {
    Rendered { items: usize, markers: usize },
    NoResults,
    Failed,
    Stale,
}

/// Fetch, then hand the events to the list and marker renderers.
pub struct EventPipeline<S: EventSource> {
    source: S,
    context: Arc<RenderContext>,
    markers: MapMarkerRenderer,
}

impl<S: EventSource> EventPipeline<S> {
    pub fn new(source: S, context: Arc<RenderContext>) -> Self {
        Self {
            source,
            context,
            markers: MapMarkerRenderer::default(),
        }
    }

    pub fn with_marker_renderer(mut self, markers: MapMarkerRenderer) -> Self {
        self.markers = markers;
        self
    }

    pub fn context(&self) -> &Arc<RenderContext> {
        &self.context
    }

    pub async fn run(&self, query: EventQuery) -> PipelineReport {
        let ticket = self.context.issue_ticket();
        self.run_with_ticket(ticket, query).await
    }

    /// Failures are logged and end the run; nothing is retried.
    pub async fn run_with_ticket(&self, ticket: Ticket, query: EventQuery) -> PipelineReport {
        let events = match self.source.fetch(&query).await {
            Ok(FetchOutcome::Events(events)) => events,
            Ok(FetchOutcome::NoResults) => {
                tracing::info!("No events found for {:?}", query);
                return if self
                    .context
                    .notify_if_current(ticket, Notice::NoResults)
                    .await
                {
                    PipelineReport::NoResults
                } else {
                    PipelineReport::Stale
                };
            }
            Err(e) => {
                tracing::error!("Error fetching events: {}", e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                return PipelineReport::Failed;
            }
        };

        let committed = self
            .context
            .commit(ticket, |map, list| {
                let items = EventListRenderer::render(&events, list);
                let summary = self.markers.render(&events, map);
                (items, summary.markers)
            })
            .await;

        match committed {
            Some((items, markers)) => {
                tracing::info!("✅ Showing {} events at {} venues", items, markers);
                PipelineReport::Rendered { items, markers }
            }
            None => PipelineReport::Stale,
        }
    }
}
