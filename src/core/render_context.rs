use crate::domain::model::{Coordinate, Notice};
use crate::domain::ports::{ListSurface, MapSurface, Notifier};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sequence number handed out when a request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Shared map, list and notifier. Results only commit for the latest ticket,
/// so a slow response never overwrites a newer one.
pub struct RenderContext {
    map: Mutex<Box<dyn MapSurface>>,
    list: Mutex<Box<dyn ListSurface>>,
    notifier: Arc<dyn Notifier>,
    latest: AtomicU64,
}

impl RenderContext {
    pub fn new<M, L>(map: M, list: L, notifier: Arc<dyn Notifier>) -> Self
    where
        M: MapSurface + 'static,
        L: ListSurface + 'static,
    {
        Self {
            map: Mutex::new(Box::new(map)),
            list: Mutex::new(Box::new(list)),
            notifier,
            latest: AtomicU64::new(0),
        }
    }

    pub fn issue_ticket(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Runs `render` against both surfaces if `ticket` is still the latest.
    /// Returns `None` for a stale ticket.
    pub async fn commit<F, R>(&self, ticket: Ticket, render: F) -> Option<R>
    where
        F: FnOnce(&mut dyn MapSurface, &mut dyn ListSurface) -> R,
    {
        let mut map = self.map.lock().await;
        let mut list = self.list.lock().await;

        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale render #{} (latest #{})",
                ticket.0,
                self.latest.load(Ordering::SeqCst)
            );
            return None;
        }

        Some(render(&mut **map, &mut **list))
    }

    /// Shows `notice` unless a newer request has been issued since `ticket`.
    pub async fn notify_if_current(&self, ticket: Ticket, notice: Notice) -> bool {
        self.commit(ticket, |_, _| self.notifier.notify(notice))
            .await
            .is_some()
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub async fn set_view(&self, center: Coordinate, zoom: f64) {
        self.map.lock().await.set_view(center, zoom);
    }

    pub async fn scroll_results_into_view(&self) {
        self.list.lock().await.scroll_into_view();
    }

    pub async fn with_map<F, R>(&self, inspect: F) -> R
    where
        F: FnOnce(&dyn MapSurface) -> R,
    {
        let map = self.map.lock().await;
        inspect(&**map)
    }

    pub async fn with_list<F, R>(&self, inspect: F) -> R
    where
        F: FnOnce(&dyn ListSurface) -> R,
    {
        let list = self.list.lock().await;
        inspect(&**list)
    }
}
