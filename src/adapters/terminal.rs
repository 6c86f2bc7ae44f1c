use crate::domain::model::{ListItem, Marker, Notice};
use crate::domain::ports::{ListSurface, MapSurface, Notifier};
use std::io::{self, Write};
use std::sync::Mutex;

/// Results list printed to a writer, stdout by default.
pub struct TerminalList<W: Write + Send> {
    out: W,
    items: Vec<ListItem>,
}

impl TerminalList<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalList<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            items: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_items(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "🎫 {} events", self.items.len())?;
        for (i, item) in self.items.iter().enumerate() {
            writeln!(self.out, "{:>2}. {}", i + 1, item.title)?;
            writeln!(self.out, "    {} - {}", item.date_label, item.venue_label)?;
            writeln!(self.out, "    🔗 {}", item.link)?;
            if let Some(thumbnail) = &item.thumbnail {
                writeln!(self.out, "    🖼  {}", thumbnail)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write + Send> ListSurface for TerminalList<W> {
    fn replace_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        if let Err(e) = self.print_items() {
            tracing::warn!("Failed to print event list: {}", e);
        }
    }

    fn items(&self) -> &[ListItem] {
        &self.items
    }

    fn scroll_into_view(&mut self) {
        // A terminal is always showing the latest output.
        tracing::debug!("Results region in view");
    }
}

/// Notices go to stderr, the way a browser alert interrupts the page.
#[derive(Default)]
pub struct TerminalNotifier {
    shown: Mutex<usize>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> usize {
        self.shown.lock().map(|count| *count).unwrap_or(0)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("⚠️  {}", notice.message());
        if let Ok(mut count) = self.shown.lock() {
            *count += 1;
        }
    }
}

/// One line per marker, then each event in its popup.
pub fn describe_markers(map: &dyn MapSurface) -> String {
    let mut lines = Vec::new();

    if let Some(view) = map.view() {
        lines.push(format!(
            "🗺  View: {:.4},{:.4} @ zoom {}",
            view.center.latitude, view.center.longitude, view.zoom
        ));
    }

    for Marker { coordinate, popup } in map.markers() {
        lines.push(format!("📍 {} ({})", popup.title, coordinate));
        for entry in &popup.entries {
            lines.push(format!("    • {} {} {}", entry.date_label, entry.name, entry.link));
        }
    }

    lines.join("\n")
}
