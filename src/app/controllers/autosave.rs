use std::time::Duration;

use crate::app::controllers::tabs::TabManager;
use crate::app::domain::buffer::TextStore;
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::error::AppError;
use crate::app::services::export::write_text;

/// Five minutes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Armed,
    Disabled,
}

/// What one auto-save sweep did.
#[derive(Debug, Default)]
pub struct AutoSaveReport {
    pub saved: Vec<DocumentId>,
    pub failed: Vec<(DocumentId, AppError)>,
}

impl AutoSaveReport {
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty() && self.failed.is_empty()
    }
}

/// Periodic flush of modified, file-bound tabs.
///
/// The ticker owns no timer. The host calls [`AutoSaveTicker::tick`] every
/// [`AutoSaveTicker::interval`]; toggling the state takes effect on the next
/// call.
#[derive(Debug, Clone)]
pub struct AutoSaveTicker {
    state: TickerState,
    interval: Duration,
}

impl AutoSaveTicker {
    pub fn new(enabled: bool) -> Self {
        Self::with_interval(enabled, DEFAULT_INTERVAL)
    }

    pub fn with_interval(enabled: bool, interval: Duration) -> Self {
        let state = if enabled { TickerState::Armed } else { TickerState::Disabled };
        Self { state, interval }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state = if enabled { TickerState::Armed } else { TickerState::Disabled };
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TickerState::Armed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one sweep. Every dirty tab with a file binding is written and
    /// marked clean; a failed write is logged and leaves that tab dirty
    /// without stopping the others.
    pub fn tick<B: TextStore>(&self, tabs: &mut TabManager<B>) -> AutoSaveReport {
        let mut report = AutoSaveReport::default();
        if self.state == TickerState::Disabled {
            return report;
        }

        for doc in tabs.documents_mut() {
            if !doc.is_dirty() {
                continue;
            }
            let Some(path) = doc.file_path.clone() else {
                continue;
            };

            match write_text(&path, &doc.text()) {
                Ok(()) => {
                    doc.mark_clean();
                    log::debug!("Auto-saved {}", path.display());
                    report.saved.push(doc.id);
                }
                Err(e) => {
                    log::warn!("Auto-save failed for {}: {}", path.display(), e);
                    report.failed.push((doc.id, e));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_interval() {
        let ticker = AutoSaveTicker::new(true);
        assert_eq!(ticker.interval(), Duration::from_secs(300));
        assert_eq!(ticker.state(), TickerState::Armed);
        assert_eq!(AutoSaveTicker::new(false).state(), TickerState::Disabled);
    }

    #[test]
    fn test_custom_interval_is_reported() {
        let ticker = AutoSaveTicker::with_interval(true, Duration::from_secs(30));
        assert_eq!(ticker.interval().as_secs_f64(), 30.0);
        assert!(ticker.is_armed());
    }

    #[test]
    fn test_tick_writes_dirty_bound_tabs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old").unwrap();

        let mut tabs: TabManager = TabManager::new();
        let id = tabs.open_tab(&path, "old");
        tabs.doc_mut(id).unwrap().set_text("new");

        let report = AutoSaveTicker::new(true).tick(&mut tabs);
        assert_eq!(report.saved, vec![id]);
        assert!(report.failed.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!tabs.doc(id).unwrap().is_dirty());
    }

    #[test]
    fn test_tick_skips_clean_and_unbound_tabs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.txt");
        fs::write(&path, "on disk").unwrap();

        let mut tabs: TabManager = TabManager::new();
        tabs.open_tab(&path, "on disk");
        let untitled = tabs.create_tab();
        tabs.doc_mut(untitled).unwrap().set_text("never saved");

        let report = AutoSaveTicker::new(true).tick(&mut tabs);
        assert!(report.is_empty());
        assert!(tabs.doc(untitled).unwrap().is_dirty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "on disk");
    }

    #[test]
    fn test_disabled_ticker_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old").unwrap();

        let mut tabs: TabManager = TabManager::new();
        let id = tabs.open_tab(&path, "old");
        tabs.doc_mut(id).unwrap().set_text("new");

        let mut ticker = AutoSaveTicker::new(true);
        // Disabled between two ticks
        ticker.set_enabled(false);
        let report = ticker.tick(&mut tabs);
        assert!(report.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(tabs.doc(id).unwrap().is_dirty());

        ticker.set_enabled(true);
        ticker.tick(&mut tabs);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_failure_is_isolated_per_tab() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("no-such-dir").join("bad.txt");

        let mut tabs: TabManager = TabManager::new();
        let bad_id = tabs.open_tab(&bad, "");
        let good_id = tabs.open_tab(&good, "");
        tabs.doc_mut(bad_id).unwrap().set_text("lost");
        tabs.doc_mut(good_id).unwrap().set_text("kept");

        let ticker = AutoSaveTicker::new(true);
        let report = ticker.tick(&mut tabs);
        assert_eq!(report.saved, vec![good_id]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, bad_id);
        assert!(matches!(report.failed[0].1, AppError::Io(_)));
        assert_eq!(fs::read_to_string(&good).unwrap(), "kept");

        // The failed tab stays dirty and is retried next time
        assert!(tabs.doc(bad_id).unwrap().is_dirty());
        let again = ticker.tick(&mut tabs);
        assert_eq!(again.failed.len(), 1);
        assert!(again.saved.is_empty());
    }
}
