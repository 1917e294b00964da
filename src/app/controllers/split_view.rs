use crate::app::controllers::tabs::TabManager;
use crate::app::domain::buffer::TextStore;
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::error::{AppError, Result};

/// What a pane shows: a copy of one tab's title and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneSnapshot {
    pub id: DocumentId,
    pub title: String,
    pub text: String,
}

/// Side-by-side read-only view of two tabs sharing one scroll position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitView {
    panes: Option<(DocumentId, DocumentId)>,
    top_line: usize,
}

impl SplitView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.panes.is_some()
    }

    /// Close when open; otherwise open on the first two tabs.
    ///
    /// Returns whether the view is open afterwards.
    pub fn toggle<B: TextStore>(&mut self, tabs: &TabManager<B>) -> Result<bool> {
        if self.panes.is_some() {
            self.close();
            return Ok(false);
        }

        let docs = tabs.documents();
        if docs.len() < 2 {
            return Err(AppError::SplitNeedsTwoTabs);
        }
        self.panes = Some((docs[0].id, docs[1].id));
        self.top_line = 1;
        Ok(true)
    }

    pub fn close(&mut self) {
        self.panes = None;
        self.top_line = 1;
    }

    pub fn select_left<B: TextStore>(&mut self, tabs: &TabManager<B>, id: DocumentId) {
        if let Some((ref mut left, _)) = self.panes
            && tabs.doc(id).is_some()
        {
            *left = id;
        }
    }

    pub fn select_right<B: TextStore>(&mut self, tabs: &TabManager<B>, id: DocumentId) {
        if let Some((_, ref mut right)) = self.panes
            && tabs.doc(id).is_some()
        {
            *right = id;
        }
    }

    /// Scroll both panes to `top_line`.
    pub fn scroll_to(&mut self, top_line: usize) {
        self.top_line = top_line.max(1);
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Drop the view when it shows a tab that is going away.
    pub fn on_tab_closed(&mut self, id: DocumentId) {
        if let Some((left, right)) = self.panes
            && (left == id || right == id)
        {
            self.close();
        }
    }

    /// Current contents of the left and right panes.
    pub fn panes<B: TextStore>(&self, tabs: &TabManager<B>) -> Option<(PaneSnapshot, PaneSnapshot)> {
        let (left, right) = self.panes?;
        let snap = |id: DocumentId| {
            tabs.doc(id).map(|d| PaneSnapshot {
                id,
                title: d.display_name.clone(),
                text: d.text(),
            })
        };
        Some((snap(left)?, snap(right)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tabs() -> (TabManager, [DocumentId; 3]) {
        let mut tabs: TabManager = TabManager::new();
        let ids = [tabs.create_tab(), tabs.create_tab(), tabs.create_tab()];
        for (i, id) in ids.iter().enumerate() {
            tabs.doc_mut(*id).unwrap().set_text(&format!("text {}", i));
        }
        (tabs, ids)
    }

    #[test]
    fn test_needs_two_tabs() {
        let mut tabs: TabManager = TabManager::new();
        let mut split = SplitView::new();
        assert!(matches!(split.toggle(&tabs), Err(AppError::SplitNeedsTwoTabs)));
        tabs.create_tab();
        assert!(split.toggle(&tabs).is_err());
        assert!(!split.is_open());
    }

    #[test]
    fn test_toggle_opens_on_first_two_then_closes() {
        let (tabs, ids) = three_tabs();
        let mut split = SplitView::new();
        assert!(split.toggle(&tabs).unwrap());
        let (left, right) = split.panes(&tabs).unwrap();
        assert_eq!((left.id, right.id), (ids[0], ids[1]));
        assert!(!split.toggle(&tabs).unwrap());
        assert!(!split.is_open());
    }

    #[test]
    fn test_select_panes() {
        let (tabs, ids) = three_tabs();
        let mut split = SplitView::new();
        split.toggle(&tabs).unwrap();
        split.select_right(&tabs, ids[2]);
        split.select_left(&tabs, DocumentId(99));

        let (left, right) = split.panes(&tabs).unwrap();
        assert_eq!(left.id, ids[0]);
        assert_eq!(left.text, "text 0");
        assert_eq!(right.id, ids[2]);
        assert_eq!(right.text, "text 2");
    }

    #[test]
    fn test_shared_scroll() {
        let (tabs, _) = three_tabs();
        let mut split = SplitView::new();
        split.toggle(&tabs).unwrap();
        split.scroll_to(12);
        assert_eq!(split.top_line(), 12);
        split.scroll_to(0);
        assert_eq!(split.top_line(), 1);
    }

    #[test]
    fn test_closing_shown_tab_closes_view() {
        let (mut tabs, ids) = three_tabs();
        let mut split = SplitView::new();
        split.toggle(&tabs).unwrap();

        split.on_tab_closed(ids[2]);
        assert!(split.is_open());

        tabs.close_tab(ids[1]);
        split.on_tab_closed(ids[1]);
        assert!(!split.is_open());
    }
}
