use std::fs;
use std::path::{Path, PathBuf};

use super::controllers::autosave::{AutoSaveReport, AutoSaveTicker};
use super::controllers::split_view::SplitView;
use super::controllers::tabs::TabManager;
use super::domain::buffer::{PlainBuffer, TextStore};
use super::domain::document::{Document, DocumentId};
use super::domain::settings::{AppSettings, Theme};
use super::infrastructure::error::{AppError, Result};
use super::services::export::{self, ExportFormat};
use super::services::highlight::SyntaxHighlighter;
use super::services::text_ops::{self, Match, ReplaceOutcome};
use super::services::theme::apply_theme;

/// Result of a plain Save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The tab has no file yet; ask for one and call `save_current_as`.
    NeedsPath,
}

/// Everything the editor knows, in one place.
///
/// Each user action is one method. Actions that need a current tab return
/// `AppError::NoActiveTab` (or do nothing) when every tab is closed.
pub struct AppState<B: TextStore = PlainBuffer> {
    pub tabs: TabManager<B>,
    pub settings: AppSettings,
    pub autosave: AutoSaveTicker,
    pub split: SplitView,
    settings_path: PathBuf,
    highlighter: Option<SyntaxHighlighter>,
}

impl AppState<PlainBuffer> {
    /// Headless state with in-memory buffers.
    pub fn headless(settings: AppSettings, settings_path: PathBuf) -> Self {
        Self::new(TabManager::new(), settings, settings_path)
    }
}

impl<B: TextStore> AppState<B> {
    /// Take ownership of `tabs`, apply `settings`, and open the first tab.
    pub fn new(tabs: TabManager<B>, settings: AppSettings, settings_path: PathBuf) -> Self {
        let autosave = AutoSaveTicker::new(settings.auto_save);
        let mut state = Self {
            tabs,
            settings,
            autosave,
            split: SplitView::new(),
            settings_path,
            highlighter: None,
        };
        apply_theme(&mut state.tabs, state.settings.theme);
        if state.tabs.is_empty() {
            state.tabs.create_tab();
        }
        state
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn active_mut(&mut self) -> Result<&mut Document<B>> {
        self.tabs.active_doc_mut().ok_or(AppError::NoActiveTab)
    }

    // --- File operations ---

    pub fn new_tab(&mut self) -> DocumentId {
        self.tabs.create_tab()
    }

    /// Open `path` in a new tab, or switch to the tab that already has it.
    ///
    /// The file is read before any tab exists, so a failed read changes
    /// nothing.
    pub fn open_path(&mut self, path: &Path) -> Result<DocumentId> {
        if let Some(existing) = self.tabs.find_by_path(path) {
            self.tabs.set_active(existing);
            return Ok(existing);
        }
        let content = fs::read_to_string(path)?;
        let id = self.tabs.open_tab(path, &content);
        log::info!("Opened {}", path.display());
        Ok(id)
    }

    /// Save the current tab to its bound file.
    pub fn save_current(&mut self) -> Result<SaveOutcome> {
        let doc = self.active_mut()?;
        let Some(path) = doc.file_path.clone() else {
            return Ok(SaveOutcome::NeedsPath);
        };
        export::write_text(&path, &doc.text())?;
        doc.mark_clean();
        log::info!("Saved {}", path.display());
        Ok(SaveOutcome::Saved(path))
    }

    /// Write the current tab to `path` as `format`.
    ///
    /// Text and script formats bind the tab to the written file; a PDF does
    /// not. Returns the path actually written (with the default extension
    /// added when `path` had none).
    pub fn save_current_as(&mut self, format: ExportFormat, path: &Path) -> Result<PathBuf> {
        let path = export::with_default_extension(path, format);
        let id = self.tabs.current_tab().ok_or(AppError::NoActiveTab)?;
        let text = self.active_mut()?.text();

        export::export(format, &path, &text)?;

        if format.binds_file() {
            self.tabs.bind_file(id, &path);
            if let Some(doc) = self.tabs.doc_mut(id) {
                doc.mark_clean();
            }
            self.refresh_overlay(id);
        }
        log::info!("Wrote {} as {:?}", path.display(), format);
        Ok(path)
    }

    pub fn close_tab(&mut self, id: DocumentId) {
        self.split.on_tab_closed(id);
        self.tabs.close_tab(id);
    }

    /// Retitle a tab. Blank titles are ignored.
    pub fn rename_tab(&mut self, id: DocumentId, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            self.tabs.rename_tab(id, title);
        }
    }

    // --- Edit operations ---

    /// Highlight the first occurrence of `needle` in the current tab.
    pub fn find(&mut self, needle: &str) -> Result<Option<Match>> {
        let doc = self.active_mut()?;
        let found = text_ops::find(&doc.text(), needle);
        doc.search_highlights = found.iter().cloned().collect();
        if let Some(ref m) = found {
            doc.cursor_position = m.end;
        }
        Ok(found)
    }

    /// Highlight the next occurrence after the cursor, wrapping to the top.
    pub fn find_next(&mut self, needle: &str) -> Result<Option<Match>> {
        let doc = self.active_mut()?;
        let text = doc.text();
        let found = text_ops::find_next(&text, needle, doc.cursor_position)
            .or_else(|| text_ops::find(&text, needle));
        doc.search_highlights = found.iter().cloned().collect();
        if let Some(ref m) = found {
            doc.cursor_position = m.end;
        }
        Ok(found)
    }

    /// Highlight every occurrence and return how many there are.
    pub fn find_all(&mut self, needle: &str) -> Result<usize> {
        let doc = self.active_mut()?;
        let matches = text_ops::find_all(&doc.text(), needle);
        let count = matches.len();
        doc.search_highlights = matches;
        Ok(count)
    }

    /// Replace every occurrence in the current tab.
    pub fn replace_all(&mut self, needle: &str, replacement: &str) -> Result<ReplaceOutcome> {
        let id = self.tabs.current_tab().ok_or(AppError::NoActiveTab)?;
        let doc = self.active_mut()?;
        let outcome = text_ops::replace_all(&doc.text(), needle, replacement);
        if let ReplaceOutcome::Replaced { ref text, .. } = outcome {
            doc.set_text(text);
            doc.cursor_position = 0;
            self.refresh_overlay(id);
        }
        Ok(outcome)
    }

    /// Insert `text` at byte `pos` of the current tab.
    pub fn insert_text_at(&mut self, pos: usize, text: &str) -> Result<()> {
        let id = self.tabs.current_tab().ok_or(AppError::NoActiveTab)?;
        self.active_mut()?.insert_text(pos, text);
        self.refresh_overlay(id);
        Ok(())
    }

    /// Edit > Time/Date.
    pub fn insert_timestamp(&mut self, pos: usize) -> Result<String> {
        let stamp = text_ops::timestamp_now();
        self.insert_text_at(pos, &stamp)?;
        Ok(stamp)
    }

    /// The buffer of `id` was edited directly (typing, paste, undo).
    pub fn buffer_modified(&mut self, id: DocumentId) {
        if let Some(doc) = self.tabs.doc_mut(id) {
            doc.note_edited();
        }
        self.refresh_overlay(id);
    }

    // --- View toggles ---

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.settings.show_line_numbers = !self.settings.show_line_numbers;
        self.persist_settings();
        self.settings.show_line_numbers
    }

    pub fn toggle_auto_save(&mut self) -> bool {
        self.settings.auto_save = !self.settings.auto_save;
        self.autosave.set_enabled(self.settings.auto_save);
        self.persist_settings();
        self.settings.auto_save
    }

    /// Switch every tab to `theme` and remember it.
    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        apply_theme(&mut self.tabs, theme);
        if let Some(ref mut hl) = self.highlighter {
            hl.set_theme(theme);
        }
        let ids: Vec<DocumentId> = self.tabs.documents().iter().map(|d| d.id).collect();
        for id in ids {
            self.refresh_overlay(id);
        }
        self.persist_settings();
    }

    pub fn toggle_split_view(&mut self) -> Result<bool> {
        self.split.toggle(&self.tabs)
    }

    /// Attach or drop syntax colouring on the current tab.
    ///
    /// Returns whether the tab is highlighted afterwards. The text itself is
    /// never touched.
    pub fn toggle_highlight(&mut self) -> Result<bool> {
        let theme = self.settings.theme;
        let highlighter = self
            .highlighter
            .get_or_insert_with(|| SyntaxHighlighter::new(theme));
        let doc = self.tabs.active_doc_mut().ok_or(AppError::NoActiveTab)?;

        if doc.overlay.take().is_some() {
            return Ok(false);
        }
        doc.overlay = Some(highlighter.highlight(&doc.text(), &highlight_name(doc)));
        Ok(true)
    }

    fn refresh_overlay(&mut self, id: DocumentId) {
        let Some(ref highlighter) = self.highlighter else {
            return;
        };
        if let Some(doc) = self.tabs.doc_mut(id)
            && doc.overlay.is_some()
        {
            doc.overlay = Some(highlighter.highlight(&doc.text(), &highlight_name(doc)));
        }
    }

    // --- Background ---

    pub fn auto_save_tick(&mut self) -> AutoSaveReport {
        self.autosave.tick(&mut self.tabs)
    }
}

/// Name used to pick a language: the bound file if any, else the tab title.
fn highlight_name<B: TextStore>(doc: &Document<B>) -> String {
    doc.file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.display_name.clone())
}
