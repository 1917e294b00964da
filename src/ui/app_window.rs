use std::ops::Range;
use std::path::{Path, PathBuf};

use fltk::{app::Sender, dialog, prelude::*, text::TextBuffer};

use super::dialogs::find::{show_find_dialog, show_replace_dialog};
use super::file_dialogs::{native_open_dialog, native_save_dialog};
use super::main_window::{APP_NAME, MainWidgets, build_main_window};
use super::menu::{AUTO_SAVE_ITEM, HIGHLIGHT_ITEM, LINE_NUMBERS_ITEM, SPLIT_ITEM, build_menu, set_checked};
use super::split_window::SplitWindow;
use super::text_store::FltkStore;
use super::theme::{apply_theme, style_table};
use crate::app::controllers::tabs::TabManager;
use crate::app::domain::buffer::TextStore;
use crate::app::domain::document::DocumentId;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::{AppSettings, Theme};
use crate::app::infrastructure::error::AppError;
use crate::app::services::export::ExportFormat;
use crate::app::services::highlight::compose_styles;
use crate::app::services::text_ops::ReplaceOutcome;
use crate::app::services::theme::palette;
use crate::app::state::{AppState, SaveOutcome};

/// The desktop window: owns the widgets and the editor state and turns each
/// [`Message`] into state changes plus a redraw.
pub struct AppWindow {
    pub state: AppState<FltkStore>,
    widgets: MainWidgets,
    split_window: Option<SplitWindow>,
    sender: Sender<Message>,
    /// Shown in the editor while no tab is open.
    empty_buffer: TextBuffer,
    last_query: String,
}

impl AppWindow {
    pub fn new(sender: Sender<Message>, settings: AppSettings, settings_path: PathBuf) -> Self {
        let mut widgets = build_main_window(&sender, &palette(settings.theme));
        build_menu(&mut widgets.menu, &sender, &settings);

        let tabs = TabManager::with_factory(move |id| FltkStore::new(id, sender));
        let state = AppState::new(tabs, settings, settings_path);

        let mut window = Self {
            state,
            widgets,
            split_window: None,
            sender,
            empty_buffer: TextBuffer::default(),
            last_query: String::new(),
        };
        window.restyle_widgets();
        window.bind_active_buffer();
        window.refresh_chrome();
        window
    }

    pub fn show(&mut self) {
        self.widgets.wind.show();
        let _ = self.widgets.text_editor.take_focus();
    }

    // --- View plumbing ---

    /// Point the editor at the current tab's buffer, or at an empty,
    /// inactive buffer when every tab is closed.
    fn bind_active_buffer(&mut self) {
        let editor = &mut self.widgets.text_editor;
        match self.state.tabs.active_doc() {
            Some(doc) => {
                editor.activate();
                editor.set_buffer(doc.buffer.buffer.clone());
                editor.set_insert_position(doc.cursor_position as i32);
                editor.show_insert_position();
                set_checked(&self.widgets.menu, HIGHLIGHT_ITEM, doc.overlay.is_some());
            }
            None => {
                self.empty_buffer.set_text("");
                editor.set_buffer(self.empty_buffer.clone());
                editor.deactivate();
                set_checked(&self.widgets.menu, HIGHLIGHT_ITEM, false);
            }
        }
        self.refresh_styles();
        self.update_linenumber_width();
    }

    /// Push the current tab's syntax colours and search marks to the editor.
    fn refresh_styles(&mut self) {
        let Some(doc) = self.state.tabs.active_doc_mut() else {
            return;
        };
        let styles = compose_styles(doc.buffer.len(), doc.overlay.as_ref(), &doc.search_highlights);
        doc.buffer.style_buffer.set_text(&styles);
        let table = style_table(&doc.style, doc.overlay.as_ref());
        let style_buffer = doc.buffer.style_buffer.clone();
        self.widgets.text_editor.set_highlight_data(style_buffer, table);
        self.widgets.text_editor.redraw();
    }

    fn update_linenumber_width(&mut self) {
        let width = match self.state.tabs.active_doc() {
            Some(doc) if self.state.settings.show_line_numbers => doc.gutter.width_px(),
            _ => 0,
        };
        self.widgets.text_editor.set_linenumber_width(width);
        self.widgets.text_editor.redraw();
    }

    fn update_window_title(&mut self) {
        let title = match self.state.tabs.active_doc() {
            Some(doc) => {
                let prefix = if doc.is_dirty() { "*" } else { "" };
                format!("{}{} - {}", prefix, doc.display_name, APP_NAME)
            }
            None => APP_NAME.to_string(),
        };
        self.widgets.wind.set_label(&title);
    }

    /// Title bar, tab bar and split panes.
    fn refresh_chrome(&mut self) {
        self.update_window_title();
        let active = self.state.tabs.current_tab();
        self.widgets.tab_bar.rebuild(self.state.tabs.documents(), active);
        self.refresh_split();
    }

    fn restyle_widgets(&mut self) {
        let style = palette(self.state.settings.theme);
        apply_theme(&mut self.widgets.text_editor, &mut self.widgets.wind, &mut self.widgets.menu, &style);
        self.widgets.tab_bar.apply_style(&style);
        if let Some(ref mut split) = self.split_window {
            split.apply_style(&style);
        }
    }

    /// Remember where the user left the cursor before the core looks at it.
    fn sync_cursor(&mut self) {
        let pos = self.widgets.text_editor.insert_position().max(0) as usize;
        if let Some(doc) = self.state.tabs.active_doc_mut() {
            doc.cursor_position = pos;
        }
    }

    fn report(&self, err: &AppError) {
        match err {
            AppError::NoActiveTab => log::debug!("Ignored: {}", err),
            _ => dialog::alert_default(&err.to_string()),
        }
    }

    // --- File operations ---

    pub fn file_new(&mut self) {
        self.sync_cursor();
        self.state.new_tab();
        self.bind_active_buffer();
        self.refresh_chrome();
    }

    pub fn file_open(&mut self) {
        if let Some(path) = native_open_dialog() {
            self.open_file(&path);
        }
    }

    pub fn open_file(&mut self, path: &Path) {
        self.sync_cursor();
        match self.state.open_path(path) {
            Ok(_) => {
                self.bind_active_buffer();
                self.refresh_chrome();
            }
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    pub fn file_save(&mut self) {
        match self.state.save_current() {
            Ok(SaveOutcome::Saved(_)) => self.refresh_chrome(),
            Ok(SaveOutcome::NeedsPath) => self.file_save_as(ExportFormat::PlainText),
            Err(e) => self.report(&e),
        }
    }

    pub fn file_save_as(&mut self, format: ExportFormat) {
        if self.state.tabs.current_tab().is_none() {
            return;
        }
        let Some(path) = native_save_dialog(format) else {
            return;
        };
        match self.state.save_current_as(format, &path) {
            Ok(written) => {
                if format == ExportFormat::Pdf {
                    dialog::message_default(&format!("Exported to {}", written.display()));
                }
                self.refresh_styles();
                self.refresh_chrome();
            }
            Err(e) => self.report(&e),
        }
    }

    /// Ask about unsaved changes in tab `id`. Returns false when the user
    /// cancels (or a requested save did not happen).
    fn confirm_discard(&mut self, id: DocumentId) -> bool {
        let Some(doc) = self.state.tabs.doc(id) else {
            return true;
        };
        if !doc.is_dirty() {
            return true;
        }

        let choice = dialog::choice2_default(
            &format!("\"{}\" has unsaved changes.", doc.display_name),
            "Save",
            "Discard",
            "Cancel",
        );
        match choice {
            Some(0) => {
                self.switch_to(id);
                self.file_save();
                self.state.tabs.doc(id).is_some_and(|d| !d.is_dirty())
            }
            Some(1) => true,
            _ => false,
        }
    }

    pub fn close_tab(&mut self, id: DocumentId) {
        if !self.confirm_discard(id) {
            return;
        }
        self.sync_cursor();
        self.state.close_tab(id);
        self.bind_active_buffer();
        self.refresh_chrome();
    }

    pub fn close_active_tab(&mut self) {
        if let Some(id) = self.state.tabs.current_tab() {
            self.close_tab(id);
        }
    }

    /// Returns true when it is fine to exit.
    pub fn file_quit(&mut self) -> bool {
        let dirty: Vec<DocumentId> = self
            .state
            .tabs
            .documents()
            .iter()
            .filter(|d| d.is_dirty())
            .map(|d| d.id)
            .collect();
        dirty.into_iter().all(|id| self.confirm_discard(id))
    }

    // --- Tabs ---

    pub fn switch_to(&mut self, id: DocumentId) {
        if self.state.tabs.current_tab() == Some(id) {
            return;
        }
        self.sync_cursor();
        self.state.tabs.set_active(id);
        self.bind_active_buffer();
        self.refresh_chrome();
    }

    pub fn next_tab(&mut self) {
        if let Some(id) = self.state.tabs.next_tab() {
            self.switch_to(id);
        }
    }

    pub fn previous_tab(&mut self) {
        if let Some(id) = self.state.tabs.previous_tab() {
            self.switch_to(id);
        }
    }

    pub fn rename_tab(&mut self, id: DocumentId) {
        let Some(current) = self.state.tabs.doc(id).map(|d| d.display_name.clone()) else {
            return;
        };
        if let Some(title) = dialog::input_default("Rename tab:", &current) {
            self.state.rename_tab(id, &title);
            self.refresh_chrome();
        }
    }

    // --- Edit ---

    pub fn undo(&mut self) {
        let _ = self.widgets.text_editor.kf_undo();
    }

    pub fn cut(&mut self) {
        let _ = self.widgets.text_editor.kf_cut();
    }

    pub fn copy(&mut self) {
        let _ = self.widgets.text_editor.kf_copy();
    }

    pub fn paste(&mut self) {
        let _ = self.widgets.text_editor.kf_paste();
    }

    pub fn delete(&mut self) {
        let _ = self.widgets.text_editor.kf_delete();
    }

    pub fn select_all(&mut self) {
        let _ = self.widgets.text_editor.kf_select_all();
    }

    fn select_match(&mut self, m: &Range<usize>) {
        if let Some(doc) = self.state.tabs.active_doc_mut() {
            doc.buffer.buffer.select(m.start as i32, m.end as i32);
        }
        self.widgets.text_editor.set_insert_position(m.end as i32);
        self.widgets.text_editor.show_insert_position();
        self.refresh_styles();
    }

    fn show_search_result(&mut self, found: Result<Option<Range<usize>>, AppError>) {
        match found {
            Ok(Some(m)) => self.select_match(&m),
            Ok(None) => {
                self.refresh_styles();
                dialog::message_default(&format!("Cannot find '{}'", self.last_query));
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn show_find(&mut self) {
        if self.state.tabs.current_tab().is_none() {
            return;
        }
        let Some(query) = show_find_dialog("Find", &self.last_query) else {
            return;
        };
        self.last_query = query;
        let found = self.state.find(&self.last_query);
        self.show_search_result(found);
    }

    /// F3: the next match of the last query, from the cursor.
    pub fn find_next(&mut self) {
        if self.last_query.is_empty() {
            self.show_find();
            return;
        }
        self.sync_cursor();
        let found = self.state.find_next(&self.last_query);
        self.show_search_result(found);
    }

    pub fn show_find_all(&mut self) {
        if self.state.tabs.current_tab().is_none() {
            return;
        }
        let Some(query) = show_find_dialog("Find All", &self.last_query) else {
            return;
        };
        self.last_query = query;
        match self.state.find_all(&self.last_query) {
            Ok(0) => {
                self.refresh_styles();
                dialog::message_default(&format!("Cannot find '{}'", self.last_query));
            }
            Ok(count) => {
                self.refresh_styles();
                dialog::message_default(&format!("Found {} occurrence(s)", count));
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn show_replace(&mut self) {
        if self.state.tabs.current_tab().is_none() {
            return;
        }
        let Some(request) = show_replace_dialog(&self.last_query) else {
            return;
        };
        self.last_query = request.find.clone();
        match self.state.replace_all(&request.find, &request.replace) {
            Ok(ReplaceOutcome::Replaced { count, .. }) => {
                self.widgets.text_editor.set_insert_position(0);
                self.refresh_styles();
                self.update_linenumber_width();
                self.refresh_chrome();
                dialog::message_default(&format!("Replaced {} occurrence(s)", count));
            }
            Ok(ReplaceOutcome::NotFound) => {
                dialog::message_default(&format!("Cannot find '{}'", request.find));
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn insert_date_time(&mut self) {
        self.sync_cursor();
        let Some(pos) = self.state.tabs.active_doc().map(|d| d.cursor_position) else {
            return;
        };
        match self.state.insert_timestamp(pos) {
            Ok(_) => {
                if let Some(doc) = self.state.tabs.active_doc() {
                    self.widgets.text_editor.set_insert_position(doc.cursor_position as i32);
                }
                self.refresh_styles();
                self.update_linenumber_width();
                self.refresh_chrome();
            }
            Err(e) => self.report(&e),
        }
    }

    /// The user typed into tab `id`.
    pub fn buffer_modified(&mut self, id: DocumentId) {
        self.state.buffer_modified(id);
        if self.state.tabs.current_tab() == Some(id) {
            self.refresh_styles();
            self.update_linenumber_width();
        }
        self.refresh_chrome();
    }

    // --- View ---

    pub fn toggle_line_numbers(&mut self) {
        let on = self.state.toggle_line_numbers();
        set_checked(&self.widgets.menu, LINE_NUMBERS_ITEM, on);
        self.update_linenumber_width();
        self.refresh_split();
    }

    pub fn toggle_auto_save(&mut self) {
        let on = self.state.toggle_auto_save();
        set_checked(&self.widgets.menu, AUTO_SAVE_ITEM, on);
    }

    pub fn toggle_highlighting(&mut self) {
        match self.state.toggle_highlight() {
            Ok(on) => {
                set_checked(&self.widgets.menu, HIGHLIGHT_ITEM, on);
                self.refresh_styles();
            }
            Err(e) => {
                set_checked(&self.widgets.menu, HIGHLIGHT_ITEM, false);
                self.report(&e);
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.set_theme(theme);
        self.restyle_widgets();
        self.refresh_styles();
        self.refresh_chrome();
    }

    pub fn toggle_split_screen(&mut self) {
        match self.state.toggle_split_view() {
            Ok(true) => {
                let mut split = SplitWindow::new(self.sender);
                split.apply_style(&palette(self.state.settings.theme));
                split.show();
                self.split_window = Some(split);
                set_checked(&self.widgets.menu, SPLIT_ITEM, true);
                self.refresh_split();
            }
            Ok(false) => self.split_close(),
            Err(e) => {
                set_checked(&self.widgets.menu, SPLIT_ITEM, false);
                dialog::message_default(&e.to_string());
            }
        }
    }

    pub fn split_select_left(&mut self, id: DocumentId) {
        self.state.split.select_left(&self.state.tabs, id);
        self.refresh_split();
    }

    pub fn split_select_right(&mut self, id: DocumentId) {
        self.state.split.select_right(&self.state.tabs, id);
        self.refresh_split();
    }

    pub fn split_scroll(&mut self, top_line: usize) {
        self.state.split.scroll_to(top_line);
        if let Some(ref mut split) = self.split_window {
            split.scroll_to(self.state.split.top_line());
        }
    }

    pub fn split_close(&mut self) {
        self.state.split.close();
        if let Some(mut split) = self.split_window.take() {
            split.hide();
        }
        set_checked(&self.widgets.menu, SPLIT_ITEM, false);
    }

    /// Bring the split panes in line with the tabs, closing the window when
    /// the view was dropped.
    fn refresh_split(&mut self) {
        if self.split_window.is_none() {
            return;
        }
        let Some((left, right)) = self.state.split.panes(&self.state.tabs) else {
            self.split_close();
            return;
        };
        let tabs: Vec<(DocumentId, String)> = self
            .state
            .tabs
            .documents()
            .iter()
            .map(|d| (d.id, d.display_name.clone()))
            .collect();
        let top_line = self.state.split.top_line();
        let line_numbers = self.state.settings.show_line_numbers;
        if let Some(ref mut split) = self.split_window {
            split.update(&tabs, (&left, &right), top_line, line_numbers);
        }
    }

    // --- Background ---

    pub fn auto_save_tick(&mut self) {
        let report = self.state.auto_save_tick();
        if !report.saved.is_empty() {
            log::info!("Auto-saved {} tab(s)", report.saved.len());
        }
        if !report.is_empty() {
            self.refresh_chrome();
        }
    }
}
