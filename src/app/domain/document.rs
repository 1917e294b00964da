use std::ops::Range;
use std::path::{Path, PathBuf};

use super::buffer::{PlainBuffer, TextStore};
use crate::app::services::highlight::HighlightOverlay;
use crate::app::services::line_numbers::LineNumberGutter;
use crate::app::services::text_ops::extract_filename;
use crate::app::services::theme::EditorStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One open tab: its buffer, optional file binding and per-tab view state.
pub struct Document<B: TextStore = PlainBuffer> {
    pub id: DocumentId,
    pub buffer: B,
    pub file_path: Option<PathBuf>,
    pub display_name: String,
    pub cursor_position: usize,
    /// Colours last applied by the theme applier.
    pub style: EditorStyle,
    pub gutter: LineNumberGutter,
    /// Byte ranges marked by the last Find / Find All.
    pub search_highlights: Vec<Range<usize>>,
    /// Syntax colouring, kept beside the text and never written into it.
    pub overlay: Option<HighlightOverlay>,
    modified: bool,
}

impl<B: TextStore> Document<B> {
    pub fn new_untitled(id: DocumentId, counter: u32, buffer: B, style: EditorStyle) -> Self {
        let display_name = if counter <= 1 {
            "Untitled".to_string()
        } else {
            format!("Untitled {}", counter)
        };

        let mut doc = Self {
            id,
            buffer,
            file_path: None,
            display_name,
            cursor_position: 0,
            style,
            gutter: LineNumberGutter::new(),
            search_highlights: Vec::new(),
            overlay: None,
            modified: false,
        };
        doc.load_text("");
        doc
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the content as an edit: the document becomes dirty.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.after_edit();
    }

    /// Insert at a byte offset as an edit. The cursor lands right after the
    /// inserted text.
    pub fn insert_text(&mut self, pos: usize, text: &str) {
        let at = self.buffer.insert(pos, text);
        self.cursor_position = at + text.len();
        self.after_edit();
    }

    /// Replace the content with what is on disk: the document stays clean.
    pub fn load_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.gutter.refresh(text);
        self.search_highlights.clear();
        self.cursor_position = 0;
        self.modified = false;
    }

    /// Record an edit that already happened inside the buffer (typing).
    pub fn note_edited(&mut self) {
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.modified = true;
        self.search_highlights.clear();
        let text = self.buffer.text();
        self.gutter.refresh(&text);
    }

    pub fn is_dirty(&self) -> bool {
        self.modified
    }

    pub fn mark_clean(&mut self) {
        self.modified = false;
    }

    /// Attach the document to `path` and take the file name as its title.
    pub fn bind_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
        self.update_display_name();
    }

    pub fn update_display_name(&mut self) {
        if let Some(ref path) = self.file_path {
            self.display_name = extract_filename(&path.to_string_lossy());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::settings::Theme;
    use crate::app::services::theme::palette;

    fn untitled(counter: u32) -> Document {
        Document::new_untitled(DocumentId(1), counter, PlainBuffer::default(), palette(Theme::Light))
    }

    #[test]
    fn test_untitled_names() {
        assert_eq!(untitled(1).display_name, "Untitled");
        assert_eq!(untitled(3).display_name, "Untitled 3");
    }

    #[test]
    fn test_new_document_is_empty_and_clean() {
        let doc = untitled(1);
        assert_eq!(doc.text(), "");
        assert!(!doc.is_dirty());
        assert!(doc.file_path.is_none());
        assert_eq!(doc.gutter.line_count(), 1);
    }

    #[test]
    fn test_set_text_marks_dirty_and_refreshes_gutter() {
        let mut doc = untitled(1);
        doc.set_text("one\ntwo\nthree");
        assert!(doc.is_dirty());
        assert_eq!(doc.gutter.line_count(), 3);
        doc.mark_clean();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_load_text_stays_clean() {
        let mut doc = untitled(1);
        doc.set_text("draft");
        doc.load_text("from disk\n");
        assert!(!doc.is_dirty());
        assert_eq!(doc.text(), "from disk\n");
        assert_eq!(doc.gutter.line_count(), 1);
    }

    #[test]
    fn test_insert_text_moves_cursor() {
        let mut doc = untitled(1);
        doc.load_text("ac");
        doc.insert_text(1, "b");
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.cursor_position, 2);
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_insert_inside_multibyte_char_keeps_cursor_on_boundary() {
        let mut doc = untitled(1);
        doc.load_text("é x");
        doc.insert_text(1, "z");
        assert_eq!(doc.text(), "zé x");
        assert_eq!(doc.cursor_position, 1);
        assert!(doc.text().is_char_boundary(doc.cursor_position));
    }

    #[test]
    fn test_edit_clears_search_highlights() {
        let mut doc = untitled(1);
        doc.load_text("abc");
        doc.search_highlights.push(0..1);
        doc.note_edited();
        assert!(doc.search_highlights.is_empty());
    }

    #[test]
    fn test_bind_path_sets_title() {
        let mut doc = untitled(1);
        doc.bind_path(Path::new("/tmp/notes/todo.txt"));
        assert_eq!(doc.display_name, "todo.txt");
        assert_eq!(doc.file_path.as_deref(), Some(Path::new("/tmp/notes/todo.txt")));
    }
}
