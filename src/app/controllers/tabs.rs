use std::path::Path;

use crate::app::domain::buffer::{PlainBuffer, TextStore};
use crate::app::domain::document::{Document, DocumentId};
use crate::app::domain::settings::Theme;
use crate::app::services::theme::{EditorStyle, palette};

type BufferFactory<B> = Box<dyn FnMut(DocumentId) -> B>;

/// The tab registry: the only place that decides which tab owns which
/// buffer and file binding.
pub struct TabManager<B: TextStore = PlainBuffer> {
    documents: Vec<Document<B>>,
    active_id: Option<DocumentId>,
    next_id: u64,
    untitled_counter: u32,
    default_style: EditorStyle,
    make_buffer: BufferFactory<B>,
}

impl<B: TextStore + Default + 'static> TabManager<B> {
    pub fn new() -> Self {
        Self::with_factory(|_| B::default())
    }
}

impl<B: TextStore + Default + 'static> Default for TabManager<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TextStore> TabManager<B> {
    /// Build a registry whose buffers come from `make_buffer`, called once
    /// per new tab with that tab's id.
    pub fn with_factory(make_buffer: impl FnMut(DocumentId) -> B + 'static) -> Self {
        Self {
            documents: Vec::new(),
            active_id: None,
            next_id: 1,
            untitled_counter: 0,
            default_style: palette(Theme::Light),
            make_buffer: Box::new(make_buffer),
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Style given to tabs created from now on.
    pub fn set_default_style(&mut self, style: EditorStyle) {
        self.default_style = style;
    }

    /// Open an empty, clean, untitled tab and make it current.
    pub fn create_tab(&mut self) -> DocumentId {
        self.untitled_counter += 1;
        let id = self.next_document_id();
        let buffer = (self.make_buffer)(id);
        let doc = Document::new_untitled(id, self.untitled_counter, buffer, self.default_style);
        self.documents.push(doc);
        self.active_id = Some(id);
        log::debug!("Created tab {:?}", id);
        id
    }

    /// Open a tab holding `content` read from `path`, bound to that path.
    pub fn open_tab(&mut self, path: &Path, content: &str) -> DocumentId {
        let id = self.next_document_id();
        let buffer = (self.make_buffer)(id);
        let mut doc = Document::new_untitled(id, 1, buffer, self.default_style);
        doc.load_text(content);
        doc.bind_path(path);
        self.documents.push(doc);
        self.active_id = Some(id);
        log::debug!("Opened {} in tab {:?}", path.display(), id);
        id
    }

    /// Remove a tab with its buffer and file binding. Activates the
    /// nearest neighbor. Unknown ids are ignored.
    pub fn close_tab(&mut self, id: DocumentId) {
        let idx = match self.documents.iter().position(|d| d.id == id) {
            Some(i) => i,
            None => return,
        };
        self.documents.remove(idx);

        if self.active_id == Some(id) {
            self.active_id = if self.documents.is_empty() {
                None
            } else {
                let new_idx = idx.min(self.documents.len() - 1);
                Some(self.documents[new_idx].id)
            };
        }
        log::debug!("Closed tab {:?}", id);
    }

    /// Change the title shown on the tab. Nothing else moves.
    pub fn rename_tab(&mut self, id: DocumentId, title: &str) {
        if let Some(doc) = self.doc_mut(id) {
            doc.display_name = title.to_string();
        }
    }

    /// Bind a tab to `path` (replacing any earlier binding) and retitle it.
    pub fn bind_file(&mut self, id: DocumentId, path: &Path) {
        if let Some(doc) = self.doc_mut(id) {
            doc.bind_path(path);
        }
    }

    pub fn current_tab(&self) -> Option<DocumentId> {
        self.active_id
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if self.documents.iter().any(|d| d.id == id) {
            self.active_id = Some(id);
        }
    }

    pub fn active_doc(&self) -> Option<&Document<B>> {
        let active_id = self.active_id?;
        self.doc(active_id)
    }

    pub fn active_doc_mut(&mut self) -> Option<&mut Document<B>> {
        let active_id = self.active_id?;
        self.doc_mut(active_id)
    }

    pub fn doc(&self, id: DocumentId) -> Option<&Document<B>> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn doc_mut(&mut self, id: DocumentId) -> Option<&mut Document<B>> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn documents(&self) -> &[Document<B>] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> impl Iterator<Item = &mut Document<B>> {
        self.documents.iter_mut()
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by file path
    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|d| d.file_path.as_deref() == Some(path))
            .map(|d| d.id)
    }

    /// Get the next document id (for tab cycling)
    pub fn next_tab(&self) -> Option<DocumentId> {
        let active_id = self.active_id?;
        let idx = self.documents.iter().position(|d| d.id == active_id)?;
        let next_idx = (idx + 1) % self.documents.len();
        Some(self.documents[next_idx].id)
    }

    /// Get the previous document id (for tab cycling)
    pub fn previous_tab(&self) -> Option<DocumentId> {
        let active_id = self.active_id?;
        let idx = self.documents.iter().position(|d| d.id == active_id)?;
        let prev_idx = if idx == 0 {
            self.documents.len() - 1
        } else {
            idx - 1
        };
        Some(self.documents[prev_idx].id)
    }
}
