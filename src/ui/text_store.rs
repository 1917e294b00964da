use std::cell::Cell;
use std::rc::Rc;

use fltk::{app::Sender, prelude::*, text::TextBuffer};

use crate::app::domain::buffer::{TextStore, floor_char_boundary};
use crate::app::domain::document::DocumentId;
use crate::app::domain::messages::Message;

/// A tab's text held in an FLTK buffer, so the editor widget edits it
/// directly.
///
/// `style_buffer` always has the same length as `buffer`; new text gets
/// the plain style 'A' until the next restyle.
#[derive(Clone)]
pub struct FltkStore {
    pub buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    /// Set while the core rewrites the buffer, so only typing is reported.
    programmatic: Rc<Cell<bool>>,
}

impl FltkStore {
    pub fn new(id: DocumentId, sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        buffer.set_tab_distance(4);
        let style_buffer = TextBuffer::default();
        let programmatic = Rc::new(Cell::new(false));

        let quiet = programmatic.clone();
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted == 0 && deleted == 0 {
                return;
            }
            if deleted > 0 {
                style_buf.remove(pos, pos + deleted);
            }
            if inserted > 0 {
                style_buf.insert(pos, &"A".repeat(inserted as usize));
            }
            if !quiet.get() {
                sender.send(Message::BufferModified(id));
            }
        });

        Self {
            buffer,
            style_buffer,
            programmatic,
        }
    }

    fn quietly(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        self.programmatic.set(true);
        edit(&mut self.buffer);
        self.programmatic.set(false);
    }
}

impl TextStore for FltkStore {
    fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    fn set_text(&mut self, text: &str) {
        self.quietly(|buf| buf.set_text(text));
    }

    fn insert(&mut self, pos: usize, text: &str) -> usize {
        let pos = floor_char_boundary(&self.text(), pos);
        self.quietly(|buf| buf.insert(pos as i32, text));
        pos
    }

    fn len(&self) -> usize {
        self.buffer.length().max(0) as usize
    }
}

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// `TextBuffer::text()` copies FLTK's malloc'd string into a `String` but
/// never frees the original.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is a live Fl_Text_Buffer. The returned string is
    // null-terminated and malloc'd by FLTK, so it is copied once and then
    // released with the matching `free`.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let result = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}
