/// Storage behind one tab's text.
///
/// The document core only talks to this trait. Headless code and tests use
/// [`PlainBuffer`]; the desktop front-end implements it for the toolkit's
/// text buffer so typing goes straight into the widget.
pub trait TextStore {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    /// Insert at a byte offset and return the offset actually used.
    ///
    /// Offsets past the end append; offsets inside a multi-byte character
    /// move back to its first byte.
    fn insert(&mut self, pos: usize, text: &str) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Largest char boundary of `text` at or before `pos`, clamped to its length.
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// In-memory `String` buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainBuffer(String);

impl PlainBuffer {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TextStore for PlainBuffer {
    fn text(&self) -> String {
        self.0.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.0.clear();
        self.0.push_str(text);
    }

    fn insert(&mut self, pos: usize, text: &str) -> usize {
        let pos = floor_char_boundary(&self.0, pos);
        self.0.insert_str(pos, text);
        pos
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_buffer_set_and_read() {
        let mut buf = PlainBuffer::default();
        assert!(buf.is_empty());
        buf.set_text("hello");
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_insert_middle_and_past_end() {
        let mut buf = PlainBuffer::new("ac");
        assert_eq!(buf.insert(1, "b"), 1);
        assert_eq!(buf.as_str(), "abc");
        assert_eq!(buf.insert(100, "!"), 3);
        assert_eq!(buf.as_str(), "abc!");
    }

    #[test]
    fn test_insert_snaps_to_char_boundary() {
        // "é" is two bytes; offset 1 falls inside it
        let mut buf = PlainBuffer::new("é");
        assert_eq!(buf.insert(1, "x"), 0);
        assert_eq!(buf.as_str(), "xé");
    }

    #[test]
    fn test_floor_char_boundary() {
        assert_eq!(floor_char_boundary("aé", 2), 1);
        assert_eq!(floor_char_boundary("aé", 3), 3);
        assert_eq!(floor_char_boundary("aé", 9), 3);
        assert_eq!(floor_char_boundary("", 4), 0);
    }
}
