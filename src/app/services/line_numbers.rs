/// Narrowest number column, in digits.
const MIN_GUTTER_DIGITS: usize = 4;

/// Number of display lines in `text`.
///
/// Each `\n` ends a line; trailing text without a final `\n` is one more
/// line. An empty buffer still shows a single (empty) line.
pub fn line_count(text: &str) -> usize {
    let breaks = text.bytes().filter(|b| *b == b'\n').count();
    if text.ends_with('\n') { breaks } else { breaks + 1 }
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

/// The number column for `count` lines: "1".."count", right-aligned,
/// one per line.
pub fn render_gutter(count: usize) -> String {
    let width = digits(count).max(MIN_GUTTER_DIGITS);
    (1..=count.max(1))
        .map(|n| format!("{:>width$}", n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pixel width of the toolkit's line number area for `count` lines.
pub fn gutter_width_px(count: usize) -> i32 {
    let digits = digits(count) as i32;
    (digits * 8 + 16).max(40)
}

/// Per-tab line count, kept current on every edit. The toolkit's own number
/// column draws from it and scrolls with the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberGutter {
    line_count: usize,
}

impl Default for LineNumberGutter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineNumberGutter {
    pub fn new() -> Self {
        Self { line_count: 1 }
    }

    /// Recompute from the current text. Returns true when the count changed.
    pub fn refresh(&mut self, text: &str) -> bool {
        let count = line_count(text);
        let changed = count != self.line_count;
        self.line_count = count;
        changed
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn width_px(&self) -> i32 {
        gutter_width_px(self.line_count)
    }
}
