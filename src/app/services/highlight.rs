use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color as SyntectColor, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::theme::{Rgb, palette};
use crate::app::domain::settings::Theme;

const DARK_THEME: &str = "base16-ocean.dark";
const LIGHT_THEME: &str = "base16-ocean.light";

/// Style characters run 'A'..='Z'.
pub const MAX_STYLES: usize = 26;

/// Style character for Find / Find All matches, one past the syntax range.
pub const SEARCH_STYLE: u8 = b'A' + MAX_STYLES as u8;

/// Syntax colouring for one document, parallel to its text.
///
/// `styles` holds one style byte per text byte; style `'A' + i` is drawn
/// in `palette[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOverlay {
    pub syntax_name: String,
    pub styles: String,
    pub palette: Vec<Rgb>,
}

/// Maps syntect colours to style characters, growing the palette as new
/// colours show up.
struct StyleMap {
    color_to_char: HashMap<(u8, u8, u8), u8>,
    palette: Vec<Rgb>,
}

impl StyleMap {
    fn new(plain: Rgb) -> Self {
        Self {
            color_to_char: HashMap::new(),
            palette: vec![plain],
        }
    }

    fn get_or_insert(&mut self, color: SyntectColor) -> u8 {
        let key = (color.r, color.g, color.b);
        if let Some(&ch) = self.color_to_char.get(&key) {
            return ch;
        }

        let idx = self.palette.len();
        if idx >= MAX_STYLES {
            return b'A' + (MAX_STYLES as u8 - 1);
        }
        let ch = b'A' + idx as u8;
        self.palette.push(Rgb(color.r, color.g, color.b));
        self.color_to_char.insert(key, ch);
        ch
    }
}

pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    pub fn new(theme: Theme) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Detect the syntax for a file name based on its extension.
    ///
    /// Returns None for plain text and unknown extensions.
    pub fn detect_syntax(&self, file_name: &str) -> Option<String> {
        let ext = Path::new(file_name).extension()?.to_str()?;
        let syntax = self.syntax_set.find_syntax_by_extension(ext)?;
        if syntax.name == "Plain Text" {
            return None;
        }
        Some(syntax.name.clone())
    }

    /// Colour `text` as the language implied by `file_name`.
    ///
    /// Unknown languages get a single plain style.
    pub fn highlight(&self, text: &str, file_name: &str) -> HighlightOverlay {
        let plain = palette(self.theme).foreground;
        let theme_name = if self.theme.is_dark() { DARK_THEME } else { LIGHT_THEME };

        let syntax = self
            .detect_syntax(file_name)
            .and_then(|name| self.syntax_set.find_syntax_by_name(&name));
        let (Some(syntax), Some(theme)) = (syntax, self.theme_set.themes.get(theme_name)) else {
            return plain_overlay(text, plain);
        };

        let mut style_map = StyleMap::new(plain);
        let mut styles = String::with_capacity(text.len());
        let mut lines = HighlightLines::new(syntax, theme);

        for line in LinesWithEndings::from(text) {
            match lines.highlight_line(line, &self.syntax_set) {
                Ok(pieces) => {
                    for (style, piece) in pieces {
                        let ch = style_map.get_or_insert(style.foreground) as char;
                        // One style char per byte (not per char) for UTF-8 correctness
                        styles.extend(std::iter::repeat_n(ch, piece.len()));
                    }
                }
                Err(e) => {
                    log::debug!("Highlighting stopped on a line: {}", e);
                    styles.extend(std::iter::repeat_n('A', line.len()));
                }
            }
        }

        HighlightOverlay {
            syntax_name: syntax.name.clone(),
            styles,
            palette: style_map.palette,
        }
    }
}

/// Style bytes for a text of `len` bytes: the overlay's colours (or plain
/// style 'A' without one) with `matches` stamped over in [`SEARCH_STYLE`].
pub fn compose_styles(len: usize, overlay: Option<&HighlightOverlay>, matches: &[Range<usize>]) -> String {
    let mut styles: Vec<u8> = match overlay {
        Some(o) if o.styles.len() == len => o.styles.as_bytes().to_vec(),
        _ => vec![b'A'; len],
    };
    for m in matches {
        let end = m.end.min(len);
        if m.start < end {
            styles[m.start..end].fill(SEARCH_STYLE);
        }
    }
    // Only ASCII style bytes are ever written
    String::from_utf8(styles).unwrap_or_else(|_| "A".repeat(len))
}

fn plain_overlay(text: &str, plain: Rgb) -> HighlightOverlay {
    HighlightOverlay {
        syntax_name: "Plain Text".to_string(),
        styles: "A".repeat(text.len()),
        palette: vec![plain],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_syntax() {
        let hl = SyntaxHighlighter::new(Theme::Light);
        assert_eq!(hl.detect_syntax("main.rs").as_deref(), Some("Rust"));
        assert_eq!(hl.detect_syntax("script.py").as_deref(), Some("Python"));
        assert_eq!(hl.detect_syntax("notes.txt"), None);
        assert_eq!(hl.detect_syntax("Untitled"), None);
    }

    #[test]
    fn test_overlay_covers_every_byte() {
        let hl = SyntaxHighlighter::new(Theme::Dark);
        let text = "fn main() {\n    let s = \"héllo\";\n}\n";
        let overlay = hl.highlight(text, "main.rs");
        assert_eq!(overlay.syntax_name, "Rust");
        assert_eq!(overlay.styles.len(), text.len());
        assert!(overlay.palette.len() > 1);
        assert!(overlay.styles.bytes().all(|b| (b'A'..=b'Z').contains(&b)));
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let hl = SyntaxHighlighter::new(Theme::Light);
        let overlay = hl.highlight("just words", "Untitled");
        assert_eq!(overlay.styles, "A".repeat(10));
        assert_eq!(overlay.palette, vec![palette(Theme::Light).foreground]);
    }

    #[test]
    fn test_compose_styles_marks_matches() {
        assert_eq!(compose_styles(5, None, &[]), "AAAAA");
        assert_eq!(compose_styles(5, None, &[1..3]), "A[[AA");
        // Ranges past the end are cut off
        assert_eq!(compose_styles(3, None, &[2..9]), "AA[");

        let hl = SyntaxHighlighter::new(Theme::Light);
        let overlay = hl.highlight("fn x() {}", "a.rs");
        let styles = compose_styles(9, Some(&overlay), &[0..2]);
        assert_eq!(&styles[..2], "[[");
        assert_eq!(&styles[2..], &overlay.styles[2..]);
    }

    #[test]
    fn test_stale_overlay_is_ignored() {
        let hl = SyntaxHighlighter::new(Theme::Light);
        let overlay = hl.highlight("fn x() {}", "a.rs");
        assert_eq!(compose_styles(4, Some(&overlay), &[]), "AAAA");
    }

    #[test]
    fn test_theme_changes_colours() {
        let text = "fn main() {}\n";
        let mut hl = SyntaxHighlighter::new(Theme::Light);
        let light = hl.highlight(text, "a.rs");
        hl.set_theme(Theme::Dark);
        let dark = hl.highlight(text, "a.rs");
        assert_eq!(light.styles.len(), dark.styles.len());
        assert_ne!(light.palette, dark.palette);
    }
}
