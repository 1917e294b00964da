use fltk::{
    enums::{Color, Font},
    menu::MenuBar,
    prelude::*,
    text::{StyleTableEntry, TextEditor},
    window::Window,
};

use crate::app::services::highlight::{HighlightOverlay, MAX_STYLES};
use crate::app::services::theme::{EditorStyle, Rgb};

pub const EDITOR_FONT: Font = Font::Courier;
pub const EDITOR_FONT_SIZE: i32 = 14;

pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Colour a text widget (editor or split pane) and its line number area.
pub fn style_text_widget<T: DisplayExt>(display: &mut T, style: &EditorStyle) {
    display.set_color(to_color(style.background));
    display.set_text_color(to_color(style.foreground));
    display.set_cursor_color(to_color(style.cursor));
    display.set_selection_color(to_color(style.selection_background));
    display.set_linenumber_bgcolor(to_color(style.gutter_background));
    display.set_linenumber_fgcolor(to_color(style.gutter_foreground));
    display.redraw();
}

pub fn apply_theme(editor: &mut TextEditor, window: &mut Window, menu: &mut MenuBar, style: &EditorStyle) {
    style_text_widget(editor, style);

    window.set_color(to_color(style.window_background));
    window.set_label_color(to_color(style.foreground));
    menu.set_color(to_color(style.gutter_background));
    menu.set_text_color(to_color(style.foreground));
    menu.set_selection_color(to_color(style.selection_background));

    window.redraw();
    menu.redraw();
}

/// Style table for `set_highlight_data`: the overlay's colours padded to
/// 'Z', then the search-match style.
pub fn style_table(style: &EditorStyle, overlay: Option<&HighlightOverlay>) -> Vec<StyleTableEntry> {
    let entry = |rgb: Rgb, font: Font| StyleTableEntry {
        color: to_color(rgb),
        font,
        size: EDITOR_FONT_SIZE,
    };

    let mut table: Vec<StyleTableEntry> = match overlay {
        Some(o) => o.palette.iter().map(|rgb| entry(*rgb, EDITOR_FONT)).collect(),
        None => vec![entry(style.foreground, EDITOR_FONT)],
    };
    while table.len() < MAX_STYLES {
        table.push(entry(style.foreground, EDITOR_FONT));
    }
    table.push(entry(style.selection_background, Font::CourierBold));
    table
}
