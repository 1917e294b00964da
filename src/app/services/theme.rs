use crate::app::controllers::tabs::TabManager;
use crate::app::domain::buffer::TextStore;
use crate::app::domain::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Colours for one tab's editor and line number panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    pub cursor: Rgb,
    pub selection_background: Rgb,
    pub selection_foreground: Rgb,
    pub gutter_background: Rgb,
    pub gutter_foreground: Rgb,
    pub window_background: Rgb,
}

const LIGHT: EditorStyle = EditorStyle {
    background: Rgb::WHITE,
    foreground: Rgb::BLACK,
    cursor: Rgb::BLACK,
    selection_background: Rgb(0x00, 0x78, 0xd7),
    selection_foreground: Rgb::WHITE,
    gutter_background: Rgb(0xf0, 0xf0, 0xf0),
    gutter_foreground: Rgb(0x80, 0x80, 0x80),
    window_background: Rgb::WHITE,
};

const DARK: EditorStyle = EditorStyle {
    background: Rgb(0x1e, 0x1e, 0x1e),
    foreground: Rgb(0xd4, 0xd4, 0xd4),
    cursor: Rgb::WHITE,
    selection_background: Rgb(0x26, 0x4f, 0x78),
    selection_foreground: Rgb::WHITE,
    gutter_background: Rgb(0x25, 0x25, 0x26),
    gutter_foreground: Rgb(0x85, 0x85, 0x85),
    window_background: Rgb(0x1e, 0x1e, 0x1e),
};

/// The fixed style table for `theme`.
pub fn palette(theme: Theme) -> EditorStyle {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

/// Re-style every open tab for `theme`.
pub fn apply_theme<B: TextStore>(tabs: &mut TabManager<B>, theme: Theme) {
    let style = palette(theme);
    tabs.set_default_style(style);
    for doc in tabs.documents_mut() {
        doc.style = style;
    }
}
