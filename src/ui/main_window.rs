use fltk::{
    app::{self, Sender},
    enums::Event,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::tab_bar::{TAB_BAR_HEIGHT, TabBar};
use super::theme::{EDITOR_FONT, EDITOR_FONT_SIZE};
use crate::app::domain::messages::Message;
use crate::app::services::theme::EditorStyle;

pub const APP_NAME: &str = "TabPad";

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub text_editor: TextEditor,
}

pub fn build_main_window(sender: &Sender<Message>, style: &EditorStyle) -> MainWidgets {
    let mut wind = Window::new(100, 100, 800, 600, None);
    wind.set_label(&format!("Untitled - {}", APP_NAME));
    wind.set_xclass(APP_NAME);

    let mut flex = Flex::new(0, 0, 800, 600, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let tab_bar = TabBar::new(0, 30, 800, style, *sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_font(EDITOR_FONT);
    text_editor.set_text_size(EDITOR_FONT_SIZE);
    text_editor.set_linenumber_font(EDITOR_FONT);
    text_editor.set_linenumber_size(EDITOR_FONT_SIZE - 2);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    // Route the close button through the dispatch loop so dirty tabs get asked about
    let s = *sender;
    wind.set_callback(move |_| {
        if app::event() == Event::Close {
            s.send(Message::WindowClose);
        }
    });

    MainWidgets {
        wind,
        flex,
        menu,
        tab_bar,
        text_editor,
    }
}
