use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::{AppSettings, Theme};
use crate::app::services::export::ExportFormat;

pub const LINE_NUMBERS_ITEM: &str = "View/Line Numbers";
pub const AUTO_SAVE_ITEM: &str = "View/Auto Save";
pub const HIGHLIGHT_ITEM: &str = "View/Syntax Highlighting";
pub const SPLIT_ITEM: &str = "View/Split Screen";

fn toggle_flag(on: bool) -> MenuFlag {
    if on { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle }
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings) {
    let s = sender;

    // File
    menu.add("File/New", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileNew) });
    menu.add("File/Open...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileOpen) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Save As/Text...", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSaveAs(ExportFormat::PlainText)) });
    menu.add("File/Save As/PDF...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSaveAs(ExportFormat::Pdf)) });
    menu.add("File/Save As/Batch...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSaveAs(ExportFormat::Batch)) });
    menu.add("File/Save As/CMD...", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::FileSaveAs(ExportFormat::Command)) });
    menu.add("File/Close Tab", Shortcut::Ctrl | 'w', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabCloseActive) });
    menu.add("File/Next Tab", Shortcut::Ctrl | Key::Tab, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabNext) });
    menu.add("File/Previous Tab", Shortcut::Ctrl | Shortcut::Shift | Key::Tab, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::TabPrevious) });
    menu.add("File/Exit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Undo", Shortcut::Ctrl | 'z', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::EditUndo) });
    menu.add("Edit/Cut", Shortcut::Ctrl | 'x', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCut) });
    menu.add("Edit/Copy", Shortcut::Ctrl | 'c', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCopy) });
    menu.add("Edit/Paste", Shortcut::Ctrl | 'v', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditPaste) });
    menu.add("Edit/Delete", Shortcut::None | Key::Delete, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::EditDelete) });
    menu.add("Edit/Find...", Shortcut::Ctrl | 'f', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowFind) });
    menu.add("Edit/Find Next", Shortcut::None | Key::F3, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FindNext) });
    menu.add("Edit/Find All...", Shortcut::Ctrl | Shortcut::Shift | 'f', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowFindAll) });
    menu.add("Edit/Replace...", Shortcut::Ctrl | 'h', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ShowReplace) });
    menu.add("Edit/Select All", Shortcut::Ctrl | 'a', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SelectAll) });
    menu.add("Edit/Time\\/Date", Shortcut::None | Key::F5, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::InsertDateTime) });

    // View
    menu.add(LINE_NUMBERS_ITEM, Shortcut::None, toggle_flag(settings.show_line_numbers), { let s = *s; move |_| s.send(Message::ToggleLineNumbers) });
    menu.add(AUTO_SAVE_ITEM, Shortcut::None, toggle_flag(settings.auto_save), { let s = *s; move |_| s.send(Message::ToggleAutoSave) });
    menu.add(HIGHLIGHT_ITEM, Shortcut::None, toggle_flag(false), { let s = *s; move |_| s.send(Message::ToggleHighlighting) });
    menu.add(SPLIT_ITEM, Shortcut::None, toggle_flag(false), { let s = *s; move |_| s.send(Message::ToggleSplitScreen) });
    let light_flag = if settings.theme == Theme::Light { MenuFlag::Radio | MenuFlag::Value } else { MenuFlag::Radio };
    menu.add("View/Theme/Light", Shortcut::None, light_flag, { let s = *s; move |_| s.send(Message::SetTheme(Theme::Light)) });
    let dark_flag = if settings.theme == Theme::Dark { MenuFlag::Radio | MenuFlag::Value } else { MenuFlag::Radio };
    menu.add("View/Theme/Dark", Shortcut::None, dark_flag, { let s = *s; move |_| s.send(Message::SetTheme(Theme::Dark)) });
}

/// Set a toggle item's check mark.
pub fn set_checked(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx >= 0
        && let Some(mut item) = menu.at(idx)
    {
        if checked {
            item.set();
        } else {
            item.clear();
        }
    }
}
