use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::{Button, ReturnButton},
    dialog,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use super::run_dialog;

/// What the user asked for in the Replace dialog.
pub struct ReplaceRequest {
    pub find: String,
    pub replace: String,
}

/// Ask for a search string. `title` is "Find" or "Find All".
///
/// Returns None on Cancel or when nothing was typed.
pub fn show_find_dialog(title: &str, initial: &str) -> Option<String> {
    let mut dialog_win = Window::default()
        .with_size(400, 110)
        .with_label(title)
        .center_screen();

    Frame::default().with_pos(20, 20).with_size(80, 30).with_label("Find what:");
    let mut find_input = Input::default().with_pos(110, 20).with_size(270, 30);
    find_input.set_value(initial);

    let mut ok_btn = ReturnButton::default()
        .with_pos(190, 65).with_size(90, 30).with_label(title);
    let mut cancel_btn = Button::default()
        .with_pos(290, 65).with_size(90, 30).with_label("Cancel");

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.show();
    let _ = find_input.take_focus();

    let result: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog_win.clone();
    ok_btn.set_callback(move |_| {
        let query = find_input.value();
        if query.is_empty() {
            dialog::message_default("Please enter text to find");
            return;
        }
        *result_ok.borrow_mut() = Some(query);
        dialog_ok.clone().hide();
    });

    let dialog_close = dialog_win.clone();
    cancel_btn.set_callback(move |_| {
        dialog_close.clone().hide();
    });

    let dialog_x = dialog_win.clone();
    dialog_win.set_callback(move |_| {
        dialog_x.clone().hide();
    });

    run_dialog(&dialog_win);
    result.borrow_mut().take()
}

/// Ask for a search string and its replacement. The replacement may be
/// empty (delete every match).
pub fn show_replace_dialog(initial: &str) -> Option<ReplaceRequest> {
    let mut dialog_win = Window::default()
        .with_size(400, 150)
        .with_label("Replace")
        .center_screen();

    Frame::default().with_pos(20, 20).with_size(80, 30).with_label("Find what:");
    let mut find_input = Input::default().with_pos(110, 20).with_size(270, 30);
    find_input.set_value(initial);

    Frame::default().with_pos(20, 60).with_size(80, 30).with_label("Replace:");
    let replace_input = Input::default().with_pos(110, 60).with_size(270, 30);

    let mut replace_all_btn = ReturnButton::default()
        .with_pos(170, 105).with_size(110, 30).with_label("Replace All");
    let mut cancel_btn = Button::default()
        .with_pos(290, 105).with_size(90, 30).with_label("Cancel");

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.show();
    let _ = find_input.take_focus();

    let result: Rc<RefCell<Option<ReplaceRequest>>> = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog_win.clone();
    replace_all_btn.set_callback(move |_| {
        let query = find_input.value();
        if query.is_empty() {
            dialog::message_default("Please enter text to find");
            return;
        }
        *result_ok.borrow_mut() = Some(ReplaceRequest {
            find: query,
            replace: replace_input.value(),
        });
        dialog_ok.clone().hide();
    });

    let dialog_close = dialog_win.clone();
    cancel_btn.set_callback(move |_| {
        dialog_close.clone().hide();
    });

    let dialog_x = dialog_win.clone();
    dialog_win.set_callback(move |_| {
        dialog_x.clone().hide();
    });

    run_dialog(&dialog_win);
    result.borrow_mut().take()
}
