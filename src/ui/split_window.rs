use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, MouseWheel, Sender},
    enums::Event,
    group::{Flex, FlexType},
    menu::Choice,
    prelude::*,
    text::{TextBuffer, TextDisplay},
    valuator::{Scrollbar, ScrollbarType},
    window::Window,
};

use super::theme::{EDITOR_FONT, EDITOR_FONT_SIZE, style_text_widget};
use crate::app::controllers::split_view::PaneSnapshot;
use crate::app::domain::document::DocumentId;
use crate::app::domain::messages::Message;
use crate::app::services::line_numbers::{gutter_width_px, line_count};
use crate::app::services::theme::EditorStyle;

const WHEEL_LINES: f64 = 3.0;

struct Pane {
    choice: Choice,
    display: TextDisplay,
    buffer: TextBuffer,
}

impl Pane {
    fn new(sender: Sender<Message>, ids: Rc<RefCell<Vec<DocumentId>>>, left: bool) -> Self {
        let mut col = Flex::default().column();
        let mut choice = Choice::default();
        col.fixed(&choice, 28);
        let buffer = TextBuffer::default();
        let mut display = TextDisplay::default();
        display.set_buffer(buffer.clone());
        display.set_text_font(EDITOR_FONT);
        display.set_text_size(EDITOR_FONT_SIZE);
        col.end();

        choice.set_callback(move |c| {
            let Ok(idx) = usize::try_from(c.value()) else {
                return;
            };
            if let Some(id) = ids.borrow().get(idx).copied() {
                if left {
                    sender.send(Message::SplitSelectLeft(id));
                } else {
                    sender.send(Message::SplitSelectRight(id));
                }
            }
        });

        Self { choice, display, buffer }
    }

    fn show(&mut self, snapshot: &PaneSnapshot, ids: &[DocumentId], line_numbers: bool) {
        if let Some(idx) = ids.iter().position(|id| *id == snapshot.id) {
            self.choice.set_value(idx as i32);
        }
        self.buffer.set_text(&snapshot.text);
        let width = if line_numbers {
            gutter_width_px(line_count(&snapshot.text))
        } else {
            0
        };
        self.display.set_linenumber_width(width);
    }
}

/// Two read-only panes side by side, each showing a tab picked from its
/// drop-down, moved together by one scrollbar.
pub struct SplitWindow {
    wind: Window,
    left: Pane,
    right: Pane,
    scrollbar: Scrollbar,
    ids: Rc<RefCell<Vec<DocumentId>>>,
}

impl SplitWindow {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut wind = Window::default().with_size(1000, 600).with_label("Split Screen");
        let ids: Rc<RefCell<Vec<DocumentId>>> = Rc::new(RefCell::new(Vec::new()));

        let mut row = Flex::default_fill();
        row.set_type(FlexType::Row);
        let left = Pane::new(sender, ids.clone(), true);
        let right = Pane::new(sender, ids.clone(), false);
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_type(ScrollbarType::Vertical);
        scrollbar.set_step(1.0, 1);
        row.fixed(&scrollbar, 16);
        row.end();

        wind.end();
        wind.resizable(&row);

        scrollbar.set_callback(move |sb| {
            sender.send(Message::SplitScroll(sb.value().max(1.0) as usize));
        });

        for mut display in [left.display.clone(), right.display.clone()] {
            let sb = scrollbar.clone();
            display.handle(move |_, event| {
                if event != Event::MouseWheel {
                    return false;
                }
                let delta = match app::event_dy() {
                    MouseWheel::Down => WHEEL_LINES,
                    MouseWheel::Up => -WHEEL_LINES,
                    _ => 0.0,
                };
                let top = (sb.value() + delta).clamp(sb.minimum(), sb.maximum().max(1.0));
                sender.send(Message::SplitScroll(top as usize));
                true
            });
        }

        wind.set_callback(move |_| {
            if app::event() == Event::Close {
                sender.send(Message::SplitClose);
            }
        });

        Self {
            wind,
            left,
            right,
            scrollbar,
            ids,
        }
    }

    pub fn show(&mut self) {
        self.wind.show();
    }

    pub fn hide(&mut self) {
        self.wind.hide();
    }

    /// Refill both panes. `tabs` lists every open tab as (id, title), in
    /// tab order, for the drop-downs.
    pub fn update(
        &mut self,
        tabs: &[(DocumentId, String)],
        panes: (&PaneSnapshot, &PaneSnapshot),
        top_line: usize,
        line_numbers: bool,
    ) {
        let ids: Vec<DocumentId> = tabs.iter().map(|(id, _)| *id).collect();
        for choice in [&mut self.left.choice, &mut self.right.choice] {
            choice.clear();
            for (_, title) in tabs {
                // '/' would nest the entry in a submenu
                choice.add_choice(&title.replace('/', "\\/"));
            }
        }
        *self.ids.borrow_mut() = ids.clone();

        self.left.show(panes.0, &ids, line_numbers);
        self.right.show(panes.1, &ids, line_numbers);

        let longest = line_count(&panes.0.text).max(line_count(&panes.1.text));
        self.scrollbar.set_bounds(1.0, longest.max(1) as f64);
        self.scroll_to(top_line);
    }

    /// Show line `top_line` at the top of both panes.
    pub fn scroll_to(&mut self, top_line: usize) {
        self.scrollbar.set_value(top_line as f64);
        self.left.display.scroll(top_line as i32, 0);
        self.right.display.scroll(top_line as i32, 0);
        self.wind.redraw();
    }

    pub fn apply_style(&mut self, style: &EditorStyle) {
        style_text_widget(&mut self.left.display, style);
        style_text_widget(&mut self.right.display, style);
    }
}
