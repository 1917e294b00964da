use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw,
    enums::{Align, Color, Event, Font, Shortcut},
    menu::{MenuButton, MenuFlag},
    prelude::*,
    widget::Widget,
};

use super::theme::to_color;
use crate::app::domain::buffer::TextStore;
use crate::app::domain::document::{Document, DocumentId};
use crate::app::domain::messages::Message;
use crate::app::services::theme::EditorStyle;

pub const TAB_BAR_HEIGHT: i32 = 30;

const TAB_MIN_W: i32 = 60;
const TAB_MAX_W: i32 = 200;
const TAB_SPACING: i32 = 1;
const LABEL_PAD: i32 = 10;
const LABEL_FONT_SIZE: i32 = 12;
const CROSS_SIZE: i32 = 14;
const CROSS_RIGHT: i32 = 6;
const NEW_TAB_W: i32 = 28;
const NEW_TAB_GAP: i32 = 4;
const DIRTY_MARK: &str = "\u{25cf}";

struct Entry {
    id: DocumentId,
    label: String,
    current: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Spot {
    Tab(usize),
    Cross(usize),
    NewTab,
    Empty,
}

struct Colors {
    strip: Color,
    current: Color,
    other: Color,
    text: Color,
    dim_text: Color,
    hover: Color,
}

impl Colors {
    fn from_style(style: &EditorStyle) -> Self {
        Self {
            strip: to_color(style.gutter_background),
            current: to_color(style.background),
            other: to_color(style.gutter_background).darker(),
            text: to_color(style.foreground),
            dim_text: to_color(style.gutter_foreground),
            hover: to_color(style.selection_background),
        }
    }
}

struct Strip {
    entries: Vec<Entry>,
    colors: Colors,
    hover: Spot,
    sender: Sender<Message>,
}

/// One tab per open document. Left click switches, the cross or a middle
/// click closes, right click offers Rename and Close.
pub struct TabBar {
    pub widget: Widget,
    strip: Rc<RefCell<Strip>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, style: &EditorStyle, sender: Sender<Message>) -> Self {
        let strip = Rc::new(RefCell::new(Strip {
            entries: Vec::new(),
            colors: Colors::from_style(style),
            hover: Spot::Empty,
            sender,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let for_draw = strip.clone();
        widget.draw(move |wid| paint(wid, &for_draw.borrow()));

        let for_events = strip.clone();
        widget.handle(move |wid, event| on_event(wid, event, &for_events));

        Self { widget, strip }
    }

    /// Mirror the registry: titles, dirty marks and the current tab.
    pub fn rebuild<B: TextStore>(&mut self, documents: &[Document<B>], current: Option<DocumentId>) {
        {
            let mut strip = self.strip.borrow_mut();
            strip.entries = documents
                .iter()
                .map(|doc| Entry {
                    id: doc.id,
                    label: if doc.is_dirty() {
                        format!("{} {}", DIRTY_MARK, doc.display_name)
                    } else {
                        doc.display_name.clone()
                    },
                    current: current == Some(doc.id),
                })
                .collect();
            strip.hover = Spot::Empty;
        }
        self.widget.redraw();
    }

    pub fn apply_style(&mut self, style: &EditorStyle) {
        self.strip.borrow_mut().colors = Colors::from_style(style);
        self.widget.redraw();
    }
}

// --- Geometry (x offsets relative to the widget) ---

fn tab_width(widget_w: i32, count: usize) -> i32 {
    if count == 0 {
        return TAB_MAX_W;
    }
    let count = count as i32;
    let room = widget_w - NEW_TAB_W - NEW_TAB_GAP - TAB_SPACING * (count - 1);
    (room / count).clamp(TAB_MIN_W, TAB_MAX_W)
}

fn tab_x(index: usize, width: i32) -> i32 {
    index as i32 * (width + TAB_SPACING)
}

fn cross_x(index: usize, width: i32) -> i32 {
    tab_x(index, width) + width - CROSS_RIGHT - CROSS_SIZE
}

fn new_tab_x(count: usize, width: i32) -> i32 {
    tab_x(count, width) + NEW_TAB_GAP
}

fn spot_at(count: usize, widget_w: i32, x: i32, y: i32) -> Spot {
    if !(0..TAB_BAR_HEIGHT).contains(&y) {
        return Spot::Empty;
    }
    let width = tab_width(widget_w, count);
    let slot = x / (width + TAB_SPACING);
    if x >= 0 && (slot as usize) < count {
        let index = slot as usize;
        if x >= tab_x(index, width) + width {
            return Spot::Empty;
        }
        let cx = cross_x(index, width);
        let cy = (TAB_BAR_HEIGHT - CROSS_SIZE) / 2;
        if (cx..=cx + CROSS_SIZE).contains(&x) && (cy..=cy + CROSS_SIZE).contains(&y) {
            return Spot::Cross(index);
        }
        return Spot::Tab(index);
    }
    let nx = new_tab_x(count, width);
    if (nx..nx + NEW_TAB_W).contains(&x) {
        Spot::NewTab
    } else {
        Spot::Empty
    }
}

/// Longest prefix of `label` that fits `max_w` pixels, with "..." when cut.
fn clip_label(label: &str, max_w: i32) -> String {
    draw::set_font(Font::Helvetica, LABEL_FONT_SIZE);
    if draw::measure(label, false).0 <= max_w {
        return label.to_string();
    }
    let mut fitted = String::new();
    for ch in label.chars() {
        let mut next = fitted.clone();
        next.push(ch);
        if draw::measure(&format!("{next}..."), false).0 > max_w {
            break;
        }
        fitted = next;
    }
    format!("{fitted}...")
}

// --- Drawing ---

fn paint(wid: &Widget, strip: &Strip) {
    let (wx, wy, ww, wh) = (wid.x(), wid.y(), wid.w(), wid.h());
    let colors = &strip.colors;
    draw::set_draw_color(colors.strip);
    draw::draw_rectf(wx, wy, ww, wh);

    let width = tab_width(ww, strip.entries.len());
    for (index, entry) in strip.entries.iter().enumerate() {
        let x = wx + tab_x(index, width);
        let (top, fill, ink) = if entry.current {
            (wy, colors.current, colors.text)
        } else {
            (wy + 3, colors.other, colors.dim_text)
        };
        draw::set_draw_color(fill);
        draw::draw_rectf(x, top, width, wy + wh - top);
        if entry.current {
            draw::set_draw_color(colors.hover);
            draw::draw_rectf(x, wy, width, 2);
        }

        let label_w = width - 2 * LABEL_PAD - CROSS_RIGHT - CROSS_SIZE;
        draw::set_draw_color(ink);
        draw::set_font(Font::Helvetica, LABEL_FONT_SIZE);
        draw::draw_text2(&clip_label(&entry.label, label_w), x + LABEL_PAD, wy, label_w, wh, Align::Left);

        let cx = wx + cross_x(index, width);
        let cy = wy + (wh - CROSS_SIZE) / 2;
        if strip.hover == Spot::Cross(index) {
            draw::set_draw_color(colors.hover);
            draw::draw_rectf(cx - 1, cy - 1, CROSS_SIZE + 2, CROSS_SIZE + 2);
        }
        draw::set_draw_color(ink);
        draw::set_font(Font::HelveticaBold, 16);
        draw::draw_text2("\u{00d7}", cx, cy, CROSS_SIZE, CROSS_SIZE, Align::Center);
    }

    draw::set_draw_color(colors.dim_text);
    draw::set_font(Font::HelveticaBold, 18);
    let nx = wx + new_tab_x(strip.entries.len(), width);
    draw::draw_text2("+", nx, wy, NEW_TAB_W, wh, Align::Center);
}

// --- Events ---

fn popup_tab_menu(sender: Sender<Message>, id: DocumentId) {
    // Anchored at the pointer; a 1x1 button gives Wayland a real rectangle
    let mut menu = MenuButton::new(app::event_x(), app::event_y(), 1, 1, None);
    menu.add_emit("Rename...", Shortcut::None, MenuFlag::Normal, sender, Message::TabRename(id));
    menu.add_emit("Close", Shortcut::None, MenuFlag::Normal, sender, Message::TabClose(id));
    menu.popup();
}

fn pointer_spot(wid: &Widget, strip: &Strip) -> Spot {
    let x = app::event_x() - wid.x();
    let y = app::event_y() - wid.y();
    spot_at(strip.entries.len(), wid.w(), x, y)
}

fn on_event(wid: &mut Widget, event: Event, strip: &Rc<RefCell<Strip>>) -> bool {
    match event {
        Event::Push => {
            let (spot, target, sender) = {
                let strip = strip.borrow();
                let spot = pointer_spot(wid, &strip);
                let target = match spot {
                    Spot::Tab(i) | Spot::Cross(i) => Some(strip.entries[i].id),
                    _ => None,
                };
                (spot, target, strip.sender)
            };
            let button = app::event_button();

            match (spot, target) {
                (Spot::NewTab, _) if button == 1 => sender.send(Message::FileNew),
                (Spot::Cross(_), Some(id)) if button == 1 => sender.send(Message::TabClose(id)),
                (_, Some(id)) => match button {
                    1 => sender.send(Message::TabSwitch(id)),
                    2 => sender.send(Message::TabClose(id)),
                    3 => popup_tab_menu(sender, id),
                    _ => return false,
                },
                _ => return false,
            }
            true
        }
        Event::Move | Event::Leave => {
            let changed = {
                let mut strip = strip.borrow_mut();
                let spot = if event == Event::Move { pointer_spot(wid, &strip) } else { Spot::Empty };
                let changed = spot != strip.hover;
                strip.hover = spot;
                changed
            };
            if changed {
                wid.redraw();
            }
            event == Event::Move
        }
        _ => false,
    }
}
