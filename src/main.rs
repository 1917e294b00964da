use std::env;
use std::path::PathBuf;

use fltk::app;
use log::LevelFilter;

use tab_pad::app::{AppSettings, Message};
use tab_pad::ui::app_window::AppWindow;

fn init_logging() {
    let mut logger = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("tab_pad", LevelFilter::Debug);
    }
    logger.init();
}

fn main() {
    init_logging();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings_path = AppSettings::get_config_path();
    let settings = AppSettings::load_from(&settings_path);
    log::debug!("Settings from {}: {:?}", settings_path.display(), settings);

    let mut window = AppWindow::new(sender, settings, settings_path);
    for arg in env::args().skip(1) {
        window.open_file(&PathBuf::from(arg));
    }
    window.show();

    // The ticker itself decides whether a tick writes anything
    let interval = window.state.autosave.interval().as_secs_f64();
    app::add_timeout3(interval, move |handle| {
        sender.send(Message::AutoSaveTick);
        app::repeat_timeout3(interval, handle);
    });

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::FileNew => window.file_new(),
            Message::FileOpen => window.file_open(),
            Message::FileSave => window.file_save(),
            Message::FileSaveAs(format) => window.file_save_as(format),
            Message::FileQuit | Message::WindowClose => {
                if window.file_quit() {
                    app.quit();
                }
            }

            Message::TabSwitch(id) => window.switch_to(id),
            Message::TabClose(id) => window.close_tab(id),
            Message::TabCloseActive => window.close_active_tab(),
            Message::TabRename(id) => window.rename_tab(id),
            Message::TabNext => window.next_tab(),
            Message::TabPrevious => window.previous_tab(),

            Message::EditUndo => window.undo(),
            Message::EditCut => window.cut(),
            Message::EditCopy => window.copy(),
            Message::EditPaste => window.paste(),
            Message::EditDelete => window.delete(),
            Message::SelectAll => window.select_all(),
            Message::ShowFind => window.show_find(),
            Message::FindNext => window.find_next(),
            Message::ShowFindAll => window.show_find_all(),
            Message::ShowReplace => window.show_replace(),
            Message::InsertDateTime => window.insert_date_time(),

            Message::ToggleLineNumbers => window.toggle_line_numbers(),
            Message::ToggleAutoSave => window.toggle_auto_save(),
            Message::ToggleHighlighting => window.toggle_highlighting(),
            Message::ToggleSplitScreen => window.toggle_split_screen(),
            Message::SetTheme(theme) => window.set_theme(theme),

            Message::SplitSelectLeft(id) => window.split_select_left(id),
            Message::SplitSelectRight(id) => window.split_select_right(id),
            Message::SplitScroll(top) => window.split_scroll(top),
            Message::SplitClose => window.split_close(),

            Message::BufferModified(id) => window.buffer_modified(id),
            Message::AutoSaveTick => window.auto_save_tick(),
        }
    }
}
