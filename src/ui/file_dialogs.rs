use std::path::PathBuf;

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

use crate::app::services::export::ExportFormat;

/// Filter for File > Open: text first, then anything.
fn open_filter() -> String {
    format!("{}\nAll Files\t*", ExportFormat::PlainText.filter())
}

fn run_chooser(mut nfc: NativeFileChooser) -> Option<PathBuf> {
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

pub fn native_open_dialog() -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
    nfc.set_title("Open File");
    nfc.set_filter(&open_filter());
    run_chooser(nfc)
}

/// Ask where to write the current tab as `format`.
pub fn native_save_dialog(format: ExportFormat) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_title(&format!("Save As {}", format.description()));
    nfc.set_filter(&format.filter());
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    run_chooser(nfc)
}
