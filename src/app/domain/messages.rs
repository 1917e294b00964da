use super::document::DocumentId;
use super::settings::Theme;
use crate::app::services::export::ExportFormat;

/// All messages that can be sent through the UI channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs(ExportFormat),
    FileQuit,
    WindowClose,

    // Tabs
    TabSwitch(DocumentId),
    TabClose(DocumentId),
    TabCloseActive,
    TabRename(DocumentId),
    TabNext,
    TabPrevious,

    // Edit
    EditUndo,
    EditCut,
    EditCopy,
    EditPaste,
    EditDelete,
    SelectAll,
    ShowFind,
    FindNext,
    ShowFindAll,
    ShowReplace,
    InsertDateTime,

    // View
    ToggleLineNumbers,
    ToggleAutoSave,
    ToggleHighlighting,
    ToggleSplitScreen,
    SetTheme(Theme),

    // Split screen
    SplitSelectLeft(DocumentId),
    SplitSelectRight(DocumentId),
    SplitScroll(usize),
    SplitClose,

    // Background
    BufferModified(DocumentId),
    AutoSaveTick,
}
