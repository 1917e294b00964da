use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::app::infrastructure::error::{AppError, Result};

/// US Letter, in points.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;
pub const LEFT_MARGIN_PT: f32 = 72.0;
pub const TOP_BASELINE_PT: f32 = 750.0;
pub const BOTTOM_MARGIN_PT: f32 = 50.0;
pub const LINE_ADVANCE_PT: f32 = 15.0;
pub const FONT_SIZE_PT: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    PlainText,
    Pdf,
    Batch,
    Command,
}

impl ExportFormat {
    pub fn default_extension(self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Pdf => "pdf",
            Self::Batch => "bat",
            Self::Command => "cmd",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::PlainText => "Text Files",
            Self::Pdf => "PDF Files",
            Self::Batch => "Batch Files",
            Self::Command => "Command Files",
        }
    }

    /// File dialog filter, "Description\tPattern".
    pub fn filter(self) -> String {
        format!("{}\t*.{}", self.description(), self.default_extension())
    }

    /// Whether saving in this format makes the tab's file binding point at
    /// the written file. A PDF is a one-way export.
    pub fn binds_file(self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

/// Append the format's extension when `path` has none.
pub fn with_default_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.default_extension())
    }
}

/// Write `text` to `path` in `format`.
pub fn export(format: ExportFormat, path: &Path, text: &str) -> Result<()> {
    match format {
        ExportFormat::PlainText | ExportFormat::Batch | ExportFormat::Command => {
            write_text(path, text)
        }
        ExportFormat::Pdf => export_pdf(path, text),
    }
}

/// Write the buffer verbatim.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

/// One line of text placed on a PDF page, positions in points from the
/// bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Place every source line on pages, top to bottom.
///
/// Lines are never wrapped; a line that would sit below the bottom margin
/// starts a new page.
pub fn layout_pdf_pages(text: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = TOP_BASELINE_PT;

    for line in text.split('\n') {
        if y < BOTTOM_MARGIN_PT {
            pages.push(Vec::new());
            y = TOP_BASELINE_PT;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                text: line.trim_end_matches('\r').to_string(),
                x: LEFT_MARGIN_PT,
                y,
            });
        }
        y -= LINE_ADVANCE_PT;
    }

    pages
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn pdf_err(e: impl std::fmt::Display) -> AppError {
    AppError::Pdf(e.to_string())
}

/// Render `text` as a monospaced PDF at `path`.
pub fn export_pdf(path: &Path, text: &str) -> Result<()> {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Document")
        .to_string();
    let pages = layout_pdf_pages(text);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Text");
    let font = doc.add_builtin_font(BuiltinFont::Courier).map_err(pdf_err)?;

    for (index, lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Text")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines {
            layer.use_text(line.text.clone(), FONT_SIZE_PT, mm(line.x), mm(line.y), &font);
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer).map_err(pdf_err)?;
    log::debug!("Exported {} page(s) to {}", pages.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::PlainText.default_extension(), "txt");
        assert_eq!(ExportFormat::Pdf.default_extension(), "pdf");
        assert_eq!(ExportFormat::Batch.default_extension(), "bat");
        assert_eq!(ExportFormat::Command.default_extension(), "cmd");
    }

    #[test]
    fn test_filter_format() {
        assert_eq!(ExportFormat::Batch.filter(), "Batch Files\t*.bat");
    }

    #[test]
    fn test_only_pdf_skips_binding() {
        assert!(ExportFormat::PlainText.binds_file());
        assert!(ExportFormat::Batch.binds_file());
        assert!(ExportFormat::Command.binds_file());
        assert!(!ExportFormat::Pdf.binds_file());
    }

    #[test]
    fn test_with_default_extension() {
        let p = with_default_extension(Path::new("/tmp/build"), ExportFormat::Batch);
        assert_eq!(p, PathBuf::from("/tmp/build.bat"));
        let p = with_default_extension(Path::new("/tmp/notes.md"), ExportFormat::PlainText);
        assert_eq!(p, PathBuf::from("/tmp/notes.md"));
    }

    #[test]
    fn test_script_exports_are_verbatim() {
        let dir = tempdir().unwrap();
        let text = "@echo off\r\necho hi\n";
        for format in [ExportFormat::PlainText, ExportFormat::Batch, ExportFormat::Command] {
            let path = dir.path().join(format!("out.{}", format.default_extension()));
            export(format, &path, text).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), text);
        }
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(write_text(&path, "x"), Err(AppError::Io(_))));
    }

    #[test]
    fn test_layout_single_page() {
        let pages = layout_pdf_pages("first\nsecond");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0], PlacedLine { text: "first".into(), x: 72.0, y: 750.0 });
        assert_eq!(pages[0][1].y, 735.0);
    }

    #[test]
    fn test_layout_paginates_at_bottom_margin() {
        // Baselines 750, 735, ... 60 fit: 47 lines per page
        let text = vec!["x"; 48].join("\n");
        let pages = layout_pdf_pages(&text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 47);
        assert_eq!(pages[0].last().unwrap().y, 60.0);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1][0].y, 750.0);
    }

    #[test]
    fn test_layout_does_not_wrap_long_lines() {
        let long = "y".repeat(500);
        let pages = layout_pdf_pages(&long);
        assert_eq!(pages[0].len(), 1);
        assert_eq!(pages[0][0].text.len(), 500);
    }

    #[test]
    fn test_layout_strips_carriage_returns() {
        let pages = layout_pdf_pages("a\r\nb");
        assert_eq!(pages[0][0].text, "a");
    }

    #[test]
    fn test_pdf_file_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        let text = vec!["line of text"; 100].join("\n");
        export_pdf(&path, &text).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
