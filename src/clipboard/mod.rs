//! Clipboard export of investigation reports and record cards.
//!
//! Everything that reaches the clipboard originates in the external
//! service's free-text fields, so the text is scrubbed of escape sequences
//! and control characters on the way out. Validation failures name the
//! artifact being exported (report vs. record card).

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::PersonRecord;
use crate::report::build_record_card;

/// Upper bound for one export. A full report over a large result set is a
/// few hundred KB; anything past this indicates a caller bug, not a report.
const MAX_EXPORT_SIZE: usize = 1024 * 1024;

/// What is being exported. Selects the validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Report,
    RecordCard,
}

impl ExportKind {
    fn label(&self) -> &'static str {
        match self {
            ExportKind::Report => "report",
            ExportKind::RecordCard => "record card",
        }
    }
}

/// Destination for export text (allows mocking in tests)
trait ClipboardSink {
    fn put(&mut self, text: &str) -> Result<()>;
}

/// The real system clipboard, initialized lazily so validation errors
/// surface even in headless environments.
struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn put(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Scrub service-originated text for export.
///
/// CSI escape sequences are removed whole, so their parameter bytes do not
/// leak into the exported text; remaining control characters are dropped
/// except the newlines and tabs the report layout relies on.
pub fn sanitize_export_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            while let Some(&next) = chars.peek() {
                chars.next();
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else if !c.is_control() || c == '\n' || c == '\t' {
            out.push(c);
        }
    }

    out
}

fn validate_export(kind: ExportKind, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Refusing to copy an empty {}", kind.label());
    }

    if text.len() > MAX_EXPORT_SIZE {
        anyhow::bail!(
            "The {} is too large to copy ({} bytes, max {})",
            kind.label(),
            text.len(),
            MAX_EXPORT_SIZE
        );
    }

    Ok(())
}

fn export_with_sink(kind: ExportKind, text: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
    validate_export(kind, text)?;
    sink.put(&sanitize_export_text(text))
}

/// Copy an assembled report or record card onto the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The text is empty/whitespace or exceeds the export size bound
/// - Clipboard access is denied or unavailable (headless environment)
pub fn copy_text(kind: ExportKind, text: &str) -> Result<()> {
    export_with_sink(kind, text, &mut SystemClipboard)
}

/// Build the share card for one record and copy it.
pub fn copy_record_card(record: &PersonRecord) -> Result<()> {
    copy_text(ExportKind::RecordCard, &build_record_card(record))
}
