use std::fmt::Write;

use digest_core::{AppViewModel, ResultPanel};

use super::constants::*;

/// Renders the whole screen: history list, then the result panel.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{HISTORY_TITLE}");
    if view.history.is_empty() {
        let _ = writeln!(out, "  {EMPTY_HISTORY}");
    }
    for row in &view.history {
        let marker = if row.copied { COPIED_MARKER } else { COPY_MARKER };
        let _ = writeln!(out, "  {:>2}. {marker:<8} {}", row.index + 1, row.url);
    }
    out.push('\n');

    if let Some(message) = &view.validation {
        let _ = writeln!(out, "! {message}");
        out.push('\n');
    }

    match &view.panel {
        ResultPanel::Empty => {}
        ResultPanel::Loading { url } => {
            let _ = writeln!(out, "Summarizing {url} ...");
        }
        ResultPanel::Error { heading, detail } => {
            let _ = writeln!(out, "{heading}");
            if !detail.is_empty() {
                let _ = writeln!(out, "  {detail}");
            }
        }
        ResultPanel::Summary { url, summary } => {
            let _ = writeln!(out, "{SUMMARY_TITLE}");
            let _ = writeln!(out, "  {url}");
            out.push('\n');
            for line in summary.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }

    out
}
