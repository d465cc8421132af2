// Plain-text rendering of the result card and history table for terminal output

use itertools::Itertools;

use crate::workflow::{HistoryRow, ResultView};

const HISTORY_HEADERS: [&str; 5] = ["#", "File", "Label", "Confidence", "Created"];

pub fn result_report(result: &ResultView) -> String {
    let mut lines = vec![
        format!("File:           {}", result.file_name),
        format!("Prediction:     {}", result.label),
        format!("Confidence:     {}", result.confidence_text),
        format!("Inference time: {}", result.inference_time_text),
    ];
    if let Some(model) = &result.model {
        lines.push(format!("Model:          {}", model));
    }
    if let Some(created_at) = &result.created_at {
        lines.push(format!("Created:        {}", created_at));
    }
    lines.join("\n")
}

pub fn history_table(rows: &[HistoryRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.filename.clone(),
                row.label.clone(),
                row.confidence_text.clone(),
                row.created_at.clone(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..HISTORY_HEADERS.len())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(HISTORY_HEADERS[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .join("  ")
            .trim_end()
            .to_string()
    };

    std::iter::once(format_line(HISTORY_HEADERS.to_vec()))
        .chain(std::iter::once(
            widths.iter().map(|w| "-".repeat(*w)).join("  "),
        ))
        .chain(
            cells
                .iter()
                .map(|row| format_line(row.iter().map(String::as_str).collect())),
        )
        .join("\n")
}
