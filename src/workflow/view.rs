use crate::api::{ClientError, HistoryEntry, PredictionResult};

pub const GENERIC_FAILURE: &str = "Prediction failed.";

/// Formats a [0, 1] probability as a percentage with two decimals, e.g. `87.34%`.
///
/// Half-way values round up (`0.00125` is `0.13%`); `{:.2}` alone would round them
/// to even.
pub fn format_confidence(confidence: f64) -> String {
    let hundredths = (confidence * 100.0 * 100.0).round();
    format!("{:.2}%", hundredths / 100.0)
}

/// The upload indicator. It only ever shows the reset state; upload progress
/// is not measured.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub fraction: f32,
    pub text: String,
}

impl ProgressView {
    pub fn reset() -> Self {
        Self {
            fraction: 0.0,
            text: "0%".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub file_name: String,
    pub label: String,
    pub confidence_text: String,
    pub inference_time_text: String,
    pub model: Option<String>,
    pub created_at: Option<String>,
}

impl ResultView {
    pub fn new(file_name: &str, result: &PredictionResult) -> Self {
        Self {
            file_name: file_name.to_string(),
            label: result.label.clone(),
            confidence_text: format_confidence(result.confidence),
            inference_time_text: result.inference_time.to_string(),
            model: result.model.clone(),
            created_at: result.created_at.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    /// 1-based position in the server's ordering
    pub index: usize,
    pub filename: String,
    pub label: String,
    pub confidence_text: String,
    pub created_at: String,
}

pub fn history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| HistoryRow {
            index: idx + 1,
            filename: entry.filename.clone(),
            label: entry.label.clone(),
            confidence_text: format_confidence(entry.confidence),
            created_at: entry.created_at.clone(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeKind {
    /// The server answered with an `error` message.
    Rejected,
    /// The request did not produce a usable answer.
    Failed,
}

/// Blocking message shown to the user after a failed submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn rejected(error: &str) -> Self {
        Self {
            kind: NoticeKind::Rejected,
            message: format!("Error: {}", error),
            detail: None,
        }
    }

    pub fn failed(error: &ClientError) -> Self {
        Self {
            kind: NoticeKind::Failed,
            message: GENERIC_FAILURE.to_string(),
            detail: Some(error.to_string()),
        }
    }

    pub fn text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}\n{}", self.message, detail),
            None => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(filename: &str, label: &str, confidence: f64, created_at: &str) -> HistoryEntry {
        HistoryEntry {
            filename: filename.to_string(),
            label: label.to_string(),
            confidence,
            created_at: created_at.to_string(),
            id: None,
        }
    }

    #[test]
    fn test_confidence_formatting() {
        assert_eq!(format_confidence(0.8734), "87.34%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
        assert_eq!(format_confidence(0.5), "50.00%");
    }

    #[test]
    fn test_confidence_half_way_rounds_up() {
        assert_eq!(format_confidence(0.00125), "0.13%");
        assert_eq!(format_confidence(0.00625), "0.63%");
        assert_eq!(format_confidence(0.10125), "10.13%");
        assert_eq!(format_confidence(0.12125), "12.13%");
        assert_eq!(format_confidence(0.12124), "12.12%");
    }

    #[test]
    fn test_result_view_renders_inference_time_as_sent() {
        let result = PredictionResult {
            label: "REAL".to_string(),
            confidence: 0.8734,
            inference_time: serde_json::Number::from(120),
            model: None,
            created_at: None,
            id: None,
        };
        let view = ResultView::new("clip.mp4", &result);
        assert_eq!(view.label, "REAL");
        assert_eq!(view.confidence_text, "87.34%");
        assert_eq!(view.inference_time_text, "120");
        assert_eq!(view.file_name, "clip.mp4");
    }

    #[test]
    fn test_history_rows_are_numbered_in_order() {
        let rows = history_rows(&[
            entry("b.mp4", "FAKE", 0.6, "17/10/2026, 10:00:00 AM"),
            entry("a.mp4", "REAL", 0.9912, "16/10/2026, 09:00:00 PM"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].filename, "b.mp4");
        assert_eq!(rows[0].confidence_text, "60.00%");
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].confidence_text, "99.12%");
        assert_eq!(rows[1].created_at, "16/10/2026, 09:00:00 PM");
    }

    #[test]
    fn test_rejected_notice_keeps_server_message() {
        let notice = Notice::rejected("file too large");
        assert_eq!(notice.kind, NoticeKind::Rejected);
        assert!(notice.text().contains("file too large"));
    }

    #[test]
    fn test_failed_notice_is_generic_with_detail() {
        let notice = Notice::failed(&ClientError::SignInRequired);
        assert_eq!(notice.message, GENERIC_FAILURE);
        assert_eq!(notice.text(), "Prediction failed.\nSign-in required");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_confidence_has_two_decimals_and_percent(confidence in 0.0f64..=1.0f64) {
            let text = format_confidence(confidence);
            prop_assert!(text.ends_with('%'));
            let number = &text[..text.len() - 1];
            let (_, decimals) = number.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            let value: f64 = number.parse().unwrap();
            prop_assert!((value - confidence * 100.0).abs() <= 0.005 + 1e-9);
        }

        #[test]
        fn prop_one_row_per_entry_with_sequential_index(
            confidences in proptest::collection::vec(0.0f64..=1.0f64, 0..20)
        ) {
            let entries: Vec<HistoryEntry> = confidences
                .iter()
                .enumerate()
                .map(|(i, c)| entry(&format!("clip-{}.mp4", i), "REAL", *c, "now"))
                .collect();
            let rows = history_rows(&entries);
            prop_assert_eq!(rows.len(), entries.len());
            for (i, row) in rows.iter().enumerate() {
                prop_assert_eq!(row.index, i + 1);
                prop_assert_eq!(&row.filename, &entries[i].filename);
            }
        }
    }
}
