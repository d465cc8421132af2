use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::FakescanApp;

const ROW_HEIGHT: f32 = 20.;

impl FakescanApp {
    /// Table of past predictions. Hidden until the first successful refresh.
    pub(crate) fn history_view(&mut self, ui: &mut Ui) {
        if !self.workflow.history_visible() {
            return;
        }
        ui.label(RichText::new("History").strong().color(Color32::WHITE));
        ui.add_space(4.);

        let rows = self.workflow.history();
        if rows.is_empty() {
            ui.label(RichText::new("No predictions yet").color(Color32::GRAY));
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(32.))
            .column(Column::remainder().at_least(140.).clip(true))
            .column(Column::auto().at_least(60.))
            .column(Column::auto().at_least(80.))
            .column(Column::auto().at_least(160.))
            .header(ROW_HEIGHT, |mut header| {
                for title in ["#", "File", "Label", "Confidence", "Created"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(row.index.to_string());
                        });
                        table_row.col(|ui| {
                            ui.label(&row.filename);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.label);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.confidence_text);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.created_at);
                        });
                    });
                }
            });
    }
}
