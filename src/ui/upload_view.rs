use egui::{Align, Button, Color32, CornerRadius, Frame, Layout, ProgressBar, RichText, Stroke, Ui};

use fakescan::{Phase, SelectedFile, workflow::VIDEO_EXTENSIONS};

use super::{DEFAULT_CORNER_RADIUS, FakescanApp, PALETTE_SLATE, PALETTE_TEAL};

const DROPZONE_HEIGHT: f32 = 120.;

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024. && unit < UNITS.len() - 1 {
        value /= 1024.;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn card_frame() -> Frame {
    Frame::new()
        .fill(PALETTE_SLATE)
        .corner_radius(CornerRadius::same(DEFAULT_CORNER_RADIUS))
        .inner_margin(12)
}

impl FakescanApp {
    pub(crate) fn upload_view(&mut self, ui: &mut Ui) {
        self.dropzone(ui);
        ui.add_space(10.);

        if let Some(preview) = self.workflow.preview() {
            card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Preview").strong().color(Color32::WHITE));
                ui.label(RichText::new(&preview.file_name).color(Color32::WHITE));
                let size = preview
                    .size_bytes
                    .map(human_size)
                    .unwrap_or_else(|| "unknown size".to_string());
                ui.label(
                    RichText::new(format!("{} · {}", preview.mime_type, size)).color(Color32::GRAY),
                );
                ui.label(RichText::new(&preview.uri).small().color(Color32::DARK_GRAY));
            });
            ui.add_space(10.);
        }

        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            let analyze = ui.add_enabled(
                self.workflow.can_submit(),
                Button::new(RichText::new("Analyze").strong()).min_size([120., 32.].into()),
            );
            if analyze.clicked() {
                self.workflow.submit();
            }
            if self.workflow.phase() == Phase::Submitting {
                ui.spinner();
            }
        });

        if let Some(progress) = self.workflow.progress() {
            ui.add_space(6.);
            ui.add(ProgressBar::new(progress.fraction).text(progress.text.clone()));
        }

        if let Some(result) = self.workflow.result() {
            ui.add_space(10.);
            card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Result").strong().color(Color32::WHITE));
                ui.label(RichText::new(&result.label).heading().strong().color(PALETTE_TEAL));
                egui::Grid::new("result_fields").num_columns(2).show(ui, |ui| {
                    ui.label("File");
                    ui.label(&result.file_name);
                    ui.end_row();
                    ui.label("Confidence");
                    ui.label(&result.confidence_text);
                    ui.end_row();
                    ui.label("Inference time");
                    ui.label(&result.inference_time_text);
                    ui.end_row();
                    if let Some(model) = &result.model {
                        ui.label("Model");
                        ui.label(model);
                        ui.end_row();
                    }
                    if let Some(created_at) = &result.created_at {
                        ui.label("Created");
                        ui.label(created_at);
                        ui.end_row();
                    }
                });
            });
        }
    }

    fn dropzone(&mut self, ui: &mut Ui) {
        let is_hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if is_hovering {
            Stroke::new(2., PALETTE_TEAL)
        } else {
            Stroke::new(1., Color32::GRAY)
        };

        Frame::new()
            .stroke(stroke)
            .corner_radius(CornerRadius::same(DEFAULT_CORNER_RADIUS))
            .inner_margin(12)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_min_height(DROPZONE_HEIGHT);
                ui.vertical_centered(|ui| {
                    ui.add_space(20.);
                    ui.label(RichText::new("Drop a video here").color(Color32::WHITE));
                    ui.label(RichText::new("or").color(Color32::GRAY));
                    if ui.button("Browse…").clicked() {
                        let picked = rfd::FileDialog::new()
                            .add_filter("Video", VIDEO_EXTENSIONS)
                            .add_filter("All files", &["*"])
                            .pick_file();
                        self.workflow.select_file(picked.map(SelectedFile::from_path));
                    }
                });
            });
    }
}
