mod history_view;
mod sign_in_view;
mod upload_view;

use std::{sync::Arc, time::Duration};

use egui::{Color32, Id, RichText, Visuals, style::Widgets};
use log::error;

use fakescan::{
    AppConfig, PredictionService, SelectedFile, UploadWorkflow,
    workflow::{FileSource, NoticeKind, PreviewSink, TaskSpawner, spawner::Task},
};

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(14, 16, 20);
pub(crate) const PALETTE_SLATE: Color32 = Color32::from_rgb(32, 38, 48);
pub(crate) const PALETTE_TEAL: Color32 = Color32::from_rgb(38, 166, 154);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(229, 83, 75);

pub(crate) const DEFAULT_CORNER_RADIUS: u8 = 8;
const BUSY_REPAINT_MS: u64 = 100;

/// Hands previews to egui's byte loader so the URI can be released later.
struct EguiPreviewSink {
    ctx: egui::Context,
}

impl PreviewSink for EguiPreviewSink {
    fn acquire(&mut self, uri: &str, file: &SelectedFile) {
        if let FileSource::Bytes(bytes) = file.source() {
            self.ctx.include_bytes(uri.to_string(), bytes.clone());
        }
    }

    fn release(&mut self, uri: &str) {
        self.ctx.forget_image(uri);
    }
}

/// Runs each request on its own thread and wakes the UI when it is done.
struct RepaintingSpawner {
    ctx: egui::Context,
}

impl TaskSpawner for RepaintingSpawner {
    fn spawn(&self, task: Task) {
        let ctx = self.ctx.clone();
        std::thread::spawn(move || {
            task();
            ctx.request_repaint();
        });
    }
}

/// Picks a usable selection out of a dropped file. Native drops carry a path,
/// sandboxed ones carry the bytes.
pub(crate) fn selected_from_drop(file: egui::DroppedFile) -> Option<SelectedFile> {
    if let Some(path) = file.path {
        return Some(SelectedFile::from_path(path));
    }
    file.bytes
        .map(|bytes| SelectedFile::from_bytes(&file.name, Some(&file.mime), bytes))
}

/// `FakescanApp` is the upload screen: a drop zone with a file picker, the preview of
/// the selected video, the prediction result and the prediction history.
pub struct FakescanApp {
    workflow: UploadWorkflow,
    app_config: AppConfig,
    server_url: String,
    sign_in_form: sign_in_view::SignInForm,
}

impl FakescanApp {
    pub fn new(
        service: Arc<dyn PredictionService>,
        server_url: String,
        app_config: AppConfig,
        initial_file: Option<SelectedFile>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_TEAL,
            faint_bg_color: PALETTE_SLATE,
            extreme_bg_color: PALETTE_BLACK,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut workflow = UploadWorkflow::new(
            service,
            Box::new(RepaintingSpawner {
                ctx: cc.egui_ctx.clone(),
            }),
            Box::new(EguiPreviewSink {
                ctx: cc.egui_ctx.clone(),
            }),
        );
        workflow.select_file(initial_file);

        let sign_in_form = sign_in_view::SignInForm::new(app_config.email.clone());
        Self {
            workflow,
            app_config,
            server_url,
            sign_in_form,
        }
    }

    fn notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.workflow.notice() else {
            return;
        };
        let title = match notice.kind {
            NoticeKind::Rejected => "Prediction rejected",
            NoticeKind::Failed => "Prediction failed",
        };
        let message = notice.message.clone();
        let detail = notice.detail.clone();

        let response = egui::Modal::new(Id::new("notice")).show(ctx, |ui| {
            ui.set_width(340.);
            ui.heading(RichText::new(title).color(PALETTE_RED));
            ui.add_space(6.);
            ui.label(RichText::new(message).color(Color32::WHITE));
            if let Some(detail) = detail {
                ui.label(RichText::new(detail).small().color(Color32::GRAY));
            }
            ui.add_space(10.);
            ui.button("OK").clicked()
        });
        if response.inner || response.should_close() {
            self.workflow.dismiss_notice();
        }
    }
}

impl eframe::App for FakescanApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.workflow.poll();

        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        if let Some(file) = dropped {
            self.workflow.select_file(selected_from_drop(file));
        }
        if let Some(inner_rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.app_config.window_size = inner_rect.size().into();
        }

        egui::TopBottomPanel::top("account")
            .min_height(36.)
            .show(ctx, |ui| {
                self.sign_in_view(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.upload_view(ui);
                ui.add_space(16.);
                self.history_view(ui);
            });
        });

        self.notice_modal(ctx);

        // background threads also request a repaint, this covers a missed wakeup
        if self.workflow.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(BUSY_REPAINT_MS));
        }
    }
}
