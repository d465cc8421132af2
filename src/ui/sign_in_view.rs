use egui::{Align, Color32, Layout, RichText, TextEdit, Ui};

use fakescan::{api::Credentials, workflow::SignInState};

use super::{FakescanApp, PALETTE_RED, PALETTE_TEAL};

/// Text typed into the sign-in bar. The password is cleared once it is sent.
pub(crate) struct SignInForm {
    email: String,
    password: String,
}

impl SignInForm {
    pub(crate) fn new(email: Option<String>) -> Self {
        Self {
            email: email.unwrap_or_default(),
            password: String::new(),
        }
    }

    fn take_credentials(&mut self) -> Option<Credentials> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return None;
        }
        Some(Credentials {
            email: email.to_string(),
            password: std::mem::take(&mut self.password),
        })
    }
}

impl FakescanApp {
    pub(crate) fn sign_in_view(&mut self, ui: &mut Ui) {
        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            ui.heading(RichText::new("Fakescan").color(Color32::WHITE));
            ui.label(RichText::new(&self.server_url).small().color(Color32::GRAY));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                match self.workflow.sign_in_state().clone() {
                    SignInState::SignedIn { email } => {
                        if ui.button("Sign out").clicked() {
                            self.workflow.sign_out();
                        }
                        ui.label(RichText::new(format!("Signed in as {}", email)).color(PALETTE_TEAL));
                        if self.app_config.email.as_deref() != Some(email.as_str()) {
                            self.app_config.email = Some(email);
                        }
                    }
                    SignInState::SigningIn => {
                        ui.spinner();
                        ui.label(RichText::new("Signing in…").color(Color32::GRAY));
                    }
                    SignInState::SigningOut { email } => {
                        ui.spinner();
                        ui.label(RichText::new(format!("Signing out {}…", email)).color(Color32::GRAY));
                    }
                    state => {
                        let submit = ui.button("Sign in").clicked();
                        let password_response = ui.add(
                            TextEdit::singleline(&mut self.sign_in_form.password)
                                .password(true)
                                .hint_text("password")
                                .desired_width(110.),
                        );
                        ui.add(
                            TextEdit::singleline(&mut self.sign_in_form.email)
                                .hint_text("email")
                                .desired_width(160.),
                        );
                        let pressed_enter = password_response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if let SignInState::Rejected { reason } = state {
                            ui.label(RichText::new(reason).small().color(PALETTE_RED));
                        }
                        if (submit || pressed_enter)
                            && let Some(credentials) = self.sign_in_form.take_credentials()
                        {
                            self.workflow.sign_in(credentials);
                        }
                    }
                }
            });
        });
    }
}
