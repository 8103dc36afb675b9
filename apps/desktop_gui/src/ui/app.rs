use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui::{self, RichText};
use shared::{Embarked, PassengerClass, PassengerField, Sex};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::submit_prediction;
use crate::controller::reducer::{FormController, FormPhase, SettleOutcome};
use crate::ui::{panels, theme};

/// Fields edited through free-text inputs; the rest are pickers.
const TEXT_FIELDS: [PassengerField; 5] = [
    PassengerField::Name,
    PassengerField::Age,
    PassengerField::Fare,
    PassengerField::SibSp,
    PassengerField::Parch,
];

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: FormController,

    // Raw text of each free-text input. May hold rejected input that the
    // draft does not.
    inputs: HashMap<PassengerField, String>,
    field_errors: HashMap<PassengerField, String>,

    status: String,
    status_banner: Option<StatusBanner>,
    style_applied: bool,
}

impl PredictorApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut controller = FormController::new(startup.api_base_url);
        if let Some(name) = startup.name {
            if let Err(err) = controller.apply_field_change(PassengerField::Name, &name) {
                tracing::warn!("ignoring startup name: {err}");
            }
        }

        let inputs = TEXT_FIELDS
            .into_iter()
            .map(|field| (field, controller.draft().field_text(field)))
            .collect();

        Self {
            cmd_tx,
            ui_rx,
            controller,
            inputs,
            field_errors: HashMap::new(),
            status: "Starting prediction worker...".to_string(),
            status_banner: None,
            style_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    self.status = err.status_line();
                    self.status_banner = Some(StatusBanner {
                        message: self.status.clone(),
                    });
                }
                UiEvent::PredictionSettled { token, outcome } => {
                    let status = match &outcome {
                        Ok(prediction) => format!(
                            "Prediction #{}: {} ({})",
                            token.value(),
                            prediction.outcome_label(),
                            prediction.confidence_readout()
                        ),
                        Err(err) => UiError::from_prediction_error(err).status_line(),
                    };
                    if self.controller.settle(token, outcome) == SettleOutcome::Applied {
                        self.status = status;
                    }
                }
            }
        }
    }

    fn apply_style_if_needed(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        let mut style = (*ctx.style()).clone();
        theme::tune_style(&mut style);
        ctx.set_style(style);
        self.style_applied = true;
    }

    fn apply_edit(&mut self, field: PassengerField, raw: &str) {
        match self.controller.apply_field_change(field, raw) {
            Ok(()) => {
                self.field_errors.remove(&field);
            }
            Err(err) => {
                self.field_errors.insert(field, err.to_string());
            }
        }
    }

    fn try_submit(&mut self) {
        if self.controller.is_loading() {
            return;
        }
        match submit_prediction(&mut self.controller, &self.cmd_tx) {
            Ok(token) => {
                self.status_banner = None;
                self.status = match self.controller.error() {
                    Some(message) => message.to_string(),
                    None => format!("Prediction #{} requested", token.value()),
                };
            }
            Err(refusal) => {
                self.status = refusal.to_string();
                self.status_banner = Some(StatusBanner {
                    message: refusal.to_string(),
                });
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::new()
                .fill(theme::ERROR_FILL)
                .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    /// Labeled single-line input bound to `field`. Returns true when Enter was pressed in it.
    fn text_input(
        &mut self,
        ui: &mut egui::Ui,
        field: PassengerField,
        label: &str,
        hint: &str,
    ) -> bool {
        ui.label(RichText::new(label).strong());
        let mut text = self.inputs.get(&field).cloned().unwrap_or_default();
        let edit = egui::TextEdit::singleline(&mut text)
            .id_salt(field.wire_name())
            .hint_text(
                RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_width(f32::INFINITY);
        let response = ui.add_sized([ui.available_width(), 30.0], edit);

        if response.changed() {
            self.apply_edit(field, &text);
            self.inputs.insert(field, text);
        }
        if let Some(err) = self.field_errors.get(&field) {
            ui.small(RichText::new(err).color(theme::DID_NOT_SURVIVE_ACCENT));
        }

        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
    }

    fn class_picker(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Class").strong());
        let current = self.controller.draft().pclass;
        if let Some(picked) = choice_combo(ui, "Pclass", current, &PassengerClass::ALL, |c| {
            c.label()
        }) {
            self.apply_edit(PassengerField::Pclass, &picked.number().to_string());
        }
    }

    fn sex_picker(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Sex").strong());
        let current = self.controller.draft().sex;
        if let Some(picked) = choice_combo(ui, "Sex", current, &Sex::ALL, |s| s.label()) {
            self.apply_edit(PassengerField::Sex, picked.wire_value());
        }
    }

    fn port_picker(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Port of Embarkation").strong());
        let current = self.controller.draft().embarked;
        if let Some(picked) = choice_combo(ui, "Embarked", current, &Embarked::ALL, |e| {
            e.label()
        }) {
            self.apply_edit(PassengerField::Embarked, picked.code());
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        theme::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Passenger Information");
            ui.add_space(8.0);
            self.show_status_banner(ui);

            let mut submitted =
                self.text_input(ui, PassengerField::Name, "Full Name", "e.g., Smith, Mr. John");
            ui.add_space(6.0);

            ui.columns(2, |cols| {
                self.class_picker(&mut cols[0]);
                self.sex_picker(&mut cols[1]);
            });
            ui.add_space(6.0);

            ui.columns(2, |cols| {
                submitted |= self.text_input(&mut cols[0], PassengerField::Age, "Age", "30");
                submitted |= self.text_input(&mut cols[1], PassengerField::Fare, "Fare (£)", "20");
            });
            ui.add_space(6.0);

            ui.columns(2, |cols| {
                submitted |=
                    self.text_input(&mut cols[0], PassengerField::SibSp, "Siblings/Spouses", "0");
                submitted |=
                    self.text_input(&mut cols[1], PassengerField::Parch, "Parents/Children", "0");
            });
            ui.add_space(6.0);

            self.port_picker(ui);
            ui.add_space(14.0);

            let loading = self.controller.is_loading();
            let label = if loading {
                "Predicting..."
            } else {
                "Predict Survival"
            };
            let button = egui::Button::new(
                RichText::new(label)
                    .strong()
                    .size(16.0)
                    .color(egui::Color32::WHITE),
            )
            .fill(theme::PRIMARY_ACCENT)
            .min_size(egui::vec2(ui.available_width(), 40.0));

            let clicked = ui.add_enabled(!loading, button).clicked();
            if loading {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.weak("Waiting for the prediction service...");
                });
            }
            if clicked || submitted {
                self.try_submit();
            }
        });
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("predictor_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("🚢").size(30.0));
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("Titanic Survival Predictor")
                            .strong()
                            .size(24.0)
                            .color(theme::lighten_color(theme::PRIMARY_ACCENT, 0.35)),
                    );
                    ui.weak("Powered by Machine Learning");
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("predictor_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(RichText::new(self.controller.phase().label()).strong());
                ui.small(RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(
                        RichText::new(format!("Backend: {}", self.controller.backend_url())).weak(),
                    );
                });
            });
        });
    }
}

fn choice_combo<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    id: &'static str,
    current: T,
    options: &[T],
    label: impl Fn(T) -> &'static str,
) -> Option<T> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(label(current))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for &option in options {
                ui.selectable_value(&mut selected, option, label(option));
            }
        });
    (selected != current).then_some(selected)
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_style_if_needed(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |cols| {
                    self.show_form(&mut cols[0]);
                    panels::show_outcome_panel(&mut cols[1], self.controller.panel());
                });
            });
        });

        if self.controller.phase() == FormPhase::Loading {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::PredictionError;
    use crossbeam_channel::bounded;
    use shared::Prediction;

    use crate::controller::events::UiErrorContext;

    fn app_with_name(
        name: Option<&str>,
    ) -> (PredictorApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = PredictorApp::bootstrap(
            cmd_tx,
            ui_rx,
            StartupConfig {
                api_base_url: "http://predictor.internal:9000".to_string(),
                name: name.map(str::to_string),
            },
        );
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn bootstrap_prefills_name_and_inputs() {
        let (app, _cmd_rx, _ui_tx) = app_with_name(Some("Allen, Miss. Elisabeth Walton"));
        assert_eq!(app.controller.draft().name, "Allen, Miss. Elisabeth Walton");
        assert_eq!(
            app.inputs.get(&PassengerField::Name).map(String::as_str),
            Some("Allen, Miss. Elisabeth Walton")
        );
        assert_eq!(app.inputs.get(&PassengerField::Age).map(String::as_str), Some("30"));
        assert_eq!(app.controller.backend_url(), "http://predictor.internal:9000");
    }

    #[test]
    fn rejected_edit_is_reported_inline_until_corrected() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_name(None);

        app.apply_edit(PassengerField::Age, "abc");
        assert!(app.field_errors.contains_key(&PassengerField::Age));
        assert_eq!(app.controller.draft().age, 30.0);

        app.apply_edit(PassengerField::Age, "42.5");
        assert!(!app.field_errors.contains_key(&PassengerField::Age));
        assert_eq!(app.controller.draft().age, 42.5);
    }

    #[test]
    fn submit_without_name_raises_banner() {
        let (mut app, cmd_rx, _ui_tx) = app_with_name(None);
        app.try_submit();

        assert!(app.status_banner.is_some());
        assert_eq!(app.controller.phase(), FormPhase::Idle);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn settled_events_drive_form_state_and_status() {
        let (mut app, cmd_rx, ui_tx) = app_with_name(Some("Dean, Miss. Elizabeth Gladys"));
        app.try_submit();
        assert!(app.controller.is_loading());

        let token = match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Predict { token, .. } => token,
        };
        ui_tx
            .send(UiEvent::PredictionSettled {
                token,
                outcome: Ok(Prediction {
                    survived: 1,
                    predicted_value: 0.83,
                }),
            })
            .expect("send event");
        app.process_ui_events();

        assert_eq!(app.controller.phase(), FormPhase::Result);
        assert!(app.status.contains("Survived"));
        assert!(app.status.contains("83.0%"));
    }

    #[test]
    fn failed_prediction_sets_categorised_status() {
        let (mut app, cmd_rx, ui_tx) = app_with_name(Some("Dean, Miss. Elizabeth Gladys"));
        app.try_submit();
        let token = match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Predict { token, .. } => token,
        };
        ui_tx
            .send(UiEvent::PredictionSettled {
                token,
                outcome: Err(PredictionError::RequestFailure { status: 503 }),
            })
            .expect("send event");
        app.process_ui_events();

        assert_eq!(app.controller.error(), Some("Failed to get prediction"));
        assert_eq!(app.status, "Server error: Failed to get prediction");
    }

    #[test]
    fn backend_startup_error_shows_banner() {
        let (mut app, _cmd_rx, ui_tx) = app_with_name(None);
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "failed to build runtime: out of threads",
            )))
            .expect("send event");
        app.process_ui_events();

        assert!(app.status.starts_with("Prediction worker unavailable"));
        assert!(app.status_banner.is_some());
    }
}
