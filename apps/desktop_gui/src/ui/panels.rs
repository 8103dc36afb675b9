//! Outcome panels shown beside the form: result, error, or the static info card.

use eframe::egui::{self, RichText};
use shared::Prediction;

use crate::controller::reducer::Panel;
use crate::ui::theme;

const KEY_FACTORS: [&str; 4] = [
    "Passenger class and ticket fare",
    "Age and gender",
    "Family size aboard",
    "Port of embarkation",
];

pub fn show_outcome_panel(ui: &mut egui::Ui, panel: Panel<'_>) {
    match panel {
        Panel::Result(prediction) => show_result_panel(ui, prediction),
        Panel::Error { message, hint } => show_error_panel(ui, message, &hint),
        Panel::Info => show_info_panel(ui),
    }
}

fn show_result_panel(ui: &mut egui::Ui, prediction: &Prediction) {
    let accent = theme::outcome_accent(prediction.survived());
    theme::card_frame(ui).show(ui, |ui| {
        ui.heading("Prediction Result");
        ui.add_space(10.0);

        egui::Frame::new()
            .fill(accent.gamma_multiply(0.18))
            .stroke(egui::Stroke::new(2.0, accent))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::same(14))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let icon = if prediction.survived() { "✔" } else { "✖" };
                    ui.label(RichText::new(icon).size(30.0).color(accent));
                    ui.vertical(|ui| {
                        ui.weak("Survival Prediction");
                        ui.label(
                            RichText::new(prediction.outcome_label())
                                .strong()
                                .size(26.0)
                                .color(accent),
                        );
                    });
                });
            });

        ui.add_space(12.0);
        ui.weak("Model Confidence");
        let readout = prediction.confidence_readout();
        ui.horizontal(|ui| {
            let bar_width = (ui.available_width() - 90.0).max(60.0);
            ui.add(
                egui::ProgressBar::new(prediction.confidence_fraction())
                    .fill(accent)
                    .desired_width(bar_width),
            );
            ui.label(RichText::new(&readout).strong().size(22.0));
        });

        ui.add_space(12.0);
        ui.separator();
        ui.small(
            "Note: This prediction is based on historical Titanic data and machine learning \
             analysis. The model considers factors like passenger class, age, sex, family \
             size, and fare.",
        );
    });
}

fn show_error_panel(ui: &mut egui::Ui, message: &str, hint: &str) {
    egui::Frame::new()
        .fill(theme::ERROR_FILL)
        .stroke(egui::Stroke::new(2.0, theme::ERROR_STROKE))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(20, 18))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(RichText::new("⚠").size(24.0).color(egui::Color32::WHITE));
                ui.vertical(|ui| {
                    ui.label(RichText::new("Error").strong().color(egui::Color32::WHITE));
                    ui.label(RichText::new(message).color(theme::lighten_color(
                        theme::ERROR_STROKE,
                        0.6,
                    )));
                    ui.add_space(4.0);
                    ui.small(RichText::new(hint).color(theme::lighten_color(
                        theme::ERROR_STROKE,
                        0.35,
                    )));
                });
            });
        });
}

fn show_info_panel(ui: &mut egui::Ui) {
    theme::card_frame(ui).show(ui, |ui| {
        ui.heading("About This Predictor");
        ui.add_space(8.0);
        ui.label(
            "This machine learning model predicts the likelihood of survival for Titanic \
             passengers based on historical data.",
        );
        ui.add_space(8.0);
        ui.label(RichText::new("Key Factors:").strong());
        for factor in KEY_FACTORS {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("•").color(theme::PRIMARY_ACCENT));
                ui.label(factor);
            });
        }
        ui.add_space(10.0);
        egui::Frame::new()
            .fill(theme::PRIMARY_ACCENT.gamma_multiply(0.15))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.small(
                    "Tip: Fill in the passenger details and click \"Predict Survival\" \
                     to see the model's prediction.",
                );
            });
    });
}
