use eframe::egui;

pub const PRIMARY_ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
pub const SURVIVED_ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 160, 84);
pub const DID_NOT_SURVIVE_ACCENT: egui::Color32 = egui::Color32::from_rgb(205, 62, 62);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn outcome_accent(survived: bool) -> egui::Color32 {
    if survived {
        SURVIVED_ACCENT
    } else {
        DID_NOT_SURVIVE_ACCENT
    }
}

/// Rounded panel used for the form and each outcome panel.
pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(lighten_color(ui.visuals().panel_fill, 0.04))
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(20, 18))
}

pub fn tune_style(style: &mut egui::Style) {
    // Text inputs need a visible border to read as editable.
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.interact_size = egui::vec2(40.0, 30.0);
}
