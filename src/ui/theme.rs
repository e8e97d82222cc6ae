//! Light theme colors and shared styling

use egui::{Color32, Rect, Rounding, Stroke, Ui};

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf0, 0xf3, 0xf9);
pub const CARD: Color32 = Color32::WHITE;
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);

pub const TEXT_TITLE: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const TEXT_HEADING: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
pub const TEXT_BODY: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
pub const TEXT_STATUS: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);

pub const PRIMARY: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const SECONDARY: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);

/// Border around the focused widget
pub const FOCUS: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
pub const FOCUS_WIDTH: f32 = 3.0;

pub const CORNER_RADIUS: f32 = 8.0;

/// Apply the light visuals to the context
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = CARD;
    visuals.window_stroke = Stroke::new(1.0, CARD_BORDER);
    visuals.override_text_color = Some(TEXT_BODY);
    visuals.widgets.inactive.rounding = Rounding::same(CORNER_RADIUS);
    visuals.widgets.hovered.rounding = Rounding::same(CORNER_RADIUS);
    visuals.widgets.active.rounding = Rounding::same(CORNER_RADIUS);
    ctx.set_visuals(visuals);
}

/// White card with a thin border, as used for the header and selection panels
pub fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(CARD)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .rounding(Rounding::same(12.0))
        .inner_margin(egui::Margin::same(24.0))
}

/// Draw the focus border around `rect`
pub fn draw_focus_ring(ui: &Ui, rect: Rect) {
    ui.painter().rect_stroke(
        rect.expand(FOCUS_WIDTH),
        Rounding::same(CORNER_RADIUS + FOCUS_WIDTH),
        Stroke::new(FOCUS_WIDTH, FOCUS),
    );
}
