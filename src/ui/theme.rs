use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::layout::RenderMode;

// ── App chrome (dark) ────────────────────────────────────────────────────────

pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

// ── Chart canvas (screen) ────────────────────────────────────────────────────

// The chart itself is drawn on paper-like ground so the bar palette reads
// the same on screen and in print.
pub const CANVAS_BG: Color32 = Color32::from_rgb(248, 250, 252);
pub const CANVAS_GRID: Color32 = Color32::from_rgb(222, 228, 237);
pub const CANVAS_AXIS: Color32 = Color32::from_rgb(51, 65, 85);
pub const CANVAS_TEXT: Color32 = Color32::from_rgb(15, 23, 42);
pub const CANVAS_METADATA: Color32 = Color32::from_rgb(100, 116, 139);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const MILESTONE: Color32 = Color32::from_rgb(250, 204, 21);
pub const SELECTION_OUTLINE: Color32 = Color32::from_rgb(37, 99, 235);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);

// ── Chart canvas (export) ────────────────────────────────────────────────────

pub const PRINT_BG: Color32 = Color32::WHITE;
pub const PRINT_GRID: Color32 = Color32::from_rgb(199, 206, 218);
pub const PRINT_AXIS: Color32 = Color32::from_rgb(31, 41, 51);
pub const PRINT_METADATA: Color32 = Color32::from_rgb(95, 108, 123);
pub const PRINT_FRAME: Color32 = Color32::from_rgb(212, 215, 222);
pub const MILESTONE_PRINT: Color32 = Color32::from_rgb(218, 165, 32);

// ── Work-package palette ─────────────────────────────────────────────────────

/// Paired bar colors per row: a strong tone for the package summary bar and
/// a lighter one for its sub-packages. Rows cycle through the list.
pub const PACKAGE_COLORS: &[(Color32, Color32)] = &[
    (Color32::from_rgb(0x1F, 0x4E, 0x79), Color32::from_rgb(0xAE, 0xC9, 0xE6)),
    (Color32::from_rgb(0x7C, 0x1F, 0x35), Color32::from_rgb(0xF5, 0xB3, 0xC7)),
    (Color32::from_rgb(0x13, 0x5C, 0x5C), Color32::from_rgb(0x9E, 0xD8, 0xD6)),
    (Color32::from_rgb(0x6C, 0x3A, 0x00), Color32::from_rgb(0xF3, 0xCD, 0xA8)),
    (Color32::from_rgb(0x5A, 0x2E, 0x6D), Color32::from_rgb(0xDA, 0xB9, 0xF0)),
    (Color32::from_rgb(0x27, 0x46, 0x53), Color32::from_rgb(0xB6, 0xDC, 0xE2)),
    (Color32::from_rgb(0x7A, 0x46, 0x05), Color32::from_rgb(0xEB, 0xC8, 0xA2)),
    (Color32::from_rgb(0x1C, 0x5B, 0x34), Color32::from_rgb(0xB7, 0xE2, 0xCA)),
];

pub fn package_colors(row: usize) -> (Color32, Color32) {
    PACKAGE_COLORS[row % PACKAGE_COLORS.len()]
}

// ── Mode-dependent colors ────────────────────────────────────────────────────

pub fn canvas_bg(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => CANVAS_BG,
        RenderMode::Export => PRINT_BG,
    }
}

pub fn grid_color(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => CANVAS_GRID,
        RenderMode::Export => PRINT_GRID,
    }
}

pub fn axis_color(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => CANVAS_AXIS,
        RenderMode::Export => PRINT_AXIS,
    }
}

pub fn text_color(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => CANVAS_TEXT,
        RenderMode::Export => PRINT_AXIS,
    }
}

pub fn metadata_color(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => CANVAS_METADATA,
        RenderMode::Export => PRINT_METADATA,
    }
}

pub fn milestone_color(mode: RenderMode) -> Color32 {
    match mode {
        RenderMode::Screen => MILESTONE,
        RenderMode::Export => MILESTONE_PRINT,
    }
}

pub fn sub_bar_rounding(mode: RenderMode) -> f32 {
    match mode {
        RenderMode::Screen => 8.0,
        RenderMode::Export => 3.0,
    }
}

pub fn package_bar_rounding(mode: RenderMode) -> f32 {
    match mode {
        RenderMode::Screen => 10.0,
        RenderMode::Export => 3.0,
    }
}

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HANDLE_WIDTH: f32 = 7.0;
pub const MILESTONE_HALF: f32 = 10.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_title() -> FontId {
    FontId::proportional(17.0)
}

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28); // TextEdit bg

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(50, 52, 66);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
