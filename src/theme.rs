use egui::epaint::Shadow;
use egui::{vec2, Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

#[derive(Clone, Debug)]
pub struct AppTheme {
    pub surfaces: SurfaceTokens,
    pub text: TextTokens,
    pub controls: ControlTokens,
    pub layout: LayoutTokens,
    pub shadows: ShadowTokens,
}

#[derive(Clone, Debug)]
pub struct SurfaceTokens {
    pub app_bg: Color32,
    pub panel_bg: Color32,
    pub card_bg: Color32,
    pub card_bg_alt: Color32,
    pub canvas_bg: Color32,
    pub stroke_soft: Color32,
    pub stroke_strong: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
}

#[derive(Clone, Debug)]
pub struct TextTokens {
    pub primary: Color32,
    pub secondary: Color32,
    pub muted: Color32,
    pub accent: Color32,
}

#[derive(Clone, Debug)]
pub struct ControlTokens {
    pub panel_rounding: f32,
    pub button_rounding: f32,
    pub action_height: f32,
}

#[derive(Clone, Debug)]
pub struct LayoutTokens {
    pub space_1: f32,
    pub space_2: f32,
    pub space_3: f32,
    pub panel_padding_x: f32,
    pub panel_padding_y: f32,
    pub control_gap: f32,
    pub action_bar_height: f32,
}

#[derive(Clone, Debug)]
pub struct ShadowTokens {
    pub ambient: Color32,
    pub elevation: Color32,
}

pub fn studio_dark_theme() -> AppTheme {
    AppTheme {
        surfaces: SurfaceTokens {
            app_bg: Color32::from_rgb(0x15, 0x16, 0x1B),
            panel_bg: Color32::from_rgb(0x1B, 0x1C, 0x22),
            card_bg: Color32::from_rgb(0x20, 0x22, 0x2A),
            card_bg_alt: Color32::from_rgb(0x1E, 0x20, 0x28),
            canvas_bg: Color32::from_rgb(0x11, 0x13, 0x19),
            stroke_soft: Color32::from_rgba_unmultiplied(255, 255, 255, 26),
            stroke_strong: Color32::from_rgba_unmultiplied(255, 255, 255, 48),
            accent: Color32::from_rgb(0xE8, 0x6A, 0x33),
            accent_soft: Color32::from_rgba_unmultiplied(232, 106, 51, 80),
        },
        text: TextTokens {
            primary: Color32::from_rgb(0xF6, 0xF4, 0xF0),
            secondary: Color32::from_rgb(0xC4, 0xBE, 0xB4),
            muted: Color32::from_rgb(0x8F, 0x8A, 0x80),
            accent: Color32::from_rgb(0xFF, 0xA4, 0x70),
        },
        controls: ControlTokens {
            panel_rounding: 10.0,
            button_rounding: 8.0,
            action_height: 30.0,
        },
        layout: LayoutTokens {
            space_1: 4.0,
            space_2: 8.0,
            space_3: 12.0,
            panel_padding_x: 14.0,
            panel_padding_y: 8.0,
            control_gap: 8.0,
            action_bar_height: 52.0,
        },
        shadows: ShadowTokens {
            ambient: Color32::from_rgba_unmultiplied(0, 0, 0, 56),
            elevation: Color32::from_rgba_unmultiplied(0, 0, 0, 110),
        },
    }
}

pub fn apply_theme(ctx: &Context, theme: &AppTheme) {
    let mut style: Style = (*ctx.style()).clone();

    style.spacing.item_spacing = vec2(theme.layout.control_gap, theme.layout.space_2);
    style.spacing.button_padding = vec2(theme.layout.space_3, theme.layout.space_2);
    style.spacing.window_margin =
        egui::Margin::symmetric(theme.layout.space_3, theme.layout.space_3);

    style.visuals = Visuals::dark();
    style.visuals.override_text_color = Some(theme.text.primary);
    style.visuals.panel_fill = theme.surfaces.panel_bg;
    style.visuals.window_fill = theme.surfaces.panel_bg;
    style.visuals.faint_bg_color = theme.surfaces.panel_bg;
    style.visuals.extreme_bg_color = theme.surfaces.app_bg;
    style.visuals.window_rounding = Rounding::same(theme.controls.panel_rounding);

    style.visuals.widgets.noninteractive.bg_fill = theme.surfaces.panel_bg;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, theme.text.secondary);
    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_soft);

    style.visuals.widgets.inactive.bg_fill = theme.surfaces.card_bg_alt;
    style.visuals.widgets.inactive.weak_bg_fill = theme.surfaces.card_bg_alt;
    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_soft);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, theme.text.secondary);

    style.visuals.widgets.hovered.bg_fill = theme.surfaces.card_bg;
    style.visuals.widgets.hovered.weak_bg_fill = theme.surfaces.card_bg;
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_strong);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, theme.text.primary);

    style.visuals.widgets.active.bg_fill = theme.surfaces.accent_soft;
    style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, theme.surfaces.accent);
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, theme.text.primary);

    style.visuals.selection.bg_fill = theme.surfaces.accent_soft;
    style.visuals.selection.stroke = Stroke::new(1.0, theme.surfaces.accent);
    style.visuals.hyperlink_color = theme.text.accent;
    style.visuals.popup_shadow = Shadow {
        offset: vec2(0.0, 10.0),
        blur: 22.0,
        spread: 0.0,
        color: theme.shadows.ambient,
    };
    style.visuals.window_shadow = Shadow {
        offset: vec2(0.0, 14.0),
        blur: 28.0,
        spread: 0.0,
        color: theme.shadows.elevation,
    };

    style.visuals.widgets.noninteractive.rounding = Rounding::same(theme.controls.button_rounding);
    style.visuals.widgets.inactive.rounding = Rounding::same(theme.controls.button_rounding);
    style.visuals.widgets.hovered.rounding = Rounding::same(theme.controls.button_rounding);
    style.visuals.widgets.active.rounding = Rounding::same(theme.controls.button_rounding);

    style
        .text_styles
        .insert(TextStyle::Heading, FontId::new(24.0, FontFamily::Proportional));
    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
    style
        .text_styles
        .insert(TextStyle::Button, FontId::new(14.5, FontFamily::Proportional));
    style
        .text_styles
        .insert(TextStyle::Small, FontId::new(12.5, FontFamily::Proportional));

    ctx.set_style(style);
}
