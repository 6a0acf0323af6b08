use egui::{vec2, Align, Layout, RichText, Ui};

use crate::state::EditorState;
use crate::theme::AppTheme;
use crate::ui_controls;

pub struct ActionBarOutput {
    pub import: bool,
    pub export: bool,
    pub share: bool,
}

/// Export is gated at the UI boundary: with no overlay loaded the composite
/// would show only the template, so there is nothing meaningful to save.
pub fn export_enabled(state: &EditorState) -> bool {
    state.overlay.is_some()
}

pub fn show_action_bar(
    ui: &mut Ui,
    state: &EditorState,
    link_copied_feedback: bool,
    theme: &AppTheme,
) -> ActionBarOutput {
    let action_h = theme.controls.action_height;
    let mut out = ActionBarOutput {
        import: false,
        export: false,
        share: false,
    };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = vec2(theme.layout.control_gap, 0.0);

        ui.label(
            RichText::new("Election Compare")
                .size(17.0)
                .strong()
                .color(theme.text.primary),
        );

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.add_space(theme.layout.space_2);

            if ui_controls::ghost_button(ui, theme, "Share", vec2(92.0, action_h)).clicked() {
                out.share = true;
            }

            if link_copied_feedback {
                ui_controls::subtle_badge(ui, theme, "link copied");
                ui.add_space(theme.layout.space_2);
            }

            let export_button = ui.add_enabled_ui(export_enabled(state), |ui| {
                ui_controls::ghost_button(ui, theme, "Export", vec2(92.0, action_h))
            });
            if export_button.inner.clicked() {
                out.export = true;
            }

            ui.add_space(theme.layout.space_2);

            if ui_controls::primary_button(ui, theme, "Import Photo", vec2(128.0, action_h))
                .clicked()
            {
                out.import = true;
            }
        });
    });

    out
}

#[cfg(test)]
mod tests {
    use super::export_enabled;
    use crate::state::EditorState;

    #[test]
    fn export_is_gated_on_overlay_presence() {
        let mut state = EditorState::default();
        assert!(!export_enabled(&state));

        state.set_overlay(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([0, 0, 0, 255]),
        ));
        assert!(export_enabled(&state));
    }
}
