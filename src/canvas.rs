use egui::{
    vec2, Align2, Color32, Context, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, TouchPhase, Ui,
};

use crate::placement::{self, GestureEvent};
use crate::state::{EditorState, CANVAS_SIZE};
use crate::theme::AppTheme;

pub struct CanvasOutput {
    pub import_clicked: bool,
}

pub fn show_canvas(
    ui: &mut Ui,
    ctx: &Context,
    state: &mut EditorState,
    theme: &AppTheme,
) -> CanvasOutput {
    let (region, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let side = CANVAS_SIZE as f32;
    let canvas_rect = Rect::from_center_size(region.center(), vec2(side, side));

    let painter = ui.painter_at(region);
    painter.rect_filled(region, 16.0, theme.surfaces.canvas_bg);

    let card = canvas_rect.expand(14.0);
    painter.rect_filled(card, 18.0, theme.surfaces.card_bg);
    painter.rect_stroke(card, 18.0, Stroke::new(1.0, theme.surfaces.stroke_soft));

    if let Some(texture) = state.surface_texture.as_ref() {
        painter.image(
            texture.id(),
            canvas_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    let mut out = CanvasOutput {
        import_clicked: false,
    };

    if state.overlay.is_none() {
        draw_import_hint(&painter, canvas_rect, theme);
        if response.clicked() {
            out.import_clicked = true;
        }
        return out;
    }

    let gestures = gather_gestures(ctx, state, canvas_rect);
    let has_overlay = state.overlay.is_some();
    let mut moved = false;
    for event in gestures {
        if state
            .controller
            .handle(event, &mut state.placement, has_overlay)
        {
            moved = true;
        }
    }
    if moved {
        state.mark_dirty();
    }

    if state.controller.is_dragging() {
        ctx.set_cursor_icon(CursorIcon::Grabbing);
    } else if let Some(pos) = response.hover_pos() {
        if placement::hit_test(state.placement, to_canvas(pos, canvas_rect)) {
            ctx.set_cursor_icon(CursorIcon::Grab);
        }
    }

    out
}

fn draw_import_hint(painter: &egui::Painter, canvas_rect: Rect, theme: &AppTheme) {
    let patch = Rect::from_center_size(canvas_rect.center(), vec2(340.0, 120.0));
    painter.rect_filled(patch, 12.0, theme.surfaces.card_bg_alt);
    painter.rect_stroke(patch, 12.0, Stroke::new(1.0, theme.surfaces.stroke_strong));
    painter.text(
        patch.center() - vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        "Import a photo",
        FontId::proportional(19.0),
        theme.text.primary,
    );
    painter.text(
        patch.center() + vec2(0.0, 16.0),
        Align2::CENTER_CENTER,
        "click here or drop an image file",
        FontId::proportional(14.0),
        theme.text.secondary,
    );
}

/// Collects this frame's gesture events. Frames that contain raw touch
/// activity suppress the mouse path, since the backend also synthesizes
/// pointer events from touches.
fn gather_gestures(ctx: &Context, state: &mut EditorState, canvas_rect: Rect) -> Vec<GestureEvent> {
    let touches: Vec<(u64, TouchPhase, Pos2)> = ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Touch { id, phase, pos, .. } => Some((id.0, *phase, *pos)),
                _ => None,
            })
            .collect()
    });

    if !touches.is_empty() || state.active_touch.is_some() {
        return touch_gestures(&touches, &mut state.active_touch, canvas_rect);
    }

    ctx.input(|input| {
        mouse_gestures(
            input.pointer.primary_pressed(),
            input.pointer.primary_down(),
            input.pointer.primary_released(),
            input.pointer.interact_pos(),
            canvas_rect,
        )
    })
}

/// Screen position to canvas-local coordinates: subtract the canvas origin.
fn to_canvas(pos: Pos2, canvas_rect: Rect) -> Pos2 {
    Pos2::new(pos.x - canvas_rect.min.x, pos.y - canvas_rect.min.y)
}

/// Touch path: only the first active touch point drives the gesture; other
/// fingers are ignored until it lifts.
fn touch_gestures(
    touches: &[(u64, TouchPhase, Pos2)],
    active: &mut Option<u64>,
    canvas_rect: Rect,
) -> Vec<GestureEvent> {
    let mut out = Vec::new();
    for (id, phase, pos) in touches {
        match phase {
            TouchPhase::Start => {
                if active.is_none() && canvas_rect.contains(*pos) {
                    *active = Some(*id);
                    out.push(GestureEvent::Press(to_canvas(*pos, canvas_rect)));
                }
            }
            TouchPhase::Move => {
                if *active == Some(*id) {
                    out.push(GestureEvent::Move(to_canvas(*pos, canvas_rect)));
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if *active == Some(*id) {
                    *active = None;
                    out.push(GestureEvent::Release);
                }
            }
        }
    }
    out
}

/// Mouse path; produces the same gesture stream as the touch path. A press
/// must land inside the canvas rect; moves are unrestricted so a drag can
/// leave the canvas without clamping.
fn mouse_gestures(
    pressed: bool,
    down: bool,
    released: bool,
    pos: Option<Pos2>,
    canvas_rect: Rect,
) -> Vec<GestureEvent> {
    let mut out = Vec::new();
    if pressed {
        if let Some(pos) = pos {
            if canvas_rect.contains(pos) {
                out.push(GestureEvent::Press(to_canvas(pos, canvas_rect)));
            }
        }
    } else if down {
        if let Some(pos) = pos {
            out.push(GestureEvent::Move(to_canvas(pos, canvas_rect)));
        }
    }
    if released {
        out.push(GestureEvent::Release);
    }
    out
}
