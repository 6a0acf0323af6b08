use anyhow::Result;
use egui::{ColorImage, Context as EguiContext, TextureHandle, TextureOptions};
use image::RgbaImage;

use crate::compositor;
use crate::placement::PlacementController;

/// Side length of the square canvas surface, in canvas pixels.
pub const CANVAS_SIZE: u32 = 600;

/// Side length of the overlay's bounding square. The circular cutout has
/// radius `OVERLAY_SIZE / 2`.
pub const OVERLAY_SIZE: f32 = 160.0;

pub const INITIAL_PLACEMENT: Placement = Placement { x: 220.0, y: 220.0 };

/// Top-left corner of the overlay's bounding square in canvas pixel space.
/// Never clamped; the overlay may be dragged off-canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}

pub struct EditorState {
    pub overlay: Option<RgbaImage>,
    pub background: Option<RgbaImage>,
    pub placement: Placement,
    pub controller: PlacementController,
    pub active_touch: Option<u64>,
    pub surface: Option<RgbaImage>,
    pub surface_texture: Option<TextureHandle>,
    pub share_feedback_until: Option<f64>,
    dirty: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            overlay: None,
            background: None,
            placement: INITIAL_PLACEMENT,
            controller: PlacementController::default(),
            active_touch: None,
            surface: None,
            surface_texture: None,
            share_feedback_until: None,
            dirty: true,
        }
    }
}

impl EditorState {
    /// Replaces the current overlay. The previous bitmap is dropped with it;
    /// placement carries over so a re-import keeps the chosen spot.
    pub fn set_overlay(&mut self, image: RgbaImage) {
        self.overlay = Some(image);
        self.mark_dirty();
    }

    pub fn set_background(&mut self, image: RgbaImage) {
        self.background = Some(image);
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_export(&self) -> bool {
        self.overlay.is_some()
    }

    /// Recomposes the canvas surface and re-uploads the texture when a state
    /// mutation marked it dirty. Called once per frame before the canvas is
    /// drawn, which keeps redraws reactive rather than polled.
    pub fn ensure_surface(&mut self, ctx: &EguiContext) -> Result<()> {
        if !self.dirty && self.surface_texture.is_some() {
            return Ok(());
        }
        self.dirty = false;

        let surface =
            compositor::compose(self.background.as_ref(), self.overlay.as_ref(), self.placement)?;
        let size = [surface.width() as usize, surface.height() as usize];
        let color = ColorImage::from_rgba_unmultiplied(size, surface.as_raw());
        match self.surface_texture.as_mut() {
            Some(texture) => texture.set(color, TextureOptions::LINEAR),
            None => {
                self.surface_texture =
                    Some(ctx.load_texture("canvas_surface", color, TextureOptions::LINEAR))
            }
        }
        self.surface = Some(surface);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EditorState;

    #[test]
    fn export_requires_an_overlay() {
        let mut state = EditorState::default();
        assert!(!state.can_export());

        state.set_overlay(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([10, 20, 30, 255]),
        ));
        assert!(state.can_export());
    }

    #[test]
    fn replacing_the_overlay_keeps_placement_and_marks_dirty() {
        let mut state = EditorState::default();
        state.set_overlay(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([0, 0, 0, 255]),
        ));
        state.placement.x = 10.0;
        state.placement.y = 12.0;

        state.set_overlay(image::RgbaImage::from_pixel(
            8,
            8,
            image::Rgba([255, 255, 255, 255]),
        ));
        assert!(state.is_dirty());
        assert_eq!(state.placement.x, 10.0);
        assert_eq!(state.placement.y, 12.0);
    }
}
