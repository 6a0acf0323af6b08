use anyhow::{anyhow, Result};
use image::RgbaImage;
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, PixmapPaint, SpreadMode,
    Transform,
};

use crate::state::{Placement, CANVAS_SIZE, OVERLAY_SIZE};

/// Composes the full canvas surface, always in the same order: blank white
/// fill, poster template scaled to cover the surface, then the overlay drawn
/// into its `OVERLAY_SIZE` square clipped to the circular cutout.
///
/// Either input may be absent: the template while its decode is still in
/// flight (or the asset is missing), the overlay until the first import.
/// The function is pure, so identical inputs produce pixel-identical output.
pub fn compose(
    background: Option<&RgbaImage>,
    overlay: Option<&RgbaImage>,
    placement: Placement,
) -> Result<RgbaImage> {
    let mut surface = Pixmap::new(CANVAS_SIZE, CANVAS_SIZE)
        .ok_or_else(|| anyhow!("cannot allocate canvas surface"))?;
    surface.fill(tiny_skia::Color::WHITE);

    if let Some(image) = background {
        draw_background(&mut surface, image)?;
    }
    if let Some(image) = overlay {
        draw_overlay(&mut surface, image, placement)?;
    }

    RgbaImage::from_raw(CANVAS_SIZE, CANVAS_SIZE, surface.data().to_vec())
        .ok_or_else(|| anyhow!("cannot construct surface image"))
}

fn to_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())
        .ok_or_else(|| anyhow!("cannot allocate source pixmap"))?;
    let data = pixmap.data_mut();
    if data.len() != image.as_raw().len() {
        return Err(anyhow!("source image and pixmap size mismatch"));
    }
    data.copy_from_slice(image.as_raw());
    Ok(pixmap)
}

fn draw_background(surface: &mut Pixmap, image: &RgbaImage) -> Result<()> {
    let src = to_pixmap(image)?;
    let sx = CANVAS_SIZE as f32 / image.width().max(1) as f32;
    let sy = CANVAS_SIZE as f32 / image.height().max(1) as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    surface.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::from_scale(sx, sy), None);
    Ok(())
}

fn draw_overlay(surface: &mut Pixmap, image: &RgbaImage, placement: Placement) -> Result<()> {
    let src = to_pixmap(image)?;
    let radius = OVERLAY_SIZE * 0.5;
    let mut pb = PathBuilder::new();
    pb.push_circle(placement.x + radius, placement.y + radius, radius);
    let circle = pb
        .finish()
        .ok_or_else(|| anyhow!("cannot build overlay clip circle"))?;

    // Filling the circle with a pattern anchored at `placement` is the
    // clip-then-draw step: pixels outside the circle are never touched.
    let sx = OVERLAY_SIZE / image.width().max(1) as f32;
    let sy = OVERLAY_SIZE / image.height().max(1) as f32;
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.shader = Pattern::new(
        src.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        Transform::from_scale(sx, sy).post_translate(placement.x, placement.y),
    );
    surface.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::compose;
    use crate::state::{Placement, CANVAS_SIZE, OVERLAY_SIZE};

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    const PLACEMENT: Placement = Placement { x: 220.0, y: 220.0 };

    #[test]
    fn compose_is_idempotent() {
        let background = solid(10, 10, [0, 128, 0, 255]);
        let overlay = solid(8, 8, [200, 0, 0, 255]);

        let first = compose(Some(&background), Some(&overlay), PLACEMENT).unwrap();
        let second = compose(Some(&background), Some(&overlay), PLACEMENT).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn no_overlay_shows_background_only() {
        let background = solid(10, 10, [0, 0, 200, 255]);
        let surface = compose(Some(&background), None, PLACEMENT).unwrap();

        assert_eq!(surface.width(), CANVAS_SIZE);
        assert_eq!(surface.height(), CANVAS_SIZE);
        assert_eq!(
            surface.get_pixel(CANVAS_SIZE / 2, CANVAS_SIZE / 2),
            &Rgba([0, 0, 200, 255])
        );
        // The overlay square's center stays background-colored too.
        let center = (PLACEMENT.x + OVERLAY_SIZE / 2.0) as u32;
        assert_eq!(surface.get_pixel(center, center), &Rgba([0, 0, 200, 255]));
    }

    #[test]
    fn missing_background_leaves_blank_surface_under_overlay() {
        let overlay = solid(8, 8, [200, 0, 0, 255]);
        let surface = compose(None, Some(&overlay), PLACEMENT).unwrap();

        let center = (PLACEMENT.x + OVERLAY_SIZE / 2.0) as u32;
        assert_eq!(surface.get_pixel(center, center), &Rgba([200, 0, 0, 255]));
        assert_eq!(surface.get_pixel(10, 10), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn overlay_is_clipped_to_a_circle() {
        let background = solid(10, 10, [0, 128, 0, 255]);
        let overlay = solid(8, 8, [200, 0, 0, 255]);
        let surface = compose(Some(&background), Some(&overlay), PLACEMENT).unwrap();

        // Center of the cutout shows the overlay.
        let center = (PLACEMENT.x + OVERLAY_SIZE / 2.0) as u32;
        assert_eq!(surface.get_pixel(center, center), &Rgba([200, 0, 0, 255]));

        // Corners of the bounding square lie outside the circle and keep the
        // background.
        let corner = PLACEMENT.x as u32 + 2;
        assert_eq!(surface.get_pixel(corner, corner), &Rgba([0, 128, 0, 255]));
        let far = (PLACEMENT.x + OVERLAY_SIZE) as u32 - 2;
        assert_eq!(surface.get_pixel(far, far), &Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn off_canvas_placement_still_composes() {
        let overlay = solid(8, 8, [200, 0, 0, 255]);
        let surface = compose(None, Some(&overlay), Placement { x: -100.0, y: -100.0 }).unwrap();

        // Visible sliver of the circle near the origin.
        assert_eq!(surface.get_pixel(0, 0), &Rgba([200, 0, 0, 255]));
        assert_eq!(
            surface.get_pixel(CANVAS_SIZE / 2, CANVAS_SIZE / 2),
            &Rgba([255, 255, 255, 255])
        );
    }
}
