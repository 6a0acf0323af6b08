use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;

use crate::platform;

pub const EXPORT_FILE_NAME: &str = "election-compare.jpg";

pub const JPEG_QUALITY: u8 = 95;

pub const SHARE_TITLE: &str = "Election Compare";
pub const SHARE_TEXT: &str = "Check out my campaign poster!";
pub const PROJECT_URL: &str = "https://election-compare.app/";

/// Encodes the composed surface as JPEG. The surface is opaque, so the alpha
/// channel is dropped before encoding.
pub fn encode_jpeg(surface: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder.encode_image(&rgb).context("cannot encode JPEG")?;
    Ok(buffer.into_inner())
}

/// Save dialog pre-filled with the fixed export name. Returns None when the
/// user cancels the dialog.
pub fn save_composite(surface: &RgbaImage) -> Result<Option<PathBuf>> {
    let file = rfd::FileDialog::new()
        .set_title("Save poster")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("JPEG", &["jpg", "jpeg"])
        .save_file();

    let Some(path) = file else {
        return Ok(None);
    };

    let bytes = encode_jpeg(surface)?;
    std::fs::write(&path, bytes).with_context(|| format!("cannot save {}", path.display()))?;
    Ok(Some(path))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopiedLink,
}

/// Attempts the native share path and falls back to copying the project URL
/// to the clipboard. Unsupported platform and user cancel take the same
/// fallback; a clipboard failure in the fallback branch is the only error.
pub fn share_page() -> Result<ShareOutcome> {
    share_page_with(
        || platform::share_url(SHARE_TITLE, SHARE_TEXT, PROJECT_URL),
        copy_link_to_clipboard,
    )
}

fn share_page_with(
    share: impl FnOnce() -> Result<()>,
    copy_link: impl FnOnce() -> Result<()>,
) -> Result<ShareOutcome> {
    if share().is_ok() {
        return Ok(ShareOutcome::Shared);
    }
    copy_link()?;
    Ok(ShareOutcome::CopiedLink)
}

pub fn copy_link_to_clipboard() -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("cannot initialize clipboard")?;
    clipboard
        .set_text(PROJECT_URL.to_string())
        .context("cannot copy link to clipboard")
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use image::{Rgba, RgbaImage};

    use super::{encode_jpeg, share_page_with, ShareOutcome};

    #[test]
    fn encode_jpeg_produces_a_jpeg_of_the_surface_size() {
        let surface = RgbaImage::from_pixel(600, 600, Rgba([180, 40, 40, 255]));
        let bytes = encode_jpeg(&surface).unwrap();

        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (600, 600));
    }

    // The share/clipboard hooks are injected here: a real clipboard is not
    // available in headless test runs.
    #[test]
    fn unsupported_share_falls_back_to_copying_the_link() {
        let outcome = share_page_with(|| Err(anyhow!("unsupported")), || Ok(())).unwrap();
        assert_eq!(outcome, ShareOutcome::CopiedLink);
    }

    #[test]
    fn successful_share_never_touches_the_clipboard() {
        let outcome = share_page_with(|| Ok(()), || panic!("fallback must not run")).unwrap();
        assert_eq!(outcome, ShareOutcome::Shared);
    }

    #[test]
    fn clipboard_failure_in_the_fallback_is_an_error() {
        let result = share_page_with(|| Err(anyhow!("unsupported")), || Err(anyhow!("no clipboard")));
        assert!(result.is_err());
    }
}
