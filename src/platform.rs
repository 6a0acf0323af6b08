use anyhow::{anyhow, Result};

/// Blocking notification, used for import errors and the share fallback.
pub fn show_alert(title: &str, message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .show();
}

/// Native share sheet hook. No desktop share backend is wired up, so callers
/// always take the clipboard fallback.
pub fn share_url(_title: &str, _text: &str, _url: &str) -> Result<()> {
    Err(anyhow!("native sharing is not available on this platform"))
}

#[cfg(test)]
mod tests {
    use super::share_url;
    use crate::export::{PROJECT_URL, SHARE_TEXT, SHARE_TITLE};

    #[test]
    fn share_reports_unsupported_so_callers_take_the_clipboard_fallback() {
        assert!(share_url(SHARE_TITLE, SHARE_TEXT, PROJECT_URL).is_err());
    }
}
