use std::env;
use std::path::PathBuf;

/// Fixed campaign-poster template the overlay is composited onto. The file is
/// expected to ship with the application; when it is missing the canvas
/// renders without a background.
pub const TEMPLATE_FILE_NAME: &str = "candidate.jpeg";

pub const TEMPLATE_ENV: &str = "ELECTION_COMPARE_TEMPLATE";

/// Resolution order: env override, `assets/` next to the executable, then
/// `assets/` in the working directory.
pub fn resolve_template_path() -> PathBuf {
    if let Ok(value) = env::var(TEMPLATE_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("assets").join(TEMPLATE_FILE_NAME);
            if candidate.is_file() {
                return candidate;
            }
        }
    }

    PathBuf::from("assets").join(TEMPLATE_FILE_NAME)
}
