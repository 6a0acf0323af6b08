use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context as _, Result};
use image::RgbaImage;

/// What a finished decode is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    Overlay,
    Background,
}

pub enum LoadSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

struct LoadRequest {
    seq: u64,
    kind: LoadKind,
    source: LoadSource,
}

pub enum LoaderEvent {
    Loaded {
        seq: u64,
        kind: LoadKind,
        image: RgbaImage,
    },
    Failed {
        seq: u64,
        kind: LoadKind,
        message: String,
    },
}

/// Issues sequence numbers for overlay imports and decides whether a finished
/// decode is still the most recent request. A stale completion must never
/// replace a newer import.
#[derive(Default)]
pub struct LoadSequencer {
    latest: u64,
}

impl LoadSequencer {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Decodes images on a worker thread; completions are polled on the UI thread
/// each frame. The worker requests a repaint after every completion so the
/// redraw path re-enters promptly.
pub struct ImageLoader {
    tx: Sender<LoadRequest>,
    rx: Receiver<LoaderEvent>,
    sequencer: LoadSequencer,
    _worker: thread::JoinHandle<()>,
}

impl ImageLoader {
    pub fn new(ctx: egui::Context) -> Self {
        let (tx, request_rx) = mpsc::channel::<LoadRequest>();
        let (event_tx, rx) = mpsc::channel::<LoaderEvent>();
        let worker = thread::spawn(move || worker_loop(request_rx, event_tx, ctx));

        Self {
            tx,
            rx,
            sequencer: LoadSequencer::default(),
            _worker: worker,
        }
    }

    /// Queues an overlay decode and returns its sequence number. Completions
    /// carrying an older sequence number are discarded on receipt.
    pub fn request_overlay(&mut self, source: LoadSource) -> u64 {
        let seq = self.sequencer.issue();
        let _ = self.tx.send(LoadRequest {
            seq,
            kind: LoadKind::Overlay,
            source,
        });
        seq
    }

    /// The poster template is loaded once and never replaced, so it carries
    /// no sequence number.
    pub fn request_background(&self, source: LoadSource) {
        let _ = self.tx.send(LoadRequest {
            seq: 0,
            kind: LoadKind::Background,
            source,
        });
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.rx.try_recv().ok()
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.sequencer.is_current(seq)
    }
}

fn worker_loop(requests: Receiver<LoadRequest>, events: Sender<LoaderEvent>, ctx: egui::Context) {
    while let Ok(request) = requests.recv() {
        let event = match decode(request.source) {
            Ok(image) => LoaderEvent::Loaded {
                seq: request.seq,
                kind: request.kind,
                image,
            },
            Err(err) => LoaderEvent::Failed {
                seq: request.seq,
                kind: request.kind,
                message: format!("{err:#}"),
            },
        };
        if events.send(event).is_err() {
            break;
        }
        ctx.request_repaint();
    }
}

fn decode(source: LoadSource) -> Result<RgbaImage> {
    let image = match source {
        LoadSource::Path(path) => image::open(&path)
            .with_context(|| format!("cannot decode image {}", path.display()))?,
        LoadSource::Bytes(bytes) => {
            image::load_from_memory(&bytes).context("cannot decode dropped image data")?
        }
    };
    Ok(image.to_rgba8())
}

/// Extension gate for drag-dropped files; the picker applies the same filter.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use image::ImageFormat;

    use super::{decode, is_image_file, LoadSequencer, LoadSource};

    #[test]
    fn only_the_latest_sequence_number_is_current() {
        let mut sequencer = LoadSequencer::default();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));

        let third = sequencer.issue();
        assert!(!sequencer.is_current(second));
        assert!(sequencer.is_current(third));
    }

    #[test]
    fn decode_accepts_valid_bytes_and_rejects_garbage() {
        let source = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(source)
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();

        let decoded = decode(LoadSource::Bytes(png.into_inner())).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));

        assert!(decode(LoadSource::Bytes(b"not an image".to_vec())).is_err());
    }

    #[test]
    fn image_file_gate_checks_extension_case_insensitively() {
        assert!(is_image_file(Path::new("photo.JPG")));
        assert!(is_image_file(Path::new("photo.webp")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }
}
