use eframe::egui::{self, Context as EguiContext, TopBottomPanel};
use eframe::{App, Frame};
use tracing::{debug, warn};

use crate::action_bar;
use crate::canvas;
use crate::export::{self, ShareOutcome};
use crate::loader::{self, ImageLoader, LoadKind, LoadSource, LoaderEvent};
use crate::platform;
use crate::state::EditorState;
use crate::template;
use crate::theme;
use crate::ui_controls;

pub struct ElectionCompareApp {
    state: EditorState,
    loader: ImageLoader,
    theme: theme::AppTheme,
}

impl ElectionCompareApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = theme::studio_dark_theme();
        theme::apply_theme(&cc.egui_ctx, &theme);

        let loader = ImageLoader::new(cc.egui_ctx.clone());
        loader.request_background(LoadSource::Path(template::resolve_template_path()));

        Self {
            state: EditorState::default(),
            loader,
            theme,
        }
    }

    fn process_loader_events(&mut self) {
        while let Some(event) = self.loader.try_recv() {
            match event {
                LoaderEvent::Loaded {
                    seq,
                    kind: LoadKind::Overlay,
                    image,
                } => {
                    if self.loader.is_current(seq) {
                        self.state.set_overlay(image);
                    } else {
                        debug!(seq, "discarding stale overlay decode");
                    }
                }
                LoaderEvent::Loaded {
                    kind: LoadKind::Background,
                    image,
                    ..
                } => {
                    self.state.set_background(image);
                }
                LoaderEvent::Failed {
                    seq,
                    kind: LoadKind::Overlay,
                    message,
                } => {
                    if self.loader.is_current(seq) {
                        platform::show_alert("Import failed", &message);
                    }
                }
                LoaderEvent::Failed {
                    kind: LoadKind::Background,
                    message,
                    ..
                } => {
                    warn!(%message, "poster template unavailable, rendering without background");
                }
            }
        }
    }

    fn import_photo(&mut self) {
        let file = rfd::FileDialog::new()
            .set_title("Import photo")
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file();

        // Cancelling the picker is a no-op.
        let Some(path) = file else {
            return;
        };
        self.loader.request_overlay(LoadSource::Path(path));
    }

    fn handle_dropped_files(&mut self, ctx: &EguiContext) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                if loader::is_image_file(&path) {
                    self.loader.request_overlay(LoadSource::Path(path));
                    break;
                }
            } else if let Some(bytes) = file.bytes {
                self.loader.request_overlay(LoadSource::Bytes(bytes.to_vec()));
                break;
            }
        }
    }

    fn export_poster(&self) {
        if !self.state.can_export() {
            return;
        }
        let Some(surface) = self.state.surface.as_ref() else {
            return;
        };
        match export::save_composite(surface) {
            Ok(Some(path)) => debug!(path = %path.display(), "poster exported"),
            Ok(None) => {}
            Err(err) => platform::show_alert("Export failed", &format!("{err:#}")),
        }
    }

    fn share(&mut self, ctx: &EguiContext) {
        match export::share_page() {
            Ok(ShareOutcome::Shared) => {}
            Ok(ShareOutcome::CopiedLink) => {
                self.state.share_feedback_until = Some(ctx.input(|input| input.time) + 2.5);
                platform::show_alert("Sharing not supported", "Link copied to clipboard.");
            }
            Err(err) => platform::show_alert("Share failed", &format!("{err:#}")),
        }
    }
}

impl App for ElectionCompareApp {
    fn update(&mut self, ctx: &EguiContext, _frame: &mut Frame) {
        self.process_loader_events();
        self.handle_dropped_files(ctx);

        if let Err(err) = self.state.ensure_surface(ctx) {
            warn!(error = %format!("{err:#}"), "cannot compose canvas surface");
        }

        let link_copied = self
            .state
            .share_feedback_until
            .is_some_and(|deadline| ctx.input(|input| input.time) <= deadline);

        let bar_output = TopBottomPanel::top("action_bar")
            .exact_height(self.theme.layout.action_bar_height)
            .frame(ui_controls::top_bar_frame(&self.theme))
            .show(ctx, |ui| {
                action_bar::show_action_bar(ui, &self.state, link_copied, &self.theme)
            })
            .inner;

        let canvas_output = egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.surfaces.app_bg)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.layout.panel_padding_x,
                        self.theme.layout.panel_padding_y + 2.0,
                    )),
            )
            .show(ctx, |ui| canvas::show_canvas(ui, ctx, &mut self.state, &self.theme))
            .inner;

        // Drags may mark the state dirty after the surface was refreshed for
        // this frame; recompose before the next frame is painted.
        if self.state.is_dirty() {
            ctx.request_repaint();
        }

        if bar_output.import || canvas_output.import_clicked {
            self.import_photo();
        }
        if bar_output.export {
            self.export_poster();
        }
        if bar_output.share {
            self.share(ctx);
        }
    }
}
