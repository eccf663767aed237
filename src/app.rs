use egui::Color32;
use futures::FutureExt as _;
use futures::future::LocalBoxFuture;

use crate::error::EditorResult;
use crate::input::{InputCollector, route_event};
use crate::persist::{DrawingStore, MemoryStore, SaveRequest, SavedDrawing, export_filename};
use crate::session::{CANVAS_HEIGHT, CANVAS_WIDTH, EditorSession, NotificationKind};
use crate::tools::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, SWATCHES, ToolKind};

const TOAST_SECONDS: f64 = 3.0;

/// The eframe shell around the editor core: it paints the composite, feeds
/// raw input through the router, and hosts the side-panel widgets and the
/// toast overlay. Everything with editor semantics lives in
/// [`EditorSession`]; this stays thin glue.
///
/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    title: String,
    is_public: bool,
    auth_token: String,
    prefs: crate::tools::ToolState,
    #[serde(skip)]
    session: EditorSession,
    #[serde(skip)]
    input: InputCollector,
    #[serde(skip)]
    store: MemoryStore,
    #[serde(skip)]
    pending_save: Option<LocalBoxFuture<'static, EditorResult<SavedDrawing>>>,
    #[serde(skip)]
    canvas_texture: Option<egui::TextureHandle>,
    #[serde(skip)]
    canvas_revision: Option<u64>,
    #[serde(skip)]
    toasts: Vec<(NotificationKind, String, f64)>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            title: String::new(),
            is_public: false,
            auth_token: String::new(),
            prefs: crate::tools::ToolState::default(),
            session: EditorSession::default(),
            input: InputCollector::new(),
            store: MemoryStore::new(),
            pending_save: None,
            canvas_texture: None,
            canvas_revision: None,
            toasts: Vec::new(),
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        *app.session.tools_mut() = app.prefs.clone();
        app
    }

    fn poll_pending_save(&mut self) {
        let Some(future) = self.pending_save.as_mut() else {
            return;
        };
        let mut cx = std::task::Context::from_waker(futures::task::noop_waker_ref());
        if let std::task::Poll::Ready(result) = future.poll_unpin(&mut cx) {
            self.pending_save = None;
            match result {
                Ok(saved) => {
                    log::info!("drawing saved as {}", saved.id);
                    self.session.notify_success("Drawing saved successfully!");
                }
                Err(err) => {
                    log::warn!("{err}");
                    self.session.notify_error("Failed to save drawing");
                }
            }
        }
    }

    fn begin_save(&mut self) {
        let request = match SaveRequest::new(&self.title, self.session.composite(), self.is_public)
        {
            Ok(request) => request,
            Err(err) => {
                log::error!("could not build save request: {err}");
                self.session.notify_error("Failed to save drawing");
                return;
            }
        };
        log::info!(
            "saving drawing '{}' ({} bytes)",
            request.title,
            request.image_data.len()
        );
        self.pending_save = Some(self.store.save_drawing(&self.auth_token, request));
    }

    fn export_drawing(&mut self) {
        let filename = export_filename(&self.title);
        match self.session.composite().encode_png() {
            Ok(png) => match std::fs::write(&filename, &png) {
                Ok(()) => {
                    log::info!("exported {filename} ({} bytes)", png.len());
                    self.session.notify_success("Drawing exported!");
                }
                Err(err) => {
                    log::error!("failed to write {filename}: {err}");
                    self.session.notify_error("Failed to export drawing");
                }
            },
            Err(err) => {
                log::error!("{err}");
                self.session.notify_error("Failed to export drawing");
            }
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        let active = self.session.tools().tool;
        ui.horizontal_wrapped(|ui| {
            for tool in ToolKind::ALL {
                if ui.selectable_label(active == tool, tool.name()).clicked() {
                    self.session.set_tool(tool);
                }
            }
        });

        let mut color = self.session.tools().color;
        ui.horizontal(|ui| {
            ui.label("Color");
            if ui.color_edit_button_srgba(&mut color).changed() {
                self.session.set_brush_color(color);
            }
        });
        ui.horizontal(|ui| {
            for swatch in SWATCHES {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::click());
                ui.painter().rect_filled(rect, 2.0, swatch);
                if response.clicked() {
                    self.session.set_brush_color(swatch);
                }
            }
        });

        let mut size = self.session.tools().brush_size;
        if ui
            .add(egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).text("Size"))
            .changed()
        {
            self.session.set_brush_size(size);
        }

        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() {
                self.session.undo();
            }
            if ui.button("Redo").clicked() {
                self.session.redo();
            }
            if ui.button("Clear").clicked() {
                self.session.clear_active_layer();
            }
        });

        ui.horizontal(|ui| {
            if ui.button("−").clicked() {
                self.session.viewport_mut().zoom_out();
            }
            ui.label(format!("{}%", self.session.viewport().percent()));
            if ui.button("+").clicked() {
                self.session.viewport_mut().zoom_in();
            }
            if ui.button("Reset").clicked() {
                self.session.viewport_mut().reset_zoom();
            }
        });
    }

    fn layers_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        if ui.button("Add Layer").clicked() {
            self.session.add_layer(None);
        }

        let active = self.session.stack().active_index();
        let rows: Vec<(usize, String, bool)> = self
            .session
            .stack()
            .layers()
            .iter()
            .enumerate()
            .map(|(index, layer)| (index, layer.name().to_string(), layer.visible()))
            .collect();
        // top of the stack first, like the canvas paints it last
        for (index, name, visible) in rows.into_iter().rev() {
            ui.horizontal(|ui| {
                if ui.selectable_label(index == active, &name).clicked() {
                    self.session.select_layer(index).ok();
                }
                let mut visible = visible;
                if ui.checkbox(&mut visible, "").on_hover_text("Visible").changed() {
                    self.session.set_layer_visibility(index, visible).ok();
                }
                if ui.button("🗑").clicked() {
                    self.session.delete_layer(index).ok();
                }
            });
        }

        let mut percent = (self.session.stack().active_layer().opacity() * 100.0).round() as u32;
        if ui
            .add(egui::Slider::new(&mut percent, 0..=100).text("Opacity"))
            .changed()
        {
            self.session.set_layer_opacity_percent(active, percent).ok();
        }
    }

    fn save_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Save");
        ui.horizontal(|ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut self.title);
        });
        ui.checkbox(&mut self.is_public, "Public");
        ui.horizontal(|ui| {
            ui.label("Token");
            ui.add(egui::TextEdit::singleline(&mut self.auth_token).password(true));
        });
        ui.horizontal(|ui| {
            let saving = self.pending_save.is_some();
            if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
                self.begin_save();
            }
            if ui.button("Export PNG").clicked() {
                self.export_drawing();
            }
        });
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let zoom = self.session.viewport().zoom();
        let size = egui::vec2(CANVAS_WIDTH as f32 * zoom, CANVAS_HEIGHT as f32 * zoom);
        egui::ScrollArea::both().show(ui, |ui| {
            let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::drag());
            self.session.viewport_mut().set_canvas_origin(rect.min);
            self.input.set_canvas_rect(rect);

            if self.canvas_revision != Some(self.session.revision()) {
                let image = self.session.composite().to_color_image();
                match &mut self.canvas_texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                    None => {
                        self.canvas_texture =
                            Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
                    }
                }
                self.canvas_revision = Some(self.session.revision());
            }
            if let Some(texture) = &self.canvas_texture {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
            }
        });
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|input| input.time);
        for notification in self.session.take_notifications() {
            self.toasts
                .push((notification.kind, notification.message, now + TOAST_SECONDS));
        }
        self.toasts.retain(|(_, _, expires)| *expires > now);
        if self.toasts.is_empty() {
            return;
        }
        // keep repainting so toasts fade out without further input
        ctx.request_repaint();
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                for (kind, message, _) in &self.toasts {
                    let fill = match kind {
                        NotificationKind::Success => Color32::from_rgb(46, 125, 50),
                        NotificationKind::Error => Color32::from_rgb(183, 28, 28),
                    };
                    egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                        ui.label(egui::RichText::new(message).color(Color32::WHITE));
                    });
                }
            });
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.prefs = self.session.tools().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.input.collect(ctx) {
            route_event(&event, &mut self.session);
        }
        self.poll_pending_save();
        if self.pending_save.is_some() {
            ctx.request_repaint();
        }

        egui::SidePanel::left("side_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                self.tools_panel(ui);
                ui.separator();
                self.layers_panel(ui);
                ui.separator();
                self.save_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ctx, ui);
        });

        self.show_toasts(ctx);
    }
}
