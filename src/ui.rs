use std::path::PathBuf;

use egui::{self, Align2, Color32, ComboBox, FontId, Layout, Pos2, Rect, Rounding, Stroke};

use crate::frame_loop::{FrameLoop, KeyState, MonotonicClock};
use crate::settings::{AppSettings, ThemeKind};

const ACCENT: Color32 = Color32::from_rgb(80, 250, 123);
const PLOT_MARGIN: f32 = 8.0;
/// Fraction of the half-height used by a full-scale sample.
const VERTICAL_HEADROOM: f32 = 0.9;

pub struct ScopeApp {
    frames: FrameLoop<MonotonicClock>,
    settings_path: PathBuf,
    settings: AppSettings,
    was_zooming: bool,
    closing: bool,
}

impl ScopeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        frames: FrameLoop<MonotonicClock>,
        settings_path: PathBuf,
        settings: AppSettings,
    ) -> Self {
        apply_theme(&cc.egui_ctx, settings.theme);
        Self {
            frames,
            settings_path,
            settings,
            was_zooming: false,
            closing: false,
        }
    }

    fn persist(&mut self) {
        self.settings.zoom_scale = self.frames.zoom_scale();
        self.settings.save(&self.settings_path);
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keys = read_keys(ctx);
        if ctx.input(|input| input.viewport().close_requested()) {
            self.frames.request_quit();
        }
        self.frames.tick(&keys);

        let zooming = keys.zoom_in || keys.zoom_out;
        if self.was_zooming && !zooming {
            self.persist();
        }
        self.was_zooming = zooming;

        if self.frames.should_quit() {
            if !self.closing {
                self.closing = true;
                log::info!("closing after {:.1}s", self.frames.elapsed().as_secs_f64());
                self.persist();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        let mut theme_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.strong("RingScope");
                ui.label("Up/Down = zoom · Q = quit");
                ui.separator();
                theme_changed = theme_selector(ui, ctx, &mut self.settings);
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(status_line(&self.frames));
                });
            });
            ui.add_space(6.0);

            scope_card(ui, "Signal", |ui| draw_scope(ui, &self.frames));
            ui.add_space(6.0);
            scope_card(ui, "Components", |ui| signal_legend(ui, &self.frames));
        });
        if theme_changed {
            self.persist();
        }

        match self.settings.pacing.repaint_delay() {
            Some(delay) => ctx.request_repaint_after(delay),
            None => ctx.request_repaint(),
        }
    }
}

fn read_keys(ctx: &egui::Context) -> KeyState {
    ctx.input(|input| map_keys(|key| input.key_down(key)))
}

fn map_keys(is_down: impl Fn(egui::Key) -> bool) -> KeyState {
    KeyState {
        zoom_in: is_down(egui::Key::ArrowUp),
        zoom_out: is_down(egui::Key::ArrowDown),
        quit: is_down(egui::Key::Q) || is_down(egui::Key::Escape),
    }
}

fn status_line(frames: &FrameLoop<MonotonicClock>) -> String {
    let ring = frames.ring();
    format!(
        "{}/{} samples · zoom ×{:.2} · t = {:.1}s",
        ring.len(),
        ring.capacity(),
        frames.zoom_scale(),
        frames.elapsed().as_secs_f64()
    )
}

fn draw_scope(ui: &mut egui::Ui, frames: &FrameLoop<MonotonicClock>) {
    let height = (ui.available_height() - 80.0).max(140.0);
    let desired = egui::vec2(ui.available_width().max(200.0), height);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect(
        rect,
        Rounding::same(6.0),
        ui.visuals().extreme_bg_color,
        Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    let plot = rect.shrink(PLOT_MARGIN);
    let crosshair = Stroke::new(1.0, ui.visuals().weak_text_color());
    painter.line_segment(
        [
            egui::pos2(plot.left(), plot.center().y),
            egui::pos2(plot.right(), plot.center().y),
        ],
        crosshair,
    );
    painter.line_segment(
        [
            egui::pos2(plot.right(), plot.top()),
            egui::pos2(plot.right(), plot.bottom()),
        ],
        crosshair,
    );

    let points = project(
        &frames.snapshot(),
        plot,
        Viewport {
            span: frames.ring().capacity() as f64 * frames.sample_spacing() as f64,
            zoom: frames.zoom_scale(),
            peak: frames.signal().peak(),
        },
    );
    if points.len() >= 2 {
        painter.add(egui::Shape::line(
            points,
            Stroke::new(2.0, ui.visuals().selection.bg_fill),
        ));
    } else {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Scope warming up...",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
    }
}

/// Data-space extent of the plot.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    /// Horizontal data span visible at zoom 1.
    span: f64,
    zoom: f64,
    /// Sample magnitude mapped to the top of the plot.
    peak: f32,
}

/// Maps `[x, y]` samples into screen space with `x = 0` on the right edge.
/// Samples scrolled further left than one step past the left edge are dropped.
fn project(samples: &[[f32; 2]], plot: Rect, view: Viewport) -> Vec<Pos2> {
    let visible_span = (view.span / view.zoom).max(f64::MIN_POSITIVE);
    // Keep finite so the newest sample (x = 0) never becomes 0 * inf.
    let px_per_unit = (plot.width() as f64 / visible_span).min(f32::MAX as f64);
    let peak = if view.peak > 0.0 { view.peak } else { 1.0 };
    let half_height = plot.height() * 0.5 * VERTICAL_HEADROOM;

    let mut points = Vec::with_capacity(samples.len());
    let mut previous_offscreen: Option<Pos2> = None;
    for &[x, y] in samples {
        let screen_x = plot.right() as f64 + x as f64 * px_per_unit;
        let screen_y = plot.center().y - (y / peak) * half_height;
        let pos = egui::pos2(screen_x.max(f32::MIN as f64) as f32, screen_y);
        if screen_x < plot.left() as f64 {
            previous_offscreen = Some(pos);
            continue;
        }
        if let Some(edge) = previous_offscreen.take() {
            points.push(edge);
        }
        points.push(pos);
    }
    points
}

fn signal_legend(ui: &mut egui::Ui, frames: &FrameLoop<MonotonicClock>) {
    ui.horizontal_wrapped(|ui| {
        for component in frames.signal().components() {
            ui.label(format!(
                "{} {:.2}s ×{:.2}",
                component.waveform.label(),
                component.period_secs,
                component.amplitude
            ));
            ui.separator();
        }
        ui.label(format!("peak ±{:.2}", frames.signal().peak()));
    });
}

fn scope_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
        .rounding(Rounding::same(8.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(ui.visuals().selection.bg_fill, title);
                ui.add_space(6.0);
                ui.separator();
            });
            ui.add_space(6.0);
            add_contents(ui);
        });
}

fn theme_selector(ui: &mut egui::Ui, ctx: &egui::Context, settings: &mut AppSettings) -> bool {
    let mut selected = settings.theme;
    ComboBox::from_id_source("theme_selector")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, ThemeKind::Dark, ThemeKind::Dark.label());
            ui.selectable_value(&mut selected, ThemeKind::Light, ThemeKind::Light.label());
        });

    if selected != settings.theme {
        settings.theme = selected;
        apply_theme(ctx, selected);
        true
    } else {
        false
    }
}

fn apply_theme(ctx: &egui::Context, theme: ThemeKind) {
    match theme {
        ThemeKind::Dark => apply_phosphor_theme(ctx),
        ThemeKind::Light => apply_paper_theme(ctx),
    }
}

fn apply_phosphor_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();
    style.visuals.override_text_color = Some(Color32::from_rgb(220, 235, 220));
    style.visuals.extreme_bg_color = Color32::from_rgb(6, 12, 8);
    style.visuals.faint_bg_color = Color32::from_rgb(20, 24, 22);
    style.visuals.window_fill = Color32::from_rgb(12, 14, 13);
    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(8, 8, 8));
    ctx.set_style(style);
}

fn apply_paper_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.extreme_bg_color = Color32::from_rgb(252, 252, 248);
    style.visuals.selection.bg_fill = Color32::from_rgb(30, 120, 200);
    style.visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(20, 40, 70));
    ctx.set_style(style);
}
