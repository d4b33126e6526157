use ringscope::settings::{AppSettings, default_settings_path};
use ringscope::ui::ScopeApp;
use ringscope::{AppError, FrameLoop, MonotonicClock, SignalMix, ZoomScale};

fn main() -> Result<(), AppError> {
    env_logger::init();

    let settings_path = default_settings_path();
    let settings = AppSettings::load(&settings_path);
    log::info!(
        "ring capacity {}, pacing {:?}, settings at {}",
        settings.capacity,
        settings.pacing,
        settings_path.display()
    );

    let zoom = ZoomScale::new(settings.zoom_factor).with_scale(settings.zoom_scale);
    let frames = FrameLoop::new(
        MonotonicClock::start(),
        settings.capacity,
        SignalMix::default(),
        zoom,
        settings.sample_spacing,
    )?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("oscilloscope")
            .with_inner_size([settings.window_width, settings.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "RingScope",
        options,
        Box::new(move |cc| Box::new(ScopeApp::new(cc, frames, settings_path, settings))),
    )?;
    Ok(())
}
