use std::fs;
use std::path::{Path, PathBuf};

use crate::frame_loop::{DEFAULT_ZOOM_FACTOR, FramePacing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Phosphor",
            ThemeKind::Light => "Paper",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub theme: ThemeKind,
    pub capacity: usize,
    pub sample_spacing: f32,
    pub zoom_factor: f64,
    pub zoom_scale: f64,
    pub pacing: FramePacing,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            capacity: 800,
            sample_spacing: 1.0,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            zoom_scale: 1.0,
            pacing: FramePacing::Capped { fps: 60 },
            window_width: 800.0,
            window_height: 400.0,
        }
    }
}

impl AppSettings {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw),
            Err(err) => {
                log::info!("no settings at {} ({err}), using defaults", path.display());
                AppSettings::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Self {
        let mut settings = AppSettings::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                apply_kv(key.trim(), value.trim(), &mut settings);
            }
        }
        settings
    }

    pub fn render(&self) -> String {
        let mut buf = String::new();
        buf.push_str(&format!("theme={}\n", self.theme.as_key()));
        buf.push_str(&format!("capacity={}\n", self.capacity));
        buf.push_str(&format!("sample_spacing={}\n", self.sample_spacing));
        buf.push_str(&format!("zoom_factor={}\n", self.zoom_factor));
        buf.push_str(&format!("zoom_scale={}\n", self.zoom_scale));
        buf.push_str(&format!("max_fps={}\n", self.pacing.max_fps()));
        buf.push_str(&format!("window_width={}\n", self.window_width));
        buf.push_str(&format!("window_height={}\n", self.window_height));
        buf
    }

    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("failed to create settings directory {}: {err}", parent.display());
            }
        }
        if let Err(err) = fs::write(path, self.render()) {
            log::warn!("failed to save settings to {}: {err}", path.display());
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("ringscope.cfg")
}

fn apply_kv(key: &str, value: &str, settings: &mut AppSettings) {
    match key {
        "theme" => settings.theme = ThemeKind::from_str(value),
        "capacity" => {
            parse_checked(key, value, &mut settings.capacity, |v: &usize| *v > 0)
        }
        "sample_spacing" => parse_checked(key, value, &mut settings.sample_spacing, |v: &f32| {
            v.is_finite() && *v > 0.0
        }),
        "zoom_factor" => parse_checked(key, value, &mut settings.zoom_factor, |v: &f64| {
            v.is_finite() && *v > 1.0
        }),
        "zoom_scale" => parse_checked(key, value, &mut settings.zoom_scale, |v: &f64| {
            v.is_finite() && *v > 0.0
        }),
        "max_fps" => {
            let mut fps = settings.pacing.max_fps();
            parse_checked(key, value, &mut fps, |_: &u32| true);
            settings.pacing = FramePacing::from_max_fps(fps);
        }
        "window_width" => parse_checked(key, value, &mut settings.window_width, |v: &f32| {
            v.is_finite() && *v >= 100.0
        }),
        "window_height" => parse_checked(key, value, &mut settings.window_height, |v: &f32| {
            v.is_finite() && *v >= 100.0
        }),
        _ => log::warn!("ignoring unknown setting '{key}'"),
    }
}

fn parse_checked<T: std::str::FromStr>(
    key: &str,
    value: &str,
    target: &mut T,
    valid: impl Fn(&T) -> bool,
) {
    match value.parse::<T>() {
        Ok(v) if valid(&v) => *target = v,
        _ => log::warn!("ignoring invalid value '{value}' for setting '{key}'"),
    }
}

fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(roaming) = std::env::var("APPDATA") {
            return PathBuf::from(roaming).join("RingScope");
        }
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(local).join("RingScope");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("RingScope");
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("ringscope");
    }

    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ringscope")
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from).or_else(|| {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE").ok().map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            None
        }
    })
}
