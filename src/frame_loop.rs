use std::time::{Duration, Instant};

use crate::error::RingError;
use crate::ring::SampleRing;
use crate::signal::SignalMix;

pub const DEFAULT_ZOOM_FACTOR: f64 = 1.05;
pub const DEFAULT_SAMPLE_SPACING: f32 = 1.0;

/// Source of elapsed time since a fixed start reference.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Keys held down during the current frame. Holding a key repeats its effect every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub quit: bool,
}

/// Horizontal stretch of the rendered waveform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomScale {
    scale: f64,
    factor: f64,
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self {
            scale: 1.0,
            factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

impl ZoomScale {
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() && factor > 1.0 {
            factor
        } else {
            log::warn!("zoom factor {factor} must be a finite number above 1, using {DEFAULT_ZOOM_FACTOR}");
            DEFAULT_ZOOM_FACTOR
        };
        Self { scale: 1.0, factor }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Self::clamp(scale);
        self
    }

    pub fn value(&self) -> f64 {
        self.scale
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn zoom_in(&mut self) {
        self.scale = Self::clamp(self.scale * self.factor);
    }

    pub fn zoom_out(&mut self) {
        self.scale = Self::clamp(self.scale / self.factor);
    }

    fn clamp(scale: f64) -> f64 {
        if scale.is_nan() {
            return 1.0;
        }
        scale.clamp(f64::MIN_POSITIVE, f64::MAX)
    }
}

/// How often the windowing layer should schedule the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FramePacing {
    Uncapped,
    Capped { fps: u32 },
}

impl FramePacing {
    pub fn from_max_fps(max_fps: u32) -> Self {
        if max_fps == 0 {
            FramePacing::Uncapped
        } else {
            FramePacing::Capped { fps: max_fps }
        }
    }

    pub fn max_fps(&self) -> u32 {
        match self {
            FramePacing::Uncapped => 0,
            FramePacing::Capped { fps } => *fps,
        }
    }

    /// `None` means repaint as soon as possible.
    pub fn repaint_delay(&self) -> Option<Duration> {
        match self {
            FramePacing::Uncapped => None,
            FramePacing::Capped { fps } => Some(Duration::from_secs_f64(1.0 / *fps as f64)),
        }
    }
}

/// Drives one frame: sample the signal, push it, apply zoom input, and expose the window.
pub struct FrameLoop<C: Clock> {
    clock: C,
    elapsed: Duration,
    ring: SampleRing<f32>,
    signal: SignalMix,
    zoom: ZoomScale,
    sample_spacing: f32,
    quit_requested: bool,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(
        clock: C,
        capacity: usize,
        signal: SignalMix,
        zoom: ZoomScale,
        sample_spacing: f32,
    ) -> Result<Self, RingError> {
        let ring = SampleRing::new(capacity)?;
        // Negative or NaN spacing would put the oldest sample right of the newest.
        let sample_spacing = if sample_spacing.is_finite() && sample_spacing > 0.0 {
            sample_spacing
        } else {
            log::warn!(
                "sample spacing {sample_spacing} must be a finite number above 0, using {DEFAULT_SAMPLE_SPACING}"
            );
            DEFAULT_SAMPLE_SPACING
        };
        Ok(Self {
            clock,
            elapsed: Duration::ZERO,
            ring,
            signal,
            zoom,
            sample_spacing,
            quit_requested: false,
        })
    }

    /// Runs one iteration and returns the sample pushed this frame.
    pub fn tick(&mut self, keys: &KeyState) -> f32 {
        self.elapsed = self.elapsed.max(self.clock.elapsed());
        let sample = self.signal.sample_at(self.elapsed);
        self.ring.push(sample);

        if keys.zoom_in {
            self.zoom.zoom_in();
        }
        if keys.zoom_out {
            self.zoom.zoom_out();
        }
        if keys.zoom_in || keys.zoom_out {
            log::debug!("zoom scale now {:.4}", self.zoom.value());
        }
        if keys.quit {
            self.request_quit();
        }
        sample
    }

    /// `[x, y]` per held sample, oldest first. The newest sample sits at `x = 0`.
    pub fn snapshot(&self) -> Vec<[f32; 2]> {
        let newest = self.ring.len().saturating_sub(1) as f32;
        self.ring
            .iter()
            .enumerate()
            .map(|(i, &value)| [(i as f32 - newest) * self.sample_spacing, value])
            .collect()
    }

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            log::debug!("quit requested after {:.3}s", self.elapsed.as_secs_f64());
        }
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn zoom_scale(&self) -> f64 {
        self.zoom.value()
    }

    pub fn ring(&self) -> &SampleRing<f32> {
        &self.ring
    }

    pub fn signal(&self) -> &SignalMix {
        &self.signal
    }

    pub fn sample_spacing(&self) -> f32 {
        self.sample_spacing
    }
}
