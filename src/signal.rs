use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Saw => "Saw",
            Waveform::Triangle => "Triangle",
        }
    }

    /// `phase` is expected in `[0, 1)`.
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * (phase - 0.5),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalComponent {
    pub waveform: Waveform,
    pub period_secs: f32,
    pub amplitude: f32,
}

impl SignalComponent {
    pub const fn new(waveform: Waveform, period_secs: f32, amplitude: f32) -> Self {
        Self {
            waveform,
            period_secs,
            amplitude,
        }
    }

    /// Components with a non-positive or non-finite period, or a non-finite amplitude, are silent.
    fn is_audible(&self) -> bool {
        self.period_secs.is_finite() && self.period_secs > 0.0 && self.amplitude.is_finite()
    }

    fn sample_at(&self, seconds: f64) -> f32 {
        if !self.is_audible() {
            return 0.0;
        }
        // Phase in f64 so long sessions don't lose precision.
        let phase = (seconds / self.period_secs as f64).fract() as f32;
        self.waveform.sample(phase) * self.amplitude
    }
}

/// Demo signal: a fixed sum of periodic components evaluated at elapsed time.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalMix {
    components: Vec<SignalComponent>,
}

impl Default for SignalMix {
    fn default() -> Self {
        Self::new(vec![
            SignalComponent::new(Waveform::Sine, 1.0, 0.5),
            SignalComponent::new(Waveform::Sine, 0.37, 0.25),
            SignalComponent::new(Waveform::Sine, 0.11, 0.1),
            SignalComponent::new(Waveform::Square, 3.0, 0.15),
            SignalComponent::new(Waveform::Saw, 2.3, 0.1),
        ])
    }
}

impl SignalMix {
    pub fn new(components: Vec<SignalComponent>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[SignalComponent] {
        &self.components
    }

    pub fn sample_at(&self, elapsed: Duration) -> f32 {
        let seconds = elapsed.as_secs_f64();
        self.components
            .iter()
            .map(|component| component.sample_at(seconds))
            .sum()
    }

    /// Upper bound on `|sample_at(t)|` for any `t`.
    pub fn peak(&self) -> f32 {
        self.components
            .iter()
            .filter(|c| c.is_audible())
            .map(|c| c.amplitude.abs())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveforms_hit_expected_points() {
        assert!(Waveform::Sine.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(0.1), 1.0);
        assert_eq!(Waveform::Square.sample(0.6), -1.0);
        assert_eq!(Waveform::Saw.sample(0.0), -1.0);
        assert_eq!(Waveform::Saw.sample(0.5), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.0), -1.0);
    }

    #[test]
    fn same_elapsed_reproduces_same_sample() {
        let mix = SignalMix::default();
        let times: Vec<Duration> = (0..200).map(|ms| Duration::from_millis(ms * 17)).collect();
        let first: Vec<f32> = times.iter().map(|t| mix.sample_at(*t)).collect();
        let second: Vec<f32> = times.iter().map(|t| mix.sample_at(*t)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn default_mix_stays_within_peak() {
        let mix = SignalMix::default();
        let peak = mix.peak();
        assert!(peak > 0.0);
        for ms in (0..60_000).step_by(7) {
            let value = mix.sample_at(Duration::from_millis(ms));
            assert!(value.is_finite());
            assert!(value.abs() <= peak + 1e-5, "{value} exceeds {peak}");
        }
    }

    #[test]
    fn default_mix_has_square_and_saw_terms() {
        let mix = SignalMix::default();
        let kinds: Vec<Waveform> = mix.components().iter().map(|c| c.waveform).collect();
        assert!(kinds.iter().filter(|w| **w == Waveform::Sine).count() >= 2);
        assert!(kinds.contains(&Waveform::Square));
        assert!(kinds.contains(&Waveform::Saw));
    }

    #[test]
    fn non_positive_period_is_silent() {
        let mix = SignalMix::new(vec![SignalComponent::new(Waveform::Square, 0.0, 1.0)]);
        assert_eq!(mix.sample_at(Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn non_finite_components_stay_silent() {
        let mix = SignalMix::new(vec![
            SignalComponent::new(Waveform::Sine, f32::NAN, 1.0),
            SignalComponent::new(Waveform::Square, f32::INFINITY, 1.0),
            SignalComponent::new(Waveform::Saw, 1.0, f32::INFINITY),
            SignalComponent::new(Waveform::Triangle, 1.0, f32::NAN),
            SignalComponent::new(Waveform::Square, 2.0, 0.5),
        ]);
        assert_eq!(mix.peak(), 0.5);
        for ms in (0..5_000).step_by(13) {
            let value = mix.sample_at(Duration::from_millis(ms));
            assert!(value.is_finite());
            assert!(value.abs() <= mix.peak());
        }
    }
}
