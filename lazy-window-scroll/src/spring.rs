/// Stiffness of the default scroll spring.
pub const STIFFNESS_MEDIUM: f32 = 1500.0;
/// Critical damping: the fastest approach without oscillation.
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
/// Distance (in pixels) under which a spring counts as settled.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.01;

// A spring is at rest once it moves less than the visibility threshold per 60 Hz frame.
const SETTLE_FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Spring configuration for scroll animations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    pub damping_ratio: f32,
    pub stiffness: f32,
    pub visibility_threshold: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: DAMPING_RATIO_NO_BOUNCY,
            stiffness: STIFFNESS_MEDIUM,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default()
        }
    }
}

/// A damped harmonic oscillator moving from `initial_value` toward `target`.
///
/// The closed-form solution is evaluated at an absolute play time, so sampling is independent
/// of the frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringAnimation {
    initial_value: f32,
    target: f32,
    initial_velocity: f32,
    spec: SpringSpec,
}

impl SpringAnimation {
    pub fn new(initial_value: f32, target: f32, initial_velocity: f32, spec: SpringSpec) -> Self {
        debug_assert!(spec.stiffness > 0.0, "spring stiffness must be positive");
        Self {
            initial_value,
            target,
            initial_velocity,
            spec,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Value and velocity (units per second) after `play_time_nanos`.
    pub fn sample(&self, play_time_nanos: u64) -> (f32, f32) {
        let t = play_time_nanos as f64 / 1_000_000_000.0;
        let (x, v) = self.displacement_at(t);
        (self.target + x as f32, v as f32)
    }

    /// Whether the spring has settled by `play_time_nanos`.
    pub fn is_finished_at(&self, play_time_nanos: u64) -> bool {
        let t = play_time_nanos as f64 / 1_000_000_000.0;
        let (x, v) = self.displacement_at(t);
        let threshold = self.spec.visibility_threshold as f64;
        x.abs() < threshold && (v * SETTLE_FRAME_SECONDS).abs() < threshold
    }

    fn displacement_at(&self, t: f64) -> (f64, f64) {
        let omega = (self.spec.stiffness as f64).sqrt();
        let zeta = self.spec.damping_ratio as f64;
        let x0 = (self.initial_value - self.target) as f64;
        let v0 = self.initial_velocity as f64;

        if zeta > 1.0 {
            // Over-damped: sum of two decaying exponentials.
            let root = (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + omega * root;
            let gamma_minus = -zeta * omega - omega * root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let exp_minus = (gamma_minus * t).exp();
            let exp_plus = (gamma_plus * t).exp();
            (
                coeff_a * exp_minus + coeff_b * exp_plus,
                coeff_a * gamma_minus * exp_minus + coeff_b * gamma_plus * exp_plus,
            )
        } else if zeta == 1.0 {
            let coeff_a = x0;
            let coeff_b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let n = coeff_a + coeff_b * t;
            (n * decay, (coeff_b - omega * n) * decay)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let x = decay * (cos_coeff * cos + sin_coeff * sin);
            let v = x * (-zeta * omega)
                + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos);
            (x, v)
        }
    }
}
