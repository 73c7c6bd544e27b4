//! Relative, time-bounded rotation tweens.
//!
//! A tween does not own the value it animates. Each step adds the eased
//! increment since the previous step, so several tweens and the per-frame
//! idle spin can all add into the same rotation without overwriting each
//! other. When a tween completes it has added exactly its full `delta`.

use glam::Vec3;

/// Cubic in-out ("power2.inOut"): maps linear progress in [0, 1] to eased
/// progress in [0, 1].
#[inline]
pub fn power2_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct RotationTween {
    pub target: usize,
    pub delta: Vec3,
    pub duration_sec: f32,
    elapsed_sec: f32,
    progress: f32,
}

impl RotationTween {
    pub fn new(target: usize, delta: Vec3, duration_sec: f32) -> Self {
        Self {
            target,
            delta,
            duration_sec,
            elapsed_sec: 0.0,
            progress: 0.0,
        }
    }

    /// Advance by `dt_sec` and return the rotation increment for this step.
    pub fn step(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed_sec += dt_sec.max(0.0);
        let t = if self.duration_sec > 0.0 {
            self.elapsed_sec / self.duration_sec
        } else {
            1.0
        };
        let eased = power2_in_out(t);
        let inc = self.delta * (eased - self.progress);
        self.progress = eased;
        inc
    }

    pub fn is_finished(&self) -> bool {
        self.duration_sec <= 0.0 || self.elapsed_sec >= self.duration_sec
    }
}

/// All running tweens. Overlapping tweens on one target are allowed.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    active: Vec<RotationTween>,
}

impl TweenSet {
    pub fn start(&mut self, tween: RotationTween) {
        self.active.push(tween);
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Step every tween, adding increments into `rotations[target]`, then
    /// drop finished ones. Tweens whose target is missing are discarded.
    pub fn advance(&mut self, dt_sec: f32, rotations: &mut [Vec3]) {
        self.active.retain_mut(|tw| {
            let Some(rot) = rotations.get_mut(tw.target) else {
                return false;
            };
            *rot += tw.step(dt_sec);
            !tw.is_finished()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(power2_in_out(0.0), 0.0);
        assert!((power2_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!((power2_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((power2_in_out(0.25) - 0.0625).abs() < 1e-6);
        assert!((power2_in_out(0.75) - 0.9375).abs() < 1e-6);
        assert_eq!(power2_in_out(2.0), 1.0);
        assert_eq!(power2_in_out(-1.0), 0.0);
    }

    #[test]
    fn tween_adds_exact_delta_over_uneven_steps() {
        let delta = Vec3::new(6.0, 3.0, 1.5);
        let mut tw = RotationTween::new(0, delta, 1.5);
        let mut total = Vec3::ZERO;
        for dt in [0.016, 0.5, 0.033, 0.2, 0.9] {
            total += tw.step(dt);
        }
        assert!(tw.is_finished());
        assert!((total - delta).length() < 1e-5);
        assert_eq!(tw.step(0.1), Vec3::ZERO);
    }

    #[test]
    fn overlapping_tweens_compose_additively() {
        let mut set = TweenSet::default();
        let mut rotations = [Vec3::ZERO; 3];
        let delta = Vec3::new(6.0, 3.0, 1.5);
        set.start(RotationTween::new(1, delta, 1.5));
        set.advance(0.5, &mut rotations);
        set.start(RotationTween::new(1, delta, 1.5));
        for _ in 0..40 {
            set.advance(0.1, &mut rotations);
        }
        assert!(set.is_empty());
        assert!((rotations[1] - delta * 2.0).length() < 1e-4);
        assert_eq!(rotations[0], Vec3::ZERO);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut set = TweenSet::default();
        let mut rotations = [Vec3::ZERO; 1];
        set.start(RotationTween::new(0, Vec3::X, 0.0));
        set.advance(0.0, &mut rotations);
        assert_eq!(rotations[0], Vec3::X);
        assert!(set.is_empty());
    }

    #[test]
    fn missing_target_is_dropped() {
        let mut set = TweenSet::default();
        let mut rotations = [Vec3::ZERO; 1];
        set.start(RotationTween::new(5, Vec3::ONE, 1.0));
        set.advance(0.1, &mut rotations);
        assert!(set.is_empty());
    }
}
