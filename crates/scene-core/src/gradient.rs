//! Procedural toon ramp, used until (or instead of) the gradient image.

/// RGBA8 texels for a `steps`-wide greyscale ramp from black to white.
///
/// With nearest sampling each texel becomes one flat lighting band.
pub fn toon_ramp(steps: u32) -> Vec<u8> {
    let steps = steps.max(2);
    (0..steps)
        .flat_map(|i| {
            let level = (i as f32 / (steps - 1) as f32 * 255.0).round() as u8;
            [level, level, level, 255]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_step_ramp() {
        assert_eq!(
            toon_ramp(3),
            vec![0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn ramp_has_at_least_two_bands() {
        assert_eq!(toon_ramp(0).len(), 8);
        let r = toon_ramp(5);
        let levels: Vec<u8> = r.chunks(4).map(|t| t[0]).collect();
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }
}
