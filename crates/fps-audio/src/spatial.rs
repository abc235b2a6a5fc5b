use glam::Vec3;

/// Listener state for spatial audio calculations. Usually follows the player camera.
#[derive(Debug, Clone)]
pub struct Listener {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: -Vec3::Z,
            up: Vec3::Y,
        }
    }
}

/// Volume and panning of an emitter relative to the listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialParams {
    /// Volume attenuation factor (0.0–1.0).
    pub volume: f64,
    /// Stereo panning (-1.0 = full left, 0.0 = center, 1.0 = full right).
    pub panning: f64,
}

impl SpatialParams {
    /// Non-positional playback: full volume, centered.
    pub const FLAT: SpatialParams = SpatialParams {
        volume: 1.0,
        panning: 0.0,
    };

    /// Mix between flat playback (`spatial_blend` 0) and these fully
    /// positional params (`spatial_blend` 1).
    pub fn blend(self, spatial_blend: f32) -> SpatialParams {
        let t = spatial_blend.clamp(0.0, 1.0) as f64;
        SpatialParams {
            volume: Self::FLAT.volume + (self.volume - Self::FLAT.volume) * t,
            panning: Self::FLAT.panning + (self.panning - Self::FLAT.panning) * t,
        }
    }
}

/// Compute spatial audio parameters for an emitter position relative to a listener.
///
/// Inverse-distance rolloff: full volume up to `min_distance`, then
/// `min_distance / distance`, no further attenuation past `max_distance`.
/// Panning is the direction to the emitter projected on the listener's right vector.
pub fn compute_spatial(
    listener: &Listener,
    emitter_pos: Vec3,
    min_distance: f32,
    max_distance: f32,
) -> SpatialParams {
    let to_emitter = emitter_pos - listener.position;
    let distance = to_emitter.length();

    if distance < f32::EPSILON {
        return SpatialParams::FLAT;
    }

    let min_distance = min_distance.max(f32::EPSILON);
    let max_distance = max_distance.max(min_distance);
    let clamped = distance.clamp(min_distance, max_distance);
    let volume = (min_distance / clamped) as f64;

    let right = listener.forward.cross(listener.up).normalize_or_zero();
    let direction = to_emitter / distance;
    let panning = direction.dot(right) as f64;

    SpatialParams {
        volume: volume.clamp(0.0, 1.0),
        panning: panning.clamp(-1.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spatial(pos: Vec3) -> SpatialParams {
        compute_spatial(&Listener::default(), pos, 1.0, 100.0)
    }

    #[test]
    fn emitter_at_listener() {
        let params = spatial(Vec3::ZERO);
        assert!((params.volume - 1.0).abs() < 0.01);
        assert!(params.panning.abs() < 0.01);
    }

    #[test]
    fn emitter_to_the_right() {
        let params = spatial(Vec3::new(5.0, 0.0, 0.0));
        assert!(params.panning > 0.5, "should pan right: {}", params.panning);
        assert!(params.volume < 1.0, "should attenuate");
    }

    #[test]
    fn emitter_to_the_left() {
        let params = spatial(Vec3::new(-5.0, 0.0, 0.0));
        assert!(params.panning < -0.5, "should pan left: {}", params.panning);
    }

    #[test]
    fn far_emitter_quiet() {
        let params = spatial(Vec3::new(0.0, 0.0, -100.0));
        assert!(params.volume < 0.02, "should be very quiet at max distance: {}", params.volume);
    }

    #[test]
    fn larger_rolloff_min_distance_stays_loud_longer() {
        let listener = Listener::default();
        let pos = Vec3::new(0.0, 0.0, -4.0);
        let tight = compute_spatial(&listener, pos, 1.0, 100.0);
        let wide = compute_spatial(&listener, pos, 5.0, 100.0);
        assert!((tight.volume - 0.25).abs() < 1e-6);
        assert!((wide.volume - 1.0).abs() < 1e-6);
    }

    #[test]
    fn no_attenuation_past_max_distance() {
        let listener = Listener::default();
        let at_max = compute_spatial(&listener, Vec3::new(0.0, 0.0, -50.0), 1.0, 50.0);
        let beyond = compute_spatial(&listener, Vec3::new(0.0, 0.0, -500.0), 1.0, 50.0);
        assert!((at_max.volume - beyond.volume).abs() < 1e-9);
    }

    #[test]
    fn blend_interpolates_from_flat() {
        let positional = SpatialParams {
            volume: 0.2,
            panning: -1.0,
        };
        assert_eq!(positional.blend(0.0), SpatialParams::FLAT);
        let full = positional.blend(1.0);
        assert!((full.volume - 0.2).abs() < 1e-9);
        assert_eq!(full.panning, -1.0);
        let half = positional.blend(0.5);
        assert!((half.volume - 0.6).abs() < 1e-9);
        assert!((half.panning + 0.5).abs() < 1e-9);
        // Out of range blends clamp
        assert_eq!(positional.blend(3.0), full);
        assert_eq!(positional.blend(-1.0), SpatialParams::FLAT);
    }
}
