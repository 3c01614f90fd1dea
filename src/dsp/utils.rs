// Shared numeric helpers for the spectral pipeline.

/// Smallest magnitude any spectral estimate is allowed to reach. Keeps
/// divisions in the gain stage well-defined.
pub const MAG_FLOOR: f32 = 1e-9;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn db_to_gain(db: f32) -> f32 {
    (10.0f32).powf(db / 20.0)
}

pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * gain.max(MAG_FLOOR).log10()
}

pub fn frame_rms(x: &[f32]) -> f32 {
    let mut s = 0.0f32;
    for &v in x {
        s += v * v;
    }
    (s / (x.len().max(1) as f32)).sqrt()
}
