//! Joint angle calculation
//!
//! Computes the included angle at a vertex joint from the directions of the
//! two limbs meeting there, e.g. shoulder→elbow and wrist→elbow.

/// Included angle at `vertex` between `a` and `c`, in degrees within [0, 180].
///
/// Takes the difference of the two limb headings (`atan2`), so the result does
/// not depend on which side is passed first.
pub fn joint_angle(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let heading_c = (c.1 - vertex.1).atan2(c.0 - vertex.0);
    let heading_a = (a.1 - vertex.1).atan2(a.0 - vertex.0);

    fold_degrees((heading_c - heading_a).to_degrees().abs())
}

/// Reflect an absolute angle in [0, 360] back into [0, 180].
///
/// Rounding in the heading difference can land a hair past 360; the result is
/// clamped so it never leaves the range.
pub fn fold_degrees(degrees: f32) -> f32 {
    let folded = if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    };
    folded.clamp(0.0, 180.0)
}
