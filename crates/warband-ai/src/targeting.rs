//! Target selection.

use glam::Vec3;

use warband_core::types::ground_distance;

/// Pick the candidate closest to `origin` on the ground plane.
///
/// Callers filter liveness and hostility before passing candidates in;
/// ties keep the earliest candidate.
pub fn nearest<T>(
    origin: Vec3,
    candidates: impl IntoIterator<Item = (T, Vec3)>,
) -> Option<(T, Vec3, f32)> {
    let mut best: Option<(T, Vec3, f32)> = None;
    for (id, position) in candidates {
        let distance = ground_distance(origin, position);
        let closer = best.as_ref().map_or(true, |(_, _, d)| distance < *d);
        if closer {
            best = Some((id, position, distance));
        }
    }
    best
}
