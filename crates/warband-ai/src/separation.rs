//! Pairwise separation between neighbours.

use glam::Vec3;

/// Velocity nudge pushing `position` away from every neighbour closer than
/// `distance`. The push grows linearly with overlap, up to `strength`.
pub fn separation_push(
    position: Vec3,
    neighbours: impl IntoIterator<Item = Vec3>,
    distance: f32,
    strength: f32,
) -> Vec3 {
    let mut push = Vec3::ZERO;
    for other in neighbours {
        let offset = Vec3::new(position.x - other.x, 0.0, position.z - other.z);
        let d = offset.length();
        if d >= distance {
            continue;
        }
        let overlap = (distance - d) / distance;
        // Coincident units: pick a fixed sideways direction.
        let away = if d > 1e-4 { offset / d } else { Vec3::X };
        push += away * overlap * strength;
    }
    push
}
