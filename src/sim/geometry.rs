//! Segment and circle geometry
//!
//! Everything walls need: closest point on a segment, the contact between a
//! circle and a segment, and velocity reflection.

use glam::Vec2;

/// Contact between a circle and a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContact {
    /// Closest point on the segment to the circle centre
    pub point: Vec2,
    /// Unit perpendicular of the segment (reflection axis)
    pub perpendicular: Vec2,
    /// Unit direction from the contact point toward the circle centre
    pub push_dir: Vec2,
    /// Penetration depth (radius - distance)
    pub penetration: f32,
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Closest point on segment `a..b` to `p`
///
/// The projection is clamped to the segment. A zero-length segment returns `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Distance from `p` to segment `a..b`
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    distance(p, closest_point_on_segment(p, a, b))
}

/// Reflect velocity across a unit direction
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit perpendicular of segment `a..b`, or `None` if it has no length
#[inline]
pub fn segment_perpendicular(a: Vec2, b: Vec2) -> Option<Vec2> {
    (b - a).try_normalize().map(|dir| dir.perp())
}

/// Check a circle against segment `a..b`
///
/// Returns `None` when they do not overlap or the segment is degenerate.
pub fn segment_circle_contact(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> Option<SegmentContact> {
    let perpendicular = segment_perpendicular(a, b)?;
    let point = closest_point_on_segment(center, a, b);
    let offset = center - point;
    let dist = offset.length();
    if dist >= radius {
        return None;
    }

    // Centre sitting exactly on the segment: push along the perpendicular
    let push_dir = offset.try_normalize().unwrap_or(perpendicular);

    Some(SegmentContact {
        point,
        perpendicular,
        push_dir,
        penetration: radius - dist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        assert_eq!(closest_point_on_segment(Vec2::new(-5.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(15.0, 3.0), a, b), b);
        assert_eq!(
            closest_point_on_segment(Vec2::new(4.0, 3.0), a, b),
            Vec2::new(4.0, 0.0)
        );
    }

    #[test]
    fn test_closest_point_degenerate_segment() {
        let a = Vec2::new(3.0, 3.0);
        let p = closest_point_on_segment(Vec2::new(10.0, 10.0), a, a);
        assert_eq!(p, a);
        assert!(p.is_finite());
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert!((distance_to_segment(Vec2::new(50.0, 5.0), a, b) - 5.0).abs() < 1e-5);
        assert!((distance_to_segment(Vec2::new(103.0, 4.0), a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving right into a vertical surface
        let reflected = reflect_velocity(Vec2::new(3.0, 1.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 3.0).abs() < 1e-6);
        assert!((reflected.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_preserves_speed() {
        let n = Vec2::new(1.0, 1.0).normalize();
        let v = Vec2::new(2.5, -0.7);
        let r = reflect_velocity(v, n);
        assert!((r.length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_segment_circle_contact_hit() {
        let contact = segment_circle_contact(
            Vec2::new(50.0, 3.0),
            5.0,
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("circle overlaps the segment");

        assert_eq!(contact.point, Vec2::new(50.0, 0.0));
        assert!((contact.penetration - 2.0).abs() < 1e-5);
        assert!((contact.push_dir - Vec2::Y).length() < 1e-5);
        assert!((contact.perpendicular.dot(Vec2::X)).abs() < 1e-6);
    }

    #[test]
    fn test_segment_circle_contact_miss_and_degenerate() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert!(segment_circle_contact(Vec2::new(50.0, 6.0), 5.0, a, b).is_none());
        assert!(segment_circle_contact(Vec2::new(0.0, 0.0), 5.0, a, a).is_none());
    }

    #[test]
    fn test_segment_circle_contact_centre_on_segment() {
        let contact = segment_circle_contact(
            Vec2::new(50.0, 0.0),
            5.0,
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("centre on segment is a hit");
        assert!(contact.push_dir.is_finite());
        assert!((contact.penetration - 5.0).abs() < 1e-6);
    }
}
