//! Interior joint angles from 2D landmark triples.

use super::landmarks::{HandLandmarks, JointPosition};

/// Interior angle at `b` (degrees, 0-180) formed by `a`-`b`-`c`.
///
/// Takes the four-quadrant heading of `b->a` and `b->c` and returns the
/// absolute difference, reflected into [0, 180]. Coincident points give a
/// zero vector, whose heading is 0, so degenerate input still yields a
/// finite angle. Anything non-finite comes back as 0.
pub fn joint_angle(a: &JointPosition, b: &JointPosition, c: &JointPosition) -> f32 {
    let heading_a = (a.y - b.y).atan2(a.x - b.x);
    let heading_c = (c.y - b.y).atan2(c.x - b.x);

    let mut angle = (heading_a - heading_c).to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    if angle.is_finite() {
        angle
    } else {
        0.0
    }
}

/// Angle at the middle joint of a landmark-index triple.
pub fn triple_angle(hand: &HandLandmarks, (a, b, c): (usize, usize, usize)) -> f32 {
    joint_angle(hand.joint(a), hand.joint(b), hand.joint(c))
}

/// Arithmetic mean of the angles over several triples (0 if none).
pub fn mean_angle(hand: &HandLandmarks, triples: &[(usize, usize, usize)]) -> f32 {
    if triples.is_empty() {
        return 0.0;
    }
    let sum: f32 = triples.iter().map(|&t| triple_angle(hand, t)).sum();
    sum / triples.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn p(x: f32, y: f32) -> JointPosition {
        JointPosition::new(x, y)
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = joint_angle(&p(0.0, 0.5), &p(0.5, 0.5), &p(1.0, 0.5));
        assert!((angle - 180.0).abs() < TOLERANCE, "got {angle}");

        // Diagonal and vertical lines, both directions
        let angle = joint_angle(&p(0.1, 0.1), &p(0.4, 0.4), &p(0.9, 0.9));
        assert!((angle - 180.0).abs() < TOLERANCE, "got {angle}");
        let angle = joint_angle(&p(0.5, 0.95), &p(0.5, 0.6), &p(0.5, 0.05));
        assert!((angle - 180.0).abs() < TOLERANCE, "got {angle}");
    }

    #[test]
    fn test_right_angle_is_90() {
        let angle = joint_angle(&p(0.0, 0.0), &p(0.5, 0.0), &p(0.5, 0.5));
        assert!((angle - 90.0).abs() < TOLERANCE, "got {angle}");

        let angle = joint_angle(&p(0.2, 0.8), &p(0.2, 0.2), &p(0.9, 0.2));
        assert!((angle - 90.0).abs() < TOLERANCE, "got {angle}");
    }

    #[test]
    fn test_reflex_difference_is_reflected() {
        // Headings of 135° and -135° differ by 270°, interior angle is 90°
        let angle = joint_angle(&p(-1.0, 1.0), &p(0.0, 0.0), &p(-1.0, -1.0));
        assert!((angle - 90.0).abs() < TOLERANCE, "got {angle}");
    }

    #[test]
    fn test_angle_is_symmetric_in_outer_points() {
        let (a, b, c) = (p(0.0, 0.0), p(0.1, 0.0), p(0.15, 0.1));
        let forward = joint_angle(&a, &b, &c);
        let backward = joint_angle(&c, &b, &a);
        assert!((forward - backward).abs() < TOLERANCE);
        assert!((0.0..=180.0).contains(&forward));
    }

    #[test]
    fn test_coincident_points_are_zero() {
        let q = p(0.5, 0.5);
        assert_eq!(joint_angle(&q, &q, &q), 0.0);
    }

    #[test]
    fn test_non_finite_maps_to_zero() {
        let angle = joint_angle(&p(f32::NAN, 0.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_mean_angle_of_no_triples() {
        let joints = crate::gesture::landmarks::make_hand([true; 5]);
        let hand = HandLandmarks::from_slice(&joints).unwrap();
        assert_eq!(mean_angle(&hand, &[]), 0.0);
        let straight = mean_angle(&hand, &[(5, 6, 7), (6, 7, 8)]);
        assert!((straight - 180.0).abs() < 0.01, "got {straight}");
    }
}
