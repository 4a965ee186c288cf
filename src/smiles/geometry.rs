//! 2-D geometric primitives for stereo resolution.
//!
//! These operate on depicted coordinates, not on 3-D structure. The exact
//! formulas matter: downstream ordering decisions compare their raw output,
//! including the behavior on degenerate input.

/// Angle at `from` between the rays toward `to1` and `to2`, wrapped into
/// `[0, 2*pi)`.
pub(crate) fn give_angle(from: [f64; 2], to1: [f64; 2], to2: [f64; 2]) -> f64 {
    angle(from, to1, to2, true)
}

/// Same angle without the wrap, so the sign distinguishes the two sides.
pub(crate) fn give_angle_from_middle(from: [f64; 2], to1: [f64; 2], to2: [f64; 2]) -> f64 {
    angle(from, to1, to2, false)
}

fn angle(from: [f64; 2], to1: [f64; 2], to2: [f64; 2], full_circle: bool) -> f64 {
    let angle = (from[1] - to1[1]).atan2(from[0] - to1[0])
        - (from[1] - to2[1]).atan2(from[0] - to2[0]);
    if full_circle && angle < 0.0 {
        angle + 2.0 * std::f64::consts::PI
    } else {
        angle
    }
}

/// Whether `where_is` lies to the left of the line from `view_from` to
/// `view_to`, judged by intersecting that line with the horizontal through
/// `where_is`.
///
/// A horizontal viewing line degenerates: the intersection runs to infinity
/// and `y` comes out NaN, so the `y` comparison fails and the sign of the
/// infinite `x` decides. The answer then depends on the viewing direction.
pub(crate) fn is_left(where_is: [f64; 2], view_from: [f64; 2], view_to: [f64; 2]) -> bool {
    let a = view_from;
    let b = view_to;
    let c = where_is;
    let d = [c[0] - 1.0, c[1]];
    let det_ab = a[0] * b[1] - a[1] * b[0];
    let det_cd = c[0] * d[1] - c[1] * d[0];
    let den = (b[1] - a[1]) * (c[0] - d[0]) - (a[0] - b[0]) * (d[1] - c[1]);
    let x = (det_ab * (c[0] - d[0]) - det_cd * (a[0] - b[0])) / den;
    let y = (det_cd * (b[1] - a[1]) - det_ab * (d[1] - c[1])) / den;
    if y > c[1] {
        !(x > c[0])
    } else {
        x > c[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn give_angle_wraps_into_full_circle() {
        let origin = [0.0, 0.0];
        // rays toward +x and +y, measured at the origin
        let quarter = give_angle(origin, [1.0, 0.0], [0.0, 1.0]);
        assert!((quarter - 1.5 * PI).abs() < 1e-9);
        assert!((0.0..2.0 * PI).contains(&quarter));
    }

    #[test]
    fn give_angle_from_middle_keeps_sign() {
        let origin = [0.0, 0.0];
        let a = give_angle_from_middle(origin, [1.0, 0.0], [0.0, 1.0]);
        let b = give_angle_from_middle(origin, [0.0, 1.0], [1.0, 0.0]);
        assert!((a + b).abs() < 1e-9);
    }

    #[test]
    fn is_left_distinguishes_the_sides() {
        // viewing line y = x, from the origin toward (1, 1)
        let from = [0.0, 0.0];
        let to = [1.0, 1.0];
        assert!(is_left([-1.0, 0.5], from, to));
        assert!(!is_left([1.0, -0.5], from, to));
    }

    #[test]
    fn horizontal_sight_lines_resolve_by_viewing_direction() {
        // the intersection lies at infinity; its sign still picks a side
        assert!(is_left([0.5, 1.0], [0.0, 0.0], [1.0, 0.0]));
        assert!(!is_left([0.5, -1.0], [0.0, 0.0], [1.0, 0.0]));
        // reversing the view flips the answer
        assert!(!is_left([0.5, 1.0], [1.0, 0.0], [0.0, 0.0]));
    }
}
