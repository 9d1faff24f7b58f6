//! ASCII STL export of a generated c-space.
//!
//! # Format
//!
//! ```text
//! solid <description>
//!  facet normal ni nj nk
//!   outer loop
//!    vertex v1x v1y v1z
//!    vertex v2x v2y v2z
//!    vertex v3x v3y v3z
//!   endloop
//!  endfacet
//!  ...
//! endsolid <description>
//! ```
//!
//! The boundary box comes first (12 inward-facing triangles), then every
//! obstacle's faces in order. Numbers use C-style `%e` notation.

use crate::export::triangulation::{triangulate, BORDER_TRIANGLES};
use crate::space::CSpace;
use crate::utils::Point3D;

/// Formats a float like C's `%e`: six decimals and a signed, two-digit exponent.
fn sci(value: f64) -> String {
    let raw = format!("{:.6e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        // NaN and infinities
        None => raw,
    }
}

/// Unit normal of triangle `abc` by the right-hand rule.
///
/// Collinear vertices cannot come out of the generator; if they did, the zero
/// vector is returned instead of dividing by zero.
pub fn facet_normal(a: &Point3D, b: &Point3D, c: &Point3D) -> Point3D {
    let ab = b.sub(a);
    let bc = c.sub(b);
    ab.cross(&bc).normalize()
}

fn write_facet(out: &mut String, a: &Point3D, b: &Point3D, c: &Point3D) {
    let n = facet_normal(a, b, c);
    out.push_str(&format!(" facet normal {} {} {}\n", sci(n.x), sci(n.y), sci(n.z)));
    out.push_str("  outer loop\n");
    for v in [a, b, c] {
        out.push_str(&format!("   vertex {} {} {}\n", sci(v.x), sci(v.y), sci(v.z)));
    }
    out.push_str("  endloop\n endfacet\n");
}

/// Serializes a c-space to an ASCII STL solid.
pub fn to_solid_mesh(space: &CSpace) -> String {
    let mut out = format!("solid {}\n", space.description());

    let border = space.border();
    for [i, j, k] in BORDER_TRIANGLES {
        write_facet(&mut out, &border[i], &border[j], &border[k]);
    }

    for obstacle in space.obstacles() {
        let vertex = obstacle.all_points();
        for [i, j, k] in triangulate(obstacle) {
            write_facet(&mut out, &vertex[i], &vertex[j], &vertex[k]);
        }
    }

    out.push_str(&format!("endsolid {}\n", space.description()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::generate;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sci_formatting() {
        assert_eq!(sci(1.0), "1.000000e+00");
        assert_eq!(sci(0.0), "0.000000e+00");
        assert_eq!(sci(-0.25), "-2.500000e-01");
        assert_eq!(sci(12345.678), "1.234568e+04");
        assert_eq!(sci(1e-120), "1.000000e-120");
    }

    #[test]
    fn test_facet_normal() {
        let n = facet_normal(
            &Point3D::ORIGIN,
            &Point3D::new(0.0, 2.0, 0.0),
            &Point3D::new(2.0, 2.0, 0.0),
        );
        assert_eq!(n, Point3D::new(0.0, 0.0, -1.0));

        let skewed = facet_normal(
            &Point3D::ORIGIN,
            &Point3D::new(1.0, 0.0, 0.0),
            &Point3D::new(1.0, 1.0, 1.0),
        );
        assert_approx_eq!(skewed.length(), 1.0);
    }

    #[test]
    fn test_collinear_facet_has_zero_normal() {
        let n = facet_normal(
            &Point3D::ORIGIN,
            &Point3D::splat(1.0),
            &Point3D::splat(2.0),
        );
        assert_eq!(n, Point3D::ORIGIN);
    }

    #[test]
    fn test_empty_space_mesh() {
        let space = generate(10.0, 10.0, 10.0, 0, 99).unwrap();
        let stl = to_solid_mesh(&space);
        let lines: Vec<&str> = stl.lines().collect();

        assert_eq!(lines[0], "solid c-space 10.00 x 10.00 x 10.00, empty, seed 99");
        assert_eq!(lines[lines.len() - 1], "endsolid c-space 10.00 x 10.00 x 10.00, empty, seed 99");
        assert_eq!(stl.matches(" facet normal ").count(), 12);
        // First border triangle (0,1,2) lies on z = 0 and faces inward.
        assert_eq!(lines[1], " facet normal 0.000000e+00 0.000000e+00 1.000000e+00");
        assert_eq!(lines[3], "   vertex 0.000000e+00 0.000000e+00 0.000000e+00");
        assert_eq!(lines[4], "   vertex 1.000000e+01 0.000000e+00 0.000000e+00");
    }

    #[test]
    fn test_mesh_facet_count_matches_obstacles() {
        let space = generate(10.0, 10.0, 10.0, 4, 21).unwrap();
        let expected: usize = 12
            + space
                .obstacles()
                .iter()
                .map(|o| 2 * (6 - o.bulge_count()) + 4 * o.bulge_count())
                .sum::<usize>();

        let stl = to_solid_mesh(&space);
        assert_eq!(stl.matches(" facet normal ").count(), expected);
        assert_eq!(stl.matches("   vertex ").count(), 3 * expected);
        assert_eq!(stl.matches(" endfacet").count(), expected);
    }
}
