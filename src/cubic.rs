//! Real roots of cubic polynomials.
//!
//! Used by the exact curve hit test, which solves `x(t) = x` for the curve
//! parameter `t`.

use std::f64::consts::PI;

/// Coefficients smaller than this are treated as zero.
pub const CUBIC_EPSILON: f64 = 1e-8;

/// Real cube root that keeps the sign of `x`.
pub fn cube_root(x: f64) -> f64 {
    let y = x.abs().powf(1.0 / 3.0);
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Solve `a·t³ + b·t² + c·t + d = 0` for its real roots.
///
/// Near-zero leading coefficients reduce the equation to a quadratic or a
/// linear one. A fully degenerate equation has no roots. Roots are returned
/// in no particular order; double roots appear once or twice depending on
/// the branch taken.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < CUBIC_EPSILON {
        return solve_quadratic(b, c, d);
    }

    // Depressed cubic t^3 + p t + q = 0 with x = t - b/3a
    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);

    let mut roots = if p.abs() < CUBIC_EPSILON {
        vec![cube_root(-q)]
    } else if q.abs() < CUBIC_EPSILON {
        if p < 0.0 {
            vec![0.0, (-p).sqrt(), -(-p).sqrt()]
        } else {
            vec![0.0]
        }
    } else {
        let discriminant = q * q / 4.0 + p * p * p / 27.0;
        if discriminant.abs() < CUBIC_EPSILON {
            vec![-1.5 * q / p, 3.0 * q / p]
        } else if discriminant > 0.0 {
            // Cardano, one real root
            let u = cube_root(-q / 2.0 - discriminant.sqrt());
            vec![u - p / (3.0 * u)]
        } else {
            // Casus irreducibilis: p < 0 here, so the acos argument is in [-1, 1]
            let u = 2.0 * (-p / 3.0).sqrt();
            let t = ((3.0 * q / p / u).clamp(-1.0, 1.0)).acos() / 3.0;
            let k = 2.0 * PI / 3.0;
            vec![u * t.cos(), u * (t - k).cos(), u * (t - 2.0 * k).cos()]
        }
    };

    let shift = b / (3.0 * a);
    for root in &mut roots {
        *root -= shift;
    }
    roots
}

fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < CUBIC_EPSILON {
        if b.abs() < CUBIC_EPSILON {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant.abs() < CUBIC_EPSILON {
        vec![-b / (2.0 * a)]
    } else if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        vec![(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)]
    } else {
        Vec::new()
    }
}
