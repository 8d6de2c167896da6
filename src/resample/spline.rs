use crate::core::error::{ensure_finite, ReplayError, ReplayResult};
use crate::core::geometry::Point;
use crate::resample::channel::index_parameters;

/// Spline degree used for path smoothing
pub const DEGREE: usize = 2;

/// Interpolating quadratic B-spline through 2D points, parameterized by
/// sample index
///
/// Knots follow the usual choice for even degree: the end sites are
/// repeated `DEGREE + 1` times and interior knots sit halfway between
/// consecutive sites, skipping the first and last gaps. With sites at
/// `0..N-1` this gives exactly `N` basis functions, and the collocation
/// system is tridiagonal.
#[derive(Debug, Clone)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coeffs: Vec<Point>,
}

impl QuadraticSpline {
    /// Fit the spline so it passes through every input point
    pub fn interpolate(points: &[Point]) -> ReplayResult<Self> {
        let n = points.len();
        if n < DEGREE + 1 {
            return Err(ReplayError::invalid_input(format!(
                "a degree-{} spline needs at least {} points, got {}",
                DEGREE,
                DEGREE + 1,
                n
            )));
        }

        let knots = knot_vector(n);

        // Collocation rows: end rows are the identity (clamped ends),
        // interior row i has its basis centered on column i.
        let mut sub = vec![0.0; n];
        let mut diag = vec![1.0; n];
        let mut sup = vec![0.0; n];
        for i in 1..n - 1 {
            let u = i as f64;
            let span = find_span(&knots, n, u);
            debug_assert_eq!(span, i + 1);
            let basis = basis_functions(&knots, span, u);
            sub[i] = basis[0];
            diag[i] = basis[1];
            sup[i] = basis[2];
        }

        let coeffs = solve_tridiagonal(&sub, &diag, &sup, points);
        Ok(Self { knots, coeffs })
    }

    /// Parameter range covered by the spline
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Evaluate the curve at parameter `u` (clamped to the domain)
    pub fn evaluate(&self, u: f64) -> Point {
        let n = self.coeffs.len();
        let (start, end) = self.domain();
        if u <= start {
            return self.coeffs[0];
        }
        if u >= end {
            return self.coeffs[n - 1];
        }

        let span = find_span(&self.knots, n, u);
        let basis = basis_functions(&self.knots, span, u);
        let mut p = Point::new(0.0, 0.0);
        for (r, b) in basis.iter().enumerate() {
            let c = self.coeffs[span - DEGREE + r];
            p.x += c.x * b;
            p.y += c.y * b;
        }
        p
    }
}

/// Smooth a 2D path by evaluating an interpolating quadratic spline at
/// `N * factor` evenly spaced sample-index parameters over `[0, N-1]`
///
/// The returned path starts and ends exactly on the first and last input
/// points. Its length sets the frame count for the whole pipeline.
pub fn smooth_path(x: &[f64], y: &[f64], factor: usize) -> ReplayResult<Vec<Point>> {
    if x.len() != y.len() {
        return Err(ReplayError::invalid_input(format!(
            "x and y channels differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if factor == 0 {
        return Err(ReplayError::invalid_input("upsample factor must be at least 1"));
    }
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;

    let points: Vec<Point> = x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect();
    let spline = QuadraticSpline::interpolate(&points)?;

    let n = points.len();
    Ok(index_parameters(n, n * factor)
        .map(|u| spline.evaluate(u))
        .collect())
}

fn knot_vector(n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend(std::iter::repeat(0.0).take(DEGREE + 1));
    knots.extend((1..n - 2).map(|i| i as f64 + 0.5));
    knots.extend(std::iter::repeat(last).take(DEGREE + 1));
    knots
}

/// Index `l` of the knot span with `knots[l] <= u < knots[l + 1]`
fn find_span(knots: &[f64], n_coeffs: usize, u: f64) -> usize {
    if u >= knots[n_coeffs] {
        return n_coeffs - 1;
    }
    // Last knot in [DEGREE, n_coeffs) that is <= u
    let upper = knots[DEGREE + 1..=n_coeffs].partition_point(|&k| k <= u);
    DEGREE + upper
}

/// Non-zero basis functions on `span` at `u` (Cox-de Boor, triangular form)
fn basis_functions(knots: &[f64], span: usize, u: f64) -> [f64; DEGREE + 1] {
    let mut basis = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    basis[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = basis[r] / (right[r + 1] + left[j - r]);
            basis[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        basis[j] = saved;
    }
    basis
}

/// Thomas algorithm, solving both coordinates at once
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[Point]) -> Vec<Point> {
    let n = rhs.len();
    let mut c = vec![0.0; n];
    let mut d = vec![Point::new(0.0, 0.0); n];

    c[0] = sup[0] / diag[0];
    d[0] = Point::new(rhs[0].x / diag[0], rhs[0].y / diag[0]);
    for i in 1..n {
        let m = diag[i] - sub[i] * c[i - 1];
        c[i] = sup[i] / m;
        d[i] = Point::new(
            (rhs[i].x - sub[i] * d[i - 1].x) / m,
            (rhs[i].y - sub[i] * d[i - 1].y) / m,
        );
    }

    let mut out = d.clone();
    for i in (0..n - 1).rev() {
        out[i] = Point::new(d[i].x - c[i] * out[i + 1].x, d[i].y - c[i] * out[i + 1].y);
    }
    out
}
