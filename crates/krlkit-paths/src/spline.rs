//! Natural cubic spline interpolation over a scalar parameter.
//!
//! Used by the spline smoothing strategy: each coordinate axis is fitted
//! as a function of normalized arc length and resampled at uniform
//! parameter values. The tridiagonal system for the second derivatives is
//! solved with the Thomas algorithm.

/// A natural cubic spline through `(t[i], v[i])` knots.
///
/// Knots must be strictly increasing. With two knots the spline degrades
/// to linear interpolation.
pub(crate) struct CubicSpline {
    t: Vec<f64>,
    v: Vec<f64>,
    /// Second derivatives at the knots; zero at both ends (natural spline).
    m: Vec<f64>,
}

impl CubicSpline {
    pub(crate) fn fit(t: Vec<f64>, v: Vec<f64>) -> Self {
        debug_assert_eq!(t.len(), v.len());
        debug_assert!(t.len() >= 2);
        debug_assert!(t.windows(2).all(|w| w[1] > w[0]));

        let n = t.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            // Thomas algorithm on the interior knots.
            let mut diag = vec![0.0; n];
            let mut rhs = vec![0.0; n];
            for i in 1..n - 1 {
                let h0 = t[i] - t[i - 1];
                let h1 = t[i + 1] - t[i];
                diag[i] = 2.0 * (h0 + h1);
                rhs[i] = 6.0 * ((v[i + 1] - v[i]) / h1 - (v[i] - v[i - 1]) / h0);
            }
            for i in 2..n - 1 {
                let h = t[i] - t[i - 1];
                let factor = h / diag[i - 1];
                diag[i] -= factor * h;
                rhs[i] -= factor * rhs[i - 1];
            }
            for i in (1..n - 1).rev() {
                let h = t[i + 1] - t[i];
                let upper = if i + 1 < n - 1 { h * m[i + 1] } else { 0.0 };
                m[i] = (rhs[i] - upper) / diag[i];
            }
        }
        Self { t, v, m }
    }

    /// Evaluate the spline at `x`, clamped to the knot range.
    pub(crate) fn eval(&self, x: f64) -> f64 {
        let n = self.t.len();
        let x = x.clamp(self.t[0], self.t[n - 1]);
        // partition_point returns the first knot > x; segment starts one before.
        let seg = self.t.partition_point(|&k| k <= x).clamp(1, n - 1) - 1;

        let h = self.t[seg + 1] - self.t[seg];
        let a = (self.t[seg + 1] - x) / h;
        let b = (x - self.t[seg]) / h;
        a * self.v[seg]
            + b * self.v[seg + 1]
            + ((a * a * a - a) * self.m[seg] + (b * b * b - b) * self.m[seg + 1]) * h * h / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_knots_exactly() {
        let t = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let v = vec![1.0, -2.0, 0.5, 3.0, 0.0];
        let spline = CubicSpline::fit(t.clone(), v.clone());
        for (ti, vi) in t.iter().zip(&v) {
            assert!((spline.eval(*ti) - vi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_knots_is_linear() {
        let spline = CubicSpline::fit(vec![0.0, 1.0], vec![2.0, 4.0]);
        assert!((spline.eval(0.5) - 3.0).abs() < 1e-12);
        assert!((spline.eval(0.25) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_data_stays_linear() {
        let t: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let v: Vec<f64> = t.iter().map(|x| 3.0 * x + 1.0).collect();
        let spline = CubicSpline::fit(t, v);
        for i in 0..100 {
            let x = i as f64 / 100.0;
            assert!((spline.eval(x) - (3.0 * x + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eval_clamps_outside_range() {
        let spline = CubicSpline::fit(vec![0.0, 1.0], vec![5.0, 7.0]);
        assert!((spline.eval(-1.0) - 5.0).abs() < 1e-12);
        assert!((spline.eval(2.0) - 7.0).abs() < 1e-12);
    }
}
