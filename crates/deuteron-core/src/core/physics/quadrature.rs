/// Integrates tabulated `y(x)` with the trapezoidal rule.
///
/// The abscissae need not be evenly spaced. Returns `0.0` for fewer than two samples;
/// extra samples in the longer slice are ignored.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "abscissae and ordinates differ in length");
    x.windows(2)
        .zip(y.windows(2))
        .fold(0.0, |acc, (xs, ys)| acc + 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
}

/// Trapezoidal integral of `f(x) * y(x)`, e.g. a first moment when `f` is the identity.
pub fn trapezoid_weighted<F>(x: &[f64], y: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    debug_assert_eq!(x.len(), y.len(), "abscissae and ordinates differ in length");
    x.windows(2).zip(y.windows(2)).fold(0.0, |acc, (xs, ys)| {
        acc + 0.5 * (xs[1] - xs[0]) * (f(xs[0]) * ys[0] + f(xs[1]) * ys[1])
    })
}
