use num_traits::Float;

/// A point on the drawing plane, `(x, y)`.
pub type Point = (f64, f64);

const RELATIVE_TOLERANCE: f64 = 1e-5;
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

pub fn vec_sum(v: Point, u: Point) -> Point {
    (v.0 + u.0, v.1 + u.1)
}
pub fn vec_subtract(v: Point, u: Point) -> Point {
    (v.0 - u.0, v.1 - u.1)
}
pub fn vec_module(v: Point) -> f64 {
    v.0.hypot(v.1)
}
pub fn vec_distance(v: Point, u: Point) -> f64 {
    vec_module(vec_subtract(v, u))
}

/// Tolerant float comparison: `|a - b| <= atol + rtol * |b|`.
pub fn approx_eq<T: Float>(a: T, b: T) -> bool {
    let rtol = T::from(RELATIVE_TOLERANCE).unwrap_or_else(T::epsilon);
    let atol = T::from(ABSOLUTE_TOLERANCE).unwrap_or_else(T::epsilon);
    (a - b).abs() <= atol + rtol * b.abs()
}
pub fn points_approx_eq(v: Point, u: Point) -> bool {
    approx_eq(v.0, u.0) && approx_eq(v.1, u.1)
}
