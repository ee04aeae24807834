use nalgebra::Point3;

/// Euclidean distance in the coordinates' native units.
#[inline]
pub fn euclidean_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Axis-aligned bounding box of a point set, or `None` if it is empty.
pub fn bounding_box(points: &[Point3<f64>]) -> Option<(Point3<f64>, Point3<f64>)> {
    let first = points.first()?;
    Some(points.iter().skip(1).fold((*first, *first), |(min, max), p| {
        (min.inf(p), max.sup(p))
    }))
}
