use geo::{GeodesicDistance, Point};

/// Geodesic distance in meters between two `(latitude, longitude)` points on
/// the WGS-84 ellipsoid.
///
/// The pair is put in a fixed order before solving so that swapping the
/// arguments gives the same bits back.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    if a == b {
        return 0.0;
    }
    let (first, second) = if a <= b { (a, b) } else { (b, a) };

    to_point(first).geodesic_distance(&to_point(second))
}

fn to_point((latitude, longitude): (f64, f64)) -> Point<f64> {
    Point::new(longitude, latitude)
}
