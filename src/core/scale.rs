//! 10-point to 4-point grade conversion.

/// Lower bounds on the 10-point scale, highest first. The first bound the
/// grade reaches decides the 4-point value.
const THRESHOLDS: [(f64, f64); 8] = [
    (8.5, 4.0),
    (8.0, 3.5),
    (7.0, 3.0),
    (6.0, 2.5),
    (5.5, 2.0),
    (5.0, 1.5),
    (4.0, 1.0),
    (2.1, 0.5),
];

/// Converts a 10-point grade to the 4-point scale.
///
/// Total over `f64`: anything below 2.1 (negatives and NaN included) maps
/// to 0.0, and anything above 10 maps to 4.0.
pub fn to_four_point(grade10: f64) -> f64 {
    THRESHOLDS
        .iter()
        .find(|(lower, _)| grade10 >= *lower)
        .map(|(_, grade4)| *grade4)
        .unwrap_or(0.0)
}
