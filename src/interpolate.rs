use crate::error::NomographError;

/**
Piecewise-linear lookup against an ordered table of `(x, y)` points.

Queries at or beyond either end of the table return the end point's `y`
unchanged; nothing is extrapolated. A NaN query yields NaN. Inside the table
the bracketing segment is found with a lower-bound search (first point whose
`x` is not less than the query), so a query that lands exactly on a stored `x`
returns the stored `y`.

# Arguments
* `points` - Table points sorted by strictly ascending `x`.
* `x` - Query value, any real number.

# Errors
`NomographError::EmptyTable` when `points` is empty.
*/
pub fn interpolate(points: &[(f64, f64)], x: f64) -> Result<f64, NomographError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(NomographError::EmptyTable),
    };

    if x.is_nan() {
        return Ok(f64::NAN);
    }
    if x <= first.0 {
        return Ok(first.1);
    }
    if x >= last.0 {
        return Ok(last.1);
    }

    // first.0 < x < last.0, so idx lies in 1..len
    let idx = points.partition_point(|&(px, _)| px < x);
    let (x1, y1) = points[idx - 1];
    let (x2, y2) = points[idx];
    Ok(y1 + (y2 - y1) * (x - x1) / (x2 - x1))
}

// Straight line through (x1, y1) and (x2, y2), evaluated at x
pub fn linear_between(x: f64, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}
