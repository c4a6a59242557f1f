use crate::error::IoError;
use ndarray::{Array2, Array3, Array4};

/// Checks that every nested vector at one depth has the same length.
fn check_uniform(lengths: impl Iterator<Item = usize>, expected: usize) -> Result<(), IoError> {
    for len in lengths {
        if len != expected {
            return Err(IoError::invalid_data(format!(
                "Ragged weight array: expected inner length {}, found {}",
                expected, len
            )));
        }
    }
    Ok(())
}

pub(super) fn vec2_to_array2(vec: &[Vec<f64>]) -> Result<Array2<f64>, IoError> {
    let rows = vec.len();
    let cols = vec.first().map_or(0, |row| row.len());
    check_uniform(vec.iter().map(|row| row.len()), cols)?;

    let flat: Vec<f64> = vec.iter().flat_map(|row| row.iter().copied()).collect();
    Array2::from_shape_vec((rows, cols), flat).map_err(|e| IoError::invalid_data(e.to_string()))
}

pub(super) fn vec3_to_array3(vec: &[Vec<Vec<f64>>]) -> Result<Array3<f64>, IoError> {
    let d0 = vec.len();
    let d1 = vec.first().map_or(0, |v1| v1.len());
    let d2 = vec
        .first()
        .and_then(|v1| v1.first())
        .map_or(0, |v2| v2.len());
    check_uniform(vec.iter().map(|v1| v1.len()), d1)?;
    check_uniform(vec.iter().flatten().map(|v2| v2.len()), d2)?;

    let flat: Vec<f64> = vec.iter().flatten().flatten().copied().collect();
    Array3::from_shape_vec((d0, d1, d2), flat).map_err(|e| IoError::invalid_data(e.to_string()))
}

pub(super) fn vec4_to_array4(vec: &[Vec<Vec<Vec<f64>>>]) -> Result<Array4<f64>, IoError> {
    let d0 = vec.len();
    let d1 = vec.first().map_or(0, |v1| v1.len());
    let d2 = vec
        .first()
        .and_then(|v1| v1.first())
        .map_or(0, |v2| v2.len());
    let d3 = vec
        .first()
        .and_then(|v1| v1.first())
        .and_then(|v2| v2.first())
        .map_or(0, |v3| v3.len());
    check_uniform(vec.iter().map(|v1| v1.len()), d1)?;
    check_uniform(vec.iter().flatten().map(|v2| v2.len()), d2)?;
    check_uniform(vec.iter().flatten().flatten().map(|v3| v3.len()), d3)?;

    let flat: Vec<f64> = vec.iter().flatten().flatten().flatten().copied().collect();
    Array4::from_shape_vec((d0, d1, d2, d3), flat)
        .map_err(|e| IoError::invalid_data(e.to_string()))
}
