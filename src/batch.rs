//! Aligning several portraits to one shape so they can be compared or animated frame by frame.

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    graph::Topology,
    portrait::Portrait,
};

/// Returns the common `(rows, cols)` every matrix can be cropped to.
fn common_shape(shapes: impl Iterator<Item = (usize, usize)>) -> Result<(usize, usize)> {
    let (rows, cols) = shapes
        .reduce(|(r1, c1), (r2, c2)| (r1.min(r2), c1.min(c2)))
        .ok_or_else(|| Error::ShapeMismatch("cannot align an empty batch".into()))?;

    if rows == 0 || cols == 0 {
        return Err(Error::ShapeMismatch(format!(
            "common shape ({rows}, {cols}) is empty"
        )));
    }

    Ok((rows, cols))
}

/// Crops every matrix to the smallest row and column count found in the batch, keeping the
/// top-left block.
///
/// # Examples
///
/// ```
/// use nalgebra::DMatrix;
/// use netportrait::batch::crop_matrices;
///
/// let mut batch = vec![DMatrix::<f64>::zeros(3, 5), DMatrix::<f64>::zeros(4, 7)];
/// crop_matrices(&mut batch).unwrap();
///
/// assert!(batch.iter().all(|m| m.shape() == (3, 5)));
/// ```
pub fn crop_matrices(matrices: &mut [DMatrix<f64>]) -> Result<(usize, usize)> {
    let (rows, cols) = common_shape(matrices.iter().map(|m| m.shape()))?;

    for matrix in matrices.iter_mut() {
        if matrix.shape() != (rows, cols) {
            matrix.resize_mut(rows, cols, 0.0);
        }
    }

    Ok((rows, cols))
}

/// Crops the matrices of a batch of computed portraits in place and hands the batch back.
///
/// Every portrait must have been computed.
pub fn crop<'a, 'g, G: Topology + ?Sized>(
    portraits: &'a mut [Portrait<'g, G>],
) -> Result<&'a mut [Portrait<'g, G>]> {
    let shapes = portraits
        .iter()
        .enumerate()
        .map(|(i, portrait)| {
            portrait
                .matrix()
                .map(|m| m.shape())
                .ok_or_else(|| Error::ShapeMismatch(format!("portrait {i} was never computed")))
        })
        .collect::<Result<Vec<_>>>()?;

    let (rows, cols) = common_shape(shapes.into_iter())?;

    for matrix in portraits.iter_mut().filter_map(|p| p.matrix_mut()) {
        if matrix.shape() != (rows, cols) {
            matrix.resize_mut(rows, cols, 0.0);
        }
    }

    tracing::debug!(portraits = portraits.len(), rows, cols, "batch cropped");

    Ok(portraits)
}
