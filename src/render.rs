//! Turning portrait matrices into pictures.
//!
//! Rendering happens in two steps. [`to_image`] compresses the counts logarithmically and
//! stretches every distance row so the picture isn't a thin strip; [`to_rgb`] maps the
//! resulting intensity grid through a colormap, one flat block per cell.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Samples of matplotlib's viridis at `0, 1/8, ..., 1`.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 82, 139],
    [44, 113, 142],
    [33, 145, 140],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Colormap {
    #[default]
    Viridis,
    Gray,
}

impl Colormap {
    /// Returns the colour of the normalised intensity `t`, clamped to `[0, 1]`.
    pub fn color(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Gray => {
                let v = (t * 255.0).round() as u8;
                [v, v, v]
            }
            Self::Viridis => {
                let position = t * (VIRIDIS.len() - 1) as f64;
                let lower = (position.floor() as usize).min(VIRIDIS.len() - 2);
                let frac = position - lower as f64;

                let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
                let mut rgb = [0u8; 3];
                for (c, out) in rgb.iter_mut().enumerate() {
                    *out = (a[c] as f64 + (b[c] as f64 - a[c] as f64) * frac).round() as u8;
                }
                rgb
            }
        }
    }
}

/// Parameters of the pixel stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub colormap: Colormap,
    /// Side, in pixels, of the block every grid cell becomes.
    pub scale: u32,
    /// Intensity window mapped onto the colormap; the grid's own extremes when `None`.
    pub range: Option<(f64, f64)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            scale: 1,
            range: None,
        }
    }
}

impl RenderOptions {
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn range(mut self, range: Option<(f64, f64)>) -> Self {
        self.range = range;
        self
    }
}

/// Maps a portrait matrix to its viewable intensity grid.
///
/// Every count `c` becomes `ln(c + 1)`, and with `k = cols / rows` (integer division) every
/// row is repeated `k` times, giving a `(k * rows, cols)` grid.
///
/// # Examples
///
/// ```
/// use nalgebra::DMatrix;
/// use netportrait::render::to_image;
///
/// let grid = to_image(&DMatrix::zeros(2, 4)).unwrap();
///
/// assert_eq!(grid.shape(), (4, 4));
/// assert!(grid.iter().all(|&v| v == 0.0));
/// ```
pub fn to_image(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let (y, x) = matrix.shape();
    if y == 0 || x == 0 {
        return Err(Error::render(format!("matrix of shape ({y}, {x}) is empty")));
    }

    let k = x / y;
    if k == 0 {
        return Err(Error::render(format!(
            "matrix of shape ({y}, {x}) is taller than wide, the picture would be empty"
        )));
    }

    let lg = matrix.map(|c| (c + 1.0).ln());

    Ok(DMatrix::from_fn(k * y, x, |i, j| lg[(i / k, j)]))
}

/// Returns the smallest and largest value of a grid.
pub fn intensity_range(grid: &DMatrix<f64>) -> Option<(f64, f64)> {
    grid.iter().fold(None, |range, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Colours an intensity grid. Each cell becomes a `scale x scale` block of one colour, there is
/// no interpolation between cells.
pub fn to_rgb(grid: &DMatrix<f64>, options: &RenderOptions) -> Result<RgbImage> {
    let scale = options.scale.max(1);
    let width = dimension(grid.ncols(), scale)?;
    let height = dimension(grid.nrows(), scale)?;

    let (lo, hi) = options
        .range
        .or_else(|| intensity_range(grid))
        .unwrap_or((0.0, 0.0));
    let span = hi - lo;

    Ok(RgbImage::from_fn(width, height, |px, py| {
        let v = grid[((py / scale) as usize, (px / scale) as usize)];
        let t = if span > 0.0 { (v - lo) / span } else { 0.0 };
        Rgb(options.colormap.color(t))
    }))
}

fn dimension(cells: usize, scale: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(scale))
        .ok_or_else(|| Error::render(format!("{cells} cells at scale {scale} is too large")))
}

/// Renders a portrait matrix straight to pixels.
pub fn render(matrix: &DMatrix<f64>, options: &RenderOptions) -> Result<RgbImage> {
    to_rgb(&to_image(matrix)?, options)
}

/// Renders a portrait matrix and writes it to `path`, returning the path actually written.
///
/// The format follows the extension; a path without one is written as PNG with `.png`
/// appended.
pub fn save_picture(
    matrix: &DMatrix<f64>,
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let path = picture_path(path.as_ref());
    let format = ImageFormat::from_path(&path)
        .map_err(|_| Error::render(format!("unsupported picture format: {}", path.display())))?;

    render(matrix, options)?.save_with_format(&path, format)?;
    tracing::info!(path = %path.display(), "picture written");

    Ok(path)
}

pub(crate) fn picture_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}
