//! Persisting portrait matrices in NumPy's `.npy` format, so they can be reloaded later or read
//! with `numpy.load`.
//!
//! Matrices are written as version 1.0 files holding little-endian `f64` in C order. Reading
//! also accepts Fortran order and a few integer and `f32` dtypes, converted to `f64`.

use std::{
    ffi::{OsStr, OsString},
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use nalgebra::DMatrix;
use regex::Regex;

use crate::error::Result;

const MAGIC: &[u8; 6] = b"\x93NUMPY";
/// The preamble and header are padded so the data starts on this boundary.
const ALIGNMENT: usize = 64;

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// Writes `matrix` as a complete `.npy` stream.
pub fn write_matrix<W: Write>(matrix: &DMatrix<f64>, mut writer: W) -> io::Result<()> {
    let (rows, cols) = matrix.shape();
    let mut header = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({rows}, {cols}), }}"
    );

    // Magic, two version bytes and the header length precede the header, which ends in '\n'.
    let preamble = MAGIC.len() + 2 + 2;
    let unpadded = preamble + header.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    header.extend(std::iter::repeat(' ').take(padding));
    header.push('\n');

    let header_len =
        u16::try_from(header.len()).map_err(|_| invalid("npy header does not fit version 1.0"))?;

    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;

    // nalgebra stores columns contiguously, C order wants rows.
    for row in matrix.row_iter() {
        for value in row.iter() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }

    writer.flush()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dtype {
    F8,
    F4,
    I8,
    I4,
    U1,
}

impl Dtype {
    fn parse(descr: &str) -> io::Result<Self> {
        match descr {
            "<f8" => Ok(Self::F8),
            "<f4" => Ok(Self::F4),
            "<i8" => Ok(Self::I8),
            "<i4" => Ok(Self::I4),
            "|u1" | "<u1" => Ok(Self::U1),
            other => Err(invalid(format!("unsupported npy dtype {other:?}"))),
        }
    }

    fn size(self) -> usize {
        match self {
            Self::F8 | Self::I8 => 8,
            Self::F4 | Self::I4 => 4,
            Self::U1 => 1,
        }
    }

    fn decode(self, bytes: &[u8]) -> f64 {
        match self {
            Self::F8 => f64::from_le_bytes(bytes.try_into().unwrap_or_default()),
            Self::F4 => f32::from_le_bytes(bytes.try_into().unwrap_or_default()) as f64,
            Self::I8 => i64::from_le_bytes(bytes.try_into().unwrap_or_default()) as f64,
            Self::I4 => i32::from_le_bytes(bytes.try_into().unwrap_or_default()) as f64,
            Self::U1 => bytes[0] as f64,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Header {
    dtype: Dtype,
    fortran_order: bool,
    shape: (usize, usize),
}

fn parse_header(header: &str) -> io::Result<Header> {
    let capture = |pattern: &str| -> io::Result<String> {
        let re = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
        re.captures(header)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_owned())
            .ok_or_else(|| invalid(format!("npy header {header:?} has no match for {pattern}")))
    };

    let dtype = Dtype::parse(&capture(r"'descr'\s*:\s*'([^']*)'")?)?;
    let fortran_order = capture(r"'fortran_order'\s*:\s*(True|False)")? == "True";

    let dims = capture(r"'shape'\s*:\s*\(([^)]*)\)")?
        .split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        .map(|dim| {
            dim.parse::<usize>()
                .map_err(|_| invalid(format!("bad npy dimension {dim:?}")))
        })
        .collect::<io::Result<Vec<_>>>()?;

    let shape = match dims[..] {
        [rows, cols] => (rows, cols),
        // A vector is read as a single row.
        [len] => (1, len),
        _ => return Err(invalid(format!("expected a 1 or 2 dimensional array, got {dims:?}"))),
    };

    Ok(Header {
        dtype,
        fortran_order,
        shape,
    })
}

/// Reads a matrix from a complete `.npy` stream.
pub fn read_matrix<R: Read>(mut reader: R) -> io::Result<DMatrix<f64>> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(invalid("not an npy file"));
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let header_len = match version[0] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        major => return Err(invalid(format!("unsupported npy version {major}"))),
    };

    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8(header).map_err(|_| invalid("npy header is not text"))?;
    let Header {
        dtype,
        fortran_order,
        shape: (rows, cols),
    } = parse_header(&header)?;

    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid("npy shape overflows"))?;
    let mut data = vec![0u8; count * dtype.size()];
    reader.read_exact(&mut data)?;

    let values: Vec<f64> = data.chunks_exact(dtype.size()).map(|b| dtype.decode(b)).collect();

    Ok(if fortran_order {
        DMatrix::from_column_slice(rows, cols, &values)
    } else {
        DMatrix::from_row_slice(rows, cols, &values)
    })
}

/// Returns `path` with `.npy` appended unless it already ends with it, like `numpy.save`.
pub(crate) fn npy_path(path: &Path) -> PathBuf {
    if path.extension() == Some(OsStr::new("npy")) {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".npy");
    PathBuf::from(name)
}

/// Writes `matrix` to `path` and returns the path actually written.
///
/// # Examples
///
/// ```no_run
/// use nalgebra::dmatrix;
/// use netportrait::npy;
///
/// let written = npy::save_matrix(&dmatrix![0.0, 4.0; 0.0, 2.0], "portrait").unwrap();
/// assert_eq!(written.to_str(), Some("portrait.npy"));
/// ```
pub fn save_matrix(matrix: &DMatrix<f64>, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = npy_path(path.as_ref());
    write_matrix(matrix, BufWriter::new(File::create(&path)?))?;
    tracing::info!(path = %path.display(), rows = matrix.nrows(), cols = matrix.ncols(), "matrix written");

    Ok(path)
}

pub fn load_matrix(path: impl AsRef<Path>) -> Result<DMatrix<f64>> {
    let file = File::open(path.as_ref())?;
    Ok(read_matrix(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    fn encode(matrix: &DMatrix<f64>) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_matrix(matrix, &mut bytes).unwrap();
        bytes
    }

    /// Builds a stream the way numpy would for an arbitrary header and payload.
    fn raw(header: &str, payload: &[u8]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend([1, 0]);
        bytes.extend((header.len() as u16).to_le_bytes());
        bytes.extend(header.as_bytes());
        bytes.extend(payload);
        bytes
    }

    #[test]
    fn header_layout() {
        let bytes = encode(&dmatrix![1.0, 2.0, 3.0; 4.0, 5.0, 6.0]);

        assert_eq!(&bytes[..6], MAGIC);
        assert_eq!(&bytes[6..8], &[1, 0]);

        let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
        assert_eq!((10 + header_len) % ALIGNMENT, 0);
        assert_eq!(bytes[10 + header_len - 1], b'\n');

        let header = std::str::from_utf8(&bytes[10..10 + header_len]).unwrap();
        assert!(header.starts_with("{'descr': '<f8', 'fortran_order': False, 'shape': (2, 3), }"));

        // Row-major payload.
        let first = f64::from_le_bytes(bytes[10 + header_len..18 + header_len].try_into().unwrap());
        let second = f64::from_le_bytes(bytes[18 + header_len..26 + header_len].try_into().unwrap());
        assert_eq!((first, second), (1.0, 2.0));
        assert_eq!(bytes.len(), 10 + header_len + 6 * 8);
    }

    #[test]
    fn round_trip_is_exact() {
        let matrix = DMatrix::from_fn(5, 9, |i, j| ((i * 9 + j) as f64).ln_1p() * 1e-3 + j as f64);

        assert_eq!(read_matrix(encode(&matrix).as_slice()).unwrap(), matrix);
    }

    #[test]
    fn fortran_order() {
        let payload: Vec<u8> = [1.0f64, 4.0, 2.0, 5.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let bytes = raw(
            "{'descr': '<f8', 'fortran_order': True, 'shape': (2, 2), }\n",
            &payload,
        );

        assert_eq!(read_matrix(bytes.as_slice()).unwrap(), dmatrix![1.0, 2.0; 4.0, 5.0]);
    }

    #[test]
    fn integer_dtype_and_vector_shape() {
        let payload: Vec<u8> = [3i64, -1, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        let bytes = raw(
            "{'descr': '<i8', 'fortran_order': False, 'shape': (3,), }\n",
            &payload,
        );

        assert_eq!(read_matrix(bytes.as_slice()).unwrap(), dmatrix![3.0, -1.0, 7.0]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(read_matrix(&b"\x93NUMPX\x01\x00"[..]).is_err());

        let bytes = raw("{'descr': '>c16', 'fortran_order': False, 'shape': (1, 1), }\n", &[0; 16]);
        let err = read_matrix(bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // Truncated payload.
        let bytes = raw("{'descr': '<f8', 'fortran_order': False, 'shape': (2, 2), }\n", &[0; 8]);
        assert!(read_matrix(bytes.as_slice()).is_err());
    }

    #[test]
    fn npy_extension_is_appended() {
        assert_eq!(npy_path(Path::new("b")), PathBuf::from("b.npy"));
        assert_eq!(npy_path(Path::new("b.npy")), PathBuf::from("b.npy"));
        assert_eq!(npy_path(Path::new("b.mat")), PathBuf::from("b.mat.npy"));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = dmatrix![0.0, 4.0, 0.0; 0.0, 2.0, 2.0];

        let written = save_matrix(&matrix, dir.path().join("portrait")).unwrap();

        assert_eq!(written, dir.path().join("portrait.npy"));
        assert_eq!(load_matrix(&written).unwrap(), matrix);
    }
}
