//! Error types shared by every stage of the portrait pipeline.

use std::{fmt, io};

use derive_more::Display;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The reasons a graph query can fail.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum QueryFault {
    /// Some pair of vertices has no path between them, so the diameter is undefined.
    #[display(fmt = "graph is disconnected, diameter is undefined")]
    Disconnected,
    /// The graph has no vertices at all.
    #[display(fmt = "graph has no vertices")]
    EmptyGraph,
    #[display(fmt = "vertex {} is out of range for a graph of {} vertices", vertex, count)]
    VertexOutOfRange { vertex: usize, count: usize },
}

#[derive(Debug, Display)]
pub enum Error {
    /// Input graph is missing, unreadable or malformed.
    #[display(fmt = "failed to load graph from {}: {}", path, reason)]
    GraphLoad { path: String, reason: String },
    /// The graph collaborator could not answer a query.
    #[display(fmt = "graph query failed: {}", _0)]
    GraphQuery(QueryFault),
    /// Portrait matrices could not be brought to a common, non-empty shape.
    #[display(fmt = "shape mismatch: {}", _0)]
    ShapeMismatch(String),
    /// A matrix could not be turned into an image.
    #[display(fmt = "render error: {}", _0)]
    Render(String),
    #[display(fmt = "i/o error: {}", _0)]
    Io(io::Error),
}

impl Error {
    pub(crate) fn load(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::GraphLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn render(reason: impl fmt::Display) -> Self {
        Self::Render(reason.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<QueryFault> for Error {
    fn from(fault: QueryFault) -> Self {
        Self::GraphQuery(fault)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(e) => Self::Io(e),
            other => Self::Render(other.to_string()),
        }
    }
}
