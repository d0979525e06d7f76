//! Netportrait computes network portraits: for every hop distance `l`, a histogram of how many
//! vertices have `s` other vertices at exactly that distance. The matrix is a fingerprint of a
//! graph's structure that doesn't depend on vertex labels, and can be drawn as a picture or
//! animated over a sequence of graphs.
//!
//! # Basic usage
//!
//! Graphs are built from [`Edge`](edge::Edge) instances (or read by one of the [`load`]
//! readers), compiled to an [`AdjacencyList`](graph::AdjacencyList) and handed to a
//! [`Portrait`](portrait::Portrait).
//!
//! ```rust
//! use netportrait::edge::Edge;
//! use netportrait::graph::Graph;
//! use netportrait::portrait::Portrait;
//!
//! // Construct the graph instance, a path of four vertices.
//! let mut graph = Graph::new();
//! graph.insert(Edge::new("a", "b"));
//! graph.insert(Edge::new("b", "c"));
//! graph.insert(Edge::new("c", "d"));
//!
//! let adjacency = graph.adjacency_list();
//! let mut portrait = Portrait::new(&adjacency);
//!
//! let matrix = portrait.compute().unwrap();
//!
//! // Every vertex has a single vertex at distance 0: itself.
//! assert_eq!(matrix[(0, 1)], 4.0);
//! // The two ends see one neighbour, the two middle vertices see two.
//! assert_eq!(matrix[(1, 1)], 2.0);
//! assert_eq!(matrix[(1, 2)], 2.0);
//!
//! // Matrices can be pretty printed...
//! println!("{matrix}");
//! // ...outputs:
//! //  ┌         ┐
//! //  │ 0 4 0 0 │
//! //  │ 0 2 2 0 │
//! //  └         ┘
//! ```
//!
//! Matrices are saved with [`npy::save_matrix`] or drawn with [`render::save_picture`], and a
//! directory of numbered graphs becomes a GIF with an [`Animator`](animate::Animator).

pub mod animate;
pub mod batch;
pub mod edge;
pub mod error;
pub mod graph;
pub mod load;
pub mod npy;
pub mod portrait;
pub mod render;
pub mod shell;

pub use error::{Error, Result};
