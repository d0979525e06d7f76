//! Network portraits, after Bagrow, Bollt, Skufca and ben-Avraham, "Portraits of complex
//! networks" (<https://arxiv.org/abs/cond-mat/0703470>).
//!
//! The portrait matrix `B` has one row per hop distance `l` and one column per shell size `s`:
//! `B[(l, s)]` is the number of vertices that have exactly `s` vertices at distance `l`.

use nalgebra::DMatrix;

use crate::{error::Result, graph::Topology, shell};

/// How the trailing rows of the portrait matrix are trimmed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrimMode {
    /// Keep rows up to the largest column index that was a row's argmax while the last source
    /// was being accumulated (starting from 1). This is the historical behaviour and mixes
    /// shell sizes with distances, which is why `Populated` exists.
    #[default]
    Argmax,
    /// Keep rows up to the largest distance that recorded any shell.
    Populated,
}

/// Which distances are recorded for every source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShellBound {
    /// Distances `0..d`: the diameter itself is never recorded. The historical behaviour.
    #[default]
    Exclusive,
    /// Distances `0..=d`.
    Inclusive,
}

/// Parameters of a portrait computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortraitOptions {
    pub trim: TrimMode,
    pub shell_bound: ShellBound,
    /// Worker threads used for the shell sizes; see [`shell::compute_shells`].
    pub num_threads: usize,
}

impl Default for PortraitOptions {
    fn default() -> Self {
        Self {
            trim: TrimMode::default(),
            shell_bound: ShellBound::default(),
            num_threads: shell::MIN_NUM_THREADS,
        }
    }
}

impl PortraitOptions {
    pub fn trim(mut self, trim: TrimMode) -> Self {
        self.trim = trim;
        self
    }

    pub fn shell_bound(mut self, shell_bound: ShellBound) -> Self {
        self.shell_bound = shell_bound;
        self
    }

    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }
}

/// Computes portrait matrices.
#[derive(Clone, Copy, Debug, Default)]
pub struct PortraitBuilder {
    options: PortraitOptions,
}

impl PortraitBuilder {
    pub fn new(options: PortraitOptions) -> Self {
        Self { options }
    }

    /// Computes the trimmed portrait matrix of `graph`.
    ///
    /// The graph must be connected, otherwise its diameter is undefined and the query error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netportrait::graph::AdjacencyList;
    /// use netportrait::portrait::PortraitBuilder;
    ///
    /// let path = AdjacencyList::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    /// let matrix = PortraitBuilder::default().build(&path).unwrap();
    ///
    /// assert_eq!(
    ///     matrix,
    ///     dmatrix![0.0, 4.0, 0.0, 0.0;
    ///              0.0, 2.0, 2.0, 0.0]
    /// );
    /// ```
    pub fn build<G: Topology + ?Sized>(&self, graph: &G) -> Result<DMatrix<f64>> {
        let d = graph.diameter()?;
        let n = graph.vertex_count();

        let (bound, cols) = match self.options.shell_bound {
            ShellBound::Exclusive => (d, n),
            // A lone vertex still needs column 1 for its distance-0 shell.
            ShellBound::Inclusive => (d + 1, n.max(2)),
        };

        let sequences = shell::compute_shells(graph, bound, self.options.num_threads)?;

        let mut matrix = DMatrix::<f64>::zeros(d + 1, cols);
        // Running argmax of every row, the first index wins ties like `numpy.argmax`.
        let mut leaders = vec![0usize; d + 1];
        let mut max_path = match self.options.trim {
            TrimMode::Argmax => 1,
            TrimMode::Populated => 0,
        };

        for sequence in &sequences {
            // The argmax bound restarts with every source, so only the last one decides.
            if self.options.trim == TrimMode::Argmax {
                max_path = 1;
            }

            for (l, &size) in sequence.iter().enumerate() {
                matrix[(l, size)] += 1.0;

                // Counts only grow, so the row's argmax can only move to the cell just bumped.
                let leader = leaders[l];
                if matrix[(l, size)] > matrix[(l, leader)]
                    || (matrix[(l, size)] == matrix[(l, leader)] && size < leader)
                {
                    leaders[l] = size;
                }

                max_path = match self.options.trim {
                    TrimMode::Argmax => max_path.max(leaders[l]),
                    TrimMode::Populated => max_path.max(l),
                };
            }
        }

        let rows = max_path.min(d) + 1;
        tracing::debug!(vertices = n, diameter = d, rows, "portrait computed");

        Ok(matrix.resize(rows, cols, 0.0))
    }
}

/// A graph together with its portrait matrix, once computed.
#[derive(Debug)]
pub struct Portrait<'g, G: ?Sized> {
    graph: &'g G,
    builder: PortraitBuilder,
    matrix: Option<DMatrix<f64>>,
}

impl<'g, G: Topology + ?Sized> Portrait<'g, G> {
    /// Creates a portrait of `graph` with the default options. Nothing is computed yet.
    pub fn new(graph: &'g G) -> Self {
        Self::with_options(graph, PortraitOptions::default())
    }

    pub fn with_options(graph: &'g G, options: PortraitOptions) -> Self {
        Self {
            graph,
            builder: PortraitBuilder::new(options),
            matrix: None,
        }
    }

    /// Computes the portrait matrix, replacing any previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::graph::AdjacencyList;
    /// use netportrait::portrait::Portrait;
    ///
    /// let star = AdjacencyList::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
    /// let mut portrait = Portrait::new(&star);
    ///
    /// let matrix = portrait.compute().unwrap();
    /// assert_eq!(matrix.shape(), (2, 4));
    /// assert_eq!(matrix[(1, 3)], 1.0);
    /// ```
    pub fn compute(&mut self) -> Result<&DMatrix<f64>> {
        let matrix = self.builder.build(self.graph)?;
        Ok(self.matrix.insert(matrix))
    }

    /// Returns the portrait matrix, `None` until [`compute`](Self::compute) succeeded.
    pub fn matrix(&self) -> Option<&DMatrix<f64>> {
        self.matrix.as_ref()
    }

    pub fn is_computed(&self) -> bool {
        self.matrix.is_some()
    }

    /// Mutable access for batch alignment, the only post-computation mutation.
    pub(crate) fn matrix_mut(&mut self) -> Option<&mut DMatrix<f64>> {
        self.matrix.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;
    use crate::{
        error::{Error, QueryFault},
        graph::AdjacencyList,
    };

    fn path(n: usize) -> AdjacencyList {
        AdjacencyList::from_edges(n, (1..n).map(|i| (i - 1, i)))
    }

    fn cycle(n: usize) -> AdjacencyList {
        AdjacencyList::from_edges(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    /// A small tree with hubs of different sizes, so rows have distinct argmaxes.
    fn broom() -> AdjacencyList {
        AdjacencyList::from_edges(
            12,
            [
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (4, 6),
                (4, 7),
                (4, 8),
                (4, 9),
                (4, 10),
                (4, 11),
            ],
        )
    }

    fn row_sum(matrix: &DMatrix<f64>, l: usize) -> f64 {
        matrix.row(l).sum()
    }

    #[test]
    fn path_of_four() {
        let graph = path(4);
        let matrix = PortraitBuilder::default().build(&graph).unwrap();

        // Once vertex 3 is counted, rows 1 and 2 both lead with column 1.
        assert_eq!(
            matrix,
            dmatrix![0.0, 4.0, 0.0, 0.0;
                     0.0, 2.0, 2.0, 0.0]
        );

        let populated = PortraitBuilder::new(PortraitOptions::default().trim(TrimMode::Populated))
            .build(&graph)
            .unwrap();
        assert_eq!(
            populated,
            dmatrix![0.0, 4.0, 0.0, 0.0;
                     0.0, 2.0, 2.0, 0.0;
                     0.0, 4.0, 0.0, 0.0]
        );
    }

    #[test]
    fn argmax_trim_follows_the_last_source() {
        // The hub leads row 1 with column 3 while it is counted, the leaves take it back.
        let star = AdjacencyList::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
        let matrix = PortraitBuilder::default().build(&star).unwrap();

        assert_eq!(
            matrix,
            dmatrix![0.0, 4.0, 0.0, 0.0;
                     0.0, 3.0, 0.0, 1.0]
        );

        let populated = PortraitBuilder::new(PortraitOptions::default().trim(TrimMode::Populated))
            .build(&star)
            .unwrap();
        assert_eq!(populated, matrix);
    }

    #[test]
    fn path_of_four_inclusive() {
        let graph = path(4);
        let options = PortraitOptions::default()
            .shell_bound(ShellBound::Inclusive)
            .trim(TrimMode::Populated);
        let matrix = PortraitBuilder::new(options).build(&graph).unwrap();

        assert_eq!(
            matrix,
            dmatrix![0.0, 4.0, 0.0, 0.0;
                     0.0, 2.0, 2.0, 0.0;
                     0.0, 4.0, 0.0, 0.0;
                     2.0, 2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn first_row_is_vertex_count_at_column_one() {
        for graph in [path(7), cycle(9), broom()] {
            let n = graph.vertex_count() as f64;
            let matrix = PortraitBuilder::default().build(&graph).unwrap();

            assert_eq!(matrix[(0, 1)], n);
            assert_eq!(row_sum(&matrix, 0), n);
        }
    }

    #[test]
    fn populated_rows_sum_to_vertex_count() {
        let options = PortraitOptions::default()
            .shell_bound(ShellBound::Inclusive)
            .trim(TrimMode::Populated);

        for graph in [path(7), cycle(9), broom()] {
            let n = graph.vertex_count() as f64;
            let d = graph.diameter().unwrap();
            let matrix = PortraitBuilder::new(options).build(&graph).unwrap();

            assert_eq!(matrix.nrows(), d + 1);
            for l in 0..matrix.nrows() {
                assert_eq!(row_sum(&matrix, l), n, "row {l}");
            }
        }
    }

    #[test]
    fn exclusive_bound_never_records_the_diameter() {
        let graph = path(5);
        let options = PortraitOptions::default().trim(TrimMode::Populated);
        let matrix = PortraitBuilder::new(options).build(&graph).unwrap();

        // Distances 0..4 are recorded, so the last kept row is 3.
        assert_eq!(matrix.nrows(), 4);
    }

    #[test]
    fn argmax_trim_can_differ_from_populated() {
        let graph = broom();
        let d = graph.diameter().unwrap();
        assert_eq!(d, 5);

        let literal = PortraitBuilder::default().build(&graph).unwrap();
        let populated = PortraitBuilder::new(PortraitOptions::default().trim(TrimMode::Populated))
            .build(&graph)
            .unwrap();

        // The seven leaves see each other at distance 2, making column 7 lead row 2.
        assert_eq!(literal[(2, 7)], 7.0);
        assert_eq!(literal.nrows(), d + 1);
        assert_eq!(literal.row(d).sum(), 0.0);

        assert_eq!(populated.nrows(), d);
        assert_eq!(literal.rows(0, d).into_owned(), populated);
    }

    #[test]
    fn argmax_trim_keeps_at_least_two_rows() {
        // Only distance 0 is recorded for a complete graph, yet row 1 survives.
        let complete = AdjacencyList::from_edges(
            4,
            [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        );
        let matrix = PortraitBuilder::default().build(&complete).unwrap();

        assert_eq!(
            matrix,
            dmatrix![0.0, 4.0, 0.0, 0.0;
                     0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn single_vertex() {
        let graph = AdjacencyList::from_edges(1, []);

        let matrix = PortraitBuilder::default().build(&graph).unwrap();
        assert_eq!(matrix.shape(), (1, 1));
        assert_eq!(matrix[(0, 0)], 0.0);

        let options = PortraitOptions::default().shell_bound(ShellBound::Inclusive);
        let matrix = PortraitBuilder::new(options).build(&graph).unwrap();
        assert_eq!(matrix, dmatrix![0.0, 1.0]);
    }

    #[test]
    fn disconnected_graph_fails() {
        let graph = AdjacencyList::from_edges(4, [(0, 1), (2, 3)]);

        match PortraitBuilder::default().build(&graph) {
            Err(Error::GraphQuery(QueryFault::Disconnected)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let graph = broom();
        let mut portrait = Portrait::new(&graph);
        assert!(!portrait.is_computed());

        let first = portrait.compute().unwrap().clone();
        let second = portrait.compute().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(portrait.matrix(), Some(&first));
    }

    #[test]
    fn threads_do_not_change_the_matrix() {
        let graph = AdjacencyList::from_edges(60, (1..60).map(|i| (i / 4, i)).chain([(7, 50)]));

        let sequential = PortraitBuilder::default().build(&graph).unwrap();
        let threaded = PortraitBuilder::new(PortraitOptions::default().num_threads(6))
            .build(&graph)
            .unwrap();

        assert_eq!(sequential, threaded);
    }
}
