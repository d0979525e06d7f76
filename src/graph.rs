//! A module for working with graphs.
//!
//! [`Graph`] is the mutable, vertex-labelled representation built by the loaders. Portraits are
//! computed against the [`Topology`] capability set, which [`AdjacencyList`] (the compiled,
//! index-based form of a graph) implements.

use std::{
    collections::{BTreeMap, HashSet, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use crate::{
    edge::Edge,
    error::{QueryFault, Result},
    shell,
};

/// Dense vertex index used by the compiled adjacency representation.
pub type GraphIndex = u32;

/// The queries a graph must answer for a portrait to be computed from it.
///
/// Vertices are addressed by their dense index in `0..vertex_count()`.
pub trait Topology: Sync {
    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the longest shortest-path length over all vertex pairs.
    ///
    /// Fails with [`QueryFault::Disconnected`] if some pair has no path and with
    /// [`QueryFault::EmptyGraph`] if there are no vertices.
    fn diameter(&self) -> Result<usize>;

    /// Returns the number of vertices within `radius` hops of `vertex`, the vertex included.
    fn neighborhood_size(&self, vertex: usize, radius: usize) -> Result<usize>;

    /// Returns the shell sizes of `source` for the distances `0..bound`.
    ///
    /// The provided implementation asks two neighbourhood queries per distance, implementors
    /// with direct access to the structure may answer with a single traversal instead.
    fn shell_sizes(&self, source: usize, bound: usize) -> Result<Vec<usize>> {
        shell::shell_sizes(self, source, bound)
    }
}

/// An undirected graph, made up of edges and (possibly isolated) vertices.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The edges in the graph.
    edges: HashSet<Edge<T>>,
    /// Every vertex, including those without edges.
    vertices: HashSet<T>,
    /// A mapping of vertices to their dense indices.
    ///
    /// The use of a `BTreeMap` means we need the `Ord` bound on `T`: indices follow the vertex
    /// order, so loaders control the numbering through the ids they assign.
    index: Option<BTreeMap<T, usize>>,
    /// Cache the compiled adjacency list when possible.
    adjacency: Option<AdjacencyList>,
}

impl<T> Default for Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            edges: Default::default(),
            vertices: Default::default(),
            index: None,
            adjacency: None,
        }
    }

    pub fn edges(&self) -> &HashSet<Edge<T>> {
        &self.edges
    }

    /// Inserts an edge into the graph, adding its endpoints as vertices.
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        let new_vertices = self.vertices.insert(*edge.source()) | self.vertices.insert(*edge.target());
        let is_inserted = self.edges.insert(edge);

        // Any change to the structure invalidates the index and the compiled adjacency.
        if is_inserted || new_vertices {
            self.clear_cache();
        }

        is_inserted
    }

    /// Inserts a vertex without any edges. Returns `false` if it was already present.
    pub fn insert_vertex(&mut self, vertex: T) -> bool {
        let is_inserted = self.vertices.insert(vertex);

        if is_inserted {
            self.clear_cache();
        }

        is_inserted
    }

    /// Inserts a subset of `(hub, leaf)` edges into the graph.
    pub fn insert_subset(&mut self, hub: T, leaves: &[T]) {
        self.insert_vertex(hub);
        for leaf in leaves {
            self.insert(Edge::new(hub, *leaf));
        }
    }

    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edges.contains(edge)
    }

    pub fn contains_vertex(&self, vertex: &T) -> bool {
        self.vertices.contains(vertex)
    }

    /// Returns the vertex count of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::edge::Edge;
    /// use netportrait::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert_vertex("c");
    ///
    /// assert_eq!(graph.vertex_count(), 3);
    /// ```
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Compiles the graph into its index-based adjacency list.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::edge::Edge;
    /// use netportrait::graph::{Graph, Topology};
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("b", "c"));
    ///
    /// let adjacency = graph.adjacency_list();
    /// assert_eq!(adjacency.neighbours(1), &[0, 2]);
    /// assert_eq!(adjacency.diameter().unwrap(), 2);
    /// ```
    pub fn adjacency_list(&mut self) -> AdjacencyList {
        // Check the cache.
        if let Some(adjacency) = self.adjacency.clone() {
            return adjacency;
        }

        if self.index.is_none() {
            self.generate_index();
        }

        let mut neighbours = vec![Vec::new(); self.vertices.len()];
        if let Some(index) = self.index.as_ref() {
            for edge in self.edges.iter().filter(|edge| !edge.is_loop()) {
                // Both endpoints are vertices, so both are indexed.
                if let (Some(&i), Some(&j)) = (index.get(edge.source()), index.get(edge.target())) {
                    neighbours[i].push(j as GraphIndex);
                    neighbours[j].push(i as GraphIndex);
                }
            }
        }

        // Edge iteration order is arbitrary, sort for reproducible traversals.
        for list in neighbours.iter_mut() {
            list.sort_unstable();
        }

        let adjacency = AdjacencyList::new(neighbours);
        self.adjacency = Some(adjacency.clone());

        adjacency
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the graph is mutated since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.index = None;
        self.adjacency = None;
    }

    /// Constructs and stores an index of the vertices, sorted by `T`'s implementation of `Ord`.
    fn generate_index(&mut self) {
        let mut vertices: Vec<T> = self.vertices.iter().copied().collect();
        vertices.sort();

        let index: BTreeMap<T, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        self.index = Some(index);
    }
}

/// The compiled form of an undirected graph: one sorted neighbour list per vertex index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    neighbours: Vec<Vec<GraphIndex>>,
}

impl AdjacencyList {
    /// Wraps prebuilt neighbour lists. The lists are expected to be symmetric.
    pub fn new(neighbours: Vec<Vec<GraphIndex>>) -> Self {
        Self { neighbours }
    }

    /// Builds the adjacency of `vertex_count` vertices from index pairs, ignoring duplicates and
    /// loops.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::graph::{AdjacencyList, Topology};
    ///
    /// let path = AdjacencyList::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    /// assert_eq!(path.diameter().unwrap(), 3);
    /// assert_eq!(path.neighborhood_size(1, 1).unwrap(), 3);
    /// ```
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut neighbours = vec![Vec::new(); vertex_count];
        for (a, b) in edges {
            if a != b {
                neighbours[a].push(b as GraphIndex);
                neighbours[b].push(a as GraphIndex);
            }
        }

        for list in neighbours.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }

        Self { neighbours }
    }

    pub fn neighbours(&self, vertex: usize) -> &[GraphIndex] {
        &self.neighbours[vertex]
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbours[vertex].len()
    }

    /// Returns the largest distance from `vertex` to any other vertex.
    pub fn eccentricity(&self, vertex: usize) -> Result<usize> {
        self.check(vertex)?;

        let shells = self.shells_from(vertex, usize::MAX);
        if shells.iter().sum::<usize>() < self.neighbours.len() {
            return Err(QueryFault::Disconnected.into());
        }

        Ok(shells.len() - 1)
    }

    fn check(&self, vertex: usize) -> Result<()> {
        if vertex < self.neighbours.len() {
            Ok(())
        } else {
            Err(QueryFault::VertexOutOfRange {
                vertex,
                count: self.neighbours.len(),
            }
            .into())
        }
    }

    /// Breadth-first search from `source` that stops expanding at `radius`, returning the number
    /// of vertices found at each distance.
    fn shells_from(&self, source: usize, radius: usize) -> Vec<usize> {
        let mut distance = vec![usize::MAX; self.neighbours.len()];
        let mut shells = vec![1];
        let mut queue = VecDeque::new();

        distance[source] = 0;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            if distance[current] >= radius {
                continue;
            }
            let next = distance[current] + 1;

            for &w in &self.neighbours[current] {
                let w = w as usize;
                if distance[w] == usize::MAX {
                    distance[w] = next;
                    // Levels are visited in order, so `next` is at most one past the end.
                    if shells.len() == next {
                        shells.push(0);
                    }
                    shells[next] += 1;
                    queue.push_back(w);
                }
            }
        }

        shells
    }
}

impl Topology for AdjacencyList {
    fn vertex_count(&self) -> usize {
        self.neighbours.len()
    }

    fn diameter(&self) -> Result<usize> {
        if self.neighbours.is_empty() {
            return Err(QueryFault::EmptyGraph.into());
        }

        let mut diameter = 0;
        for vertex in 0..self.neighbours.len() {
            diameter = diameter.max(self.eccentricity(vertex)?);
        }

        Ok(diameter)
    }

    fn neighborhood_size(&self, vertex: usize, radius: usize) -> Result<usize> {
        self.check(vertex)?;

        Ok(self.shells_from(vertex, radius).iter().sum())
    }

    fn shell_sizes(&self, source: usize, bound: usize) -> Result<Vec<usize>> {
        self.check(source)?;

        let mut shells = self.shells_from(source, bound.saturating_sub(1));
        shells.resize(bound, 0);

        Ok(shells)
    }
}
