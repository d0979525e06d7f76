//! A module for working with edges.

/// A pair of vertices representing an undirected graph edge.
///
/// The endpoints are stored in ascending order so `(a, b)` and `(b, a)` are the same edge, which
/// lets equality, hashing and ordering all be derived.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T: Ord> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::edge::Edge;
    ///
    /// let edge = Edge::new("b", "a");
    /// assert_eq!(edge, Edge::new("a", "b"));
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self {
                source: a,
                target: b,
            }
        } else {
            Self {
                source: b,
                target: a,
            }
        }
    }
}

impl<T> Edge<T> {
    /// Returns the lesser endpoint.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the greater endpoint.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the endpoint opposite `vertex`, or `None` if the edge doesn't touch it.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    ///
    /// assert_eq!(edge.opposite(&1), Some(&2));
    /// assert_eq!(edge.opposite(&3), None);
    /// ```
    pub fn opposite(&self, vertex: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        if &self.source == vertex {
            Some(&self.target)
        } else if &self.target == vertex {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Returns whether the edge contains the given vertex.
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.opposite(vertex).is_some()
    }
}
