//! Reading graphs from the common interchange formats.
//!
//! Every reader produces a [`Graph<usize>`]: numeric formats keep their (zero-based) ids, named
//! formats number vertices in the order they are first seen. Directions, weights and attributes
//! are read past and dropped, portraits only need the undirected structure.

use std::{collections::HashMap, fs, path::Path};

use regex::Regex;

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
};

/// Extensions recognised as graph files, lower case.
pub const GRAPH_EXTENSIONS: &[&str] = &[
    "edgelist", "edges", "txt", "ncol", "lgl", "net", "gml", "graphml", "dot", "gv",
];

type ParseResult<T> = std::result::Result<T, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    /// Whitespace separated pairs of zero-based integer ids.
    EdgeList,
    /// Named pairs with an optional weight, one per line.
    Ncol,
    /// `# vertex` headers followed by one neighbour per line.
    Lgl,
    /// Pajek `.net`.
    Pajek,
    Gml,
    GraphMl,
    /// Graphviz, node and edge statements only.
    Dot,
}

impl GraphFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "edgelist" | "edges" | "txt" => Some(Self::EdgeList),
            "ncol" => Some(Self::Ncol),
            "lgl" => Some(Self::Lgl),
            "net" => Some(Self::Pajek),
            "gml" => Some(Self::Gml),
            "graphml" => Some(Self::GraphMl),
            "dot" | "gv" => Some(Self::Dot),
            _ => None,
        }
    }

    /// Picks the format from the file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::load::GraphFormat;
    ///
    /// assert_eq!(GraphFormat::from_path("frames/3.GML"), Some(GraphFormat::Gml));
    /// assert_eq!(GraphFormat::from_path("notes.md"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Parses the text of a graph file.
    ///
    /// # Examples
    ///
    /// ```
    /// use netportrait::load::GraphFormat;
    ///
    /// let graph = GraphFormat::Ncol.parse("alice bob\nbob carol 2.5\n").unwrap();
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn parse(self, text: &str) -> Result<Graph<usize>> {
        self.parse_text(text).map_err(|reason| Error::load("<text>", reason))
    }

    fn parse_text(self, text: &str) -> ParseResult<Graph<usize>> {
        match self {
            Self::EdgeList => parse_edge_list(text),
            Self::Ncol => parse_ncol(text),
            Self::Lgl => parse_lgl(text),
            Self::Pajek => parse_pajek(text),
            Self::Gml => parse_gml(text),
            Self::GraphMl => parse_graphml(text),
            Self::Dot => parse_dot(text),
        }
    }
}

/// Reads the graph stored at `path`, choosing the reader from its extension.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph<usize>> {
    let path = path.as_ref();
    let format = GraphFormat::from_path(path)
        .ok_or_else(|| Error::load(path.display(), "unrecognised graph file extension"))?;
    let text = fs::read_to_string(path).map_err(|e| Error::load(path.display(), e))?;

    let graph = format
        .parse_text(&text)
        .map_err(|reason| Error::load(path.display(), reason))?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    Ok(graph)
}

/// Numbers named vertices in first-seen order.
#[derive(Default)]
struct Names {
    ids: HashMap<String, usize>,
}

impl Names {
    fn id(&mut self, name: &str) -> usize {
        let next = self.ids.len();
        *self.ids.entry(name.to_owned()).or_insert(next)
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }
}

/// Yields `(line number, trimmed line)` for lines that aren't blank or comments.
fn content_lines<'a>(
    text: &'a str,
    comment: &'a [char],
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(move |(_, line)| !line.is_empty() && !line.starts_with(comment))
}

fn parse_index(token: &str, line: usize) -> ParseResult<usize> {
    token
        .parse()
        .map_err(|_| format!("line {line}: {token:?} is not a vertex id"))
}

fn parse_edge_list(text: &str) -> ParseResult<Graph<usize>> {
    let mut graph = Graph::new();
    let mut pending: Option<usize> = None;
    let mut max_id = None;

    for (line, content) in content_lines(text, &['#']) {
        for token in content.split_whitespace() {
            let id = parse_index(token, line)?;
            max_id = max_id.max(Some(id));

            match pending.take() {
                Some(source) => {
                    graph.insert(Edge::new(source, id));
                }
                None => pending = Some(id),
            }
        }
    }

    if pending.is_some() {
        return Err("odd number of vertex ids, the last edge is incomplete".into());
    }

    // Every id up to the largest one names a vertex, connected or not.
    if let Some(max_id) = max_id {
        for id in 0..=max_id {
            graph.insert_vertex(id);
        }
    }

    Ok(graph)
}

fn parse_ncol(text: &str) -> ParseResult<Graph<usize>> {
    let mut graph = Graph::new();
    let mut names = Names::default();

    for (line, content) in content_lines(text, &['#']) {
        let tokens: Vec<&str> = content.split_whitespace().collect();
        match tokens[..] {
            [a] => {
                graph.insert_vertex(names.id(a));
            }
            [a, b] | [a, b, _] => {
                let (a, b) = (names.id(a), names.id(b));
                graph.insert(Edge::new(a, b));
            }
            _ => return Err(format!("line {line}: expected two names and an optional weight")),
        }
    }

    Ok(graph)
}

fn parse_lgl(text: &str) -> ParseResult<Graph<usize>> {
    let mut graph = Graph::new();
    let mut names = Names::default();
    let mut hub = None;

    for (line, content) in content_lines(text, &[]) {
        if let Some(name) = content.strip_prefix('#') {
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("line {line}: vertex header without a name"));
            }
            let id = names.id(name);
            graph.insert_vertex(id);
            hub = Some(id);
            continue;
        }

        let hub = hub.ok_or_else(|| format!("line {line}: neighbour listed before any vertex"))?;
        let neighbour = content
            .split_whitespace()
            .next()
            .ok_or_else(|| format!("line {line}: missing neighbour"))?;
        let neighbour = names.id(neighbour);
        graph.insert_subset(hub, &[neighbour]);
    }

    Ok(graph)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PajekSection {
    Preamble,
    Vertices,
    Edges,
    EdgesList,
    Matrix,
}

fn parse_pajek(text: &str) -> ParseResult<Graph<usize>> {
    let mut graph = Graph::new();
    let mut section = PajekSection::Preamble;
    let mut declared: Option<usize> = None;
    let mut matrix_row = 0;

    // Pajek ids are one-based.
    let vertex = |token: &str, line: usize, declared: Option<usize>| -> ParseResult<usize> {
        let id = parse_index(token, line)?;
        match declared {
            _ if id == 0 => Err(format!("line {line}: pajek vertex ids start at 1")),
            Some(n) if id > n => Err(format!("line {line}: vertex {id} exceeds the {n} declared")),
            _ => Ok(id - 1),
        }
    };

    for (line, content) in content_lines(text, &['%']) {
        if content.starts_with('*') {
            let mut words = content.split_whitespace();
            let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
            section = match keyword.as_str() {
                "*vertices" => {
                    let n = words
                        .next()
                        .ok_or_else(|| format!("line {line}: *Vertices without a count"))
                        .and_then(|n| parse_index(n, line))?;
                    for id in 0..n {
                        graph.insert_vertex(id);
                    }
                    declared = Some(n);
                    PajekSection::Vertices
                }
                "*edges" | "*arcs" => PajekSection::Edges,
                "*edgeslist" | "*arcslist" => PajekSection::EdgesList,
                "*matrix" => {
                    matrix_row = 0;
                    PajekSection::Matrix
                }
                "*network" => PajekSection::Preamble,
                other => return Err(format!("line {line}: unknown pajek section {other}")),
            };
            continue;
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        match section {
            PajekSection::Preamble => {
                return Err(format!("line {line}: data outside of any section"));
            }
            // Labels and coordinates aren't needed, only the id is validated.
            PajekSection::Vertices => {
                vertex(tokens[0], line, declared)?;
            }
            PajekSection::Edges => {
                if tokens.len() < 2 {
                    return Err(format!("line {line}: edge needs two vertices"));
                }
                let a = vertex(tokens[0], line, declared)?;
                let b = vertex(tokens[1], line, declared)?;
                graph.insert(Edge::new(a, b));
            }
            PajekSection::EdgesList => {
                let hub = vertex(tokens[0], line, declared)?;
                let leaves = tokens[1..]
                    .iter()
                    .map(|t| vertex(t, line, declared))
                    .collect::<ParseResult<Vec<_>>>()?;
                graph.insert_subset(hub, &leaves);
            }
            PajekSection::Matrix => {
                let n = declared.ok_or_else(|| format!("line {line}: *Matrix before *Vertices"))?;
                if matrix_row >= n || tokens.len() != n {
                    return Err(format!("line {line}: matrix row doesn't match {n} vertices"));
                }
                for (col, cell) in tokens.iter().enumerate() {
                    let weight: f64 = cell
                        .parse()
                        .map_err(|_| format!("line {line}: {cell:?} is not a number"))?;
                    if weight != 0.0 {
                        graph.insert(Edge::new(matrix_row, col));
                    }
                }
                matrix_row += 1;
            }
        }
    }

    Ok(graph)
}

/// A GML value: a scalar or a bracketed list of key-value pairs.
#[derive(Debug, PartialEq)]
enum Gml {
    Atom(String),
    List(Vec<(String, Gml)>),
}

impl Gml {
    fn get(&self, key: &str) -> Option<&Gml> {
        match self {
            Self::List(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::Atom(_) => None,
        }
    }

    fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Gml> + 'a {
        let pairs: &[(String, Gml)] = match self {
            Self::List(pairs) => pairs.as_slice(),
            Self::Atom(_) => &[],
        };
        pairs.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    fn atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

fn gml_tokens(text: &str) -> ParseResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '[' | ']' => {
                tokens.push(c.to_string());
                chars.next();
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => s.push(c),
                        None => return Err("unterminated string".into()),
                    }
                }
                tokens.push(s);
            }
            _ => {
                let mut s = String::new();
                while let Some(c) = chars.next_if(|&c| !c.is_whitespace() && c != '[' && c != ']') {
                    s.push(c);
                }
                tokens.push(s);
            }
        }
    }

    Ok(tokens)
}

fn gml_list(tokens: &mut std::vec::IntoIter<String>, nested: bool) -> ParseResult<Vec<(String, Gml)>> {
    let mut pairs = Vec::new();

    loop {
        let key = match tokens.next() {
            Some(t) if t == "]" => {
                return if nested {
                    Ok(pairs)
                } else {
                    Err("unbalanced ']'".into())
                };
            }
            Some(t) if t == "[" => return Err("list without a key".into()),
            Some(t) => t,
            None if nested => return Err("missing ']'".into()),
            None => return Ok(pairs),
        };

        let value = match tokens.next() {
            Some(t) if t == "[" => Gml::List(gml_list(tokens, true)?),
            Some(t) if t == "]" => return Err(format!("key {key:?} has no value")),
            Some(t) => Gml::Atom(t),
            None => return Err(format!("key {key:?} has no value")),
        };

        pairs.push((key, value));
    }
}

fn parse_gml(text: &str) -> ParseResult<Graph<usize>> {
    let root = Gml::List(gml_list(&mut gml_tokens(text)?.into_iter(), false)?);
    let body = root.get("graph").ok_or("no graph block")?;

    let mut graph = Graph::new();
    let mut names = Names::default();

    for node in body.all("node") {
        let id = node
            .get("id")
            .and_then(Gml::atom)
            .ok_or("node without an id")?;
        graph.insert_vertex(names.id(id));
    }

    for edge in body.all("edge") {
        let endpoint = |key: &str| -> ParseResult<usize> {
            let id = edge
                .get(key)
                .and_then(Gml::atom)
                .ok_or_else(|| format!("edge without a {key}"))?;
            names
                .get(id)
                .ok_or_else(|| format!("edge {key} {id} is not a declared node"))
        };
        graph.insert(Edge::new(endpoint("source")?, endpoint("target")?));
    }

    Ok(graph)
}

fn xml_attributes(attributes: &str) -> ParseResult<HashMap<String, String>> {
    let re = Regex::new(r#"([\w:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).map_err(|e| e.to_string())?;

    Ok(re
        .captures_iter(attributes)
        .filter_map(|c| {
            let value = c.get(2).or_else(|| c.get(3))?;
            Some((c[1].to_owned(), value.as_str().to_owned()))
        })
        .collect())
}

fn parse_graphml(text: &str) -> ParseResult<Graph<usize>> {
    let comments = Regex::new(r"(?s)<!--.*?-->").map_err(|e| e.to_string())?;
    let text = comments.replace_all(text, "");
    if !text.contains("<graphml") {
        return Err("not a GraphML document".into());
    }

    let elements = Regex::new(r"<(node|edge)\b([^>]*)>").map_err(|e| e.to_string())?;
    let mut graph = Graph::new();
    let mut names = Names::default();

    // Nodes first, edges may legally precede the nodes they refer to.
    let (nodes, edges): (Vec<_>, Vec<_>) = elements
        .captures_iter(&text)
        .partition(|c| &c[1] == "node");

    for node in nodes {
        let attributes = xml_attributes(&node[2])?;
        let id = attributes.get("id").ok_or("node without an id")?;
        graph.insert_vertex(names.id(id));
    }

    for edge in edges {
        let attributes = xml_attributes(&edge[2])?;
        let endpoint = |key: &str| -> ParseResult<usize> {
            let id = attributes
                .get(key)
                .ok_or_else(|| format!("edge without a {key}"))?;
            names
                .get(id)
                .ok_or_else(|| format!("edge {key} {id} is not a declared node"))
        };
        graph.insert(Edge::new(endpoint("source")?, endpoint("target")?));
    }

    Ok(graph)
}

/// Strips quotes and ports from a DOT node id.
fn dot_id(token: &str) -> ParseResult<&str> {
    let token = token.trim();
    let id = match token.strip_prefix('"') {
        Some(quoted) => quoted.strip_suffix('"').ok_or_else(|| format!("bad id {token:?}"))?,
        None => token.split(':').next().unwrap_or_default(),
    };

    if id.is_empty() || (!token.starts_with('"') && id.contains(char::is_whitespace)) {
        return Err(format!("bad node id {token:?}"));
    }

    Ok(id)
}

fn parse_dot(text: &str) -> ParseResult<Graph<usize>> {
    let comments = Regex::new(r"(?s)/\*.*?\*/|//[^\n]*|(?m)^\s*#[^\n]*").map_err(|e| e.to_string())?;
    let text = comments.replace_all(text, "");

    let open = text.find('{').ok_or("missing '{'")?;
    let close = text.rfind('}').ok_or("missing '}'")?;
    let header = text[..open].to_ascii_lowercase();
    if close < open || !header.split_whitespace().any(|w| w == "graph" || w == "digraph") {
        return Err("not a graph or digraph".into());
    }

    let attributes = Regex::new(r"\[[^\]]*\]").map_err(|e| e.to_string())?;
    let body = attributes.replace_all(&text[open + 1..close], " ");
    let connector = Regex::new(r"--|->").map_err(|e| e.to_string())?;

    let mut graph = Graph::new();
    let mut names = Names::default();

    // Subgraph braces are flattened, their statements belong to the graph.
    for statement in body.split(|c| matches!(c, ';' | '\n' | '{' | '}')) {
        let statement = statement.trim();
        let keyword = statement.split_whitespace().next().unwrap_or_default();
        if statement.is_empty()
            || statement.contains('=')
            || matches!(keyword, "graph" | "node" | "edge" | "subgraph")
        {
            continue;
        }

        let ids = connector
            .split(statement)
            .map(dot_id)
            .collect::<ParseResult<Vec<_>>>()?;
        match ids[..] {
            [id] => {
                graph.insert_vertex(names.id(id));
            }
            _ => {
                for pair in ids.windows(2) {
                    let (a, b) = (names.id(pair[0]), names.id(pair[1]));
                    graph.insert(Edge::new(a, b));
                }
            }
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Topology;

    fn edges(graph: &Graph<usize>) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = graph
            .edges()
            .iter()
            .map(|e| (*e.source(), *e.target()))
            .collect();
        edges.sort();
        edges
    }

    fn parse(format: GraphFormat, text: &str) -> Graph<usize> {
        format.parse(text).unwrap()
    }

    fn fails(format: GraphFormat, text: &str) {
        assert!(
            matches!(format.parse(text), Err(Error::GraphLoad { .. })),
            "{format:?} accepted {text:?}"
        );
    }

    #[test]
    fn extensions() {
        for ext in GRAPH_EXTENSIONS {
            assert!(GraphFormat::from_extension(ext).is_some(), "{ext}");
        }
        assert_eq!(GraphFormat::from_path("a/b/12.net"), Some(GraphFormat::Pajek));
        assert_eq!(GraphFormat::from_path("12"), None);
    }

    #[test]
    fn edge_list() {
        let graph = parse(GraphFormat::EdgeList, "0 1\n1 2\n\n2 0 3\n4\n");

        assert_eq!(edges(&graph), vec![(0, 1), (0, 2), (1, 2), (3, 4)]);
        assert_eq!(graph.vertex_count(), 5);
    }

    #[test]
    fn edge_list_includes_gaps() {
        let graph = parse(GraphFormat::EdgeList, "0 3\n");

        assert_eq!(graph.vertex_count(), 4);
        assert!(matches!(
            graph.clone().adjacency_list().diameter(),
            Err(Error::GraphQuery(_))
        ));
    }

    #[test]
    fn edge_list_errors() {
        fails(GraphFormat::EdgeList, "0 1\n2\n");
        fails(GraphFormat::EdgeList, "0 a\n");
    }

    #[test]
    fn ncol() {
        let graph = parse(GraphFormat::Ncol, "# names\nb a 1.0\na c\nd\n");

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.vertex_count(), 4);
        fails(GraphFormat::Ncol, "a b 1 2\n");
    }

    #[test]
    fn lgl() {
        let graph = parse(GraphFormat::Lgl, "# a\nb\nc 2.0\n# b\nc\n# d\n");

        assert_eq!(edges(&graph), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(graph.vertex_count(), 4);
        fails(GraphFormat::Lgl, "b\n# a\n");
    }

    #[test]
    fn pajek() {
        let text = "% comment\n*Vertices 4\n1 \"a\"\n2 \"b\"\n3\n4\n*Edges\n1 2 1.0\n2 3\n*Arcs\n3 4\n";
        let graph = parse(GraphFormat::Pajek, text);

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn pajek_lists_and_matrix() {
        let graph = parse(GraphFormat::Pajek, "*Vertices 4\n*Edgeslist\n1 2 3 4\n");
        assert_eq!(edges(&graph), vec![(0, 1), (0, 2), (0, 3)]);

        let graph = parse(
            GraphFormat::Pajek,
            "*Vertices 3\n*Matrix\n0 1 0\n1 0 1\n0 1 0\n",
        );
        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn pajek_errors() {
        fails(GraphFormat::Pajek, "*Vertices 2\n*Edges\n1 3\n");
        fails(GraphFormat::Pajek, "*Vertices 2\n*Edges\n0 1\n");
        fails(GraphFormat::Pajek, "1 2\n");
        fails(GraphFormat::Pajek, "*Vertices 2\n*Bogus\n");
    }

    #[test]
    fn gml() {
        let text = r#"
            Creator "test"
            graph [
              directed 0
              # a comment
              node [ id 10 label "x y" ]
              node [ id 20 ]
              node [ id 30 graphics [ x 1.0 y 2.0 ] ]
              edge [ source 10 target 20 weight 2 ]
              edge [ source 30 target 20 ]
            ]
        "#;
        let graph = parse(GraphFormat::Gml, text);

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn gml_errors() {
        fails(GraphFormat::Gml, "graph [ node [ id 1 ] edge [ source 1 target 2 ] ]");
        fails(GraphFormat::Gml, "graph [ node [ id 1 ]");
        fails(GraphFormat::Gml, "nodes [ ]");
        fails(GraphFormat::Gml, "graph [ node [ label \"a ] ]");
    }

    #[test]
    fn graphml() {
        let text = r#"<?xml version="1.0" encoding="UTF-8"?>
            <graphml xmlns="http://graphml.graphdrawing.org/xmlns">
              <key id="w" for="edge" attr.name="weight" attr.type="double"/>
              <graph id="G" edgedefault="undirected">
                <!-- <node id="ghost"/> -->
                <edge source="n1" target="n0"><data key="w">1.0</data></edge>
                <node id="n0"/>
                <node id='n1'/>
                <node id="n2"></node>
                <edge id="e1" target="n2" source="n1"/>
              </graph>
            </graphml>"#;
        let graph = parse(GraphFormat::GraphMl, text);

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn graphml_errors() {
        fails(GraphFormat::GraphMl, "<graph><node id=\"a\"/></graph>");
        fails(
            GraphFormat::GraphMl,
            "<graphml><graph><node id=\"a\"/><edge source=\"a\" target=\"b\"/></graph></graphml>",
        );
    }

    #[test]
    fn dot() {
        let text = r#"
            // portrait input
            strict graph G {
              graph [rankdir=LR];
              node [shape=circle]
              a -- b -- "c d" [weight=2];
              b -- e
              /* f -- g */
              subgraph cluster_0 { e -- a }
              h;
            }
        "#;
        let graph = parse(GraphFormat::Dot, text);

        // a=0, b=1, "c d"=2, e=3, h=4
        assert_eq!(edges(&graph), vec![(0, 1), (0, 3), (1, 2), (1, 3)]);
        assert_eq!(graph.vertex_count(), 5);
    }

    #[test]
    fn digraph_arrows() {
        let graph = parse(GraphFormat::Dot, "digraph { 1 -> 2; 2 -> 1; 2 -> 3 }");

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn dot_errors() {
        fails(GraphFormat::Dot, "a -- b");
        fails(GraphFormat::Dot, "graph { a -- }");
        fails(GraphFormat::Dot, "tree { a -- b }");
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.ncol");
        fs::write(&path, "a b\nb c\n").unwrap();

        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.edge_count(), 2);

        match load_graph(dir.path().join("2.ncol")) {
            Err(Error::GraphLoad { path, .. }) => assert!(path.ends_with("2.ncol")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            load_graph(dir.path().join("1.csv")),
            Err(Error::GraphLoad { .. })
        ));
    }
}
