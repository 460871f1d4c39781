#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Undirected graphs and the edge-list input format shared by the
//! reductions.
//!
//! The format:
//! - Comment lines whose first token is `c` are ignored.
//! - A header line `<vertices> <edges>` precedes the edge data.
//! - One `u v` pair per line, vertices numbered `1..=vertices`.

use rustc_hash::FxHashSet;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Ways a graph description can fail to parse.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No `<vertices> <edges>` header before the edge data.
    #[error("missing '<vertices> <edges>' header")]
    MissingHeader,

    /// A line that is not two readable numbers.
    #[error("malformed graph line: '{0}'")]
    Malformed(String),

    /// An endpoint outside `1..=vertices`.
    #[error("vertex {0} out of range 1..={1}")]
    VertexOutOfRange(u32, u32),

    /// The input ended before the declared number of edges was read.
    #[error("input ended after {found} of {declared} declared edges")]
    Truncated {
        /// Edge count announced by the header.
        declared: usize,
        /// Edges actually read.
        found: usize,
    },

    /// The underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// An undirected graph over vertices `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    vertices: u32,
    edges: Vec<(u32, u32)>,
    adjacency: FxHashSet<(u32, u32)>,
}

impl Graph {
    /// A graph over `vertices` vertices with the given undirected edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] when an endpoint is zero or
    /// exceeds `vertices`.
    pub fn new(
        vertices: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self {
            vertices,
            edges: Vec::new(),
            adjacency: FxHashSet::default(),
        };
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    fn add_edge(&mut self, u: u32, v: u32) -> Result<(), GraphError> {
        for w in [u, v] {
            if w == 0 || w > self.vertices {
                return Err(GraphError::VertexOutOfRange(w, self.vertices));
            }
        }
        self.adjacency.insert((u.min(v), u.max(v)));
        self.edges.push((u, v));
        Ok(())
    }

    /// Number of vertices.
    #[must_use]
    pub const fn vertices(&self) -> u32 {
        self.vertices
    }

    /// The edges, in input order.
    #[must_use]
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Whether `u` and `v` share an edge.
    #[must_use]
    pub fn adjacent(&self, u: u32, v: u32) -> bool {
        self.adjacency.contains(&(u.min(v), u.max(v)))
    }

    /// The vertex identifiers `1..=n`, in order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = u32> + Clone {
        1..=self.vertices
    }
}

/// Parses the edge-list format from text.
///
/// # Errors
///
/// Returns a [`GraphError`] when the header is absent or ill-formed, an
/// edge line is malformed or out of range, or the input ends early.
pub fn parse_text(input: &str) -> Result<Graph, GraphError> {
    parse(io::Cursor::new(input))
}

/// Parses the edge-list format from a buffered reader.
///
/// # Errors
///
/// Returns a [`GraphError`] when the header is absent or ill-formed, an
/// edge line is malformed or out of range, the input ends early, or
/// reading fails.
pub fn parse<R: BufRead>(reader: R) -> Result<Graph, GraphError> {
    let mut header: Option<(u32, usize)> = None;
    let mut edges: Vec<(u32, u32)> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None | Some(&"c") => continue,
            Some(_) => {}
        }

        let mut pair = || -> Option<(u32, u32)> {
            let first = tokens.next()?.parse().ok()?;
            let second = tokens.next()?.parse().ok()?;
            tokens.next().is_none().then_some((first, second))
        };
        let Some((first, second)) = pair() else {
            return Err(GraphError::Malformed(line.trim().to_string()));
        };

        let Some((_, declared)) = header else {
            header = Some((first, second as usize));
            if second == 0 {
                break;
            }
            continue;
        };
        edges.push((first, second));
        if edges.len() == declared {
            break;
        }
    }

    let (vertices, declared) = header.ok_or(GraphError::MissingHeader)?;
    if edges.len() < declared {
        return Err(GraphError::Truncated {
            declared,
            found: edges.len(),
        });
    }

    Graph::new(vertices, edges)
}

/// Parses a graph file at `path`.
///
/// # Errors
///
/// Returns a [`GraphError`] when the file cannot be opened or its content
/// fails to parse.
pub fn parse_path(path: &Path) -> Result<Graph, GraphError> {
    let file = std::fs::File::open(path)?;
    parse(io::BufReader::new(file))
}
