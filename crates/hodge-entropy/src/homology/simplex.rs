//! Simplices and clique (flag) complexes
//!
//! The complex of a molecular graph has one k-simplex per (k+1)-clique.
//! Every dimension keeps an explicit ordering and an index map
//! (sorted vertex tuple → position) built once, so boundary matrices,
//! Laplacians and entropy rows all agree on what "simplex i" means.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use crate::error::{HeatError, Result};
use crate::molecule::AttributedGraph;

/// A simplex (k-simplex has k+1 vertices)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Simplex {
    /// Sorted vertex indices
    vertices: Vec<usize>,
}

impl Simplex {
    /// Create simplex from vertices (will be sorted)
    pub fn new(mut vertices: Vec<usize>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Create 0-simplex (vertex)
    pub fn vertex(v: usize) -> Self {
        Self { vertices: vec![v] }
    }

    /// Create 1-simplex (edge)
    pub fn edge(v0: usize, v1: usize) -> Self {
        Self::new(vec![v0, v1])
    }

    /// Create 2-simplex (triangle)
    pub fn triangle(v0: usize, v1: usize, v2: usize) -> Self {
        Self::new(vec![v0, v1, v2])
    }

    /// Dimension of simplex (0 = vertex, 1 = edge, 2 = triangle, ...)
    pub fn dim(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Sorted vertices
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Oriented boundary: each face with sign `(-1)^p`, `p` being the
    /// position of the omitted vertex.
    ///
    /// `∂[v0, …, vk] = Σ (-1)^p [v0, …, v̂p, …, vk]`
    pub fn boundary(&self) -> Vec<(Simplex, f64)> {
        if self.vertices.len() <= 1 {
            return Vec::new();
        }

        (0..self.vertices.len())
            .map(|p| {
                let face: Vec<usize> = self
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != p)
                    .map(|(_, &v)| v)
                    .collect();
                let sign = if p % 2 == 0 { 1.0 } else { -1.0 };
                (Simplex { vertices: face }, sign)
            })
            .collect()
    }
}

impl Borrow<[usize]> for Simplex {
    fn borrow(&self) -> &[usize] {
        &self.vertices
    }
}

/// Position lookup for the simplices of one dimension
#[derive(Debug, Clone, Default)]
pub struct SimplexIndex {
    positions: HashMap<Simplex, usize>,
}

impl SimplexIndex {
    /// Build from an ordered simplex list
    pub fn build(simplices: &[Simplex]) -> Self {
        let positions = simplices
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { positions }
    }

    /// Position of a simplex given by its sorted vertex tuple
    #[inline]
    pub fn get(&self, vertices: &[usize]) -> Option<usize> {
        self.positions.get(vertices).copied()
    }

    /// Number of indexed simplices
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is empty?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Clique complex of a graph, truncated at `max_dim`
#[derive(Debug, Clone)]
pub struct CliqueComplex {
    /// Simplices per dimension, in canonical order
    levels: Vec<Vec<Simplex>>,
    /// Index map per dimension
    indices: Vec<SimplexIndex>,
    /// Highest dimension that was requested
    max_dim: usize,
}

impl CliqueComplex {
    /// Build the complex of a molecule.
    ///
    /// Dimension 0 lists atoms by index, dimension 1 lists bonds in input
    /// order, higher dimensions list cliques lexicographically.
    pub fn from_graph(graph: &AttributedGraph, max_dim: usize) -> Result<Self> {
        graph.validate()?;
        Ok(Self::build(graph.atom_count(), &graph.edge_list(), max_dim))
    }

    /// Build from a bare vertex count and edge list
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)], max_dim: usize) -> Result<Self> {
        Self::from_graph(&AttributedGraph::from_edges(vertex_count, edges), max_dim)
    }

    fn build(n: usize, edges: &[(usize, usize)], max_dim: usize) -> Self {
        let mut levels: Vec<Vec<Simplex>> = Vec::with_capacity(max_dim + 1);
        levels.push((0..n).map(Simplex::vertex).collect());

        if max_dim >= 1 {
            levels.push(edges.iter().map(|&(u, v)| Simplex::edge(u, v)).collect());
        }

        if max_dim >= 2 {
            let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
            for &(u, v) in edges {
                adjacency[u].insert(v);
                adjacency[v].insert(u);
            }

            // Extending every k-clique (in lexicographic order) by larger
            // common neighbours yields each (k+1)-clique once, in order.
            let mut prev: Vec<Simplex> = levels[1].clone();
            prev.sort_unstable();
            for _ in 2..=max_dim {
                let mut next = Vec::new();
                for clique in &prev {
                    let last = clique.vertices[clique.vertices.len() - 1];
                    for v in (last + 1)..n {
                        if clique.vertices.iter().all(|u| adjacency[*u].contains(&v)) {
                            let mut verts = clique.vertices.clone();
                            verts.push(v);
                            next.push(Simplex { vertices: verts });
                        }
                    }
                }
                levels.push(next.clone());
                prev = next;
            }
        }

        let indices = levels.iter().map(|l| SimplexIndex::build(l)).collect();
        Self {
            levels,
            indices,
            max_dim,
        }
    }

    /// Highest dimension the complex was built with
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Highest dimension that actually contains simplices
    pub fn top_dim(&self) -> usize {
        self.levels
            .iter()
            .rposition(|l| !l.is_empty())
            .unwrap_or(0)
    }

    /// Simplices of dimension `k` in canonical order
    pub fn simplices(&self, k: usize) -> Result<&[Simplex]> {
        self.levels
            .get(k)
            .map(Vec::as_slice)
            .ok_or(HeatError::DimensionUnavailable {
                requested: k,
                max: self.max_dim,
            })
    }

    /// Index map for dimension `k`
    pub fn index(&self, k: usize) -> Result<&SimplexIndex> {
        self.indices.get(k).ok_or(HeatError::DimensionUnavailable {
            requested: k,
            max: self.max_dim,
        })
    }

    /// Number of k-simplices (0 past `max_dim`)
    pub fn count(&self, k: usize) -> usize {
        self.levels.get(k).map_or(0, Vec::len)
    }

    /// Position of a simplex in its dimension
    pub fn index_of(&self, simplex: &Simplex) -> Option<usize> {
        self.indices.get(simplex.dim())?.get(simplex.vertices())
    }

    /// Count simplices of each dimension
    pub fn simplex_counts(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Euler characteristic: sum(-1)^k * |K_k|
    pub fn euler_characteristic(&self) -> i64 {
        self.levels
            .iter()
            .enumerate()
            .map(|(k, l)| if k % 2 == 0 { l.len() as i64 } else { -(l.len() as i64) })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_creation() {
        let s = Simplex::new(vec![2, 0, 1, 1]);
        assert_eq!(s.vertices(), &[0, 1, 2]);
        assert_eq!(s.dim(), 2);
        assert_eq!(Simplex::vertex(4).dim(), 0);
    }

    #[test]
    fn test_boundary_signs() {
        let tri = Simplex::triangle(0, 1, 2);
        let b = tri.boundary();
        assert_eq!(b.len(), 3);
        assert_eq!(b[0], (Simplex::edge(1, 2), 1.0));
        assert_eq!(b[1], (Simplex::edge(0, 2), -1.0));
        assert_eq!(b[2], (Simplex::edge(0, 1), 1.0));
        assert!(Simplex::vertex(0).boundary().is_empty());
    }

    #[test]
    fn test_single_bond_complex() {
        let c = CliqueComplex::from_edges(2, &[(0, 1)], 1).unwrap();
        assert_eq!(c.simplex_counts(), vec![2, 1]);
        assert_eq!(c.simplices(1).unwrap()[0], Simplex::edge(0, 1));
        assert_eq!(c.euler_characteristic(), 1);
    }

    #[test]
    fn test_edge_order_follows_bonds() {
        let c = CliqueComplex::from_edges(3, &[(2, 1), (0, 1)], 1).unwrap();
        let edges = c.simplices(1).unwrap();
        assert_eq!(edges[0], Simplex::edge(1, 2));
        assert_eq!(edges[1], Simplex::edge(0, 1));
        assert_eq!(c.index_of(&Simplex::edge(0, 1)), Some(1));
    }

    #[test]
    fn test_triangles_and_tetrahedra() {
        // K4: 4 vertices, 6 edges, 4 triangles, 1 tetrahedron
        let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let c = CliqueComplex::from_edges(4, &edges, 3).unwrap();
        assert_eq!(c.simplex_counts(), vec![4, 6, 4, 1]);
        assert_eq!(c.euler_characteristic(), 1);
        assert_eq!(
            c.simplices(2).unwrap(),
            &[
                Simplex::triangle(0, 1, 2),
                Simplex::triangle(0, 1, 3),
                Simplex::triangle(0, 2, 3),
                Simplex::triangle(1, 2, 3),
            ]
        );
        assert_eq!(c.top_dim(), 3);
    }

    #[test]
    fn test_ordering_is_stable() {
        let edges = [(3, 4), (0, 1), (1, 2), (0, 2), (2, 3)];
        let a = CliqueComplex::from_edges(5, &edges, 2).unwrap();
        let b = CliqueComplex::from_edges(5, &edges, 2).unwrap();
        for k in 0..=2 {
            assert_eq!(a.simplices(k).unwrap(), b.simplices(k).unwrap());
        }
    }

    #[test]
    fn test_empty_graph_rejected() {
        assert_eq!(
            CliqueComplex::from_edges(0, &[], 1).unwrap_err(),
            HeatError::EmptyGraph
        );
    }

    #[test]
    fn test_dimension_unavailable() {
        let c = CliqueComplex::from_edges(2, &[(0, 1)], 1).unwrap();
        assert!(matches!(
            c.simplices(2),
            Err(HeatError::DimensionUnavailable { requested: 2, max: 1 })
        ));
        assert_eq!(c.count(2), 0);
    }
}
