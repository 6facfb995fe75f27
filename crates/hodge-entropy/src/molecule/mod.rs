//! Attributed molecular graphs
//!
//! Atoms are nodes, bonds are edges. Parsing molecules is the job of an
//! external chemistry toolkit; this module only models what it hands over:
//!
//! - per atom: index, atomic number, formal charge, chirality tag,
//!   hybridization, explicit-H count, aromaticity flag
//! - per bond: the two atom indices and a bond-type code
//!
//! Atom indices must be unique and contiguous from 0. Bonds are kept in
//! input order, which later becomes the edge-simplex order so that edge
//! `j` of every descriptor lines up with bond `j`.

mod bond;

pub use bond::{bond_one_hot, BondType, AROMATIC_BOND_CODE, BOND_ONE_HOT_WIDTH};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{HeatError, Result};

/// An atom with the attributes the toolkit extracts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Atom index within the molecule
    pub index: usize,
    /// Atomic number
    #[serde(default)]
    pub atomic_num: u32,
    /// Formal charge
    #[serde(default)]
    pub formal_charge: i32,
    /// Chirality tag code
    #[serde(default)]
    pub chiral_tag: u32,
    /// Hybridization code
    #[serde(default)]
    pub hybridization: u32,
    /// Number of explicit hydrogens
    #[serde(default)]
    pub num_explicit_hs: u32,
    /// Aromaticity flag
    #[serde(default)]
    pub is_aromatic: bool,
}

impl Atom {
    /// Atom with only an index and atomic number set
    pub fn new(index: usize, atomic_num: u32) -> Self {
        Self {
            index,
            atomic_num,
            formal_charge: 0,
            chiral_tag: 0,
            hybridization: 0,
            num_explicit_hs: 0,
            is_aromatic: false,
        }
    }
}

/// A bond between two atoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// First atom index
    pub begin: usize,
    /// Second atom index
    pub end: usize,
    /// Toolkit bond-type code (1, 2, 3 or 12)
    pub bond_type: u32,
}

impl Bond {
    /// Create a bond
    pub fn new(begin: usize, end: usize, bond_type: u32) -> Self {
        Self {
            begin,
            end,
            bond_type,
        }
    }

    /// Endpoints as an ordered pair `(min, max)`
    #[inline]
    pub fn endpoints(&self) -> (usize, usize) {
        if self.begin <= self.end {
            (self.begin, self.end)
        } else {
            (self.end, self.begin)
        }
    }
}

/// Attributed molecular graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributedGraph {
    /// Atoms (any order; addressed by [`Atom::index`])
    #[serde(default)]
    pub atoms: Vec<Atom>,
    /// Bonds in toolkit order
    #[serde(default)]
    pub bonds: Vec<Bond>,
}

impl AttributedGraph {
    /// Create from atoms and bonds
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Self { atoms, bonds }
    }

    /// Carbon skeleton with single bonds, convenient for tests and benches
    pub fn from_edges(atom_count: usize, edges: &[(usize, usize)]) -> Self {
        Self {
            atoms: (0..atom_count).map(|i| Atom::new(i, 6)).collect(),
            bonds: edges.iter().map(|&(u, v)| Bond::new(u, v, 1)).collect(),
        }
    }

    /// Number of atoms
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Check the structural invariants.
    ///
    /// Fails with [`HeatError::EmptyGraph`] for zero atoms and with
    /// [`HeatError::InvalidGraph`] for non-contiguous atom indices, dangling
    /// or self-loop bonds, and duplicate bonds.
    pub fn validate(&self) -> Result<()> {
        let n = self.atoms.len();
        if n == 0 {
            return Err(HeatError::EmptyGraph);
        }

        let mut seen = vec![false; n];
        for atom in &self.atoms {
            if atom.index >= n {
                return Err(HeatError::invalid_graph(format!(
                    "atom index {} out of range for {} atoms",
                    atom.index, n
                )));
            }
            if std::mem::replace(&mut seen[atom.index], true) {
                return Err(HeatError::invalid_graph(format!(
                    "duplicate atom index {}",
                    atom.index
                )));
            }
        }

        let mut pairs = HashSet::with_capacity(self.bonds.len());
        for bond in &self.bonds {
            let (u, v) = bond.endpoints();
            if v >= n {
                return Err(HeatError::invalid_graph(format!(
                    "bond ({}, {}) references missing atom",
                    bond.begin, bond.end
                )));
            }
            if u == v {
                return Err(HeatError::invalid_graph(format!("self-loop on atom {u}")));
            }
            if !pairs.insert((u, v)) {
                return Err(HeatError::invalid_graph(format!("duplicate bond ({u}, {v})")));
            }
        }

        Ok(())
    }

    /// Validate every bond code
    pub fn validate_bond_codes(&self) -> Result<()> {
        self.bonds
            .iter()
            .try_for_each(|b| BondType::from_code(b.bond_type).map(|_| ()))
    }

    /// One-hot bond-type rows, row `j` for bond `j`
    pub fn bond_features(&self) -> Result<Vec<[f32; BOND_ONE_HOT_WIDTH]>> {
        self.bonds.iter().map(|b| bond_one_hot(b.bond_type)).collect()
    }

    /// Bond endpoints as ordered pairs, in bond order
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        self.bonds.iter().map(Bond::endpoints).collect()
    }
}
