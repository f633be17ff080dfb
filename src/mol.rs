use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::traits::HasBondOrder;

/// Undirected molecular graph.
///
/// Atom indices follow creation order, which for a parsed molecule is the
/// order atoms appear in the input string.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Number of connected components.
    pub fn fragment_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Sum of bond orders around one atom.
    pub fn bond_order_sum(&self, idx: NodeIndex) -> u32
    where
        B: HasBondOrder,
    {
        self.bonds_of(idx)
            .map(|e| self.bond(e).bond_order().value() as u32)
            .sum()
    }

    /// Sum of all bond orders in the molecule.
    pub fn total_bond_order(&self) -> u32
    where
        B: HasBondOrder,
    {
        self.bonds()
            .map(|e| self.bond(e).bond_order().value() as u32)
            .sum()
    }

    /// Split into connected components.
    ///
    /// Fragments are ordered by their lowest atom index; inside a fragment
    /// atoms and bonds keep their relative order.
    pub fn fragments(&self) -> Vec<Mol<A, B>>
    where
        A: Clone,
        B: Clone,
    {
        let n = self.atom_count();
        let mut sets = UnionFind::<usize>::new(n);
        for e in self.graph.edge_references() {
            sets.union(e.source().index(), e.target().index());
        }

        let mut fragment_of_root: Vec<Option<usize>> = vec![None; n];
        let mut local: Vec<(usize, NodeIndex)> = Vec::with_capacity(n);
        let mut fragments: Vec<Mol<A, B>> = Vec::new();
        for node in self.atoms() {
            let root = sets.find(node.index());
            let f = *fragment_of_root[root].get_or_insert_with(|| {
                fragments.push(Mol::new());
                fragments.len() - 1
            });
            let idx = fragments[f].add_atom(self.atom(node).clone());
            local.push((f, idx));
        }

        for e in self.graph.edge_references() {
            let (f, a) = local[e.source().index()];
            let (_, b) = local[e.target().index()];
            fragments[f].add_bond(a, b, e.weight().clone());
        }

        fragments
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            if self.atom(idx) != other.atom(idx) {
                return false;
            }
        }
        for idx in self.bonds() {
            if self.bond(idx) != other.bond(idx) {
                return false;
            }
            if self.bond_endpoints(idx) != other.bond_endpoints(idx) {
                return false;
            }
        }
        true
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}

/// Ordered collection of disjoint molecules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoleculeSet {
    molecules: Vec<Mol<Atom, Bond>>,
}

impl MoleculeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One molecule per connected component of `mol`.
    pub fn from_fragments(mol: &Mol<Atom, Bond>) -> Self {
        Self {
            molecules: mol.fragments(),
        }
    }

    pub fn push(&mut self, mol: Mol<Atom, Bond>) {
        self.molecules.push(mol);
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Mol<Atom, Bond>> {
        self.molecules.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mol<Atom, Bond>> {
        self.molecules.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.molecules.iter().map(Mol::atom_count).sum()
    }

    pub fn bond_count(&self) -> usize {
        self.molecules.iter().map(Mol::bond_count).sum()
    }

    pub fn into_vec(self) -> Vec<Mol<Atom, Bond>> {
        self.molecules
    }
}

impl<'a> IntoIterator for &'a MoleculeSet {
    type Item = &'a Mol<Atom, Bond>;
    type IntoIter = std::slice::Iter<'a, Mol<Atom, Bond>>;

    fn into_iter(self) -> Self::IntoIter {
        self.molecules.iter()
    }
}

impl FromIterator<Mol<Atom, Bond>> for MoleculeSet {
    fn from_iter<I: IntoIterator<Item = Mol<Atom, Bond>>>(iter: I) -> Self {
        Self {
            molecules: iter.into_iter().collect(),
        }
    }
}
