use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Ring membership of atoms and bonds.
///
/// A bond is a ring bond when removing it leaves its endpoints connected,
/// i.e. it is not a bridge of the graph. An atom is a ring atom when it has
/// at least one ring bond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingInfo {
    ring_bonds: Vec<bool>,
    ring_atoms: Vec<bool>,
    num_rings: usize,
}

impl RingInfo {
    pub fn new<A, B>(mol: &Mol<A, B>) -> Self {
        let bridges = find_bridges(mol);
        let ring_bonds: Vec<bool> = bridges.iter().map(|&b| !b).collect();

        let mut ring_atoms = vec![false; mol.atom_count()];
        for edge in mol.bonds() {
            if !ring_bonds[edge.index()] {
                continue;
            }
            if let Some((a, b)) = mol.bond_endpoints(edge) {
                ring_atoms[a.index()] = true;
                ring_atoms[b.index()] = true;
            }
        }

        Self {
            ring_bonds,
            ring_atoms,
            num_rings: Self::expected_ring_count(mol),
        }
    }

    /// Cyclomatic number: the size of any smallest set of smallest rings.
    pub fn num_rings(&self) -> usize {
        self.num_rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.ring_atoms.get(atom.index()).copied().unwrap_or(false)
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.ring_bonds.get(bond.index()).copied().unwrap_or(false)
    }

    pub fn ring_bond_count(&self) -> usize {
        self.ring_bonds.iter().filter(|&&b| b).count()
    }

    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// Tarjan's bridge search with an explicit stack, so long chains cannot
/// overflow the call stack. Returns one flag per bond.
fn find_bridges<A, B>(mol: &Mol<A, B>) -> Vec<bool> {
    let n = mol.atom_count();
    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for edge in mol.bonds() {
        if let Some((a, b)) = mol.bond_endpoints(edge) {
            adj[a.index()].push((b.index(), edge.index()));
            adj[b.index()].push((a.index(), edge.index()));
        }
    }

    let mut bridge = vec![false; mol.bond_count()];
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut timer = 0usize;
    // (atom, edge it was reached through, next neighbour to visit)
    let mut stack: Vec<(usize, Option<usize>, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        stack.push((root, None, 0));

        while let Some(top) = stack.last_mut() {
            let (v, parent_edge) = (top.0, top.1);
            if top.2 < adj[v].len() {
                let (w, e) = adj[v][top.2];
                top.2 += 1;
                if Some(e) == parent_edge {
                    continue;
                }
                if disc[w] == usize::MAX {
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    stack.push((w, Some(e), 0));
                } else {
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let (Some(e), Some(&(p, _, _))) = (parent_edge, stack.last()) {
                    low[p] = low[p].min(low[v]);
                    if low[v] > disc[p] {
                        bridge[e] = true;
                    }
                }
            }
        }
    }

    bridge
}
