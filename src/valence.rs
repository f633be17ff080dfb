use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::element::Element;
use crate::mol::Mol;
use crate::traits::{HasBondOrder, HasHydrogenCount};

/// A bare atom whose bonds exceed every valence its element allows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("atom {} ({element}): bond order sum {bond_sum} not within {allowed:?}", .atom_idx.index())]
pub struct ValenceError {
    pub atom_idx: NodeIndex,
    pub element: Element,
    pub bond_sum: u32,
    pub allowed: Vec<u8>,
}

/// Bond orders plus attached hydrogens.
pub fn total_valence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u32
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    mol.bond_order_sum(atom) + mol.atom(atom).hydrogen_count() as u32
}

/// Hydrogens needed to bring `bond_sum` up to the smallest allowed valence.
///
/// Elements without tabulated valences take no implicit hydrogens. `None`
/// means the atom is over-valent.
pub fn implicit_hydrogen_count(element: Element, formal_charge: i8, bond_sum: u32) -> Option<u8> {
    if element.default_valences().is_empty() {
        return Some(0);
    }
    let used = u8::try_from(bond_sum).ok()?;
    element
        .target_valence(formal_charge, used)
        .map(|target| target - used)
}

/// Fills in `hydrogen_count` for every bare atom from its kekulized bonds.
///
/// Bracket atoms keep the count they were written with and wildcards get
/// none.
pub fn assign_implicit_hydrogens(mol: &mut Mol<Atom, Bond>) -> Result<(), ValenceError> {
    let nodes: Vec<NodeIndex> = mol.atoms().collect();
    for idx in nodes {
        let atom = mol.atom(idx);
        if atom.is_bracket {
            continue;
        }
        let Some(element) = atom.element() else {
            continue;
        };
        let bond_sum = mol.bond_order_sum(idx);
        let h = implicit_hydrogen_count(element, atom.formal_charge, bond_sum).ok_or_else(|| {
            ValenceError {
                atom_idx: idx,
                element,
                bond_sum,
                allowed: element.default_valences().to_vec(),
            }
        })?;
        mol.atom_mut(idx).hydrogen_count = h;
    }
    Ok(())
}
