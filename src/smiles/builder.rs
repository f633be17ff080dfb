use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{BondStereo, SmilesBond, SmilesBondOrder};
use crate::mol::Mol;
use crate::rings::RingInfo;
use crate::smiles::parse_tree::{ParseAtom, ParseTree};
use crate::smiles::tokenizer::BondToken;

/// Materializes a parse tree into a graph with input-level bond orders.
///
/// Node `i` is the `i`-th atom of the input and edge `j` the `j`-th bond
/// written, counting ring closures where they close.
pub fn build_mol(tree: &ParseTree) -> Mol<Atom, SmilesBond> {
    let mut mol = Mol::new();
    let node_indices: Vec<NodeIndex> = tree
        .atoms
        .iter()
        .map(|parse_atom| mol.add_atom(atom_from_parse(parse_atom)))
        .collect();

    for parse_bond in &tree.bonds {
        let stereo = match parse_bond.bond {
            Some(BondToken::Up) => BondStereo::Up,
            Some(BondToken::Down) => BondStereo::Down,
            _ => BondStereo::None,
        };
        mol.add_bond(
            node_indices[parse_bond.begin],
            node_indices[parse_bond.end],
            SmilesBond {
                order: SmilesBondOrder::Implicit,
                stereo,
            },
        );
    }

    let rings = RingInfo::new(&mol);
    for (edge, parse_bond) in mol.bonds().zip(&tree.bonds).collect::<Vec<_>>() {
        let order = resolve_bond_order(
            parse_bond.bond,
            tree.atoms[parse_bond.begin].is_aromatic,
            tree.atoms[parse_bond.end].is_aromatic,
            rings.is_ring_bond(edge),
        );
        mol.bond_mut(edge).order = order;
    }

    mol
}

fn atom_from_parse(parse_atom: &ParseAtom) -> Atom {
    Atom {
        symbol: parse_atom.symbol,
        isotope: parse_atom.isotope,
        formal_charge: parse_atom.charge,
        hydrogen_count: if parse_atom.is_bracket {
            parse_atom.hcount.unwrap_or(0)
        } else {
            0
        },
        is_aromatic: parse_atom.is_aromatic,
        atom_map: parse_atom.atom_class,
        chirality: parse_atom.chirality,
        is_bracket: parse_atom.is_bracket,
    }
}

/// An explicit symbol always wins, so `c1ccccc1-c1ccccc1` links its rings
/// with a plain single bond. Without a symbol two aromatic atoms share an
/// aromatic bond only when the bond lies on a ring.
fn resolve_bond_order(
    bond_tok: Option<BondToken>,
    from_aromatic: bool,
    to_aromatic: bool,
    in_ring: bool,
) -> SmilesBondOrder {
    match bond_tok {
        Some(BondToken::Single) | Some(BondToken::Up) | Some(BondToken::Down) => {
            SmilesBondOrder::Single
        }
        Some(BondToken::Double) => SmilesBondOrder::Double,
        Some(BondToken::Triple) => SmilesBondOrder::Triple,
        Some(BondToken::Quadruple) => SmilesBondOrder::Quadruple,
        Some(BondToken::Aromatic) => {
            if from_aromatic && to_aromatic {
                SmilesBondOrder::Aromatic
            } else {
                SmilesBondOrder::Single
            }
        }
        None => {
            if from_aromatic && to_aromatic && in_ring {
                SmilesBondOrder::Aromatic
            } else {
                SmilesBondOrder::Implicit
            }
        }
    }
}
