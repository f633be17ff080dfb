use crate::*;

#[test]
fn mol_add_atoms_and_bonds() {
    let mut mol = Mol::<Atom, Bond>::new();
    let c = mol.add_atom(Atom::new(Element::C));
    let o = mol.add_atom(Atom::new(Element::O));
    let bond_idx = mol.add_bond(
        c,
        o,
        Bond {
            order: BondOrder::Double,
            ..Bond::default()
        },
    );

    assert_eq!(mol.atom_count(), 2);
    assert_eq!(mol.bond_count(), 1);
    assert_eq!(mol.atom(c).element(), Some(Element::C));
    assert_eq!(mol.atom(o).element(), Some(Element::O));
    assert_eq!(mol.bond(bond_idx).order, BondOrder::Double);
    assert_eq!(mol.total_bond_order(), 2);
}

#[test]
fn mol_neighbors_and_bonds_of() {
    let mut mol = Mol::<Atom, Bond>::new();
    let a = mol.add_atom(Atom::default());
    let b = mol.add_atom(Atom::default());
    let c = mol.add_atom(Atom::default());
    mol.add_bond(a, b, Bond::default());
    mol.add_bond(a, c, Bond::default());

    assert_eq!(mol.neighbors(a).count(), 2);
    assert_eq!(mol.bonds_of(a).count(), 2);
    assert_eq!(mol.bond_order_sum(a), 2);
}

#[test]
fn mol_bond_between_and_endpoints() {
    let mut mol = Mol::<Atom, Bond>::new();
    let a = mol.add_atom(Atom::default());
    let b = mol.add_atom(Atom::default());
    let c = mol.add_atom(Atom::default());
    let e = mol.add_bond(a, b, Bond::default());

    assert_eq!(mol.bond_between(a, b), Some(e));
    assert_eq!(mol.bond_between(b, a), Some(e));
    assert_eq!(mol.bond_between(a, c), None);
    assert_eq!(mol.bond_endpoints(e), Some((a, b)));
}

#[test]
fn mol_atom_mut() {
    let mut mol = Mol::<Atom, Bond>::new();
    let idx = mol.add_atom(Atom::default());
    mol.atom_mut(idx).symbol = AtomSymbol::Element(Element::N);
    assert_eq!(mol.atom(idx).element(), Some(Element::N));
}

#[test]
fn fragments_keep_relative_order() {
    let mol = parse_smiles("CC.O.N(C)C").unwrap();
    assert_eq!(mol.fragment_count(), 3);
    let parts = mol.fragments();
    let sizes: Vec<usize> = parts.iter().map(|m| m.atom_count()).collect();
    assert_eq!(sizes, vec![2, 1, 3]);
    let amine = &parts[2];
    assert_eq!(amine.atom(petgraph::graph::NodeIndex::new(0)).element(), Some(Element::N));
    assert_eq!(amine.bond_count(), 2);
}

#[test]
fn molecule_set_collects() {
    let mol = parse_smiles("[Na+].[Cl-]").unwrap();
    let set = MoleculeSet::from_fragments(&mol);
    assert_eq!(set.len(), 2);
    assert_eq!(set.atom_count(), 2);
    assert_eq!(set.bond_count(), 0);

    let rebuilt: MoleculeSet = set.iter().cloned().collect();
    assert_eq!(rebuilt, set);
    assert_eq!((&set).into_iter().count(), 2);
    assert_eq!(set.into_vec().len(), 2);
    assert!(MoleculeSet::new().is_empty());
}

#[test]
fn atom_trait_impls() {
    let atom = Atom {
        symbol: AtomSymbol::Element(Element::C),
        isotope: Some(13),
        formal_charge: -1,
        hydrogen_count: 3,
        is_aromatic: true,
        atom_map: Some(7),
        chirality: Chirality::Clockwise,
        is_bracket: true,
    };

    assert_eq!(HasSymbol::symbol(&atom), AtomSymbol::Element(Element::C));
    assert_eq!(HasFormalCharge::formal_charge(&atom), -1);
    assert_eq!(HasIsotope::isotope(&atom), Some(13));
    assert_eq!(HasChirality::chirality(&atom), Chirality::Clockwise);
    assert_eq!(HasHydrogenCount::hydrogen_count(&atom), 3);
    assert_eq!(HasAtomMap::atom_map(&atom), Some(7));
    assert!(HasAromaticity::is_aromatic(&atom));
}

#[test]
fn bond_trait_impls() {
    let bond = Bond {
        order: BondOrder::Triple,
        is_aromatic: false,
        stereo: BondStereo::None,
    };

    assert_eq!(HasBondOrder::bond_order(&bond), BondOrder::Triple);
    assert!(!HasAromaticity::is_aromatic(&bond));
}

#[test]
fn generic_over_accessors() {
    fn charge_sum<A: HasFormalCharge, B>(mol: &Mol<A, B>) -> i32 {
        mol.atoms().map(|a| mol.atom(a).formal_charge() as i32).sum()
    }
    let mol = parse_smiles("[NH4+].[O-]C(=O)C").unwrap();
    assert_eq!(charge_sum(&mol), 0);
}

#[test]
fn defaults() {
    assert_eq!(Chirality::default(), Chirality::None);
    assert_eq!(BondOrder::default(), BondOrder::Single);
    assert_eq!(BondStereo::default(), BondStereo::None);

    let atom = Atom::default();
    assert!(atom.is_wildcard());
    assert_eq!(atom.isotope, None);
    assert_eq!(atom.atom_map, None);
    assert_eq!(atom.hydrogen_count, 0);
    assert!(!atom.is_bracket);

    let mol = Mol::<Atom, Bond>::default();
    assert_eq!(mol.atom_count(), 0);
    assert_eq!(mol.fragment_count(), 0);
}

#[test]
fn mol_graph_access() {
    let mol = parse_smiles("C1CC1").unwrap();
    assert_eq!(mol.graph().node_count(), 3);
    assert_eq!(mol.graph().edge_count(), 3);
}

#[test]
fn ring_info_from_parsed() {
    let mol = parse_smiles("C1CCCCC1CC").unwrap();
    let rings = RingInfo::new(&mol);
    assert_eq!(rings.num_rings(), 1);
    assert!(rings.is_ring_atom(petgraph::graph::NodeIndex::new(5)));
    assert!(!rings.is_ring_atom(petgraph::graph::NodeIndex::new(6)));
}

#[test]
fn errors_are_std_errors() {
    fn boxed(e: impl std::error::Error + 'static) -> Box<dyn std::error::Error> {
        Box::new(e)
    }
    let err = boxed(parse_smiles("c1cccc1").unwrap_err());
    assert!(err.source().is_some());
    let err = boxed(parse_reaction_smiles("C>>C(").unwrap_err());
    assert!(err.source().is_some());
}

#[test]
fn reparsing_is_deterministic() {
    for s in ["Nc1ncnc2[nH]cnc12", "c1ccc2cccc2cc1", "C1.O2.C12", "c1cccn1"] {
        let first = parse_smiles(s).unwrap();
        let second = parse_smiles(s).unwrap();
        assert_eq!(first, second, "{s}");
    }
}
