//! Kekulization assigns alternating single and double bonds to aromatic ring systems.
//!
//! The input is a `Mol<Atom, SmilesBond>` whose aromatic bonds come from
//! lowercase atoms (e.g., `c1ccccc1`). The output is a `Mol<Atom, Bond>`
//! with concrete single/double bonds forming a valid Kekulé structure; the
//! aromatic flags on atoms and bonds are kept.
//!
//! Each connected aromatic system is solved on its own by
//! [`solve_system`], a maximum matching (Edmonds' blossom algorithm) over
//! the atoms that still need a double bond. If no valid assignment exists
//! (e.g., `c1cccc1`), [`kekulize`] returns a [`KekulizeError`].

use std::collections::{HashSet, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;
use tracing::{debug, trace};

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
use crate::element::Element;
use crate::mol::Mol;

/// Error returned when no valid Kekulé structure exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KekulizeError {
    /// The given atoms could not be assigned a double bond.
    #[error("cannot kekulize aromatic system: unmatched atoms {}", fmt_atoms(.0))]
    Unkekulizable(Vec<NodeIndex>),
}

fn fmt_atoms(atoms: &[NodeIndex]) -> String {
    let list: Vec<String> = atoms.iter().map(|a| a.index().to_string()).collect();
    format!("[{}]", list.join(", "))
}

/// One connected aromatic system, on local atom and edge indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AromaticSystem {
    needs_double: Vec<bool>,
    flexible: Vec<bool>,
    edges: Vec<(usize, usize)>,
}

impl AromaticSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom. `flexible` atoms (bare aromatic `n`/`p`) may give up
    /// their double bond and donate a lone pair instead.
    pub fn add_atom(&mut self, needs_double: bool, flexible: bool) -> usize {
        self.needs_double.push(needs_double);
        self.flexible.push(flexible);
        self.needs_double.len() - 1
    }

    /// Adds an edge between two existing atoms. Returns `None` for a
    /// self-loop or an unknown atom index.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Option<usize> {
        let n = self.atom_count();
        if a == b || a >= n || b >= n {
            return None;
        }
        self.edges.push((a, b));
        Some(self.edges.len() - 1)
    }

    pub fn atom_count(&self) -> usize {
        self.needs_double.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `false` for an unknown atom index.
    pub fn needs_double(&self, atom: usize) -> bool {
        self.needs_double.get(atom).copied().unwrap_or(false)
    }

    /// Adjacency with one extra vertex at index `atom_count()`, joined to
    /// every flexible atom. Sink edges carry `usize::MAX` as edge index.
    fn adjacency_with_sink(&self) -> Vec<Vec<(usize, usize)>> {
        let n = self.atom_count();
        let mut adj = vec![Vec::new(); n + 1];
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            adj[a].push((b, e));
            adj[b].push((a, e));
        }
        for v in (0..n).filter(|&v| self.flexible[v]) {
            adj[v].push((n, usize::MAX));
            adj[n].push((v, usize::MAX));
        }
        adj
    }
}

/// Double-bond placement for one [`AromaticSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KekuleAssignment {
    double: Vec<bool>,
    donors: Vec<usize>,
}

impl KekuleAssignment {
    /// `false` for an unknown edge index.
    pub fn is_double(&self, edge: usize) -> bool {
        self.double.get(edge).copied().unwrap_or(false)
    }

    pub fn double_count(&self) -> usize {
        self.double.iter().filter(|&&d| d).count()
    }

    /// Flexible atoms left without a double bond.
    pub fn donors(&self) -> &[usize] {
        &self.donors
    }
}

/// Places double bonds so every atom that needs one gets exactly one.
///
/// A greedy pass pairs rigid atoms along the edges first, so augmenting
/// searches only start from the atoms it leaves over. A rigid atom that no
/// augmenting path reaches may take the double bond of a flexible atom,
/// which then becomes a donor. Flexible atoms still unmatched at the end are
/// donors too. On failure the local index of the first rigid atom that
/// cannot be matched is returned.
pub fn solve_system(system: &AromaticSystem) -> Result<KekuleAssignment, Vec<usize>> {
    let n = system.atom_count();
    let adj = system.adjacency_with_sink();
    let mut active = system.needs_double.clone();
    active.push(false);
    let mut matcher = Matcher::new(&adj, active);

    let rigid = |v: usize| system.needs_double[v] && !system.flexible[v];
    for &(a, b) in &system.edges {
        if rigid(a) && rigid(b) && matcher.mate[a].is_none() && matcher.mate[b].is_none() {
            matcher.mate[a] = Some(b);
            matcher.mate[b] = Some(a);
        }
    }

    for v in (0..n).filter(|&v| rigid(v)) {
        if matcher.mate[v].is_some() || matcher.augment_from(v) {
            continue;
        }
        if !matcher.release_flexible_for(v) {
            return Err(vec![v]);
        }
    }

    let mut donors = Vec::new();
    for v in (0..n).filter(|&v| system.needs_double[v] && system.flexible[v]) {
        if matcher.mate[v].is_none() && !matcher.augment_from(v) {
            donors.push(v);
        }
    }

    let mut double = vec![false; system.edge_count()];
    for v in 0..n {
        if let Some(m) = matcher.mate[v] {
            if let Some(&(_, e)) = adj[v].iter().find(|&&(w, _)| w == m) {
                if let Some(slot) = double.get_mut(e) {
                    *slot = true;
                }
            }
        }
    }

    Ok(KekuleAssignment { double, donors })
}

/// Edmonds' blossom matching restricted to `active` atoms.
///
/// Search state is reset only on the vertices the previous search touched.
/// The last vertex is a sink joined to every flexible atom; it is active only
/// while [`Matcher::release_flexible_for`] runs.
struct Matcher<'a> {
    adj: &'a [Vec<(usize, usize)>],
    active: Vec<bool>,
    mate: Vec<Option<usize>>,
    parent: Vec<Option<usize>>,
    base: Vec<usize>,
    in_tree: Vec<bool>,
    touched: Vec<usize>,
    queue: VecDeque<usize>,
    // stamp arrays: a vertex is marked when its entry equals `epoch`
    lca_mark: Vec<usize>,
    blossom_mark: Vec<usize>,
    epoch: usize,
}

impl<'a> Matcher<'a> {
    fn new(adj: &'a [Vec<(usize, usize)>], active: Vec<bool>) -> Self {
        let n = adj.len();
        Self {
            adj,
            active,
            mate: vec![None; n],
            parent: vec![None; n],
            base: (0..n).collect(),
            in_tree: vec![false; n],
            touched: Vec::new(),
            queue: VecDeque::new(),
            lca_mark: vec![0; n],
            blossom_mark: vec![0; n],
            epoch: 0,
        }
    }

    fn sink(&self) -> usize {
        self.mate.len() - 1
    }

    fn augment_from(&mut self, root: usize) -> bool {
        match self.find_path(root) {
            Some(end) => {
                self.flip(end);
                true
            }
            None => false,
        }
    }

    /// Matches `root` by moving the double bond of some flexible atom along
    /// an even alternating path. The flexible atom ends up unmatched.
    fn release_flexible_for(&mut self, root: usize) -> bool {
        let sink = self.sink();
        self.active[sink] = true;
        let found = self.augment_from(root);
        self.active[sink] = false;
        if let Some(w) = self.mate[sink].take() {
            self.mate[w] = None;
        }
        found
    }

    fn reset_search(&mut self) {
        for &v in &self.touched {
            self.parent[v] = None;
            self.in_tree[v] = false;
            self.base[v] = v;
        }
        self.touched.clear();
        self.queue.clear();
    }

    fn find_path(&mut self, root: usize) -> Option<usize> {
        let adj = self.adj;
        self.reset_search();

        self.in_tree[root] = true;
        self.touched.push(root);
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            for &(to, _) in &adj[v] {
                if !self.active[to] || self.base[v] == self.base[to] || self.mate[v] == Some(to) {
                    continue;
                }
                let closes_odd_cycle =
                    to == root || self.mate[to].is_some_and(|m| self.parent[m].is_some());
                if closes_odd_cycle {
                    self.contract(v, to);
                } else if self.parent[to].is_none() {
                    self.parent[to] = Some(v);
                    self.touched.push(to);
                    match self.mate[to] {
                        None => return Some(to),
                        Some(m) => {
                            self.in_tree[m] = true;
                            self.touched.push(m);
                            self.queue.push_back(m);
                        }
                    }
                }
            }
        }
        None
    }

    fn contract(&mut self, v: usize, to: usize) {
        let cur = self.lca(v, to);
        self.epoch += 1;
        self.mark_path(v, cur, to);
        self.mark_path(to, cur, v);
        // every vertex of the blossom was reached by this search
        for k in 0..self.touched.len() {
            let i = self.touched[k];
            if self.blossom_mark[self.base[i]] == self.epoch {
                self.base[i] = cur;
                if !self.in_tree[i] {
                    self.in_tree[i] = true;
                    self.queue.push_back(i);
                }
            }
        }
    }

    fn lca(&mut self, mut a: usize, mut b: usize) -> usize {
        self.epoch += 1;
        let epoch = self.epoch;
        loop {
            a = self.base[a];
            self.lca_mark[a] = epoch;
            match self.mate[a].and_then(|m| self.parent[m]) {
                Some(p) => a = p,
                None => break,
            }
        }
        loop {
            b = self.base[b];
            if self.lca_mark[b] == epoch {
                return b;
            }
            match self.mate[b].and_then(|m| self.parent[m]) {
                Some(p) => b = p,
                None => return b,
            }
        }
    }

    fn mark_path(&mut self, mut v: usize, b: usize, mut child: usize) {
        let epoch = self.epoch;
        while self.base[v] != b {
            let Some(m) = self.mate[v] else { break };
            self.blossom_mark[self.base[v]] = epoch;
            self.blossom_mark[self.base[m]] = epoch;
            self.parent[v] = Some(child);
            child = m;
            match self.parent[m] {
                Some(p) => v = p,
                None => break,
            }
        }
    }

    fn flip(&mut self, end: usize) {
        let mut v = Some(end);
        while let Some(x) = v {
            let Some(pv) = self.parent[x] else { break };
            let next = self.mate[pv];
            self.mate[x] = Some(pv);
            self.mate[pv] = Some(x);
            v = next;
        }
    }
}

/// Convert a molecule with aromatic bonds into one with explicit Kekulé bonds.
///
/// Aromatic bonds (`SmilesBondOrder::Aromatic`) become `BondOrder::Single`
/// or `BondOrder::Double` such that every atom that needs a double bond
/// receives exactly one. With `infer_donors`, a bare aromatic `n` or `p`
/// that cannot be given a double bond is left as a lone-pair donor and
/// picks up its hydrogen during implicit hydrogen assignment (`c1cccn1`).
/// Other bonds and bond stereo markers are carried over unchanged.
pub fn kekulize(
    mol: Mol<Atom, SmilesBond>,
    infer_donors: bool,
) -> Result<Mol<Atom, Bond>, KekulizeError> {
    let n = mol.atom_count();

    let mut aromatic_adj: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![vec![]; n];
    for e in mol.bonds() {
        if mol.bond(e).order != SmilesBondOrder::Aromatic {
            continue;
        }
        if let Some((a, b)) = mol.bond_endpoints(e) {
            aromatic_adj[a.index()].push((b, e));
            aromatic_adj[b.index()].push((a, e));
        }
    }

    let mut component_id: Vec<Option<usize>> = vec![None; n];
    let mut components: Vec<Vec<NodeIndex>> = Vec::new();
    for node in mol.atoms() {
        if aromatic_adj[node.index()].is_empty() || component_id[node.index()].is_some() {
            continue;
        }
        let cid = components.len();
        let mut stack = vec![node];
        let mut comp = Vec::new();
        while let Some(v) = stack.pop() {
            if component_id[v.index()].is_some() {
                continue;
            }
            component_id[v.index()] = Some(cid);
            comp.push(v);
            for &(w, _) in &aromatic_adj[v.index()] {
                if component_id[w.index()].is_none() {
                    stack.push(w);
                }
            }
        }
        comp.sort_unstable();
        components.push(comp);
    }

    let mut double_edges: HashSet<EdgeIndex> = HashSet::new();
    let mut local = vec![usize::MAX; n];

    for comp in &components {
        let mut system = AromaticSystem::new();
        for &node in comp {
            let needs = needs_double(&mol, node);
            let flexible = infer_donors && needs && is_flexible(mol.atom(node));
            local[node.index()] = system.add_atom(needs, flexible);
        }
        let mut edge_map: Vec<EdgeIndex> = Vec::new();
        for &node in comp {
            for &(w, e) in &aromatic_adj[node.index()] {
                if node.index() < w.index()
                    && system
                        .add_edge(local[node.index()], local[w.index()])
                        .is_some()
                {
                    edge_map.push(e);
                }
            }
        }

        trace!(
            atoms = system.atom_count(),
            candidates = (0..system.atom_count())
                .filter(|&i| system.needs_double(i))
                .count(),
            "solving aromatic system"
        );

        match solve_system(&system) {
            Ok(assignment) => {
                for (local_edge, &edge) in edge_map.iter().enumerate() {
                    if assignment.is_double(local_edge) {
                        double_edges.insert(edge);
                    }
                }
                for &donor in assignment.donors() {
                    debug!(
                        atom = comp[donor].index(),
                        "aromatic atom kept as lone-pair donor"
                    );
                }
            }
            Err(unmatched) => {
                return Err(KekulizeError::Unkekulizable(
                    unmatched.into_iter().map(|i| comp[i]).collect(),
                ));
            }
        }
    }

    let mut result = Mol::new();
    for node in mol.atoms() {
        result.add_atom(mol.atom(node).clone());
    }

    for edge in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(edge) else {
            continue;
        };
        let smiles_bond = mol.bond(edge);
        let order = match smiles_bond.order {
            SmilesBondOrder::Aromatic => {
                if double_edges.contains(&edge) {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                }
            }
            SmilesBondOrder::Implicit | SmilesBondOrder::Single => BondOrder::Single,
            SmilesBondOrder::Double => BondOrder::Double,
            SmilesBondOrder::Triple => BondOrder::Triple,
            SmilesBondOrder::Quadruple => BondOrder::Quadruple,
        };
        result.add_bond(
            a,
            b,
            Bond {
                order,
                is_aromatic: smiles_bond.order == SmilesBondOrder::Aromatic,
                stereo: smiles_bond.stereo,
            },
        );
    }

    Ok(result)
}

/// An aromatic atom needs a double bond when its smallest charge-adjusted
/// valence exceeds what its sigma bonds and written hydrogens already use,
/// unless an explicit multiple bond to another aromatic atom covers it
/// (`c1=cc=cc=c1`).
fn needs_double(mol: &Mol<Atom, SmilesBond>, node: NodeIndex) -> bool {
    let atom = mol.atom(node);
    let Some(elem) = atom.element() else {
        return false;
    };

    let mut sigma: u32 = atom.hydrogen_count as u32;
    for e in mol.bonds_of(node) {
        let bond = mol.bond(e);
        sigma += bond.order.sigma_value() as u32;
        if matches!(
            bond.order,
            SmilesBondOrder::Double | SmilesBondOrder::Triple | SmilesBondOrder::Quadruple
        ) {
            let Some((a, b)) = mol.bond_endpoints(e) else {
                continue;
            };
            let other = if a == node { b } else { a };
            if mol.atom(other).is_aromatic {
                return false;
            }
        }
    }

    let Ok(used) = u8::try_from(sigma) else {
        return false;
    };
    elem.target_valence(atom.formal_charge, used)
        .is_some_and(|target| target > used)
}

fn is_flexible(atom: &Atom) -> bool {
    !atom.is_bracket
        && atom.formal_charge == 0
        && matches!(atom.element(), Some(Element::N) | Some(Element::P))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn count_double_bonds(mol: &Mol<Atom, Bond>) -> usize {
        mol.bonds()
            .filter(|&e| mol.bond(e).order == BondOrder::Double)
            .count()
    }

    fn is_valid_kekulization(mol: &Mol<Atom, Bond>) -> bool {
        for node in mol.atoms() {
            let double_count = mol
                .bonds_of(node)
                .filter(|&e| mol.bond(e).order == BondOrder::Double)
                .count();
            if double_count > 1 && mol.atom(node).is_aromatic {
                return false;
            }
        }
        true
    }

    /// A ring of `size` atoms that all need a double bond.
    fn ring(size: usize) -> AromaticSystem {
        let mut sys = AromaticSystem::new();
        for _ in 0..size {
            sys.add_atom(true, false);
        }
        for i in 0..size {
            sys.add_edge(i, (i + 1) % size);
        }
        sys
    }

    #[test]
    fn solve_six_ring() {
        let k = solve_system(&ring(6)).unwrap();
        assert_eq!(k.double_count(), 3);
        assert!(k.donors().is_empty());
    }

    #[test]
    fn solve_five_ring_fails() {
        let unmatched = solve_system(&ring(5)).unwrap_err();
        assert_eq!(unmatched.len(), 1);
    }

    #[test]
    fn solve_five_ring_with_donor() {
        let mut sys = AromaticSystem::new();
        for _ in 0..4 {
            sys.add_atom(true, false);
        }
        sys.add_atom(true, true);
        for i in 0..5 {
            sys.add_edge(i, (i + 1) % 5);
        }
        let k = solve_system(&sys).unwrap();
        assert_eq!(k.double_count(), 2);
        assert_eq!(k.donors(), &[4]);
        assert!(!k.is_double(3));
        assert!(!k.is_double(4));
    }

    #[test]
    fn solve_pairs_rigid_atoms_first() {
        // the flexible atom sits first but rigid neighbours are paired first
        let mut sys = AromaticSystem::new();
        sys.add_atom(true, true);
        for _ in 0..4 {
            sys.add_atom(true, false);
        }
        for i in 0..5 {
            sys.add_edge(i, (i + 1) % 5);
        }
        let k = solve_system(&sys).unwrap();
        assert_eq!(k.donors(), &[0]);
        assert_eq!(k.double_count(), 2);
    }

    #[test]
    fn solve_releases_flexible_atom() {
        // 2 takes the flexible atom first, then 4 can only be matched
        // by moving that double bond through the odd ring
        let mut sys = AromaticSystem::new();
        for i in 0..5 {
            sys.add_atom(true, i == 3);
        }
        for i in 0..5 {
            sys.add_edge(i, (i + 1) % 5);
        }
        let k = solve_system(&sys).unwrap();
        assert_eq!(k.donors(), &[3]);
        assert_eq!(k.double_count(), 2);
        assert!(!k.is_double(2));
        assert!(!k.is_double(3));
    }

    #[test]
    fn add_edge_rejects_bad_endpoints() {
        let mut sys = AromaticSystem::new();
        sys.add_atom(true, false);
        assert_eq!(sys.add_edge(0, 5), None);
        assert_eq!(sys.add_edge(0, 0), None);
        assert_eq!(sys.edge_count(), 0);
        assert!(!sys.needs_double(7));

        let unmatched = solve_system(&sys).unwrap_err();
        assert_eq!(unmatched, vec![0]);
    }

    #[test]
    fn assignment_out_of_range_edge() {
        let k = solve_system(&ring(4)).unwrap();
        assert!(!k.is_double(99));
    }

    #[test]
    fn solve_large_ring() {
        let k = solve_system(&ring(200_000)).unwrap();
        assert_eq!(k.double_count(), 100_000);

        let unmatched = solve_system(&ring(200_001)).unwrap_err();
        assert_eq!(unmatched.len(), 1);
    }

    #[test]
    fn solve_fused_odd_rings() {
        // azulene: a 7-ring and a 5-ring sharing the 0-6 edge
        let mut sys = AromaticSystem::new();
        for _ in 0..10 {
            sys.add_atom(true, false);
        }
        for (a, b) in [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 0),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 0),
        ] {
            sys.add_edge(a, b);
        }
        let k = solve_system(&sys).unwrap();
        assert_eq!(k.double_count(), 5);
    }

    #[test]
    fn solve_skips_saturated_atoms() {
        let mut sys = AromaticSystem::new();
        sys.add_atom(false, false);
        for _ in 0..4 {
            sys.add_atom(true, false);
        }
        for i in 0..5 {
            sys.add_edge(i, (i + 1) % 5);
        }
        let k = solve_system(&sys).unwrap();
        assert_eq!(k.double_count(), 2);
        assert!(!k.is_double(0));
        assert!(!k.is_double(4));
    }

    #[test]
    fn benzene() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        assert_eq!(count_double_bonds(&mol), 3);
        assert!(is_valid_kekulization(&mol));
        for node in mol.atoms() {
            assert_eq!(mol.atom(node).hydrogen_count, 1);
            assert!(mol.atom(node).is_aromatic);
        }
        for e in mol.bonds() {
            assert!(mol.bond(e).is_aromatic);
        }
    }

    #[test]
    fn large_aromatic_ring_within_time_budget() {
        let smiles = format!("c1{}c1", "c".repeat(100_000));
        let start = std::time::Instant::now();
        let mol = parse_smiles(&smiles).unwrap();
        assert_eq!(mol.atom_count(), 100_002);
        assert_eq!(count_double_bonds(&mol), 50_001);

        let odd = format!("c1{}c1", "c".repeat(100_001));
        assert!(parse_smiles(&odd).is_err());
        assert!(
            start.elapsed() < std::time::Duration::from_secs(10),
            "took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn large_fused_system() {
        // a ladder of 4000 atoms: a zigzag path with every second atom
        // closing a four-ring back to the atom three steps earlier
        let atoms = 4_000;
        let mut smiles = String::new();
        for p in 0..atoms {
            smiles.push('c');
            if p % 2 == 0 && p + 3 < atoms {
                smiles.push_str(&((p / 2) % 2 + 1).to_string());
            }
            if p % 2 == 1 && p >= 3 {
                smiles.push_str(&(((p - 3) / 2) % 2 + 1).to_string());
            }
        }
        assert!(smiles.starts_with("c1cc2c1c1c2"));

        let mol = parse_smiles(&smiles).unwrap();
        assert_eq!(mol.atom_count(), atoms);
        assert_eq!(mol.bond_count(), 5_998);
        assert_eq!(count_double_bonds(&mol), atoms / 2);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn naphthalene() {
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert_eq!(mol.atom_count(), 10);
        assert_eq!(mol.bond_count(), 11);
        assert_eq!(count_double_bonds(&mol), 5);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn azulene() {
        let mol = parse_smiles("c1ccc2cccc2cc1").unwrap();
        assert_eq!(mol.atom_count(), 10);
        assert_eq!(count_double_bonds(&mol), 5);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn pyridine() {
        let mol = parse_smiles("c1ccncc1").unwrap();
        assert_eq!(count_double_bonds(&mol), 3);
        assert!(is_valid_kekulization(&mol));
        assert_eq!(mol.atom(n(3)).element(), Some(Element::N));
        assert_eq!(mol.atom(n(3)).hydrogen_count, 0);
    }

    #[test]
    fn pyrrole() {
        let mol = parse_smiles("[nH]1cccc1").unwrap();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.bond_count(), 5);
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
        assert_eq!(mol.atom(n(0)).hydrogen_count, 1);
    }

    #[test]
    fn bare_pyrrole_nitrogen_becomes_donor() {
        let mol = parse_smiles("c1cccn1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        let nitrogen = n(4);
        assert_eq!(mol.bond_order_sum(nitrogen), 2);
        assert_eq!(mol.atom(nitrogen).hydrogen_count, 1);
    }

    #[test]
    fn bare_pyrrole_without_inference_fails() {
        let tree = crate::smiles::test_support::smiles_graph("c1cccn1");
        let err = kekulize(tree, false).unwrap_err();
        assert_eq!(err, KekulizeError::Unkekulizable(vec![n(4)]));
    }

    #[test]
    fn furan() {
        let mol = parse_smiles("o1cccc1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
        assert_eq!(mol.atom(n(0)).hydrogen_count, 0);
    }

    #[test]
    fn thiophene() {
        let mol = parse_smiles("s1cccc1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
        assert_eq!(mol.atom(n(0)).hydrogen_count, 0);
    }

    #[test]
    fn cyclopentadienyl_anion() {
        let mol = parse_smiles("[cH-]1cccc1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn cyclopentadienyl_no_charge_fails() {
        let smiles_mol = crate::smiles::test_support::smiles_graph("c1cccc1");
        assert!(kekulize(smiles_mol, true).is_err());
    }

    #[test]
    fn cyclobutadiene_kekulizes() {
        let mol = parse_smiles("c1ccc1").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(count_double_bonds(&mol), 2);
    }

    #[test]
    fn phenol() {
        let mol = parse_smiles("Oc1ccccc1").unwrap();
        let bond_o_c = mol.bond_between(n(0), n(1)).unwrap();
        assert_eq!(mol.bond(bond_o_c).order, BondOrder::Single);
        assert!(!mol.bond(bond_o_c).is_aromatic);
        assert_eq!(mol.atom(n(0)).hydrogen_count, 1);
        assert_eq!(count_double_bonds(&mol), 3);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn explicit_double_bonds_between_aromatic_atoms() {
        let mol = parse_smiles("c1=cc=cc=c1").unwrap();
        assert_eq!(count_double_bonds(&mol), 3);
        assert_eq!(mol.total_bond_order(), 9);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn non_aromatic_passthrough() {
        let smiles_mol = crate::smiles::test_support::smiles_graph("C=CC");
        let mol = kekulize(smiles_mol, true).unwrap();
        let e01 = mol.bond_between(n(0), n(1)).unwrap();
        assert_eq!(mol.bond(e01).order, BondOrder::Double);
        let e12 = mol.bond_between(n(1), n(2)).unwrap();
        assert_eq!(mol.bond(e12).order, BondOrder::Single);
    }

    #[test]
    fn stereo_marker_preserved() {
        let mol = parse_smiles("F/C=C/F").unwrap();
        let e = mol.bond_between(n(0), n(1)).unwrap();
        assert_eq!(mol.bond(e).stereo, crate::bond::BondStereo::Up);
    }

    #[test]
    fn error_display() {
        let err = KekulizeError::Unkekulizable(vec![NodeIndex::new(0), NodeIndex::new(2)]);
        assert_eq!(
            err.to_string(),
            "cannot kekulize aromatic system: unmatched atoms [0, 2]"
        );
    }

    #[test]
    fn imidazole() {
        let mol = parse_smiles("c1c[nH]cn1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn anthracene() {
        let mol = parse_smiles("c1ccc2cc3ccccc3cc2c1").unwrap();
        assert_eq!(mol.atom_count(), 14);
        assert_eq!(count_double_bonds(&mol), 7);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn bare_pyridinium() {
        let mol = parse_smiles("[n+]1ccccc1").unwrap();
        assert_eq!(count_double_bonds(&mol), 3);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn methylpyridinium() {
        let mol = parse_smiles("C[n+]1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 7);
        assert_eq!(count_double_bonds(&mol), 3);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn imidazolium() {
        let mol = parse_smiles("C[n+]1cc[nH]c1").unwrap();
        assert_eq!(count_double_bonds(&mol), 2);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn benzothiazolium() {
        let mol = parse_smiles("Cc1sc2ccccc2[n+]1C").unwrap();
        assert_eq!(mol.atom_count(), 11);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn quinolinium() {
        let mol = parse_smiles("c1ccc2[nH+]cccc2c1").unwrap();
        assert_eq!(count_double_bonds(&mol), 5);
        assert!(is_valid_kekulization(&mol));
    }

    #[test]
    fn indolizine() {
        let mol = parse_smiles("c1ccn2cccc2c1").unwrap();
        assert_eq!(mol.atom_count(), 9);
        assert_eq!(count_double_bonds(&mol), 4);
        assert!(is_valid_kekulization(&mol));
        assert_eq!(mol.atom(n(3)).hydrogen_count, 0);
    }
}
