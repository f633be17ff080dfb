mod builder;
pub mod error;
mod parse_tree;
mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::kekulize::{self, KekulizeError};
use crate::mol::{Mol, MoleculeSet};
use crate::reaction::{self, Reaction, ReactionError};
use crate::valence::{self, ValenceError};
pub use error::{ErrorCategory, SmilesError};

use parse_tree::ParseTree;

/// Knobs for [`SmilesParser`]. Every field has a default, so a partial
/// config file deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Inputs longer than this many characters are rejected before lexing.
    pub max_input_len: Option<usize>,
    /// Let a bare neutral aromatic `n`/`p` take a hydrogen when its ring
    /// cannot be kekulized otherwise (`c1cccn1`).
    pub infer_pyrrole_hydrogens: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_len: Some(1 << 20),
            infer_pyrrole_hydrogens: true,
        }
    }
}

/// A parsed string: one connected molecule, or several when the input
/// holds `.`-separated components that no ring closure joins.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Molecule(Mol<Atom, Bond>),
    MoleculeSet(MoleculeSet),
}

impl Structure {
    pub fn atom_count(&self) -> usize {
        match self {
            Structure::Molecule(mol) => mol.atom_count(),
            Structure::MoleculeSet(set) => set.atom_count(),
        }
    }

    pub fn bond_count(&self) -> usize {
        match self {
            Structure::Molecule(mol) => mol.bond_count(),
            Structure::MoleculeSet(set) => set.bond_count(),
        }
    }

    pub fn component_count(&self) -> usize {
        match self {
            Structure::Molecule(_) => 1,
            Structure::MoleculeSet(set) => set.len(),
        }
    }

    pub fn into_molecule_set(self) -> MoleculeSet {
        match self {
            Structure::Molecule(mol) => {
                let mut set = MoleculeSet::new();
                set.push(mol);
                set
            }
            Structure::MoleculeSet(set) => set,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmilesParser {
    options: ParseOptions,
}

impl SmilesParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a SMILES string into a single graph with kekulized bonds and
    /// implicit hydrogens filled in. `.`-separated components stay in the
    /// same graph, disconnected.
    pub fn parse(&self, input: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
        let (offset, trimmed) = split_leading_whitespace(input);
        self.parse_trimmed(trimmed).map_err(|e| e.shifted(offset))
    }

    pub fn parse_structure(&self, input: &str) -> Result<Structure, SmilesError> {
        let mol = self.parse(input)?;
        if mol.fragment_count() > 1 {
            Ok(Structure::MoleculeSet(MoleculeSet::from_fragments(&mol)))
        } else {
            Ok(Structure::Molecule(mol))
        }
    }

    /// One molecule per connected component, in order of first atom.
    pub fn parse_molecule_set(&self, input: &str) -> Result<MoleculeSet, SmilesError> {
        let mol = self.parse(input)?;
        Ok(MoleculeSet::from_fragments(&mol))
    }

    pub fn parse_reaction(&self, input: &str) -> Result<Reaction, ReactionError> {
        reaction::parse_reaction_with(self, input)
    }

    fn parse_trimmed(&self, input: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
        if input.is_empty() {
            return Err(SmilesError::EmptyInput);
        }
        if let Some(limit) = self.options.max_input_len {
            let len = input.chars().count();
            if len > limit {
                return Err(SmilesError::InputTooLong { len, limit });
            }
        }
        debug!(len = input.len(), "parsing smiles");

        let tokens = tokenizer::tokenize(input)?;
        if tokens.is_empty() {
            return Err(SmilesError::EmptyInput);
        }
        let tree = parse_tree::build_parse_tree(&tokens)?;
        let smiles_mol = builder::build_mol(&tree);

        let mut mol = kekulize::kekulize(smiles_mol, self.options.infer_pyrrole_hydrogens)
            .map_err(|e| kekulize_error(&tree, e))?;
        valence::assign_implicit_hydrogens(&mut mol).map_err(|e| valence_error(&tree, e))?;

        debug!(
            atoms = mol.atom_count(),
            bonds = mol.bond_count(),
            "parsed smiles"
        );
        Ok(mol)
    }
}

fn split_leading_whitespace(input: &str) -> (usize, &str) {
    let start = input.trim_start();
    let offset = input[..input.len() - start.len()].chars().count();
    (offset, start.trim_end())
}

fn kekulize_error(tree: &ParseTree, err: KekulizeError) -> SmilesError {
    let KekulizeError::Unkekulizable(atoms) = &err;
    let pos = atoms
        .iter()
        .min()
        .and_then(|idx| tree.atoms.get(idx.index()))
        .map_or(0, |atom| atom.pos);
    SmilesError::Kekulize { pos, source: err }
}

fn valence_error(tree: &ParseTree, err: ValenceError) -> SmilesError {
    SmilesError::Overvalent {
        pos: tree
            .atoms
            .get(err.atom_idx.index())
            .map_or(0, |atom| atom.pos),
        element: err.element.symbol().to_string(),
        bond_sum: err.bond_sum,
    }
}

/// Parses with default options.
pub fn parse_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    SmilesParser::default().parse(s)
}

pub fn parse_structure(s: &str) -> Result<Structure, SmilesError> {
    SmilesParser::default().parse_structure(s)
}
