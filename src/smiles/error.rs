use thiserror::Error;

use crate::kekulize::KekulizeError;

/// Broad class of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input is not a well-formed token stream.
    Syntax,
    /// The input is well formed but describes an impossible structure.
    Semantic,
}

/// Errors produced when parsing a SMILES string.
///
/// Positions are zero-based character offsets into the input as given,
/// leading whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error("empty SMILES string")]
    EmptyInput,

    #[error("input of {len} characters exceeds the limit of {limit}")]
    InputTooLong { len: usize, limit: usize },

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("invalid element '{text}' at position {pos}")]
    InvalidElement { pos: usize, text: String },

    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },

    #[error("invalid chirality at position {pos}")]
    InvalidChirality { pos: usize },

    #[error("'%' at position {pos} must be followed by two digits")]
    InvalidRingNumber { pos: usize },

    #[error("unclosed ring {digit} opened at position {pos}")]
    UnclosedRing { digit: u16, pos: usize },

    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },

    #[error("empty branch at position {pos}")]
    EmptyBranch { pos: usize },

    #[error("branch at position {pos} has no atom to attach to")]
    BranchWithoutAtom { pos: usize },

    #[error("bond at position {pos} has no preceding atom")]
    BondWithoutAtom { pos: usize },

    #[error("bond at position {pos} is not followed by an atom or ring closure")]
    DanglingBond { pos: usize },

    #[error("consecutive bond symbols at position {pos}")]
    ConsecutiveBonds { pos: usize },

    #[error("ring closure {digit} at position {pos} has no atom to attach to")]
    RingClosureWithoutAtom { digit: u16, pos: usize },

    #[error("conflicting bond types on ring closure {digit} at position {pos}")]
    RingBondConflict { digit: u16, pos: usize },

    #[error("ring closure {digit} at position {pos} bonds an atom to itself")]
    SelfBond { digit: u16, pos: usize },

    #[error("ring closure at position {pos} duplicates an existing bond")]
    DuplicateBond { pos: usize },

    #[error("reaction arrow at position {pos} in a molecule string")]
    UnexpectedReactionArrow { pos: usize },

    #[error("charge at position {pos} is outside -15..=15")]
    InvalidCharge { pos: usize },

    #[error("isotope at position {pos} is out of range")]
    InvalidIsotope { pos: usize },

    #[error("atom class at position {pos} is out of range")]
    InvalidAtomClass { pos: usize },

    #[error("{element} at position {pos} has bond order sum {bond_sum}, above every allowed valence")]
    Overvalent {
        pos: usize,
        element: String,
        bond_sum: u32,
    },

    #[error("cannot kekulize aromatic system at position {pos}")]
    Kekulize { pos: usize, source: KekulizeError },
}

impl SmilesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCharge { .. }
            | Self::InvalidIsotope { .. }
            | Self::InvalidAtomClass { .. }
            | Self::Overvalent { .. }
            | Self::Kekulize { .. } => ErrorCategory::Semantic,
            _ => ErrorCategory::Syntax,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Self::EmptyInput | Self::InputTooLong { .. } => None,
            Self::UnexpectedChar { pos, .. }
            | Self::InvalidElement { pos, .. }
            | Self::UnclosedBracket { pos }
            | Self::InvalidChirality { pos }
            | Self::InvalidRingNumber { pos }
            | Self::UnclosedRing { pos, .. }
            | Self::UnmatchedParen { pos }
            | Self::EmptyBranch { pos }
            | Self::BranchWithoutAtom { pos }
            | Self::BondWithoutAtom { pos }
            | Self::DanglingBond { pos }
            | Self::ConsecutiveBonds { pos }
            | Self::RingClosureWithoutAtom { pos, .. }
            | Self::RingBondConflict { pos, .. }
            | Self::SelfBond { pos, .. }
            | Self::DuplicateBond { pos }
            | Self::UnexpectedReactionArrow { pos }
            | Self::InvalidCharge { pos }
            | Self::InvalidIsotope { pos }
            | Self::InvalidAtomClass { pos }
            | Self::Overvalent { pos, .. }
            | Self::Kekulize { pos, .. } => Some(*pos),
        }
    }

    /// Same error with every position moved right by `offset`.
    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        match &mut self {
            Self::EmptyInput | Self::InputTooLong { .. } => {}
            Self::UnexpectedChar { pos, .. }
            | Self::InvalidElement { pos, .. }
            | Self::UnclosedBracket { pos }
            | Self::InvalidChirality { pos }
            | Self::InvalidRingNumber { pos }
            | Self::UnclosedRing { pos, .. }
            | Self::UnmatchedParen { pos }
            | Self::EmptyBranch { pos }
            | Self::BranchWithoutAtom { pos }
            | Self::BondWithoutAtom { pos }
            | Self::DanglingBond { pos }
            | Self::ConsecutiveBonds { pos }
            | Self::RingClosureWithoutAtom { pos, .. }
            | Self::RingBondConflict { pos, .. }
            | Self::SelfBond { pos, .. }
            | Self::DuplicateBond { pos }
            | Self::UnexpectedReactionArrow { pos }
            | Self::InvalidCharge { pos }
            | Self::InvalidIsotope { pos }
            | Self::InvalidAtomClass { pos }
            | Self::Overvalent { pos, .. }
            | Self::Kekulize { pos, .. } => *pos += offset,
        }
        self
    }
}
