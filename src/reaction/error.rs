use std::fmt;

use thiserror::Error;

use crate::smiles::{ErrorCategory, SmilesError};

/// One of the three `>`-separated parts of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Reactants,
    Agents,
    Products,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Reactants => "reactants",
            Section::Agents => "agents",
            Section::Products => "products",
        })
    }
}

/// Error returned when parsing a reaction SMILES string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionError {
    /// Anything other than exactly two top-level `>`.
    #[error("expected two '>' separators, found {count}")]
    Separators { count: usize },

    #[error("input of {len} characters exceeds the limit of {limit}")]
    InputTooLong { len: usize, limit: usize },

    /// A segment failed to parse. The inner position is relative to the
    /// whole reaction string.
    #[error("invalid {section}: {source}")]
    Segment {
        section: Section,
        source: SmilesError,
    },
}

impl ReactionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Separators { .. } | Self::InputTooLong { .. } => ErrorCategory::Syntax,
            Self::Segment { source, .. } => source.category(),
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Separators { .. } | Self::InputTooLong { .. } => None,
            Self::Segment { source, .. } => source.position(),
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Segment { section, .. } => Some(*section),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_error_delegates() {
        let err = ReactionError::Segment {
            section: Section::Products,
            source: SmilesError::InvalidCharge { pos: 9 },
        };
        assert_eq!(err.category(), ErrorCategory::Semantic);
        assert_eq!(err.position(), Some(9));
        assert_eq!(err.section(), Some(Section::Products));
        assert!(err.to_string().starts_with("invalid products:"));
    }

    #[test]
    fn separator_error() {
        let err = ReactionError::Separators { count: 1 };
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "expected two '>' separators, found 1");
    }
}
