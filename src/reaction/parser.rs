use tracing::debug;

use crate::mol::MoleculeSet;
use crate::smiles::{SmilesError, SmilesParser};

use super::error::{ReactionError, Section};
use super::Reaction;

/// A slice of the input together with its character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

pub(crate) fn parse_reaction_with(
    parser: &SmilesParser,
    input: &str,
) -> Result<Reaction, ReactionError> {
    if let Some(limit) = parser.options().max_input_len {
        let len = input.chars().count();
        if len > limit {
            return Err(ReactionError::InputTooLong { len, limit });
        }
    }
    let [reactants, agents, products] = split_reaction(input)?;
    debug!(len = input.len(), "parsing reaction smiles");

    let reaction = Reaction {
        reactants: parse_segment(parser, reactants, Section::Reactants)?,
        agents: parse_segment(parser, agents, Section::Agents)?,
        products: parse_segment(parser, products, Section::Products)?,
    };
    debug!(
        reactants = reaction.reactants.len(),
        agents = reaction.agents.len(),
        products = reaction.products.len(),
        "parsed reaction smiles"
    );
    Ok(reaction)
}

/// Cuts the input at its two top-level `>`. A `>` between `[` and `]` is
/// part of an atom, not a separator.
pub(crate) fn split_reaction(input: &str) -> Result<[Segment<'_>; 3], ReactionError> {
    let mut cuts: Vec<(usize, usize)> = Vec::with_capacity(2);
    let mut count = 0;
    let mut bracket_depth = 0u32;

    for (char_pos, (byte_pos, ch)) in input.char_indices().enumerate() {
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '>' if bracket_depth == 0 => {
                count += 1;
                if cuts.len() < 2 {
                    cuts.push((byte_pos, char_pos));
                }
            }
            _ => {}
        }
    }

    if count != 2 {
        return Err(ReactionError::Separators { count });
    }

    let (first_byte, first_char) = cuts[0];
    let (second_byte, second_char) = cuts[1];
    Ok([
        Segment {
            text: &input[..first_byte],
            offset: 0,
        },
        Segment {
            text: &input[first_byte + 1..second_byte],
            offset: first_char + 1,
        },
        Segment {
            text: &input[second_byte + 1..],
            offset: second_char + 1,
        },
    ])
}

fn parse_segment(
    parser: &SmilesParser,
    segment: Segment<'_>,
    section: Section,
) -> Result<MoleculeSet, ReactionError> {
    if segment.text.trim().is_empty() {
        return Ok(MoleculeSet::new());
    }
    parser
        .parse_molecule_set(segment.text)
        .map_err(|source: SmilesError| ReactionError::Segment {
            section,
            source: source.shifted(segment.offset),
        })
}
