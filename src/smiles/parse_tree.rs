use std::collections::HashMap;

use crate::atom::{AtomSymbol, Chirality};
use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

#[derive(Debug, Clone)]
pub struct ParseAtom {
    pub symbol: AtomSymbol,
    pub is_aromatic: bool,
    pub isotope: Option<u16>,
    pub chirality: Chirality,
    pub hcount: Option<u8>,
    pub charge: i8,
    pub atom_class: Option<u16>,
    pub is_bracket: bool,
    pub pos: usize,
    /// Neighbour atom indices in the order the input lists them.
    pub neighbors: Vec<usize>,
}

/// A bond as written: endpoints in creation order and the symbol, if any.
#[derive(Debug, Clone)]
pub struct ParseBond {
    pub begin: usize,
    pub end: usize,
    pub bond: Option<BondToken>,
}

#[derive(Debug, Clone)]
pub struct ParseTree {
    pub atoms: Vec<ParseAtom>,
    pub bonds: Vec<ParseBond>,
}

impl ParseTree {
    fn connect(&mut self, a: usize, b: usize, bond: Option<BondToken>) {
        self.atoms[a].neighbors.push(b);
        self.atoms[b].neighbors.push(a);
        self.bonds.push(ParseBond {
            begin: a,
            end: b,
            bond,
        });
    }

    fn bonded(&self, a: usize, b: usize) -> bool {
        self.atoms[a].neighbors.contains(&b)
    }
}

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: usize,
    bond: Option<BondToken>,
    pos: usize,
}

/// Walks the token stream with a current-atom cursor, an explicit branch
/// stack and a ring-closure table keyed by ring number.
pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, SmilesError> {
    let mut tree = ParseTree {
        atoms: Vec::new(),
        bonds: Vec::new(),
    };
    // (atom the branch hangs from, position of '(')
    let mut branches: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<usize> = None;
    let mut pending_bond: Option<(BondToken, usize)> = None;
    let mut ring_opens: HashMap<u16, RingOpening> = HashMap::new();
    let mut prev: Option<&Token> = None;

    for token in tokens {
        match token {
            Token::Atom(atom_tok) => {
                let idx = tree.atoms.len();
                tree.atoms.push(parse_atom_from_token(atom_tok));
                if let Some(cur) = current {
                    let bond = pending_bond.take().map(|(b, _)| b);
                    tree.connect(cur, idx, bond);
                }
                current = Some(idx);
            }
            Token::Bond { bond, pos } => {
                if current.is_none() {
                    return Err(SmilesError::BondWithoutAtom { pos: *pos });
                }
                if pending_bond.is_some() {
                    return Err(SmilesError::ConsecutiveBonds { pos: *pos });
                }
                pending_bond = Some((*bond, *pos));
            }
            Token::RingClosure { digit, pos } => {
                let cur = current.ok_or(SmilesError::RingClosureWithoutAtom {
                    digit: *digit,
                    pos: *pos,
                })?;
                let bond = pending_bond.take().map(|(b, _)| b);

                if let Some(open) = ring_opens.remove(digit) {
                    if open.atom == cur {
                        return Err(SmilesError::SelfBond {
                            digit: *digit,
                            pos: *pos,
                        });
                    }
                    let ring_bond = match (bond, open.bond) {
                        (None, None) => None,
                        (Some(b), None) | (None, Some(b)) => Some(b),
                        (Some(b1), Some(b2)) => {
                            if same_order(b1, b2) {
                                Some(b1)
                            } else {
                                return Err(SmilesError::RingBondConflict {
                                    digit: *digit,
                                    pos: *pos,
                                });
                            }
                        }
                    };
                    if tree.bonded(open.atom, cur) {
                        return Err(SmilesError::DuplicateBond { pos: *pos });
                    }
                    tree.connect(open.atom, cur, ring_bond);
                } else {
                    ring_opens.insert(
                        *digit,
                        RingOpening {
                            atom: cur,
                            bond,
                            pos: *pos,
                        },
                    );
                }
            }
            Token::OpenParen(pos) => {
                let cur = current.ok_or(SmilesError::BranchWithoutAtom { pos: *pos })?;
                if let Some((_, bond_pos)) = pending_bond {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                branches.push((cur, *pos));
            }
            Token::CloseParen(pos) => {
                if let Some((_, bond_pos)) = pending_bond {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                if let Some(Token::OpenParen(open_pos)) = prev {
                    return Err(SmilesError::EmptyBranch { pos: *open_pos });
                }
                let (atom, _) = branches
                    .pop()
                    .ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                current = Some(atom);
            }
            Token::Dot(_) => {
                if let Some((_, bond_pos)) = pending_bond {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                current = None;
            }
            Token::Arrow(pos) => {
                return Err(SmilesError::UnexpectedReactionArrow { pos: *pos });
            }
        }
        prev = Some(token);
    }

    if let Some((_, bond_pos)) = pending_bond {
        return Err(SmilesError::DanglingBond { pos: bond_pos });
    }

    if let Some(&(_, open_pos)) = branches.last() {
        return Err(SmilesError::UnmatchedParen { pos: open_pos });
    }

    if let Some((digit, open)) = ring_opens.iter().min_by_key(|(_, open)| open.pos) {
        return Err(SmilesError::UnclosedRing {
            digit: *digit,
            pos: open.pos,
        });
    }

    Ok(tree)
}

/// `/` and `\` are single bonds as far as ring-bond agreement goes.
fn same_order(a: BondToken, b: BondToken) -> bool {
    fn normalize(b: BondToken) -> BondToken {
        match b {
            BondToken::Up | BondToken::Down => BondToken::Single,
            other => other,
        }
    }
    normalize(a) == normalize(b)
}

fn parse_atom_from_token(tok: &AtomToken) -> ParseAtom {
    ParseAtom {
        symbol: tok.symbol,
        is_aromatic: tok.is_aromatic,
        isotope: tok.isotope,
        chirality: tok.chirality,
        hcount: tok.hcount,
        charge: tok.charge,
        atom_class: tok.atom_class,
        is_bracket: tok.is_bracket,
        pos: tok.pos,
        neighbors: Vec::new(),
    }
}
