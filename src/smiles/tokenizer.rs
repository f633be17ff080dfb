use crate::atom::{AtomSymbol, ChiralClass, Chirality};
use crate::element::Element;
use crate::smiles::error::SmilesError;

const MAX_CHARGE: i32 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond { bond: BondToken, pos: usize },
    RingClosure { digit: u16, pos: usize },
    OpenParen(usize),
    CloseParen(usize),
    Dot(usize),
    Arrow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub symbol: AtomSymbol,
    pub is_aromatic: bool,
    pub isotope: Option<u16>,
    pub chirality: Chirality,
    pub hcount: Option<u8>,
    pub charge: i8,
    pub atom_class: Option<u16>,
    pub is_bracket: bool,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
    Up,
    Down,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let pos = i;
        match chars[i] {
            '[' => {
                let (tok, next) = parse_bracket_atom(&chars, i)?;
                tokens.push(Token::Atom(tok));
                i = next;
                continue;
            }
            'B' if chars.get(i + 1) == Some(&'r') => {
                tokens.push(Token::Atom(bare_atom(Element::Br, false, pos)));
                i += 1;
            }
            'C' if chars.get(i + 1) == Some(&'l') => {
                tokens.push(Token::Atom(bare_atom(Element::Cl, false, pos)));
                i += 1;
            }
            'B' => tokens.push(Token::Atom(bare_atom(Element::B, false, pos))),
            'C' => tokens.push(Token::Atom(bare_atom(Element::C, false, pos))),
            'N' => tokens.push(Token::Atom(bare_atom(Element::N, false, pos))),
            'O' => tokens.push(Token::Atom(bare_atom(Element::O, false, pos))),
            'P' => tokens.push(Token::Atom(bare_atom(Element::P, false, pos))),
            'S' => tokens.push(Token::Atom(bare_atom(Element::S, false, pos))),
            'F' => tokens.push(Token::Atom(bare_atom(Element::F, false, pos))),
            'I' => tokens.push(Token::Atom(bare_atom(Element::I, false, pos))),
            'b' => tokens.push(Token::Atom(bare_atom(Element::B, true, pos))),
            'c' => tokens.push(Token::Atom(bare_atom(Element::C, true, pos))),
            'n' => tokens.push(Token::Atom(bare_atom(Element::N, true, pos))),
            'o' => tokens.push(Token::Atom(bare_atom(Element::O, true, pos))),
            'p' => tokens.push(Token::Atom(bare_atom(Element::P, true, pos))),
            's' => tokens.push(Token::Atom(bare_atom(Element::S, true, pos))),
            '*' => tokens.push(Token::Atom(AtomToken {
                symbol: AtomSymbol::Wildcard,
                ..bare_atom(Element::C, false, pos)
            })),
            '-' => tokens.push(bond(BondToken::Single, pos)),
            '=' => tokens.push(bond(BondToken::Double, pos)),
            '#' => tokens.push(bond(BondToken::Triple, pos)),
            '$' => tokens.push(bond(BondToken::Quadruple, pos)),
            ':' => tokens.push(bond(BondToken::Aromatic, pos)),
            '/' => tokens.push(bond(BondToken::Up, pos)),
            '\\' => tokens.push(bond(BondToken::Down, pos)),
            '(' => tokens.push(Token::OpenParen(pos)),
            ')' => tokens.push(Token::CloseParen(pos)),
            '.' => tokens.push(Token::Dot(pos)),
            '>' => tokens.push(Token::Arrow(pos)),
            '%' => {
                let digit = parse_percent_ring(&chars, i)?;
                tokens.push(Token::RingClosure { digit, pos });
                i += 2;
            }
            d @ '0'..='9' => tokens.push(Token::RingClosure {
                digit: d as u16 - '0' as u16,
                pos,
            }),
            ch if ch.is_ascii_alphabetic() => {
                return Err(SmilesError::InvalidElement {
                    pos,
                    text: unbracketed_symbol(&chars, i),
                });
            }
            ch => return Err(SmilesError::UnexpectedChar { pos, ch }),
        }
        i += 1;
    }

    Ok(tokens)
}

fn bare_atom(element: Element, aromatic: bool, pos: usize) -> AtomToken {
    AtomToken {
        symbol: AtomSymbol::Element(element),
        is_aromatic: aromatic,
        isotope: None,
        chirality: Chirality::None,
        hcount: None,
        charge: 0,
        atom_class: None,
        is_bracket: false,
        pos,
    }
}

fn bond(bond: BondToken, pos: usize) -> Token {
    Token::Bond { bond, pos }
}

/// The symbol-looking text at `i`, for error messages (`H`, `Xe`, `Na`).
fn unbracketed_symbol(chars: &[char], i: usize) -> String {
    match chars.get(i + 1) {
        Some(c) if chars[i].is_ascii_uppercase() && c.is_ascii_lowercase() => {
            chars[i..=i + 1].iter().collect()
        }
        _ => chars[i].to_string(),
    }
}

fn parse_percent_ring(chars: &[char], start: usize) -> Result<u16, SmilesError> {
    match (chars.get(start + 1), chars.get(start + 2)) {
        (Some(d1), Some(d2)) if d1.is_ascii_digit() && d2.is_ascii_digit() => {
            Ok((*d1 as u16 - '0' as u16) * 10 + (*d2 as u16 - '0' as u16))
        }
        _ => Err(SmilesError::InvalidRingNumber { pos: start }),
    }
}

fn parse_bracket_atom(chars: &[char], start: usize) -> Result<(AtomToken, usize), SmilesError> {
    let mut i = start + 1; // skip '['

    let isotope = parse_isotope(chars, &mut i)?;

    let (symbol, is_aromatic) = parse_bracket_symbol(chars, &mut i, start)?;

    let chirality = parse_chirality(chars, &mut i)?;

    let hcount = parse_hcount(chars, &mut i);

    let charge = parse_charge(chars, &mut i)?;

    let atom_class = parse_atom_class(chars, &mut i)?;

    match chars.get(i) {
        Some(']') => {}
        Some(&ch) => return Err(SmilesError::UnexpectedChar { pos: i, ch }),
        None => return Err(SmilesError::UnclosedBracket { pos: start }),
    }
    i += 1; // skip ']'

    Ok((
        AtomToken {
            symbol,
            is_aromatic,
            isotope,
            chirality,
            hcount,
            charge,
            atom_class,
            is_bracket: true,
            pos: start,
        },
        i,
    ))
}

/// Reads an unsigned decimal number; `None` when there are no digits.
fn parse_number(chars: &[char], i: &mut usize) -> Option<Option<u32>> {
    let start = *i;
    let mut val: Option<u32> = Some(0);
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        let d = chars[*i] as u32 - '0' as u32;
        val = val.and_then(|v| v.checked_mul(10)).and_then(|v| v.checked_add(d));
        *i += 1;
    }
    if *i == start {
        None
    } else {
        Some(val)
    }
}

fn parse_isotope(chars: &[char], i: &mut usize) -> Result<Option<u16>, SmilesError> {
    let pos = *i;
    match parse_number(chars, i) {
        None => Ok(None),
        Some(val) => val
            .and_then(|v| u16::try_from(v).ok())
            .map(Some)
            .ok_or(SmilesError::InvalidIsotope { pos }),
    }
}

fn parse_bracket_symbol(
    chars: &[char],
    i: &mut usize,
    bracket_start: usize,
) -> Result<(AtomSymbol, bool), SmilesError> {
    let Some(&first) = chars.get(*i) else {
        return Err(SmilesError::UnclosedBracket { pos: bracket_start });
    };

    if first == '*' {
        *i += 1;
        return Ok((AtomSymbol::Wildcard, false));
    }

    const AROMATIC: &[(&str, Element)] = &[
        ("se", Element::Se),
        ("as", Element::As),
        ("te", Element::Te),
        ("b", Element::B),
        ("c", Element::C),
        ("n", Element::N),
        ("o", Element::O),
        ("p", Element::P),
        ("s", Element::S),
    ];

    if first.is_ascii_lowercase() {
        for &(pat, elem) in AROMATIC {
            let end = *i + pat.len();
            if end <= chars.len() && chars[*i..end].iter().copied().eq(pat.chars()) {
                *i = end;
                return Ok((AtomSymbol::Element(elem), true));
            }
        }
    }

    if first.is_ascii_uppercase() {
        if let Some(&second) = chars.get(*i + 1) {
            if second.is_ascii_lowercase() {
                let sym: String = [first, second].iter().collect();
                if let Some(e) = Element::from_symbol(&sym) {
                    *i += 2;
                    return Ok((AtomSymbol::Element(e), false));
                }
            }
        }
        if let Some(e) = Element::from_symbol(&first.to_string()) {
            *i += 1;
            return Ok((AtomSymbol::Element(e), false));
        }
    }

    Err(SmilesError::InvalidElement {
        pos: *i,
        text: unbracketed_symbol(chars, *i),
    })
}

fn parse_chirality(chars: &[char], i: &mut usize) -> Result<Chirality, SmilesError> {
    if chars.get(*i) != Some(&'@') {
        return Ok(Chirality::None);
    }
    let pos = *i;
    *i += 1;
    if chars.get(*i) == Some(&'@') {
        *i += 1;
        return Ok(Chirality::Clockwise);
    }

    let class = match (chars.get(*i), chars.get(*i + 1)) {
        (Some('T'), Some('H')) => ChiralClass::TH,
        (Some('A'), Some('L')) => ChiralClass::AL,
        (Some('S'), Some('P')) => ChiralClass::SP,
        (Some('T'), Some('B')) => ChiralClass::TB,
        (Some('O'), Some('H')) => ChiralClass::OH,
        _ => return Ok(Chirality::Anticlockwise),
    };
    *i += 2;

    let number = parse_number(chars, i)
        .flatten()
        .and_then(|n| u8::try_from(n).ok())
        .filter(|&n| n >= 1 && n <= class.max_number())
        .ok_or(SmilesError::InvalidChirality { pos })?;
    Ok(Chirality::Class { class, number })
}

fn parse_hcount(chars: &[char], i: &mut usize) -> Option<u8> {
    if chars.get(*i) != Some(&'H') {
        return None;
    }
    *i += 1;
    match chars.get(*i) {
        Some(d) if d.is_ascii_digit() => {
            *i += 1;
            Some(*d as u8 - b'0')
        }
        _ => Some(1),
    }
}

fn parse_charge(chars: &[char], i: &mut usize) -> Result<i8, SmilesError> {
    let pos = *i;
    let sign: i32 = match chars.get(*i) {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let sign_char = chars[*i];
    *i += 1;

    let magnitude: Option<u32> = if chars.get(*i) == Some(&sign_char) {
        let mut count = 1u32;
        while chars.get(*i) == Some(&sign_char) {
            count += 1;
            *i += 1;
        }
        Some(count)
    } else {
        parse_number(chars, i).unwrap_or(Some(1))
    };

    magnitude
        .and_then(|m| i32::try_from(m).ok())
        .filter(|&m| m <= MAX_CHARGE)
        .and_then(|m| i8::try_from(sign * m).ok())
        .ok_or(SmilesError::InvalidCharge { pos })
}

fn parse_atom_class(chars: &[char], i: &mut usize) -> Result<Option<u16>, SmilesError> {
    if chars.get(*i) != Some(&':') {
        return Ok(None);
    }
    let pos = *i;
    *i += 1;
    parse_number(chars, i)
        .flatten()
        .and_then(|v| u16::try_from(v).ok())
        .map(Some)
        .ok_or(SmilesError::InvalidAtomClass { pos })
}
