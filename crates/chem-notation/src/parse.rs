//! Lectura directa de reaction SMILES literales (camino heurístico, sin
//! servicios externos).
use chem_domain::{is_smiles_charset, DomainError, ReactionComponent, ReactionRole};
use std::collections::HashSet;

use crate::compose::{decompose_reaction_smiles, ReactionGroups};

/// Comprobación léxica de que `token` es un SMILES de molécula y no una
/// palabra: átomos del subconjunto orgánico fuera de corchetes, corchetes y
/// paréntesis balanceados, cierres de anillo emparejados.
///
/// No sustituye a un toolkit químico; sólo separa notación de prosa
/// ("furan", "NaOH", "CO2" no pasan).
pub fn is_plausible_smiles(token: &str) -> bool {
    if !is_smiles_charset(token) || token.contains('>') {
        return false;
    }
    let chars: Vec<char> = token.chars().collect();
    let mut depth = 0i32;
    let mut open_rings: HashSet<u32> = HashSet::new();
    let mut has_atom = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            '[' => {
                let Some(close) = chars[i + 1..].iter().position(|&ch| ch == ']') else {
                    return false;
                };
                let inner = &chars[i + 1..i + 1 + close];
                if inner.contains(&'[') || !inner.iter().any(|ch| ch.is_ascii_alphabetic() || *ch == '*') {
                    return false;
                }
                has_atom = true;
                i += close + 2;
                continue;
            }
            ']' => return false,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            'C' if next == Some('l') => {
                has_atom = true;
                i += 2;
                continue;
            }
            'B' if next == Some('r') => {
                has_atom = true;
                i += 2;
                continue;
            }
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' | 'b' | 'c' | 'n' | 'o' | 'p' | 's' | '*' => has_atom = true,
            '0'..='9' => {
                let ring = c.to_digit(10).unwrap_or_default();
                if !open_rings.remove(&ring) {
                    open_rings.insert(ring);
                }
            }
            '%' => {
                let digits: String = chars.iter().skip(i + 1).take(2).collect();
                let Ok(ring) = digits.parse::<u32>() else {
                    return false;
                };
                if digits.len() != 2 {
                    return false;
                }
                let ring = ring + 100;
                if !open_rings.remove(&ring) {
                    open_rings.insert(ring);
                }
                i += 3;
                continue;
            }
            '-' | '=' | '#' | '$' | ':' | '/' | '\\' | '.' => {}
            _ => return false,
        }
        i += 1;
    }
    has_atom && depth == 0 && open_rings.is_empty()
}

/// Interpreta `text` como reaction SMILES literal.
///
/// Devuelve los grupos sólo si hay al menos un reactivo y un producto y
/// todas las moléculas son SMILES plausibles.
pub fn parse_reaction_smiles(text: &str) -> Option<ReactionGroups> {
    let groups = decompose_reaction_smiles(text)?;
    if groups.missing_sides().is_some() {
        return None;
    }
    let all_plausible = ReactionRole::ALL.iter()
                                         .flat_map(|role| groups.group(*role))
                                         .all(|m| is_plausible_smiles(m));
    if all_plausible {
        Some(groups)
    } else {
        None
    }
}

impl ReactionGroups {
    /// Componentes en orden reactivos, agentes, productos.
    pub fn into_components(self) -> Result<Vec<ReactionComponent>, DomainError> {
        let ReactionGroups { reactants, agents, products } = self;
        let tagged = reactants.into_iter()
                              .map(|s| (ReactionRole::Reactant, s))
                              .chain(agents.into_iter().map(|s| (ReactionRole::Agent, s)))
                              .chain(products.into_iter().map(|s| (ReactionRole::Product, s)));
        tagged.map(|(role, smiles)| ReactionComponent::from_smiles(role, &smiles)).collect()
    }
}
