//! Reescritura de flechas y limpieza cosmética para visores 2D.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{ARROW_GLYPHS, REACTION_INDICATORS, SPACED_SEPARATORS};

static ATOM_MAP: Lazy<Regex> = Lazy::new(|| Regex::new(r":\d+").expect("atom map pattern"));

/// Lleva una reacción a la forma `reactivos>>productos` que aceptan los
/// backends de render 2D.
///
/// - Si ya contiene `>>` no se toca.
/// - `A>B` pasa a `A>>B`.
/// - `A>X.Y>B` pasa a `A.X.Y>>B`: los agentes se funden con los reactivos.
///   Es una concesión al backend de render, no semántica estándar de
///   reaction SMILES.
/// - Cualquier otra forma se devuelve sin cambios.
pub fn normalize_reaction_arrows(input: &str) -> String {
    if input.contains(">>") {
        return input.to_string();
    }
    let segments: Vec<&str> = input.split('>').collect();
    match segments.as_slice() {
        [reactants, products] => format!("{reactants}>>{products}"),
        [reactants, agents, products] => {
            let merged = std::iter::once(reactants.trim()).chain(agents.split('.').map(str::trim))
                                                          .filter(|t| !t.is_empty())
                                                          .collect::<Vec<_>>()
                                                          .join(".");
            format!("{merged}>>{products}")
        }
        _ => input.to_string(),
    }
}

/// Elimina las etiquetas de mapeo atómico (`:1`, `:23`) sin tocar nada más.
pub fn strip_atom_mappings<'a>(smiles: impl Into<Option<&'a str>>) -> String {
    match smiles.into() {
        Some(s) if !s.is_empty() => ATOM_MAP.replace_all(s, "").into_owned(),
        _ => String::new(),
    }
}

/// Forma lista para dibujar: flechas normalizadas y sin mapeo atómico.
pub fn render_ready_smiles(reaction_smiles: &str) -> String {
    strip_atom_mappings(normalize_reaction_arrows(reaction_smiles).as_str())
}

/// `true` si la consulta parece escrita ya en notación de reacción.
pub fn has_reaction_indicator(text: &str) -> bool {
    text.contains(REACTION_INDICATORS)
}

/// Reescribe flechas tipográficas y `+` en notación SMILES y elimina los
/// espacios. Una flecha simple solitaria se duplica.
pub fn encode_reaction_text(text: &str) -> String {
    let mut encoded = text.to_string();
    for &(from, to) in ARROW_GLYPHS.iter().chain(SPACED_SEPARATORS) {
        encoded = encoded.replace(from, to);
    }
    let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if encoded.matches('>').count() == 1 {
        encoded.replacen('>', ">>", 1)
    } else {
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_arrow_untouched() {
        assert_eq!(normalize_reaction_arrows("CCO>>CC=O"), "CCO>>CC=O");
    }

    #[test]
    fn test_single_arrow_doubled() {
        assert_eq!(normalize_reaction_arrows("A>B"), "A>>B");
    }

    #[test]
    fn test_agents_folded_into_reactants() {
        assert_eq!(normalize_reaction_arrows("CCO> [Cr] . O >CC=O"), "CCO.[Cr].O>>CC=O");
        assert_eq!(normalize_reaction_arrows(">[Pd]>CC"), "[Pd]>>CC");
    }

    #[test]
    fn test_more_than_three_segments_unchanged() {
        assert_eq!(normalize_reaction_arrows("A>B>C>D"), "A>B>C>D");
        assert_eq!(normalize_reaction_arrows("CCO"), "CCO");
    }

    #[test]
    fn test_strip_atom_mappings_only_labels() {
        assert_eq!(strip_atom_mappings("[CH3:1][OH:2]"), "[CH3][OH]");
        assert_eq!(strip_atom_mappings("[C:12]C>>[C:12]CO"), "[C]C>>[C]CO");
        assert_eq!(strip_atom_mappings(None::<&str>), "");
        assert_eq!(strip_atom_mappings(""), "");
    }

    #[test]
    fn test_render_ready() {
        assert_eq!(render_ready_smiles("[CH3:1][OH:2]>[Na+]>[CH3:1][O-:2]"), "[CH3][OH].[Na+]>>[CH3][O-]");
    }

    #[test]
    fn test_encode_reaction_text() {
        assert_eq!(encode_reaction_text("CCO + O=O → CC(=O)O + O"), "CCO.O=O>>CC(=O)O.O");
        assert_eq!(encode_reaction_text("N2 + 3 H2 ⇌ 2 NH3"), "N2.3H2>>2NH3");
        assert_eq!(encode_reaction_text("C=C <=> CC"), "C=C>>CC");
        assert_eq!(encode_reaction_text("CCO -> CC=O"), "CCO>>CC=O");
        assert_eq!(encode_reaction_text("CCO>[Cr]>CC=O"), "CCO>[Cr]>CC=O");
    }

    #[test]
    fn test_reaction_indicator() {
        assert!(has_reaction_indicator("A → B"));
        assert!(has_reaction_indicator("O=C=O"));
        assert!(!has_reaction_indicator("Diels-Alder of furan and maleic anhydride"));
    }
}
