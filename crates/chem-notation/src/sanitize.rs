//! Extracción del reaction SMILES más plausible a partir de texto ruidoso
//! (mensajes de error, salida libre de un modelo, SMILES ya limpio).
use chem_domain::is_smiles_char;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{ARROW_GLYPHS, NOISE_TERMS, ROLE_KEYWORDS};

/// Clase de caracteres SMILES sin la flecha.
const SMILES_CLASS: &str = r"[A-Za-z0-9\[\]()@+\-=#$:%./\\*]";

/// Pasadas de limpieza como máximo antes de rendirse.
const MAX_PASSES: usize = 8;

static QUOTED_REACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*>[^"]*)""#).expect("quoted reaction pattern"));

static ROLE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    let keywords = ROLE_KEYWORDS.join("|");
    Regex::new(&format!(r"^(?:\s*(?i:{keywords})s?\s*:?\s*)+")).expect("role prefix pattern")
});

/// Etiquetas de rol con dos puntos en cualquier posición ("products: ...").
static ROLE_LABEL: Lazy<Regex> = Lazy::new(|| {
    let keywords = ROLE_KEYWORDS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{keywords})s?\s*:")).expect("role label pattern")
});

static NOISE: Lazy<Regex> = Lazy::new(|| {
    let terms = NOISE_TERMS.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)(?:{terms}|\berror\b:?)")).expect("noise pattern")
});

static SPACED_ARROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*>\s*").expect("spaced arrow pattern"));

static REACTION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{c}+>{c}*>?{c}+", c = SMILES_CLASS)).expect("reaction shape pattern")
});

fn strip_role_prefix(text: &str) -> String {
    ROLE_PREFIX.replace(text, "").into_owned()
}

fn trim_separators(text: &str) -> &str {
    text.trim().trim_matches('.').trim()
}

/// Devuelve el reaction SMILES candidato contenido en `raw`, o `None` si no
/// hay ninguno utilizable.
///
/// - Texto sin `>` se devuelve recortado tal cual (no se inventan flechas).
/// - Un `"...>..."` entre comillas tiene prioridad sobre el resto del texto.
/// - Una flecha simple solitaria se convierte en `>>`.
///
/// La limpieza se repite hasta que el resultado no cambia, así que aplicar
/// `sanitize` a su propia salida la devuelve intacta.
///
/// ```
/// use chem_notation::sanitize;
/// assert_eq!(sanitize("CCO>CC=O").as_deref(), Some("CCO>>CC=O"));
/// assert_eq!(sanitize("   ").as_deref(), None);
/// ```
pub fn sanitize<'a>(raw: impl Into<Option<&'a str>>) -> Option<String> {
    let trimmed = raw.into()?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.contains('>') {
        return Some(trimmed.to_string());
    }

    let mut current = clean_pass(trimmed)?;
    for _ in 1..MAX_PASSES {
        let next = clean_pass(&current)?;
        if next == current {
            return Some(current);
        }
        debug!("sanitize: {current:?} -> {next:?}");
        current = next;
    }
    debug!("sanitize: no stable form for {trimmed:?}");
    None
}

/// Una pasada de limpieza sobre texto que contiene `>`.
fn clean_pass(text: &str) -> Option<String> {
    let quoted = QUOTED_REACTION.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str());
    let mut working = strip_role_prefix(quoted.unwrap_or(text));
    for &(from, to) in ARROW_GLYPHS {
        working = working.replace(from, to);
    }
    let working = ROLE_LABEL.replace_all(&working, " ");
    let working = NOISE.replace_all(&working, " ");
    let working = SPACED_ARROW.replace_all(&working, ">");

    let candidate = REACTION_SHAPE.find_iter(&working)
                                  .map(|m| m.as_str())
                                  .find(|m| m.contains('>'))
                                  .unwrap_or(&*working);

    let filtered: String = candidate.chars().filter(|c| is_smiles_char(*c)).collect();
    // La limpieza puede dejar al descubierto otro prefijo de rol
    let stripped = strip_role_prefix(trim_separators(&filtered));
    let mut cleaned = trim_separators(&stripped).to_string();
    if cleaned.matches('>').count() == 1 {
        cleaned = cleaned.replace('>', ">>");
    }

    if cleaned.is_empty() || !cleaned.contains('>') {
        return None;
    }
    Some(cleaned)
}
