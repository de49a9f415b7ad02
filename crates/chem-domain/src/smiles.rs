//! Conjunto de caracteres admitidos en SMILES y reaction SMILES.
//!
//! Es una comprobación léxica: no valida valencias ni conectividad, sólo que
//! el texto no contenga restos de lenguaje natural (espacios, comillas,
//! puntuación de prosa).

/// Símbolos no alfanuméricos permitidos dentro de un SMILES de reacción.
/// Incluye `>` (flechas) y `.` (componentes desconectados).
pub const SMILES_SYMBOLS: &str = "[]()@+-=#$:%./\\*>";

pub fn is_smiles_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SMILES_SYMBOLS.contains(c)
}

/// `true` si `s` no está vacío y todos sus caracteres son legales.
pub fn is_smiles_charset(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_smiles_char)
}
