//! Constantes léxicas del intérprete de notación.
//!
//! Los términos de ruido provienen de los mensajes de error que emiten las
//! librerías de render 2D cuando un reaction SMILES no se puede dibujar; el
//! SMILES que falló suele venir incrustado en esa prosa.

/// Frases de plantilla que se eliminan (sin distinguir mayúsculas) antes de
/// buscar la reacción dentro del texto.
pub const NOISE_TERMS: &[&str] = &["unable to parse reaction smiles",
                                   "please ensure the",
                                   "smiles format is correct",
                                   "original error",
                                   "kekule.js",
                                   "kekule",
                                   "rdkit.js",
                                   "rdkit",
                                   "openchemlib",
                                   "smiles-drawer",
                                   "smilesdrawer"];

/// Palabras de rol que los modelos anteponen a la reacción ("reactants: ...").
pub const ROLE_KEYWORDS: &[&str] = &["product", "reactant", "agent"];

/// Flechas tipográficas y ASCII y su forma SMILES, en orden de aplicación.
/// Las de equilibrio van primero para que `<=>` no se lea como `=>`.
pub const ARROW_GLYPHS: &[(&str, &str)] = &[("⇌", ">>"),
                                            ("↔", ">>"),
                                            ("<=>", ">>"),
                                            ("<->", ">>"),
                                            ("→", ">"),
                                            ("⇒", ">"),
                                            ("=>", ">"),
                                            ("->", ">")];

/// Separadores con espacios de la notación escrita a mano. Sólo se aplican
/// en el camino heurístico: en un SMILES sin espacios `=` es un enlace.
pub const SPACED_SEPARATORS: &[(&str, &str)] = &[(" = ", ">"), (" + ", ".")];

/// Caracteres que delatan notación de reacción en una consulta libre.
pub const REACTION_INDICATORS: &[char] = &['>', '→', '⇌', '↔', '⇒', '='];
