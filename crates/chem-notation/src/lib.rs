//! chem-notation: limpieza, normalización y composición de reaction SMILES.
//!
//! Todas las funciones son puras (sin I/O). La ausencia de resultado se
//! señala con `None`, nunca con pánico.
pub mod arrows;
pub mod compose;
pub mod constants;
pub mod parse;
pub mod sanitize;

pub use arrows::{encode_reaction_text, has_reaction_indicator, normalize_reaction_arrows, render_ready_smiles, strip_atom_mappings};
pub use compose::{compose_from_components, compose_reaction_smiles, decompose_reaction_smiles, ReactionGroups};
pub use parse::{is_plausible_smiles, parse_reaction_smiles};
pub use sanitize::sanitize;
