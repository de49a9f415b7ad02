//! ChemCanvas Rust Library
//!
//! Núcleo de resolución de reacciones para el lienzo químico:
//! - `resolver` convierte una consulta libre en un reaction SMILES con sus
//!   componentes (heurística primero, servicio de completado después).
//! - `providers` define los colaboradores externos (completado y
//!   canonicalización) y sus implementaciones.
//! - `config` carga el entorno y cablea los colaboradores.
//! - `errors` agrupa los errores por capa.
//!
//! Las funciones puras de notación viven en `chem-notation` y los tipos en
//! `chem-domain`; se reexportan aquí para los clientes.

pub mod config;
pub mod errors;
pub mod providers;
pub mod resolver;

pub use chem_domain::{MechanismStage, MissingSides, ReactionComponent, ReactionResolution, ReactionRole};
pub use chem_notation::{normalize_reaction_arrows, render_ready_smiles, sanitize, strip_atom_mappings};
pub use errors::{CoreError, ProviderError, ResolutionError};
pub use resolver::{ReactionResolver, ResolverOptions};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reexports_cover_the_pipeline() {
		let clean = sanitize("Kekule.js error: unable to parse reaction smiles CCO>CC=O").unwrap();
		assert_eq!(render_ready_smiles(&clean), "CCO>>CC=O");
	}

	#[test]
	fn resolution_error_is_displayable() {
		let e = ResolutionError::IncompleteReaction { missing: MissingSides::Reactants, detail: None };
		assert_eq!(e.to_string(), "incomplete reaction: missing reactants");
	}
}
