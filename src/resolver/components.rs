//! Resolución de cada especie inferida a un `ReactionComponent`.
use chem_domain::{ReactionComponent, ReactionRole};
use chem_notation::is_plausible_smiles;
use log::{debug, warn};

use crate::providers::canonical::CanonicalizationProvider;
use crate::resolver::cache::SmilesCache;
use crate::resolver::payload::{InferredReaction, InferredSpecies};

/// Paso de canonicalización de una inferencia. Las especies se resuelven de
/// una en una, en orden de rol; un fallo del servicio no es fatal.
pub(crate) struct ComponentResolver<'a> {
    pub cache: &'a SmilesCache,
    pub canonicalizer: Option<&'a dyn CanonicalizationProvider>,
    pub canonicalize_explicit: bool,
}

impl ComponentResolver<'_> {
    pub async fn resolve_all(&self, reaction: &InferredReaction) -> Vec<ReactionComponent> {
        let mut components = Vec::new();
        for role in ReactionRole::ALL {
            for species in reaction.species(role) {
                components.push(self.resolve(role, species).await);
            }
        }
        components
    }

    /// Orden de preferencia: SMILES explícito, luego etiqueta, fórmula y
    /// texto original vía el canonicalizador, y por último el propio texto si
    /// ya es notación SMILES.
    pub async fn resolve(&self, role: ReactionRole, species: &InferredSpecies) -> ReactionComponent {
        let mut component = ReactionComponent::new(role, species.original_text());
        if let Some(label) = &species.label {
            component = component.with_label(label.as_str());
        }

        let explicit = species.smiles.as_deref().map(str::trim).filter(|s| is_plausible_smiles(s));
        if let Some(explicit) = explicit {
            let canonical = if self.canonicalize_explicit { self.canonical(explicit).await } else { None };
            return attach(component, explicit, canonical.as_deref());
        }

        let mut candidates: Vec<&str> = species.smiles.as_deref().into_iter().collect();
        candidates.extend(species.name_candidates());
        for candidate in &candidates {
            if let Some(canonical) = self.canonical(candidate).await {
                return attach(component, &canonical, Some(&canonical));
            }
        }
        if let Some(literal) = candidates.iter().map(|c| c.trim()).find(|c| is_plausible_smiles(c)) {
            return attach(component, literal, None);
        }

        debug!("unresolved {role}: {:?}", component.display_name());
        let note = format!("no SMILES found for {} '{}'", role, component.display_name());
        component.with_note(note)
    }

    async fn canonical(&self, candidate: &str) -> Option<String> {
        let provider = self.canonicalizer?;
        match self.cache.resolve(candidate, provider).await {
            Ok(found) => found,
            Err(e) => {
                warn!("canonicalization of {candidate:?} via {} failed: {e}", provider.get_name());
                None
            }
        }
    }
}

fn attach(component: ReactionComponent, smiles: &str, canonical: Option<&str>) -> ReactionComponent {
    let fallback = component.clone();
    let attached = component.with_smiles(smiles).and_then(|c| match canonical {
                                                    Some(canonical) => c.with_canonical_smiles(canonical),
                                                    None => Ok(c),
                                                });
    attached.unwrap_or_else(|e| fallback.with_note(e.to_string()))
}
