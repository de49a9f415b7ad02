use chem_domain::{MissingSides, ReactionResolution};
use chem_notation::{compose_from_components, encode_reaction_text, has_reaction_indicator, parse_reaction_smiles, sanitize};
use log::{debug, info, warn};

use crate::errors::ResolutionError;
use crate::providers::canonical::CanonicalizationProvider;
use crate::providers::completion::{extract_json_object, CompletionProvider};
use crate::resolver::cache::SmilesCache;
use crate::resolver::components::ComponentResolver;
use crate::resolver::payload::InferredReaction;
use crate::resolver::prompt::{build_request, InferenceAttempt};

/// Opciones de comportamiento del resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Pide la respuesta con esquema JSON. Con `false` se usa el prompt
    /// heredado y el JSON se extrae del texto.
    pub structured_output: bool,
    /// Pasa también por el canonicalizador los SMILES que el servicio de
    /// completado ya trae escritos.
    pub canonicalize_explicit: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions { structured_output: true, canonicalize_explicit: true }
    }
}

/// Resultado de un intento de inferencia.
enum AttemptOutcome {
    Resolved(ReactionResolution),
    Incomplete { missing: MissingSides, detail: Option<String> },
    Malformed(String),
}

/// Convierte consultas de texto libre en `ReactionResolution`.
///
/// Los colaboradores son opcionales: sin servicio de completado sólo se
/// aceptan consultas escritas en notación de reacción, y sin canonicalizador
/// las especies se quedan con el SMILES que traigan.
pub struct ReactionResolver {
    completion: Option<Box<dyn CompletionProvider>>,
    canonicalizer: Option<Box<dyn CanonicalizationProvider>>,
    cache: SmilesCache,
    options: ResolverOptions,
}

impl Default for ReactionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionResolver {
    pub fn new() -> Self {
        ReactionResolver { completion: None,
                           canonicalizer: None,
                           cache: SmilesCache::new(),
                           options: ResolverOptions::default() }
    }

    pub fn with_completion(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.completion = Some(provider);
        self
    }

    pub fn with_canonicalizer(mut self, provider: Box<dyn CanonicalizationProvider>) -> Self {
        self.canonicalizer = Some(provider);
        self
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Caché de canonicalización compartida por todas las consultas.
    pub fn cache(&self) -> &SmilesCache {
        &self.cache
    }

    /// Resuelve una consulta libre (nombre de reacción, descripción o
    /// notación) a un reaction SMILES con sus componentes.
    ///
    /// # Errores
    /// - `EmptyInput` si la consulta está en blanco.
    /// - `ConfigurationRequired` si la heurística no basta y no hay servicio
    ///   de completado.
    /// - `IncompleteReaction` si tras el reintento falta algún lado.
    /// - `MalformedResponse` si el camino sin esquema no devuelve JSON.
    pub async fn resolve_from_query(&self, query: &str) -> Result<ReactionResolution, ResolutionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolutionError::EmptyInput);
        }

        if has_reaction_indicator(query) {
            if let Some(resolution) = self.resolve_heuristically(&encode_reaction_text(query)) {
                info!("query resolved as reaction notation: {}", resolution.reaction_smiles());
                return Ok(resolution);
            }
            debug!("reaction indicator present but notation did not parse: {query:?}");
        }

        let Some(completion) = self.completion.as_deref() else {
            return self.resolve_heuristically(query)
                       .or_else(|| sanitize(query).and_then(|clean| self.resolve_heuristically(&clean)))
                       .ok_or_else(|| ResolutionError::ConfigurationRequired { query: query.to_string() });
        };

        self.resolve_with_inference(completion, query).await
    }

    /// Lee `text` como reaction SMILES literal, sin servicios externos.
    pub fn resolve_heuristically(&self, text: &str) -> Option<ReactionResolution> {
        let groups = parse_reaction_smiles(text)?;
        let reaction_smiles = groups.compose().ok()?;
        let components = groups.into_components().ok()?;
        ReactionResolution::new(reaction_smiles, components, false).ok()
    }

    async fn resolve_with_inference(&self,
                                    completion: &dyn CompletionProvider,
                                    query: &str)
                                    -> Result<ReactionResolution, ResolutionError> {
        let mut attempt = InferenceAttempt::Initial;
        loop {
            let outcome = self.run_attempt(completion, query, attempt).await;
            let next = attempt.next();
            match (outcome, next) {
                (AttemptOutcome::Resolved(resolution), _) => {
                    info!("query {query:?} resolved via {} ({attempt:?}): {}",
                          completion.get_name(),
                          resolution.reaction_smiles());
                    return Ok(resolution);
                }
                (AttemptOutcome::Incomplete { missing, detail }, None) => {
                    warn!("query {query:?} still incomplete after retry: {missing}");
                    return Err(ResolutionError::IncompleteReaction { missing, detail });
                }
                (AttemptOutcome::Malformed(reason), None) => {
                    warn!("query {query:?}: malformed completion response after retry");
                    return Err(ResolutionError::MalformedResponse(reason));
                }
                (AttemptOutcome::Incomplete { missing, .. }, Some(next)) => {
                    debug!("{attempt:?} attempt incomplete ({missing}), retrying");
                    attempt = next;
                }
                (AttemptOutcome::Malformed(reason), Some(next)) => {
                    debug!("{attempt:?} attempt malformed ({reason}), retrying");
                    attempt = next;
                }
            }
        }
    }

    async fn run_attempt(&self, completion: &dyn CompletionProvider, query: &str, attempt: InferenceAttempt) -> AttemptOutcome {
        let request = build_request(query, attempt, self.options.structured_output);
        let payload = if self.options.structured_output {
            completion.complete_json(&request).await
        } else {
            match completion.complete_text(&request).await {
                Ok(text) => match extract_json_object(&text) {
                    Ok(value) => Ok(value),
                    Err(reason) => return AttemptOutcome::Malformed(reason),
                },
                Err(e) => Err(e),
            }
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                warn!("completion via {} failed: {e}", completion.get_name());
                return AttemptOutcome::Incomplete { missing: MissingSides::Both, detail: Some(e.to_string()) };
            }
        };

        let mut inferred = InferredReaction::from_value(&payload);
        if inferred.fill_from_reaction_smiles() {
            debug!("species taken from the reaction SMILES of the response");
        }
        let step = ComponentResolver { cache: &self.cache,
                                       canonicalizer: self.canonicalizer.as_deref(),
                                       canonicalize_explicit: self.options.canonicalize_explicit };
        let components = step.resolve_all(&inferred).await;

        let reaction_smiles = match compose_from_components(&components) {
            Ok(smiles) => smiles,
            Err(missing) => return AttemptOutcome::Incomplete { missing, detail: None },
        };
        let mut notes: Vec<String> = components.iter().filter_map(|c| c.note()).map(str::to_string).collect();
        notes.extend(inferred.notes.iter().cloned());
        match ReactionResolution::new(reaction_smiles, components, true) {
            Ok(resolution) => AttemptOutcome::Resolved(resolution.with_reaction_name(inferred.reaction_name)
                                                                 .with_confidence(inferred.confidence)
                                                                 .with_conditions(inferred.conditions)
                                                                 .with_description(inferred.description)
                                                                 .with_mechanism_stages(inferred.mechanism_stages)
                                                                 .with_notes(notes)),
            Err(e) => AttemptOutcome::Malformed(e.to_string()),
        }
    }
}
