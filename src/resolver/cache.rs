use chem_domain::is_smiles_charset;
use dashmap::DashMap;
use log::debug;

use crate::errors::ProviderError;
use crate::providers::canonical::CanonicalizationProvider;

/// Caché de canonicalización de la sesión: candidato -> SMILES canónico (o
/// `None` si el servicio no encontró nada).
///
/// Sólo crece; el SMILES canónico de un nombre no cambia, así que nunca se
/// invalida. Los fallos de transporte no se guardan.
#[derive(Debug, Default)]
pub struct SmilesCache {
    entries: DashMap<String, Option<String>>,
}

impl SmilesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, candidate: &str) -> Option<Option<String>> {
        self.entries.get(candidate.trim()).map(|e| e.value().clone())
    }

    pub fn insert(&self, candidate: &str, canonical: Option<String>) {
        self.entries.insert(candidate.trim().to_string(), canonical);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Devuelve la entrada cacheada o consulta al proveedor y la guarda.
    /// Una respuesta que no sea SMILES se trata como "sin coincidencia".
    pub async fn resolve(&self, candidate: &str, provider: &dyn CanonicalizationProvider) -> Result<Option<String>, ProviderError> {
        let key = candidate.trim();
        if let Some(hit) = self.get(key) {
            debug!("smiles cache hit: {key:?} -> {hit:?}");
            return Ok(hit);
        }
        let canonical = provider.canonicalize(key).await?.map(|s| s.trim().to_string()).filter(|s| is_smiles_charset(s));
        debug!("smiles cache store: {key:?} -> {canonical:?} ({})", provider.get_name());
        self.insert(key, canonical.clone());
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::canonical::implementations::mock_provider::StaticCanonicalizer;

    #[tokio::test]
    async fn test_hits_and_misses_are_cached() {
        let provider = StaticCanonicalizer::new([("ethanol", "CCO")]);
        let cache = SmilesCache::new();
        assert_eq!(cache.resolve("ethanol", &provider).await.unwrap().as_deref(), Some("CCO"));
        assert_eq!(cache.resolve(" ethanol ", &provider).await.unwrap().as_deref(), Some("CCO"));
        assert_eq!(cache.resolve("unobtainium", &provider).await.unwrap(), None);
        assert_eq!(cache.resolve("unobtainium", &provider).await.unwrap(), None);
        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_errors_are_not_cached() {
        let provider = StaticCanonicalizer::new([("water", "O")]).with_failures(["water"]);
        let cache = SmilesCache::new();
        assert!(cache.resolve("water", &provider).await.is_err());
        assert!(cache.resolve("water", &provider).await.is_err());
        assert_eq!(provider.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_non_smiles_answer_is_no_match() {
        let provider = StaticCanonicalizer::new([("salt", "sodium chloride")]);
        let cache = SmilesCache::new();
        assert_eq!(cache.resolve("salt", &provider).await.unwrap(), None);
        assert_eq!(cache.get("salt"), Some(None));
    }
}
