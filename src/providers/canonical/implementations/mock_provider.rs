use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::canonical::CanonicalizationProvider;

/// Canonicalizador en memoria para pruebas. Las claves se comparan sin
/// distinguir mayúsculas; cuenta cada llamada para verificar la caché.
pub struct StaticCanonicalizer {
    table: HashMap<String, String>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl StaticCanonicalizer {
    pub fn new<I, K, V>(entries: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<String>
    {
        Self { table: entries.into_iter().map(|(k, v)| (k.into().to_lowercase(), v.into())).collect(),
               failing: HashSet::new(),
               calls: AtomicUsize::new(0) }
    }

    /// Candidatos que responden con error de transporte.
    pub fn with_failures<I, K>(mut self, candidates: I) -> Self
        where I: IntoIterator<Item = K>,
              K: Into<String>
    {
        self.failing = candidates.into_iter().map(|k| k.into().to_lowercase()).collect();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CanonicalizationProvider for StaticCanonicalizer {
    fn get_name(&self) -> &str {
        "static"
    }

    fn get_version(&self) -> &str {
        "1.0.0"
    }

    async fn canonicalize(&self, candidate: &str) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = candidate.trim().to_lowercase();
        if self.failing.contains(&key) {
            return Err(ProviderError::Transport(format!("simulated failure for {candidate}")));
        }
        Ok(self.table.get(&key).cloned())
    }
}
