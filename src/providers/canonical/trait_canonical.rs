use async_trait::async_trait;

use crate::errors::ProviderError;

/// Servicio de canonicalización: nombre, fórmula o fragmento SMILES a
/// SMILES canónico.
///
/// "Sin coincidencia" es `Ok(None)`, no un error; `Err` queda para fallos de
/// transporte o de protocolo.
#[async_trait]
pub trait CanonicalizationProvider: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_version(&self) -> &str;
    async fn canonicalize(&self, candidate: &str) -> Result<Option<String>, ProviderError>;
}
