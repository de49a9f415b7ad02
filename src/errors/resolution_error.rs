use chem_domain::MissingSides;
use thiserror::Error;

/// Errores que el resolver entrega a la capa de UI.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Consulta vacía; no se reintenta.
    #[error("empty reaction query")]
    EmptyInput,
    /// La heurística no bastó y no hay servicio de completado configurado.
    #[error("could not read '{query}' as reaction SMILES and no completion service is configured (set GEMINI_API_KEY)")]
    ConfigurationRequired { query: String },
    /// El servicio de completado no produjo ambos lados tras el reintento.
    #[error("incomplete reaction: {missing}{}", detail_suffix(.detail))]
    IncompleteReaction { missing: MissingSides, detail: Option<String> },
    /// Respuesta no-JSON en el camino de prompt sin esquema.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

impl ResolutionError {
    pub fn missing_sides(&self) -> Option<MissingSides> {
        match self {
            ResolutionError::IncompleteReaction { missing, .. } => Some(*missing),
            _ => None,
        }
    }
}
