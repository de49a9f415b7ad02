use thiserror::Error;

/// Errores de arranque: entorno inválido o cliente HTTP imposible de construir.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error creando cliente HTTP: {0}")]
    Http(#[from] reqwest::Error),
}
