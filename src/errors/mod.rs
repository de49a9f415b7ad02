//! Errores por capa: núcleo (config/IO), colaboradores externos y
//! resolución de reacciones.
pub mod core_error;
pub mod provider_error;
pub mod resolution_error;

pub use core_error::CoreError;
pub use provider_error::ProviderError;
pub use resolution_error::ResolutionError;
