//! Orquestación: consulta libre -> `ReactionResolution`.
//!
//! Primero se intenta leer la consulta como notación de reacción; si no
//! basta se consulta al servicio de completado (dos intentos secuenciales) y
//! cada especie se canonicaliza a través de la caché de la sesión.
pub mod cache;
pub mod components;
pub mod engine;
pub mod payload;
pub mod prompt;

pub use cache::SmilesCache;
pub use engine::{ReactionResolver, ResolverOptions};
pub use payload::{InferredReaction, InferredSpecies};
pub use prompt::InferenceAttempt;
