//! Colaboradores externos del resolver: servicio de completado (LLM) y
//! servicio de canonicalización de especies.
pub mod canonical;
pub mod completion;
