use serde::{Deserialize, Serialize};

use crate::smiles::is_smiles_charset;
use crate::{DomainError, ReactionRole};
use std::fmt;

/// Una especie química que participa en la reacción.
///
/// `smiles`, cuando existe, sólo contiene caracteres de notación SMILES; el
/// texto libre queda en `label` / `original`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ComponentRecord")]
pub struct ReactionComponent {
    role: ReactionRole,
    label: Option<String>,
    original: String,
    smiles: Option<String>,
    canonical_smiles: Option<String>,
    note: Option<String>,
}

impl ReactionComponent {
    /// Componente aún sin SMILES resuelto.
    pub fn new(role: ReactionRole, original: impl Into<String>) -> Self {
        ReactionComponent { role,
                            label: None,
                            original: original.into(),
                            smiles: None,
                            canonical_smiles: None,
                            note: None }
    }

    /// Atajo para componentes que ya vienen escritos en SMILES (camino heurístico).
    pub fn from_smiles(role: ReactionRole, smiles: &str) -> Result<Self, DomainError> {
        ReactionComponent::new(role, smiles).with_smiles(smiles)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.trim().is_empty() { None } else { Some(label.trim().to_string()) };
        self
    }

    /// Asigna el SMILES rechazando cualquier resto de lenguaje natural.
    pub fn with_smiles(mut self, smiles: &str) -> Result<Self, DomainError> {
        let smiles = smiles.trim();
        if !is_smiles_charset(smiles) {
            return Err(DomainError::ValidationError(format!("'{}' is not a SMILES string", smiles)));
        }
        self.smiles = Some(smiles.to_string());
        Ok(self)
    }

    pub fn with_canonical_smiles(mut self, canonical: &str) -> Result<Self, DomainError> {
        let canonical = canonical.trim();
        if !is_smiles_charset(canonical) {
            return Err(DomainError::ValidationError(format!("'{}' is not a canonical SMILES string", canonical)));
        }
        self.canonical_smiles = Some(canonical.to_string());
        Ok(self)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn role(&self) -> ReactionRole { self.role }
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn original(&self) -> &str { &self.original }
    pub fn smiles(&self) -> Option<&str> { self.smiles.as_deref() }
    pub fn canonical_smiles(&self) -> Option<&str> { self.canonical_smiles.as_deref() }
    pub fn note(&self) -> Option<&str> { self.note.as_deref() }
    pub fn is_resolved(&self) -> bool { self.smiles.is_some() }

    /// Nombre legible: etiqueta si existe, si no el token original.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.original)
    }
}

/// Forma serializada; al deserializar pasa por los mismos constructores
/// que validan el SMILES.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComponentRecord {
    role: ReactionRole,
    #[serde(default)]
    label: Option<String>,
    original: String,
    #[serde(default)]
    smiles: Option<String>,
    #[serde(default)]
    canonical_smiles: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

impl TryFrom<ComponentRecord> for ReactionComponent {
    type Error = DomainError;

    fn try_from(record: ComponentRecord) -> Result<Self, Self::Error> {
        let mut component = ReactionComponent::new(record.role, record.original);
        if let Some(label) = record.label {
            component = component.with_label(label);
        }
        if let Some(smiles) = record.smiles.as_deref() {
            component = component.with_smiles(smiles)?;
        }
        if let Some(canonical) = record.canonical_smiles.as_deref() {
            component = component.with_canonical_smiles(canonical)?;
        }
        if let Some(note) = record.note {
            component = component.with_note(note);
        }
        Ok(component)
    }
}

impl fmt::Display for ReactionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}, {}>", self.role, self.display_name(), self.smiles.as_deref().unwrap_or("?"))
    }
}
