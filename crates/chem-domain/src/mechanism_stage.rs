use serde::{Deserialize, Serialize};

/// Instantánea de un paso del mecanismo (intermedios, estados de transición).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanismStage {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub smiles: Vec<String>,
}

impl MechanismStage {
    pub fn new(label: impl Into<String>, description: Option<String>, smiles: Vec<String>) -> Self {
        Self { label: label.into(), description, smiles }
    }
}
