// reaction_resolution.rs
use crate::{DomainError, MechanismStage, ReactionComponent, ReactionRole};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reacción completamente resuelta que se entrega a la capa de render.
///
/// Es un DTO transitorio: se crea por petición y nadie lo muta después.
/// `reaction_smiles` siempre contiene al menos un `>` y cada uno de sus tres
/// grupos coincide con los SMILES resueltos de `components` para ese rol,
/// en el mismo orden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ResolutionRecord")]
pub struct ReactionResolution {
    reaction_smiles: String,
    components: Vec<ReactionComponent>,
    used_external_inference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reaction_name: Option<String>,
    conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reaction_description: Option<String>,
    mechanism_stages: Vec<MechanismStage>,
    notes: Vec<String>,
}

impl ReactionResolution {
    /// Crea la resolución validando la coherencia entre `reaction_smiles` y
    /// los componentes.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si falta la flecha o si algún grupo del
    /// reaction SMILES no corresponde a los componentes resueltos de su rol.
    pub fn new(reaction_smiles: impl Into<String>,
               components: Vec<ReactionComponent>,
               used_external_inference: bool)
               -> Result<Self, DomainError> {
        let reaction_smiles = reaction_smiles.into();
        if !reaction_smiles.contains('>') {
            return Err(DomainError::ValidationError(format!("reaction SMILES '{}' has no arrow", reaction_smiles)));
        }
        let groups: Vec<&str> = reaction_smiles.split('>').collect();
        if groups.len() != 3 {
            return Err(DomainError::ValidationError(format!("reaction SMILES '{}' must have exactly three groups",
                                                            reaction_smiles)));
        }
        for (role, group) in ReactionRole::ALL.iter().zip(groups.iter()) {
            let expected = components.iter()
                                     .filter(|c| c.role() == *role)
                                     .filter_map(|c| c.smiles())
                                     .collect::<Vec<_>>()
                                     .join(".");
            if expected != *group {
                return Err(DomainError::ValidationError(format!("{} group '{}' does not match components '{}'",
                                                                role, group, expected)));
            }
        }
        let mut ordered = components;
        // Orden estable: reactivos, agentes, productos
        ordered.sort_by_key(|c| c.role());
        Ok(ReactionResolution { reaction_smiles,
                                components: ordered,
                                used_external_inference,
                                confidence: None,
                                reaction_name: None,
                                conditions: Vec::new(),
                                reaction_description: None,
                                mechanism_stages: Vec::new(),
                                notes: Vec::new() })
    }

    /// Confianza del colaborador de inferencia; fuera de `0.0..=1.0` se descarta.
    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence.filter(|c| c.is_finite() && (0.0..=1.0).contains(c));
        self
    }

    pub fn with_reaction_name(mut self, name: Option<String>) -> Self {
        self.reaction_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<String>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.reaction_description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_mechanism_stages(mut self, stages: Vec<MechanismStage>) -> Self {
        self.mechanism_stages = stages;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn reaction_smiles(&self) -> &str { &self.reaction_smiles }
    pub fn components(&self) -> &[ReactionComponent] { &self.components }
    pub fn used_external_inference(&self) -> bool { self.used_external_inference }
    pub fn confidence(&self) -> Option<f64> { self.confidence }
    pub fn reaction_name(&self) -> Option<&str> { self.reaction_name.as_deref() }
    pub fn conditions(&self) -> &[String] { &self.conditions }
    pub fn reaction_description(&self) -> Option<&str> { self.reaction_description.as_deref() }
    pub fn mechanism_stages(&self) -> &[MechanismStage] { &self.mechanism_stages }
    pub fn notes(&self) -> &[String] { &self.notes }

    pub fn components_with_role(&self, role: ReactionRole) -> impl Iterator<Item = &ReactionComponent> {
        self.components.iter().filter(move |c| c.role() == role)
    }

    /// Componentes que quedaron sin SMILES.
    pub fn unresolved(&self) -> impl Iterator<Item = &ReactionComponent> {
        self.components.iter().filter(|c| !c.is_resolved())
    }
}

// Al deserializar se revalida con `new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolutionRecord {
    reaction_smiles: String,
    components: Vec<ReactionComponent>,
    used_external_inference: bool,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    reaction_name: Option<String>,
    #[serde(default)]
    conditions: Vec<String>,
    #[serde(default)]
    reaction_description: Option<String>,
    #[serde(default)]
    mechanism_stages: Vec<MechanismStage>,
    #[serde(default)]
    notes: Vec<String>,
}

impl TryFrom<ResolutionRecord> for ReactionResolution {
    type Error = DomainError;

    fn try_from(record: ResolutionRecord) -> Result<Self, Self::Error> {
        Ok(ReactionResolution::new(record.reaction_smiles, record.components, record.used_external_inference)?
            .with_confidence(record.confidence)
            .with_reaction_name(record.reaction_name)
            .with_conditions(record.conditions)
            .with_description(record.reaction_description)
            .with_mechanism_stages(record.mechanism_stages)
            .with_notes(record.notes))
    }
}

impl fmt::Display for ReactionResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reaction_name {
            Some(name) => write!(f, "{} ({})", name, self.reaction_smiles),
            None => f.write_str(&self.reaction_smiles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(role: ReactionRole, smiles: &str) -> ReactionComponent {
        ReactionComponent::from_smiles(role, smiles).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_arrow() {
        let err = ReactionResolution::new("CCO", vec![comp(ReactionRole::Reactant, "CCO")], false).unwrap_err();
        assert!(err.to_string().contains("no arrow"));
    }

    #[test]
    fn test_new_rejects_mismatched_group() {
        let components = vec![comp(ReactionRole::Reactant, "CCO"), comp(ReactionRole::Product, "CC=O")];
        assert!(ReactionResolution::new("CCO>>CC(=O)O", components, false).is_err());
    }

    #[test]
    fn test_new_orders_by_role_and_ignores_unresolved() {
        let components = vec![comp(ReactionRole::Product, "CC=O"),
                              ReactionComponent::new(ReactionRole::Agent, "PCC").with_note("unresolved"),
                              comp(ReactionRole::Reactant, "CCO"),];
        let r = ReactionResolution::new("CCO>>CC=O", components, true).unwrap();
        let roles: Vec<_> = r.components().iter().map(|c| c.role()).collect();
        assert_eq!(roles, vec![ReactionRole::Reactant, ReactionRole::Agent, ReactionRole::Product]);
        assert_eq!(r.unresolved().count(), 1);
    }

    #[test]
    fn test_confidence_out_of_range_is_dropped() {
        let components = vec![comp(ReactionRole::Reactant, "C"), comp(ReactionRole::Product, "CO")];
        let r = ReactionResolution::new("C>>CO", components.clone(), true).unwrap().with_confidence(Some(1.7));
        assert_eq!(r.confidence(), None);
        let r = ReactionResolution::new("C>>CO", components, true).unwrap().with_confidence(Some(0.4));
        assert_eq!(r.confidence(), Some(0.4));
    }

    #[test]
    fn test_deserialize_revalidates_groups() {
        let components = vec![comp(ReactionRole::Reactant, "CCO"), comp(ReactionRole::Product, "CC=O")];
        let r = ReactionResolution::new("CCO>>CC=O", components, true).unwrap().with_notes(vec!["ok".into()]);
        let mut v = serde_json::to_value(&r).unwrap();
        let back: ReactionResolution = serde_json::from_value(v.clone()).unwrap();
        assert_eq!(back, r);

        v["reactionSmiles"] = serde_json::json!("CCO>>CC(=O)O");
        assert!(serde_json::from_value::<ReactionResolution>(v).is_err());
    }
}
