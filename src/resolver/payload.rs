//! Validación de la respuesta del servicio de completado.
//!
//! La respuesta es JSON no confiable: cada campo se lee por separado y un
//! campo con forma incorrecta se descarta sin invalidar el resto.
use chem_domain::{is_smiles_charset, MechanismStage, ReactionRole};
use chem_notation::{decompose_reaction_smiles, sanitize};
use serde_json::{Map, Value};

/// Una especie tal como la describe el servicio de completado.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredSpecies {
    pub label: Option<String>,
    pub smiles: Option<String>,
    pub formula: Option<String>,
    pub original: Option<String>,
}

/// Respuesta validada del servicio de completado.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferredReaction {
    pub reaction_name: Option<String>,
    pub reaction_smiles: Option<String>,
    pub reaction_smiles_with_conditions: Option<String>,
    pub conditions: Vec<String>,
    pub reactants: Vec<InferredSpecies>,
    pub agents: Vec<InferredSpecies>,
    pub products: Vec<InferredSpecies>,
    pub description: Option<String>,
    pub confidence: Option<f64>,
    pub notes: Vec<String>,
    pub mechanism_stages: Vec<MechanismStage>,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| obj.get(*k)).filter_map(Value::as_str).find_map(non_empty)
}

/// Un texto o una lista de textos; los elementos no textuales se ignoran.
fn string_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for value in keys.iter().filter_map(|k| obj.get(*k)) {
        match value {
            Value::String(s) => out.extend(non_empty(s)),
            Value::Array(items) => out.extend(items.iter().filter_map(Value::as_str).filter_map(non_empty)),
            _ => {}
        }
    }
    out
}

fn species_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<InferredSpecies> {
    let mut out = Vec::new();
    for value in keys.iter().filter_map(|k| obj.get(*k)) {
        match value {
            Value::Array(items) => out.extend(items.iter().filter_map(InferredSpecies::from_value)),
            other => out.extend(InferredSpecies::from_value(other)),
        }
    }
    out
}

impl InferredSpecies {
    /// Acepta un texto suelto o un objeto `{name|label, smiles, formula, original}`.
    /// Devuelve `None` si no hay ningún dato utilizable.
    pub fn from_value(value: &Value) -> Option<Self> {
        let species = match value {
            Value::String(s) => {
                let text = non_empty(s)?;
                Self { label: Some(text.clone()), original: Some(text), ..Self::default() }
            }
            Value::Object(obj) => Self { label: first_string(obj, &["name", "label"]),
                                         smiles: first_string(obj, &["smiles", "SMILES"]),
                                         formula: first_string(obj, &["formula"]),
                                         original: first_string(obj, &["original", "text", "input"]) },
            _ => return None,
        };
        species.has_data().then_some(species)
    }

    pub fn from_smiles(smiles: &str) -> Self {
        Self { smiles: Some(smiles.to_string()), original: Some(smiles.to_string()), ..Self::default() }
    }

    fn has_data(&self) -> bool {
        self.label.is_some() || self.smiles.is_some() || self.formula.is_some() || self.original.is_some()
    }

    /// Texto con el que el usuario (o el servicio) nombró la especie.
    pub fn original_text(&self) -> &str {
        self.original
            .as_deref()
            .or(self.label.as_deref())
            .or(self.formula.as_deref())
            .or(self.smiles.as_deref())
            .unwrap_or_default()
    }

    /// Candidatos para el servicio de canonicalización, en orden de
    /// preferencia (etiqueta, fórmula, texto original) y sin repetidos.
    pub fn name_candidates(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for candidate in [self.label.as_deref(), self.formula.as_deref(), self.original.as_deref()].into_iter().flatten() {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(candidate)) {
                out.push(candidate);
            }
        }
        out
    }
}

fn mechanism_stages(obj: &Map<String, Value>) -> Vec<MechanismStage> {
    let Some(items) = ["mechanismStages", "mechanism_stages", "mechanism"].iter().find_map(|k| obj.get(*k).and_then(Value::as_array)) else {
        return Vec::new();
    };
    items.iter()
         .filter_map(Value::as_object)
         .filter_map(|stage| {
             let label = first_string(stage, &["label", "name", "title"])?;
             let smiles = string_list(stage, &["smiles"]).into_iter().filter(|s| is_smiles_charset(s)).collect();
             Some(MechanismStage::new(label, first_string(stage, &["description"]), smiles))
         })
         .collect()
}

impl InferredReaction {
    /// Valida la forma de la respuesta. Un valor que no sea objeto produce
    /// una reacción vacía.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let confidence = obj.get("confidence").and_then(Value::as_f64).filter(|c| (0.0..=1.0).contains(c));
        Self { reaction_name: first_string(obj, &["reactionName", "reaction_name", "name"]),
               reaction_smiles: first_string(obj, &["reactionSmiles", "reaction_smiles"]),
               reaction_smiles_with_conditions: first_string(obj, &["reactionSmilesWithConditions", "reaction_smiles_with_conditions"]),
               conditions: string_list(obj, &["conditions"]),
               reactants: species_list(obj, &["reactants"]),
               agents: species_list(obj, &["agents", "reagents", "catalysts", "solvents"]),
               products: species_list(obj, &["products"]),
               description: first_string(obj, &["description", "reactionDescription", "reaction_description"]),
               confidence,
               notes: string_list(obj, &["notes"]),
               mechanism_stages: mechanism_stages(obj) }
    }

    pub fn species(&self, role: ReactionRole) -> &[InferredSpecies] {
        match role {
            ReactionRole::Reactant => &self.reactants,
            ReactionRole::Agent => &self.agents,
            ReactionRole::Product => &self.products,
        }
    }

    pub fn has_species(&self) -> bool {
        ReactionRole::ALL.iter().any(|role| !self.species(*role).is_empty())
    }

    /// Si la respuesta no lista especies pero trae un reaction SMILES, se
    /// descompone para obtenerlas. Devuelve `true` si se rellenó algo.
    pub fn fill_from_reaction_smiles(&mut self) -> bool {
        if self.has_species() {
            return false;
        }
        let groups = [self.reaction_smiles.as_deref(), self.reaction_smiles_with_conditions.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|text| sanitize(text))
            .find_map(|clean| decompose_reaction_smiles(&clean));
        let Some(groups) = groups else {
            return false;
        };
        let to_species = |tokens: &[String]| tokens.iter().map(|t| InferredSpecies::from_smiles(t)).collect::<Vec<_>>();
        self.reactants = to_species(&groups.reactants);
        self.agents = to_species(&groups.agents);
        self.products = to_species(&groups.products);
        self.has_species()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_camel_case_payload() {
        let payload = json!({
            "reactionName": "Fischer esterification",
            "reactants": [{"name": "acetic acid", "smiles": "CC(=O)O"}, "ethanol"],
            "agents": [{"formula": "H2SO4"}],
            "products": [{"name": "ethyl acetate", "smiles": "CCOC(C)=O"}],
            "conditions": ["reflux", 78],
            "confidence": 0.8,
            "notes": "equilibrium"
        });
        let reaction = InferredReaction::from_value(&payload);
        assert_eq!(reaction.reaction_name.as_deref(), Some("Fischer esterification"));
        assert_eq!(reaction.reactants.len(), 2);
        assert_eq!(reaction.reactants[1].label.as_deref(), Some("ethanol"));
        assert_eq!(reaction.agents[0].formula.as_deref(), Some("H2SO4"));
        assert_eq!(reaction.conditions, vec!["reflux".to_string()]);
        assert_eq!(reaction.confidence, Some(0.8));
        assert_eq!(reaction.notes, vec!["equilibrium".to_string()]);
    }

    #[test]
    fn test_malformed_fields_are_dropped() {
        let payload = json!({
            "reactionName": 42,
            "reactants": [null, {}, {"smiles": "  "}, {"label": "benzene"}],
            "products": "phenol",
            "confidence": 3.5,
            "mechanismStages": [{"description": "no label"}, {"label": "attack", "smiles": ["C=O", "not smiles"]}]
        });
        let reaction = InferredReaction::from_value(&payload);
        assert_eq!(reaction.reaction_name, None);
        assert_eq!(reaction.reactants.len(), 1);
        assert_eq!(reaction.products[0].label.as_deref(), Some("phenol"));
        assert_eq!(reaction.confidence, None);
        assert_eq!(reaction.mechanism_stages.len(), 1);
        assert_eq!(reaction.mechanism_stages[0].smiles, vec!["C=O".to_string()]);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(InferredReaction::from_value(&json!(["CCO"])), InferredReaction::default());
        assert!(!InferredReaction::from_value(&json!("text")).has_species());
    }

    #[test]
    fn test_fill_from_reaction_smiles() {
        let mut reaction = InferredReaction::from_value(&json!({"reactionSmiles": "Reactants: CCO>[Cu]>CC=O"}));
        assert!(reaction.fill_from_reaction_smiles());
        assert_eq!(reaction.reactants[0].smiles.as_deref(), Some("CCO"));
        assert_eq!(reaction.agents[0].smiles.as_deref(), Some("[Cu]"));
        assert_eq!(reaction.products[0].smiles.as_deref(), Some("CC=O"));
    }

    #[test]
    fn test_fill_keeps_listed_species() {
        let mut reaction = InferredReaction::from_value(&json!({"reactionSmiles": "CCO>>CC=O", "products": ["acetaldehyde"]}));
        assert!(!reaction.fill_from_reaction_smiles());
        assert!(reaction.reactants.is_empty());
    }

    #[test]
    fn test_name_candidates_are_deduplicated() {
        let species = InferredSpecies { label: Some("Water".into()),
                                        formula: Some("H2O".into()),
                                        original: Some("water".into()),
                                        smiles: None };
        assert_eq!(species.name_candidates(), vec!["Water", "H2O"]);
        assert_eq!(species.original_text(), "water");
    }
}
