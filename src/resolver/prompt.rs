//! Prompts y esquema de respuesta para el servicio de completado.
use serde_json::{json, Value};

use crate::providers::completion::CompletionRequest;

/// Intentos de inferencia, en orden. Hay como mucho dos por consulta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceAttempt {
    Initial,
    /// Reintento con instrucciones que exigen ambos lados.
    Strict,
}

impl InferenceAttempt {
    pub fn next(self) -> Option<Self> {
        match self {
            InferenceAttempt::Initial => Some(InferenceAttempt::Strict),
            InferenceAttempt::Strict => None,
        }
    }

    fn temperature(self) -> f32 {
        match self {
            InferenceAttempt::Initial => 0.2,
            InferenceAttempt::Strict => 0.0,
        }
    }
}

const SYSTEM_INSTRUCTION: &str = "You are an expert organic chemist. You describe chemical reactions as structured data for a molecule \
                                  drawing tool. Use standard SMILES for every species you know.";

const STRICT_SUFFIX: &str = "The previous answer was incomplete. Both the reactants list and the products list MUST be non-empty. \
                             If the description only names some species, complete it with the textbook reaction it most likely \
                             refers to.";

const LEGACY_SUFFIX: &str = "Respond with a single JSON object and nothing else, using the keys reactionName, reactionSmiles, \
                             conditions, reactants, agents, products, reactionSmilesWithConditions, description, confidence and \
                             notes. Each species is an object with name, smiles and formula.";

fn species_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "smiles": {"type": "STRING"},
                "formula": {"type": "STRING"}
            },
            "required": ["name"]
        }
    })
}

/// Esquema de la respuesta estructurada (dialecto OpenAPI de Gemini).
pub fn reaction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reactionName": {"type": "STRING"},
            "reactionSmiles": {"type": "STRING"},
            "reactionSmilesWithConditions": {"type": "STRING"},
            "conditions": {"type": "ARRAY", "items": {"type": "STRING"}},
            "reactants": species_schema(),
            "agents": species_schema(),
            "products": species_schema(),
            "description": {"type": "STRING"},
            "confidence": {"type": "NUMBER"},
            "notes": {"type": "ARRAY", "items": {"type": "STRING"}},
            "mechanismStages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "smiles": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["label"]
                }
            }
        },
        "required": ["reactants", "products"]
    })
}

/// Construye la petición para `attempt`. Con `structured` se adjunta el
/// esquema; sin él se pide el JSON en el propio texto.
pub fn build_request(query: &str, attempt: InferenceAttempt, structured: bool) -> CompletionRequest {
    let mut prompt = format!("Identify the chemical reaction described by the following text: \"{query}\".\n\
                              List the reactants, the agents (catalysts, reagents, solvents) and the products, plus the \
                              reaction conditions. Infer species the text leaves implicit.");
    if attempt == InferenceAttempt::Strict {
        prompt.push('\n');
        prompt.push_str(STRICT_SUFFIX);
    }
    if !structured {
        prompt.push('\n');
        prompt.push_str(LEGACY_SUFFIX);
    }
    let request = CompletionRequest::new(prompt).with_system(SYSTEM_INSTRUCTION).with_temperature(attempt.temperature());
    if structured {
        request.with_schema(reaction_schema())
    } else {
        request
    }
}
