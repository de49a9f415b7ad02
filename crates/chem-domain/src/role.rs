use serde::{Deserialize, Serialize};
use std::fmt;

/// Papel de una especie dentro de la reacción. Los agentes (catalizadores,
/// reactivos, disolventes) ocupan el hueco central de `reactivos>agentes>productos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionRole {
    Reactant,
    Agent,
    Product,
}

impl ReactionRole {
    /// Orden canónico de los grupos en un reaction SMILES.
    pub const ALL: [ReactionRole; 3] = [ReactionRole::Reactant, ReactionRole::Agent, ReactionRole::Product];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionRole::Reactant => "reactant",
            ReactionRole::Agent => "agent",
            ReactionRole::Product => "product",
        }
    }
}

impl fmt::Display for ReactionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lados obligatorios que faltan al recomponer una reacción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingSides {
    Reactants,
    Products,
    Both,
}

impl MissingSides {
    /// `None` cuando ambos lados están presentes.
    pub fn from_presence(has_reactants: bool, has_products: bool) -> Option<Self> {
        match (has_reactants, has_products) {
            (true, true) => None,
            (false, true) => Some(MissingSides::Reactants),
            (true, false) => Some(MissingSides::Products),
            (false, false) => Some(MissingSides::Both),
        }
    }

    pub fn reactants_missing(&self) -> bool {
        matches!(self, MissingSides::Reactants | MissingSides::Both)
    }

    pub fn products_missing(&self) -> bool {
        matches!(self, MissingSides::Products | MissingSides::Both)
    }
}

impl fmt::Display for MissingSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSides::Reactants => write!(f, "missing reactants"),
            MissingSides::Products => write!(f, "missing products"),
            MissingSides::Both => write!(f, "missing reactants and products"),
        }
    }
}
