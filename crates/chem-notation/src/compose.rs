//! Composición y descomposición de `reactivos>agentes>productos`.
use chem_domain::{MissingSides, ReactionComponent, ReactionRole};

/// Grupos de un reaction SMILES, cada uno como lista de moléculas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionGroups {
    pub reactants: Vec<String>,
    pub agents: Vec<String>,
    pub products: Vec<String>,
}

impl ReactionGroups {
    pub fn group(&self, role: ReactionRole) -> &[String] {
        match role {
            ReactionRole::Reactant => &self.reactants,
            ReactionRole::Agent => &self.agents,
            ReactionRole::Product => &self.products,
        }
    }

    pub fn missing_sides(&self) -> Option<MissingSides> {
        MissingSides::from_presence(!self.reactants.is_empty(), !self.products.is_empty())
    }

    pub fn compose(&self) -> Result<String, MissingSides> {
        compose_reaction_smiles(&self.reactants, &self.agents, &self.products)
    }
}

fn join_group<S: AsRef<str>>(group: &[S]) -> String {
    group.iter()
         .map(|s| s.as_ref().trim())
         .filter(|s| !s.is_empty())
         .collect::<Vec<_>>()
         .join(".")
}

/// Une los tres grupos. Sin agentes produce `r>>p`; con agentes `r>a>p`.
/// Falla indicando el lado vacío si no hay reactivos o productos.
pub fn compose_reaction_smiles<S: AsRef<str>>(reactants: &[S], agents: &[S], products: &[S]) -> Result<String, MissingSides> {
    let reactants = join_group(reactants);
    let agents = join_group(agents);
    let products = join_group(products);
    if let Some(missing) = MissingSides::from_presence(!reactants.is_empty(), !products.is_empty()) {
        return Err(missing);
    }
    Ok(format!("{reactants}>{agents}>{products}"))
}

fn smiles_with_role(components: &[ReactionComponent], role: ReactionRole) -> Vec<&str> {
    components.iter().filter(|c| c.role() == role).filter_map(|c| c.smiles()).collect()
}

/// Compone a partir de componentes resueltos; los que no tienen SMILES se
/// ignoran.
pub fn compose_from_components(components: &[ReactionComponent]) -> Result<String, MissingSides> {
    compose_reaction_smiles(&smiles_with_role(components, ReactionRole::Reactant),
                            &smiles_with_role(components, ReactionRole::Agent),
                            &smiles_with_role(components, ReactionRole::Product))
}

/// Parte un reaction SMILES en sus grupos sin validar las moléculas.
/// Acepta `A>B` como abreviatura de `A>>B`.
pub fn decompose_reaction_smiles(reaction_smiles: &str) -> Option<ReactionGroups> {
    let split = |group: &str| -> Vec<String> {
        group.split('.').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
    };
    let segments: Vec<&str> = reaction_smiles.trim().split('>').collect();
    match segments.as_slice() {
        [reactants, products] => Some(ReactionGroups { reactants: split(reactants),
                                                       agents: Vec::new(),
                                                       products: split(products) }),
        [reactants, agents, products] => Some(ReactionGroups { reactants: split(reactants),
                                                               agents: split(agents),
                                                               products: split(products) }),
        _ => None,
    }
}
