use chem_domain::{MechanismStage, ReactionComponent, ReactionResolution, ReactionRole};

fn resolved(role: ReactionRole, label: &str, smiles: &str) -> ReactionComponent {
    ReactionComponent::new(role, label).with_label(label).with_smiles(smiles).unwrap()
}

#[test]
fn test_resolution_with_agents_round_trips_groups() {
    // Two reactants, one agent, one product: every group of the reaction SMILES
    // must match the per-role SMILES
    let components = vec![resolved(ReactionRole::Reactant, "acetic acid", "CC(=O)O"),
                          resolved(ReactionRole::Reactant, "ethanol", "CCO"),
                          resolved(ReactionRole::Agent, "sulfuric acid", "OS(=O)(=O)O"),
                          resolved(ReactionRole::Product, "ethyl acetate", "CCOC(C)=O"),];
    let r = ReactionResolution::new("CC(=O)O.CCO>OS(=O)(=O)O>CCOC(C)=O", components, true).unwrap();
    assert_eq!(r.components_with_role(ReactionRole::Reactant).count(), 2);
    assert_eq!(r.components_with_role(ReactionRole::Agent).count(), 1);
    assert_eq!(r.components_with_role(ReactionRole::Product).count(), 1);
    assert!(r.used_external_inference());
}

#[test]
fn test_resolution_serializes_enrichment_for_ui() {
    let components = vec![resolved(ReactionRole::Reactant, "furan", "c1ccoc1"),
                          resolved(ReactionRole::Product, "adduct", "O=C1OC(=O)C2C3C=CC(O3)C12"),];
    let stage = MechanismStage::new("transition state", Some("concerted [4+2]".into()), vec!["c1ccoc1".into()]);
    let r = ReactionResolution::new("c1ccoc1>>O=C1OC(=O)C2C3C=CC(O3)C12", components, true).unwrap()
                                                                                          .with_reaction_name(Some("Diels-Alder".into()))
                                                                                          .with_conditions(vec!["heat".into()])
                                                                                          .with_mechanism_stages(vec![stage]);
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["reactionName"], "Diels-Alder");
    assert_eq!(v["usedExternalInference"], true);
    assert_eq!(v["mechanismStages"][0]["label"], "transition state");
    assert!(v.get("confidence").is_none());
}

#[test]
fn test_blank_reaction_name_is_absent() {
    let components = vec![resolved(ReactionRole::Reactant, "a", "C"), resolved(ReactionRole::Product, "b", "CO")];
    let r = ReactionResolution::new("C>>CO", components, false).unwrap().with_reaction_name(Some("  ".into()));
    assert_eq!(r.reaction_name(), None);
    assert_eq!(r.to_string(), "C>>CO");
}
