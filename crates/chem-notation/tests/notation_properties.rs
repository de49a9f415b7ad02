use chem_domain::{ReactionComponent, ReactionRole};
use chem_notation::{compose_from_components, decompose_reaction_smiles, normalize_reaction_arrows, parse_reaction_smiles, sanitize,
                    strip_atom_mappings};
use std::collections::BTreeSet;

fn component(role: ReactionRole, smiles: &str) -> ReactionComponent {
    ReactionComponent::from_smiles(role, smiles).unwrap()
}

#[test]
fn composed_reaction_decomposes_into_same_role_sets() {
    let components = vec![component(ReactionRole::Reactant, "CC(=O)O"),
                          component(ReactionRole::Reactant, "CCO"),
                          component(ReactionRole::Agent, "OS(=O)(=O)O"),
                          component(ReactionRole::Product, "CCOC(C)=O"),];
    let reaction = compose_from_components(&components).unwrap();
    assert_eq!(reaction, "CC(=O)O.CCO>OS(=O)(=O)O>CCOC(C)=O");

    let groups = decompose_reaction_smiles(&reaction).unwrap();
    for role in ReactionRole::ALL {
        let expected: BTreeSet<&str> = components.iter().filter(|c| c.role() == role).filter_map(|c| c.smiles()).collect();
        let actual: BTreeSet<&str> = groups.group(role).iter().map(String::as_str).collect();
        assert_eq!(expected, actual, "role {role}");
    }
}

#[test]
fn composing_without_agents_never_leaves_a_dangling_arrow() {
    let components = vec![component(ReactionRole::Reactant, "C=CC=C"),
                          component(ReactionRole::Reactant, "C=C"),
                          component(ReactionRole::Product, "C1=CCCCC1"),
                          ReactionComponent::new(ReactionRole::Agent, "heat").with_note("not a species"),];
    let reaction = compose_from_components(&components).unwrap();
    assert_eq!(reaction, "C=CC=C.C=C>>C1=CCCCC1");
    assert!(!reaction.contains(">>>"));
    assert!(!reaction.contains("><>"));
}

#[test]
fn sanitize_and_normalize_agree_on_single_arrow() {
    assert!(sanitize("A>B").unwrap().contains(">>"));
    assert!(normalize_reaction_arrows("A>B").contains(">>"));
}

#[test]
fn sanitized_error_message_parses_to_components() {
    let raw = "Original error: unable to parse reaction smiles \"reactants: [CH3:1][OH:2].O=C=O>CC(=O)O\"";
    let cleaned = sanitize(raw).unwrap();
    let unmapped = strip_atom_mappings(cleaned.as_str());
    assert_eq!(unmapped, "[CH3][OH].O=C=O>>CC(=O)O");
    let groups = parse_reaction_smiles(&unmapped).unwrap();
    assert_eq!(groups.reactants.len(), 2);
    assert_eq!(groups.products, vec!["CC(=O)O"]);
}

#[test]
fn no_arrow_text_passes_through_trimmed() {
    for text in ["CCO", "  benzene ", "c1ccccc1\n"] {
        assert_eq!(sanitize(text).as_deref(), Some(text.trim()));
    }
}

#[test]
fn sanitize_is_idempotent_over_fragment_combinations() {
    let fragments = [".", " ", "product", "Reactants:", "kek", "rdkit", "ule", "error", "\"", "CCO", "C", "[Na+]", ">", " > ", "->", "=>",
                     "<=>", "..", "products: ", "kekule.js", "O=C=O"];
    for a in fragments {
        for b in fragments {
            for c in fragments {
                let text = format!("{a}{b}{c} > C{a}");
                if let Some(once) = sanitize(text.as_str()) {
                    assert_eq!(sanitize(once.as_str()).as_deref(), Some(once.as_str()), "not idempotent for {text:?}");
                }
            }
        }
    }
}

#[test]
fn sanitize_reads_role_labels_after_the_arrow() {
    assert_eq!(sanitize("reactants: CCO -> products: CC=O").as_deref(), Some("CCO>>CC=O"));
    assert_eq!(sanitize(". product CC > C").as_deref(), Some("CC>>C"));
}
