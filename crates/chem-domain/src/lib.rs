// chem-domain library entry point
pub mod error;
pub mod mechanism_stage;
pub mod reaction_component;
pub mod reaction_resolution;
pub mod role;
pub mod smiles;
pub use error::DomainError;
pub use mechanism_stage::MechanismStage;
pub use reaction_component::ReactionComponent;
pub use reaction_resolution::ReactionResolution;
pub use role::{MissingSides, ReactionRole};
pub use smiles::{is_smiles_char, is_smiles_charset};
