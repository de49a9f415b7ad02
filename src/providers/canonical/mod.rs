pub mod implementations;
pub mod trait_canonical;

pub use trait_canonical::CanonicalizationProvider;
