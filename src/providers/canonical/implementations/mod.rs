pub mod mock_provider;
pub mod pubchem_provider;
