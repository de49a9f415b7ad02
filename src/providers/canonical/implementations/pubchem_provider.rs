//! Canonicalización contra PubChem PUG REST.
//!
//! Nombres y fórmulas se consultan por `GET compound/name/{candidato}`;
//! los candidatos con forma de SMILES van por `POST compound/smiles` porque
//! `/` y `#` no sobreviven en una ruta.
use async_trait::async_trait;
use chem_domain::is_smiles_charset;
use chem_notation::is_plausible_smiles;
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::config::CanonicalizationConfig;
use crate::errors::{CoreError, ProviderError};
use crate::providers::canonical::CanonicalizationProvider;

/// Propiedades solicitadas a PubChem.
pub const PUBCHEM_PROPERTIES: &str = "IsomericSMILES,CanonicalSMILES";
/// Claves bajo las que PubChem devuelve el SMILES, por preferencia.
const SMILES_KEYS: [&str; 4] = ["IsomericSMILES", "SMILES", "CanonicalSMILES", "ConnectivitySMILES"];

pub struct PubChemCanonicalizer {
    client: Client,
    base_url: Url,
}

impl PubChemCanonicalizer {
    pub fn new(config: &CanonicalizationConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| CoreError::Config(format!("CHEMCANVAS_PUBCHEM_URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!("CHEMCANVAS_PUBCHEM_URL: {base_url} cannot be a base URL")));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Construye la URL de consulta; `candidate` se codifica como segmento.
    fn property_url(&self, namespace: &str, candidate: Option<&str>) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut()
                                  .map_err(|_| ProviderError::NotConfigured("PubChem base URL".into()))?;
            segments.pop_if_empty().push("compound").push(namespace);
            if let Some(candidate) = candidate {
                segments.push(candidate);
            }
            segments.push("property").push(PUBCHEM_PROPERTIES).push("JSON");
        }
        Ok(url)
    }

    /// Primer SMILES de la tabla de propiedades, si lo hay.
    pub fn extract_smiles(body: &Value) -> Option<String> {
        let first = body.pointer("/PropertyTable/Properties/0")?;
        SMILES_KEYS.iter()
                   .filter_map(|k| first.get(*k).and_then(Value::as_str))
                   .map(str::trim)
                   .find(|s| is_smiles_charset(s))
                   .map(str::to_string)
    }
}

#[async_trait]
impl CanonicalizationProvider for PubChemCanonicalizer {
    fn get_name(&self) -> &str {
        "pubchem"
    }

    fn get_version(&self) -> &str {
        "pug-rest"
    }

    async fn canonicalize(&self, candidate: &str) -> Result<Option<String>, ProviderError> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Ok(None);
        }
        let request = if is_plausible_smiles(candidate) {
            self.client.post(self.property_url("smiles", None)?).form(&[("smiles", candidate)])
        } else {
            self.client.get(self.property_url("name", Some(candidate))?)
        };
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            debug!("pubchem: no match for {candidate:?} ({status})");
            return Ok(None);
        }
        let text = response.text().await?;
        if !status.is_success() {
            warn!("pubchem: {status} for {candidate:?}");
            return Err(ProviderError::Status { status: status.as_u16(), body: text });
        }
        let body: Value = serde_json::from_str(&text)?;
        Ok(Self::extract_smiles(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn canonicalizer() -> PubChemCanonicalizer {
        PubChemCanonicalizer::new(&CanonicalizationConfig { base_url: "https://pubchem.example/rest/pug/".into(),
                                                            timeout: Duration::from_secs(1) }).unwrap()
    }

    #[test]
    fn test_name_url_is_percent_encoded() {
        let url = canonicalizer().property_url("name", Some("maleic anhydride")).unwrap();
        assert_eq!(url.as_str(),
                   "https://pubchem.example/rest/pug/compound/name/maleic%20anhydride/property/IsomericSMILES,CanonicalSMILES/JSON");
    }

    #[test]
    fn test_smiles_url_has_no_candidate_segment() {
        let url = canonicalizer().property_url("smiles", None).unwrap();
        assert!(url.path().ends_with("/compound/smiles/property/IsomericSMILES,CanonicalSMILES/JSON"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let cfg = CanonicalizationConfig { base_url: "not a url".into(), timeout: Duration::from_secs(1) };
        assert!(matches!(PubChemCanonicalizer::new(&cfg), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_extract_smiles_prefers_isomeric_and_accepts_new_keys() {
        let legacy = json!({"PropertyTable": {"Properties": [{"CID": 8030, "CanonicalSMILES": "C1=COC=C1", "IsomericSMILES": "C1=COC=C1"}]}});
        assert_eq!(PubChemCanonicalizer::extract_smiles(&legacy).as_deref(), Some("C1=COC=C1"));
        let current = json!({"PropertyTable": {"Properties": [{"CID": 7923, "SMILES": "C1=CC(=O)OC1=O"}]}});
        assert_eq!(PubChemCanonicalizer::extract_smiles(&current).as_deref(), Some("C1=CC(=O)OC1=O"));
        assert_eq!(PubChemCanonicalizer::extract_smiles(&json!({"Fault": {}})), None);
    }
}
