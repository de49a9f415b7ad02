//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! También provee `build_resolver` para cablear los colaboradores externos
//! (servicio de completado Gemini, canonicalización PubChem) en un
//! `ReactionResolver`.
use dotenvy::dotenv;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::errors::CoreError;
use crate::providers::canonical::implementations::pubchem_provider::PubChemCanonicalizer;
use crate::providers::completion::implementations::gemini_provider::GeminiCompletionProvider;
use crate::resolver::{ReactionResolver, ResolverOptions};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Servicio de completado (LLM). Deshabilitado si no hay API key.
    pub completion: CompletionConfig,
    /// Servicio de canonicalización de nombres / SMILES.
    pub canonicalization: CanonicalizationConfig,
    pub resolver: ResolverOptions,
}

#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

// La API key nunca aparece en logs.
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
         .field("api_key", &self.api_key.as_ref().map(|_| "***"))
         .field("model", &self.model)
         .field("base_url", &self.base_url)
         .field("timeout", &self.timeout)
         .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CanonicalizationConfig {
    pub base_url: String,
    pub timeout: Duration,
}

pub const DEFAULT_COMPLETION_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_COMPLETION_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_PUBCHEM_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

impl Default for AppConfig {
    fn default() -> Self {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        AppConfig { completion: CompletionConfig { api_key: None,
                                                   model: DEFAULT_COMPLETION_MODEL.into(),
                                                   base_url: DEFAULT_COMPLETION_URL.into(),
                                                   timeout },
                    canonicalization: CanonicalizationConfig { base_url: DEFAULT_PUBCHEM_URL.into(), timeout },
                    resolver: ResolverOptions::default() }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, CoreError> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| CoreError::Config(format!("{name}={raw}"))),
        None => Ok(default),
    }
}

fn parse_bool_var(name: &str, default: bool) -> Result<bool, CoreError> {
    match non_empty_var(name).map(|v| v.to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(CoreError::Config(format!("{name}={v}"))),
        },
    }
}

impl AppConfig {
    /// Lee la configuración del entorno (cargando `.env` la primera vez).
    ///
    /// # Errores
    /// `CoreError::Config` si un valor numérico o booleano no se puede leer.
    pub fn from_env() -> Result<Self, CoreError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = AppConfig::default();
        let timeout = Duration::from_secs(parse_var("CHEMCANVAS_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let completion = CompletionConfig { api_key: non_empty_var("GEMINI_API_KEY"),
                                            model: non_empty_var("CHEMCANVAS_COMPLETION_MODEL").unwrap_or(defaults.completion.model),
                                            base_url: non_empty_var("CHEMCANVAS_COMPLETION_URL").unwrap_or(defaults.completion.base_url),
                                            timeout };
        let canonicalization = CanonicalizationConfig { base_url: non_empty_var("CHEMCANVAS_PUBCHEM_URL").unwrap_or(defaults.canonicalization.base_url),
                                                        timeout };
        let resolver = ResolverOptions { structured_output: parse_bool_var("CHEMCANVAS_STRUCTURED_OUTPUT", defaults.resolver.structured_output)?,
                                         canonicalize_explicit: parse_bool_var("CHEMCANVAS_CANONICALIZE_EXPLICIT",
                                                                               defaults.resolver.canonicalize_explicit)? };
        Ok(AppConfig { completion, canonicalization, resolver })
    }

    pub fn completion_enabled(&self) -> bool {
        self.completion.api_key.is_some()
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez. Si el
/// entorno es inválido se usan los valores por defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("invalid environment, using defaults: {e}");
                             AppConfig::default()
                         })
});

/// Construye un resolver con los colaboradores que la configuración habilita.
/// Sin `GEMINI_API_KEY` el resolver sólo usa la heurística.
pub fn build_resolver(config: &AppConfig) -> Result<ReactionResolver, CoreError> {
    let canonicalizer = PubChemCanonicalizer::new(&config.canonicalization)?;
    let mut resolver = ReactionResolver::new().with_canonicalizer(Box::new(canonicalizer))
                                              .with_options(config.resolver.clone());
    if config.completion_enabled() {
        let completion = GeminiCompletionProvider::new(&config.completion)?;
        info!("completion service enabled: model={}", config.completion.model);
        resolver = resolver.with_completion(Box::new(completion));
    } else {
        info!("completion service disabled (GEMINI_API_KEY not set)");
    }
    Ok(resolver)
}
