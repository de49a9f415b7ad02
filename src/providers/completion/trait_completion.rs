use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ProviderError;

/// Petición al servicio de completado.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Instrucción de sistema (rol del modelo).
    pub system: Option<String>,
    pub prompt: String,
    /// Esquema JSON exigido a la respuesta; `None` en el camino sin esquema.
    pub response_schema: Option<Value>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { system: None, prompt: prompt.into(), response_schema: None, temperature: 0.2 }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Servicio de completado (p. ej. un LLM alojado).
///
/// El resolver trata todo lo que devuelve como no confiable y valida la
/// forma antes de usarlo.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_version(&self) -> &str;

    /// Respuesta estructurada conforme a `request.response_schema`.
    async fn complete_json(&self, request: &CompletionRequest) -> Result<Value, ProviderError>;

    /// Respuesta en texto libre (camino heredado sin esquema).
    async fn complete_text(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        fn get_name(&self) -> &str { "echo" }
        fn get_version(&self) -> &str { "0.0" }
        async fn complete_json(&self, request: &CompletionRequest) -> Result<Value, ProviderError> {
            Ok(json!({ "prompt": request.prompt }))
        }
        async fn complete_text(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
            Ok(request.prompt.clone())
        }
    }

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new("aldol").with_system("chemist")
                                                 .with_schema(json!({"type": "object"}))
                                                 .with_temperature(0.0);
        assert_eq!(req.system.as_deref(), Some("chemist"));
        assert!(req.response_schema.is_some());
        assert_eq!(req.temperature, 0.0);
    }

    #[tokio::test]
    async fn test_provider_object_safety() {
        let provider: Box<dyn CompletionProvider> = Box::new(EchoProvider);
        assert_eq!(provider.get_name(), "echo");
        let v = provider.complete_json(&CompletionRequest::new("x")).await.unwrap();
        assert_eq!(v["prompt"], "x");
        assert_eq!(provider.complete_text(&CompletionRequest::new("y")).await.unwrap(), "y");
    }
}
