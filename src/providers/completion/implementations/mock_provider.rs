use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::ProviderError;
use crate::providers::completion::{CompletionProvider, CompletionRequest};

/// Respuesta enlatada del proveedor simulado.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Json(Value),
    Text(String),
    /// Simula un fallo de transporte.
    Fail(String),
}

/// Proveedor de completado para pruebas: devuelve las respuestas en el orden
/// en que se encolaron y registra cada petición recibida.
pub struct ScriptedCompletionProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletionProvider {
    pub fn new<I>(replies: I) -> Self
        where I: IntoIterator<Item = ScriptedReply>
    {
        Self { replies: Mutex::new(replies.into_iter().collect()),
               requests: Mutex::new(Vec::new()) }
    }

    /// Peticiones recibidas hasta ahora.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn next_reply(&self, request: &CompletionRequest) -> Result<ScriptedReply, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .ok_or_else(|| ProviderError::NotConfigured("scripted replies exhausted".into()))
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletionProvider {
    fn get_name(&self) -> &str {
        "scripted"
    }

    fn get_version(&self) -> &str {
        "1.0.0"
    }

    async fn complete_json(&self, request: &CompletionRequest) -> Result<Value, ProviderError> {
        match self.next_reply(request)? {
            ScriptedReply::Json(v) => Ok(v),
            ScriptedReply::Text(t) => serde_json::from_str(&t).map_err(ProviderError::from),
            ScriptedReply::Fail(msg) => Err(ProviderError::Transport(msg)),
        }
    }

    async fn complete_text(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        match self.next_reply(request)? {
            ScriptedReply::Json(v) => Ok(v.to_string()),
            ScriptedReply::Text(t) => Ok(t),
            ScriptedReply::Fail(msg) => Err(ProviderError::Transport(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replies_in_order_then_exhausted() {
        let provider = ScriptedCompletionProvider::new(vec![ScriptedReply::Json(json!({"n": 1})),
                                                            ScriptedReply::Fail("timeout".into())]);
        let req = CompletionRequest::new("q");
        let first = tokio_test::block_on(provider.complete_json(&req)).unwrap();
        assert_eq!(first["n"], 1);
        let second = tokio_test::block_on(provider.complete_json(&req)).unwrap_err();
        assert!(matches!(second, ProviderError::Transport(_)));
        let third = tokio_test::block_on(provider.complete_text(&req)).unwrap_err();
        assert!(matches!(third, ProviderError::NotConfigured(_)));
        assert_eq!(provider.calls(), 3);
    }
}
