//! Extracción de un objeto JSON de texto libre producido por un modelo
//! (bloques ```json, prosa alrededor).
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("fenced block pattern"));

/// Intenta, en orden: el texto completo, el primer bloque con vallas y el
/// tramo entre la primera `{` y la última `}`. Sólo acepta objetos.
pub fn extract_json_object(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty response".into());
    }
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(v);
    }
    if let Some(inner) = FENCED_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
        if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(inner.as_str().trim()) {
            return Ok(v);
        }
    }
    let Some(start) = trimmed.find('{') else {
        return Err("no '{' found in response".into());
    };
    let Some(end) = trimmed.rfind('}').filter(|end| *end > start) else {
        return Err("no closing '}' found in response".into());
    };
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(v @ Value::Object(_)) => Ok(v),
        Ok(_) => Err("response JSON is not an object".into()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#).unwrap()["a"], 1);
    }

    #[test]
    fn test_fenced_object() {
        let text = "Here you go:\n```json\n{\"reactants\": [\"CCO\"]}\n```\nEnjoy";
        assert_eq!(extract_json_object(text).unwrap()["reactants"][0], "CCO");
    }

    #[test]
    fn test_object_in_prose() {
        let text = "The answer is {\"products\": []} as requested.";
        assert!(extract_json_object(text).unwrap()["products"].is_array());
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(extract_json_object("").is_err());
        assert!(extract_json_object("[1, 2]").is_err());
        assert!(extract_json_object("no json here").is_err());
        assert!(extract_json_object("{ broken").is_err());
    }
}
