pub mod implementations;
pub mod json_text;
pub mod trait_completion;

pub use json_text::extract_json_object;
pub use trait_completion::{CompletionProvider, CompletionRequest};
