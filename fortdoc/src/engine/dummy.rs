use super::{DocEngine, DocRequest};
use anyhow::Result;

/// Writes the same fixed text for every construct.
pub struct DummyEngine {
    text: String,
}

impl DummyEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl DocEngine for DummyEngine {
    fn name(&self) -> &str {
        "dummy"
    }

    fn generate(&mut self, _request: &DocRequest) -> Result<String> {
        Ok(self.text.clone())
    }
}
