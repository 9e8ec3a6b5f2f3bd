//! Documentation engines: trait-based dispatch on the configured engine name.

pub mod command;
pub mod dummy;

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use fortdoc_syntax::ConstructKind;

/// What an engine is asked to document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    pub kind: ConstructKind,
    /// Full source text of the construct, nested constructs included.
    pub source: String,
}

/// Produces documentation text for one construct.
///
/// The returned text is plain prose, one line per documentation line; the
/// caller adds comment markers and indentation.
pub trait DocEngine {
    fn name(&self) -> &str;
    fn generate(&mut self, request: &DocRequest) -> Result<String>;
}

/// Create the engine selected in `config`.
pub fn create_engine(config: &Config) -> Result<Box<dyn DocEngine>> {
    match config.engine.as_str() {
        "dummy" => Ok(Box::new(dummy::DummyEngine::new(&config.dummy_text))),
        "command" => {
            let (program, args) = config
                .command
                .split_first()
                .context("the command engine needs a program: set `command` or pass --command")?;
            Ok(Box::new(command::CommandEngine::new(program, args)))
        }
        other => Err(anyhow!("unknown engine: {}. Use dummy or command", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_creates_dummy() {
        let engine = create_engine(&Config::default()).unwrap();
        assert_eq!(engine.name(), "dummy");
    }

    #[test]
    fn command_engine_requires_program() {
        let config = Config {
            engine: "command".to_string(),
            ..Config::default()
        };
        let err = create_engine(&config).err().unwrap();
        assert!(err.to_string().contains("needs a program"));

        let config = Config {
            engine: "command".to_string(),
            command: vec!["cat".to_string()],
            ..Config::default()
        };
        assert_eq!(create_engine(&config).unwrap().name(), "command");
    }

    #[test]
    fn unknown_engine_is_rejected() {
        let config = Config {
            engine: "oracle".to_string(),
            ..Config::default()
        };
        let err = create_engine(&config).err().unwrap();
        assert_eq!(err.to_string(), "unknown engine: oracle. Use dummy or command");
    }
}
