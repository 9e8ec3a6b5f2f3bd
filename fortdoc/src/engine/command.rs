use super::{DocEngine, DocRequest};
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Environment variable carrying the construct keyword to the program.
pub const KIND_VAR: &str = "FORTDOC_KIND";

/// Runs an external program once per construct.
///
/// The construct source is written to the program's stdin and its trimmed
/// stdout becomes the documentation. A non-zero exit is an error.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }
}

impl DocEngine for CommandEngine {
    fn name(&self) -> &str {
        "command"
    }

    fn generate(&mut self, request: &DocRequest) -> Result<String> {
        debug!(program = %self.program, kind = %request.kind, "running doc command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(KIND_VAR, request.kind.keyword())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to run {}", self.program))?;

        // stdin must be fed while wait_with_output drains stdout.
        let mut stdin = child.stdin.take().context("child stdin was not captured")?;
        let source = request.source.clone();
        let writer = thread::spawn(move || stdin.write_all(source.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for {}", self.program))?;

        if !output.status.success() {
            bail!("{} exited with {}", self.program, output.status);
        }
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e).context("failed to write construct source"),
            Err(_) => bail!("stdin writer for {} panicked", self.program),
        }

        let text = String::from_utf8(output.stdout)
            .with_context(|| format!("{} printed invalid UTF-8", self.program))?;
        Ok(text.trim().to_string())
    }
}
