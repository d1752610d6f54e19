//! External script procedures
//!
//! The script runs in its own directory with the current context as a JSON
//! object on stdin. Whatever JSON object it prints on stdout becomes the new
//! context; printing nothing keeps the context as it was.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::core::{AssemblyError, Context, Result};
use crate::generation::Procedure;

/// Result of running a script
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Procedure backed by a script run through an interpreter
pub struct CommandProcedure {
    program: String,
    script: PathBuf,
}

impl CommandProcedure {
    pub fn new(program: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }

    fn name(&self) -> String {
        self.script.display().to_string()
    }

    fn run(&self, stdin_payload: &[u8]) -> Result<CommandResult> {
        let working_dir = self.script.parent().unwrap_or(Path::new(""));
        let script_name = self.script.file_name().unwrap_or(self.script.as_os_str());

        let mut command = Command::new(&self.program);
        command
            .arg(script_name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if !working_dir.as_os_str().is_empty() {
            command.current_dir(working_dir);
        }

        let mut child = command.spawn().map_err(|e| {
            AssemblyError::procedure(
                self.name(),
                format!("failed to start '{}': {e}", self.program),
            )
        })?;

        // The script may stream output before it has read all of its input
        let writer = child.stdin.take().map(|mut stdin| {
            let payload = stdin_payload.to_vec();
            thread::spawn(move || match stdin.write_all(&payload) {
                // A script that ignores its input may exit before reading it
                Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| AssemblyError::procedure(self.name(), "stdin writer panicked"))??;
        }

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

impl Procedure for CommandProcedure {
    fn process(&self, context: Context) -> Result<Context> {
        let payload = serde_json::to_vec(&context)?;

        debug!(program = %self.program, script = %self.script.display(), "Running procedure script");
        let result = self.run(&payload)?;

        if !result.is_success() {
            return Err(AssemblyError::procedure(
                self.name(),
                format!(
                    "exited with code {}: {}",
                    result.exit_code,
                    result.stderr.trim()
                ),
            ));
        }

        let stdout = result.stdout.trim();
        if stdout.is_empty() {
            return Ok(context);
        }

        match serde_json::from_str::<JsonValue>(stdout) {
            Ok(JsonValue::Object(map)) => Ok(Context::from_json_object(map)),
            Ok(_) => Err(AssemblyError::procedure(
                self.name(),
                "output must be a JSON object",
            )),
            Err(e) => Err(AssemblyError::procedure(
                self.name(),
                format!("output is not valid JSON: {e}"),
            )),
        }
    }
}
