//! External tool invocation.
//!
//! File tools (PlantUML, TikZ, Ditaa) read a temporary input file and write
//! an image that is renamed to its content-addressed name. Graphviz reads
//! stdin and writes SVG to stdout.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::hash::artifact_name;
use crate::{DiagramFormat, DiagramTool, RenderError};

/// Diagram text and the options that shape its rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    pub tool: DiagramTool,
    /// Author's text, without any tool wrapper.
    pub body: String,
    pub format: DiagramFormat,
    /// TikZ libraries loaded in the preamble.
    pub libraries: Vec<String>,
}

impl DiagramSource {
    /// Source in the tool's default format.
    #[must_use]
    pub fn new(tool: DiagramTool, body: impl Into<String>) -> Self {
        Self {
            tool,
            body: body.into(),
            format: tool.default_format(),
            libraries: Vec::new(),
        }
    }

    /// Select an output format by name.
    pub fn with_format(mut self, format: &str) -> Result<Self, RenderError> {
        let unsupported = || RenderError::UnsupportedFormat {
            tool: self.tool.directive_name(),
            format: format.to_owned(),
        };
        let parsed = DiagramFormat::parse(format).ok_or_else(unsupported)?;
        if !self.tool.supports(parsed) {
            return Err(unsupported());
        }
        self.format = parsed;
        Ok(self)
    }

    #[must_use]
    pub fn with_libraries(mut self, libraries: Vec<String>) -> Self {
        self.libraries = libraries;
        self
    }
}

/// A rendered image in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// `<hash>.<ext>`
    pub file_name: String,
    pub path: PathBuf,
    /// The file already existed and the tool was not run.
    pub reused: bool,
}

/// Runs diagram tools and publishes their output.
#[derive(Debug, Clone)]
pub struct Renderer {
    output_dir: PathBuf,
    programs: HashMap<DiagramTool, String>,
    reuse_existing: bool,
}

impl Renderer {
    /// Renderer writing into `output_dir` with the default program names.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            programs: HashMap::new(),
            reuse_existing: false,
        }
    }

    /// Override the program run for `tool`.
    #[must_use]
    pub fn with_program(mut self, tool: DiagramTool, program: impl Into<String>) -> Self {
        self.programs.insert(tool, program.into());
        self
    }

    /// Skip the tool when the artifact already exists.
    #[must_use]
    pub fn with_reuse_existing(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn program(&self, tool: DiagramTool) -> &str {
        self.programs
            .get(&tool)
            .map_or_else(|| tool.default_program(), String::as_str)
    }

    /// Render `source` to `<output_dir>/<hash>.<ext>`.
    ///
    /// An existing file of the same name is replaced unless reuse is
    /// enabled. Nothing is published when the tool fails.
    pub fn render(&self, source: &DiagramSource) -> Result<RenderedArtifact, RenderError> {
        let output_dir =
            std::path::absolute(&self.output_dir).map_err(RenderError::filesystem(&self.output_dir))?;
        fs::create_dir_all(&output_dir).map_err(RenderError::filesystem(&output_dir))?;

        let file_name = artifact_name(&source.body, source.format);
        let final_path = output_dir.join(&file_name);

        if self.reuse_existing && final_path.is_file() {
            tracing::debug!(path = %final_path.display(), "Reusing rendered diagram");
            return Ok(RenderedArtifact {
                file_name,
                path: final_path,
                reused: true,
            });
        }

        let mut input = tempfile::Builder::new()
            .prefix("quill-")
            .tempfile()
            .map_err(RenderError::filesystem(std::env::temp_dir()))?;
        input
            .write_all(source.tool.wrap(&source.body, &source.libraries).as_bytes())
            .and_then(|()| input.flush())
            .map_err(RenderError::filesystem(input.path()))?;

        let stem = input
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let produced = output_dir.join(format!("{stem}.{}", source.format.as_str()));

        let program = self.program(source.tool);
        let args = source
            .tool
            .arguments(input.path(), &output_dir, &produced, source.format);
        let mut command = Command::new(program);
        command.args(&args).stdin(Stdio::null());
        run(program, &mut command)?;

        if let Err(e) = fs::remove_file(&final_path) {
            tracing::debug!(path = %final_path.display(), error = %e, "Nothing to replace");
        }
        fs::rename(&produced, &final_path).map_err(RenderError::filesystem(&produced))?;
        tracing::debug!(path = %final_path.display(), "Rendered diagram");

        Ok(RenderedArtifact {
            file_name,
            path: final_path,
            reused: false,
        })
    }
}

/// Pipe `input` through `program -Tsvg` and return its stdout.
pub fn render_piped(program: &str, input: &str) -> Result<String, RenderError> {
    let spawn_error = |source| RenderError::Spawn {
        program: program.to_owned(),
        source,
    };

    tracing::debug!(program, "Running {program} -Tsvg");
    let mut child = Command::new(program)
        .arg("-Tsvg")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    // Feed stdin from another thread so a large graph can't fill both pipes.
    let mut stdin = child.stdin.take();
    let (output, written) = std::thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin.as_mut() {
            Some(pipe) => pipe.write_all(input.as_bytes()),
            None => Ok(()),
        });
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
        (output, written)
    });

    // A tool that exits early breaks the pipe; its status explains why.
    let output = output.map_err(spawn_error)?;
    check_status(program, &output)?;
    written.map_err(spawn_error)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn run(program: &str, command: &mut Command) -> Result<(), RenderError> {
    tracing::debug!(command = ?command, "Running {program}");
    let output = command.output().map_err(|source| RenderError::Spawn {
        program: program.to_owned(),
        source,
    })?;
    check_status(program, &output)
}

fn check_status(program: &str, output: &Output) -> Result<(), RenderError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::debug!(program, status = %output.status, stderr = %stderr, "Tool finished");

    if output.status.success() {
        return Ok(());
    }

    let message = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };
    Err(RenderError::ToolFailure {
        tool: program.to_owned(),
        stderr: if message.is_empty() {
            output.status.to_string()
        } else {
            message.to_owned()
        },
    })
}

#[cfg(all(test, unix))]
pub(crate) mod testing {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Write an executable shell script standing in for a diagram tool.
    pub(crate) fn fake_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Copies the input to `<dir>/<input name>.<format>` like PlantUML does.
    pub(crate) const PLANTUML: &str = r#"cp "$4" "$2/$(basename "$4").${3#-t}""#;
    /// `tikz2svg INPUT OUTPUT`
    pub(crate) const TIKZ: &str = r#"cp "$1" "$2""#;
    /// `ditaa -v -o INPUT OUTPUT`
    pub(crate) const DITAA: &str = r#"cp "$3" "$4""#;
    /// Wraps stdin in an `<svg>` element.
    pub(crate) const DOT: &str = r#"printf '<svg>'; cat; printf '</svg>'"#;
    pub(crate) const FAILING: &str = "echo 'Syntax Error? (line 2)' >&2; exit 1";
}
