//! Diagram tools, layouts and output formats.

use std::ffi::OsString;
use std::path::Path;

/// External tools that render a diagram body to an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramTool {
    PlantUml,
    Tikz,
    Ditaa,
}

impl DiagramTool {
    pub const ALL: [Self; 3] = [Self::PlantUml, Self::Tikz, Self::Ditaa];

    /// Directive name authors write: `:::uml`, `:::tikz`, `:::ditaa`.
    #[must_use]
    pub fn directive_name(self) -> &'static str {
        match self {
            Self::PlantUml => "uml",
            Self::Tikz => "tikz",
            Self::Ditaa => "ditaa",
        }
    }

    /// Program run when none is configured.
    #[must_use]
    pub fn default_program(self) -> &'static str {
        match self {
            Self::PlantUml => "plantuml",
            Self::Tikz => "tikz2svg",
            Self::Ditaa => "ditaa",
        }
    }

    #[must_use]
    pub fn default_format(self) -> DiagramFormat {
        match self {
            Self::PlantUml | Self::Ditaa => DiagramFormat::Png,
            Self::Tikz => DiagramFormat::Svg,
        }
    }

    #[must_use]
    pub fn supports(self, format: DiagramFormat) -> bool {
        match self {
            Self::PlantUml => true,
            Self::Tikz => format == DiagramFormat::Svg,
            Self::Ditaa => format == DiagramFormat::Png,
        }
    }

    #[must_use]
    pub fn default_alt(self) -> &'static str {
        match self {
            Self::PlantUml => "uml diagram",
            Self::Tikz => "tikz diagram",
            Self::Ditaa => "ditaa diagram",
        }
    }

    #[must_use]
    pub fn default_class(self) -> &'static str {
        self.directive_name()
    }

    /// Full source handed to the tool.
    ///
    /// `libraries` only applies to TikZ, where each entry becomes a
    /// `\usetikzlibrary` line in the preamble.
    pub(crate) fn wrap(self, body: &str, libraries: &[String]) -> String {
        match self {
            Self::PlantUml => format!("@startuml\n{body}\n@enduml"),
            Self::Tikz => {
                let libs = libraries
                    .iter()
                    .map(|lib| format!("\\usetikzlibrary{{{lib}}}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    concat!(
                        "\\documentclass{{standalone}}\n",
                        "\\usepackage{{xeCJK,fontspec,xunicode}}\\usepackage{{tikz}}",
                        "\\setCJKmainfont{{Noto Sans CJK TC}}\n",
                        "{}\n",
                        "\\begin{{document}}\\begin{{tikzpicture}}\n",
                        "{}\n",
                        "\\end{{tikzpicture}}\\end{{document}}"
                    ),
                    libs, body
                )
            }
            Self::Ditaa => body.to_owned(),
        }
    }

    /// Command-line arguments (program name excluded).
    ///
    /// PlantUML picks its own output name inside `output_dir`; the other
    /// tools write to `output`.
    pub(crate) fn arguments(
        self,
        input: &Path,
        output_dir: &Path,
        output: &Path,
        format: DiagramFormat,
    ) -> Vec<OsString> {
        match self {
            Self::PlantUml => vec![
                "-o".into(),
                output_dir.into(),
                format!("-t{}", format.as_str()).into(),
                input.into(),
            ],
            Self::Tikz => vec![input.into(), output.into()],
            Self::Ditaa => vec!["-v".into(), "-o".into(), input.into(), output.into()],
        }
    }
}

/// Graphviz layout engines. Each one is a directive of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphvizLayout {
    Dot,
    Neato,
    Twopi,
    Circo,
    Fdp,
    Sfdp,
    Patchwork,
    Osage,
}

impl GraphvizLayout {
    pub const ALL: [Self; 8] = [
        Self::Dot,
        Self::Neato,
        Self::Twopi,
        Self::Circo,
        Self::Fdp,
        Self::Sfdp,
        Self::Patchwork,
        Self::Osage,
    ];

    /// Directive and program name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Neato => "neato",
            Self::Twopi => "twopi",
            Self::Circo => "circo",
            Self::Fdp => "fdp",
            Self::Sfdp => "sfdp",
            Self::Patchwork => "patchwork",
            Self::Osage => "osage",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| layout.as_str() == s)
    }
}

/// Image format of a rendered artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramFormat {
    Png,
    Svg,
}

impl DiagramFormat {
    /// Parse format from the `format` option.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Format name, also used as the file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}
