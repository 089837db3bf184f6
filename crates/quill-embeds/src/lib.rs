//! Video embed directives for Quill.
//!
//! ```text
//! ::youku[XMTI4NTA3MjQ0]{align=center width=640 height=480}
//! ```

use quill_directives::{DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective, escape_html};

const DEFAULT_WIDTH: u32 = 420;
const DEFAULT_HEIGHT: u32 = 315;

/// Invalid `::youku` usage.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EmbedError {
    #[error("video id is required")]
    MissingVideoId,
    #[error("\"{0}\" unknown; choose from \"left\", \"center\" or \"right\"")]
    InvalidAlign(String),
    #[error("{option} must be a positive integer, got \"{value}\"")]
    InvalidDimension { option: &'static str, value: String },
}

/// Horizontal placement of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// `::youku[VIDEO_ID]{align width height}`: embedded Youku player.
#[derive(Debug, Default)]
pub struct YoukuDirective;

impl YoukuDirective {
    /// Player markup for the given arguments.
    pub fn render(args: &DirectiveArgs) -> Result<String, EmbedError> {
        let video_id = args.content.trim();
        if video_id.is_empty() {
            return Err(EmbedError::MissingVideoId);
        }

        let align = match args.get("align") {
            Some(value) => {
                Align::parse(value).ok_or_else(|| EmbedError::InvalidAlign(value.to_owned()))?
            }
            None => Align::default(),
        };
        let width = dimension(args, "width", DEFAULT_WIDTH)?;
        let height = dimension(args, "height", DEFAULT_HEIGHT)?;

        Ok(format!(
            concat!(
                r#"<div class="embed-responsive embed-responsive-16by9" align="{align}">"#,
                r#"<embed src="http://player.youku.com/player.php/sid/{id}/v.swf" "#,
                r#"allowFullScreen="true" quality="high" width="{width}" height="{height}" "#,
                r#"align="middle" allowScriptAccess="always" type="application/x-shockwave-flash">"#,
                "</embed></div>"
            ),
            align = align.as_str(),
            id = escape_html(video_id),
            width = width,
            height = height,
        ))
    }
}

impl LeafDirective for YoukuDirective {
    fn name(&self) -> &'static str {
        "youku"
    }

    fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
        Self::render(&args).into()
    }
}

fn dimension(args: &DirectiveArgs, option: &'static str, default: u32) -> Result<u32, EmbedError> {
    let Some(value) = args.get(option) else {
        return Ok(default);
    };
    value
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| EmbedError::InvalidDimension {
            option,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_directives::{DirectiveProcessor, Severity};

    use super::*;

    fn render(content: &str, attrs: &str) -> Result<String, EmbedError> {
        YoukuDirective::render(&DirectiveArgs::parse(content, attrs))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            render("XMTI4NTA3MjQ0", "").unwrap(),
            concat!(
                r#"<div class="embed-responsive embed-responsive-16by9" align="left">"#,
                r#"<embed src="http://player.youku.com/player.php/sid/XMTI4NTA3MjQ0/v.swf" "#,
                r#"allowFullScreen="true" quality="high" width="420" height="315" "#,
                r#"align="middle" allowScriptAccess="always" type="application/x-shockwave-flash">"#,
                "</embed></div>"
            )
        );
    }

    #[test]
    fn test_options() {
        let html = render(" XMTI4NTA3MjQ0 ", "align=center width=640 height=480").unwrap();
        assert!(html.starts_with(r#"<div class="embed-responsive embed-responsive-16by9" align="center">"#));
        assert!(html.contains("/sid/XMTI4NTA3MjQ0/v.swf"));
        assert!(html.contains(r#"width="640" height="480""#));
    }

    #[test]
    fn test_missing_id() {
        assert_eq!(render("  ", ""), Err(EmbedError::MissingVideoId));
    }

    #[test]
    fn test_invalid_align() {
        assert_eq!(
            render("abc", "align=middle"),
            Err(EmbedError::InvalidAlign("middle".to_owned()))
        );
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(
            render("abc", "width=wide"),
            Err(EmbedError::InvalidDimension {
                option: "width",
                value: "wide".to_owned()
            })
        );
        assert!(render("abc", "height=0").is_err());
    }

    #[test]
    fn test_through_processor() {
        let mut processor = DirectiveProcessor::new().with_leaf(YoukuDirective);
        let mut html = processor.process("Watch:\n\n::youku[abc]{align=right}\n\n::youku[]\n");
        processor.post_process(&mut html);

        assert!(html.contains(r#"align="right"><embed src="http://player.youku.com/player.php/sid/abc/v.swf""#));
        assert!(html.contains("video id is required"));

        let diagnostics = processor.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].line, 5);
    }
}
