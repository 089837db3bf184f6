//! Block directive trait.
//!
//! Block directives use triple-colon syntax and carry a body:
//!
//! ```text
//! :::uml{format=svg alt="login"}
//! Alice -> Bob: hello
//! :::
//! ```

use crate::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for block directives: `:::name[content]{attrs}` ... `:::`
///
/// The lines between the opening and closing lines are handed to
/// [`process`](Self::process) verbatim, joined with `\n`.
///
/// # Example
///
/// ```
/// use quill_directives::{BlockDirective, DirectiveArgs, DirectiveContext, DirectiveOutput};
///
/// struct Shout;
///
/// impl BlockDirective for Shout {
///     fn name(&self) -> &str { "shout" }
///
///     fn process(
///         &mut self,
///         _args: DirectiveArgs,
///         body: &str,
///         _ctx: &DirectiveContext,
///     ) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<p>{}</p>", body.to_uppercase()))
///     }
/// }
/// ```
pub trait BlockDirective: Send {
    /// Directive name, matched against `:::name`.
    fn name(&self) -> &str;

    /// Process the directive body.
    fn process(&mut self, args: DirectiveArgs, body: &str, ctx: &DirectiveContext)
    -> DirectiveOutput;
}
