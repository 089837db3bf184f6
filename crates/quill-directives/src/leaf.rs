//! Leaf directive trait.
//!
//! Leaf directives use double-colon syntax: `::name[content]{attrs}`

use crate::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for leaf directives: `::name[content]{attrs}`
///
/// Leaf directives are self-contained, single-line elements such as
/// embedded video players.
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its
/// own processor instance.
pub trait LeafDirective: Send {
    /// Directive name, matched against `::name`.
    fn name(&self) -> &str;

    /// Process the directive.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;
}
