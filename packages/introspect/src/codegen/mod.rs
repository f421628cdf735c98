pub mod typescript;

use crate::document::{Declaration, Document, Member};

/// Renders generated declarations into a target syntax
pub trait DeclarationEmitter {
    /// Render one interface member (key + optional marker + type)
    fn emit_member(&self, member: &Member) -> String;

    /// Render a complete declaration block
    fn emit_declaration(&self, declaration: &Declaration) -> String;

    /// Render the prelude followed by every declaration
    fn emit_document(&self, document: &Document) -> String;
}
