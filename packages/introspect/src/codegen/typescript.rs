use crate::codegen::DeclarationEmitter;
use crate::document::{Declaration, Document, Member};
use crate::naming::sanitize_key;

const CODE_INDENT: &str = "  ";

/// TypeScript declaration emitter
pub struct TypeScriptEmitter {
    indent: &'static str,
}

impl TypeScriptEmitter {
    pub fn new() -> Self {
        Self {
            indent: CODE_INDENT,
        }
    }
}

impl Default for TypeScriptEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationEmitter for TypeScriptEmitter {
    fn emit_member(&self, member: &Member) -> String {
        let optional_marker = if member.optional { "?" } else { "" };
        format!(
            "{}{}: {}",
            sanitize_key(&member.key),
            optional_marker,
            member.type_text
        )
    }

    fn emit_declaration(&self, declaration: &Declaration) -> String {
        match declaration {
            Declaration::Interface { name, members } => {
                let mut lines = vec![format!("export interface {} {{", name)];
                for member in members {
                    lines.push(format!("{}{};", self.indent, self.emit_member(member)));
                }
                lines.push("}".to_string());
                lines.join("\n") + "\n"
            }
            Declaration::Alias { name, target } => {
                format!("export type {} = {};\n", name, target)
            }
            Declaration::Raw(text) => {
                if text.ends_with('\n') {
                    text.clone()
                } else {
                    format!("{}\n", text)
                }
            }
        }
    }

    fn emit_document(&self, document: &Document) -> String {
        let mut output = String::new();

        for line in &document.prelude {
            output.push_str(line);
            output.push('\n');
        }
        if !document.prelude.is_empty() && !document.declarations.is_empty() {
            output.push('\n');
        }

        for declaration in &document.declarations {
            output.push_str(&self.emit_declaration(declaration));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(key: &str, optional: bool, type_text: &str) -> Member {
        Member {
            key: key.to_string(),
            optional,
            type_text: type_text.to_string(),
        }
    }

    #[test]
    fn test_emit_member() {
        let emitter = TypeScriptEmitter::new();

        assert_eq!(emitter.emit_member(&member("name", false, "string")), "name: string");
        assert_eq!(emitter.emit_member(&member("age", true, "any")), "age?: any");
        assert_eq!(
            emitter.emit_member(&member("content/values", false, "any")),
            "\"content/values\": any"
        );
    }

    #[test]
    fn test_emit_interface() {
        let emitter = TypeScriptEmitter::new();
        let declaration = Declaration::Interface {
            name: "Person".to_string(),
            members: vec![member("name", false, "string"), member("age", true, "any")],
        };

        assert_eq!(
            emitter.emit_declaration(&declaration),
            "export interface Person {\n  name: string;\n  age?: any;\n}\n"
        );
    }

    #[test]
    fn test_emit_alias_and_raw() {
        let emitter = TypeScriptEmitter::new();

        assert_eq!(
            emitter.emit_declaration(&Declaration::Alias {
                name: "Empty".to_string(),
                target: "Record<string, any>".to_string(),
            }),
            "export type Empty = Record<string, any>;\n"
        );
        assert_eq!(
            emitter.emit_declaration(&Declaration::Raw("export type Id = string;".to_string())),
            "export type Id = string;\n"
        );
    }

    #[test]
    fn test_emit_document_with_prelude() {
        let emitter = TypeScriptEmitter::new();
        let document = Document::new(
            vec!["import type { Ref } from \"vue\";".to_string()],
            vec![Declaration::Alias {
                name: "Root".to_string(),
                target: "Record<string, any>".to_string(),
            }],
        );

        assert_eq!(
            emitter.emit_document(&document),
            "import type { Ref } from \"vue\";\n\nexport type Root = Record<string, any>;\n"
        );
    }

    #[test]
    fn test_emit_empty_document() {
        let emitter = TypeScriptEmitter::new();
        assert_eq!(emitter.emit_document(&Document::default()), "");
    }
}
