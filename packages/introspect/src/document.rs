use crate::codegen::typescript::TypeScriptEmitter;
use crate::codegen::DeclarationEmitter;

/// One `key[?]: Type;` line of an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Raw property key; the emitter quotes it when needed
    pub key: String,
    pub optional: bool,
    pub type_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Interface { name: String, members: Vec<Member> },
    Alias { name: String, target: String },
    /// Text supplied by a resolver, emitted verbatim
    Raw(String),
}

impl Declaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Interface { name, .. } | Declaration::Alias { name, .. } => {
                Some(name.as_str())
            }
            Declaration::Raw(_) => None,
        }
    }

    pub fn members(&self) -> &[Member] {
        match self {
            Declaration::Interface { members, .. } => members,
            _ => &[],
        }
    }
}

/// Declarations of one generation run, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub prelude: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Document {
    pub fn new(prelude: Vec<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            prelude,
            declarations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// First declaration with the given name
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|declaration| declaration.name() == Some(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().filter_map(Declaration::name)
    }

    /// Type text of `key` inside interface `interface`
    pub fn member_type(&self, interface: &str, key: &str) -> Option<&str> {
        self.get(interface)?
            .members()
            .iter()
            .find(|member| member.key == key)
            .map(|member| member.type_text.as_str())
    }

    pub fn to_typescript(&self) -> String {
        TypeScriptEmitter::new().emit_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers() {
        let document = Document::new(
            vec![],
            vec![
                Declaration::Interface {
                    name: "Root".into(),
                    members: vec![Member {
                        key: "child".into(),
                        optional: false,
                        type_text: "RootChild".into(),
                    }],
                },
                Declaration::Raw("// note\n".into()),
                Declaration::Alias {
                    name: "RootChild".into(),
                    target: "Record<string, any>".into(),
                },
            ],
        );

        assert_eq!(document.names().collect::<Vec<_>>(), vec!["Root", "RootChild"]);
        assert_eq!(document.member_type("Root", "child"), Some("RootChild"));
        assert_eq!(document.member_type("RootChild", "child"), None);
        assert!(document.get("Missing").is_none());
    }
}
