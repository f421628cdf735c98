//! Hand-authored overrides for specific keys of the walked graph.
//!
//! A [`TypeResolver`] is asked about every key before default inference runs.
//! Closures work directly; [`RuleSet`] expresses the special cases as data.

use crate::kind::Kind;
use crate::value::{Value, ValueGraph};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Where in the walk a key was found
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub graph: &'a ValueGraph,
    /// 0 for keys of the root object
    pub depth: usize,
    /// Interface that owns the key
    pub interface_name: &'a str,
    /// Interface the key's value would get if it were expanded
    pub child_interface_name: &'a str,
    pub kind: Kind,
}

/// Answer of a resolver. Both fields empty means "infer as usual".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Replaces the inferred type; the key is not descended
    pub type_text: Option<String>,
    /// Appended verbatim to the output document
    pub extra_declarations: Option<String>,
}

impl Resolution {
    pub fn infer() -> Self {
        Self::default()
    }

    pub fn type_text(text: impl Into<String>) -> Self {
        Self {
            type_text: Some(text.into()),
            extra_declarations: None,
        }
    }

    pub fn with_declarations(mut self, declarations: impl Into<String>) -> Self {
        self.extra_declarations = Some(declarations.into());
        self
    }
}

pub trait TypeResolver {
    fn resolve(&self, key: &str, value: &Value, ctx: &ResolveContext<'_>) -> Resolution;
}

impl<F> TypeResolver for F
where
    F: Fn(&str, &Value, &ResolveContext<'_>) -> Resolution,
{
    fn resolve(&self, key: &str, value: &Value, ctx: &ResolveContext<'_>) -> Resolution {
        self(key, value, ctx)
    }
}

/// Resolver that never overrides anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl TypeResolver for NoOverrides {
    fn resolve(&self, _key: &str, _value: &Value, _ctx: &ResolveContext<'_>) -> Resolution {
        Resolution::infer()
    }
}

/// Predicate over a key and its position. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Matcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,

    /// Matches when the key's child interface name is one of these
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_interface_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,

    /// Matches objects carrying this own property (e.g. `_isVue`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_own_key: Option<String>,
}

impl Matcher {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn child_named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            child_interface_names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn in_interface(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    pub fn of_kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_own_key(mut self, key: impl Into<String>) -> Self {
        self.has_own_key = Some(key.into());
        self
    }

    pub fn matches(&self, key: &str, value: &Value, ctx: &ResolveContext<'_>) -> bool {
        if self.key.as_deref().is_some_and(|expected| expected != key) {
            return false;
        }
        if self.depth.is_some_and(|expected| expected != ctx.depth) {
            return false;
        }
        if self
            .interface_name
            .as_deref()
            .is_some_and(|expected| expected != ctx.interface_name)
        {
            return false;
        }
        if !self.child_interface_names.is_empty()
            && !self
                .child_interface_names
                .iter()
                .any(|name| name == ctx.child_interface_name)
        {
            return false;
        }
        if self.kind.is_some_and(|expected| expected != ctx.kind) {
            return false;
        }
        if let Some(own_key) = &self.has_own_key {
            if ctx.graph.get(value, own_key).is_none() {
                return false;
            }
        }
        true
    }
}

/// One declarative override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rule {
    /// Higher runs first; equal priorities keep insertion order
    #[serde(default)]
    pub priority: i32,

    #[serde(rename = "match")]
    pub matcher: Matcher,

    #[serde(rename = "type")]
    pub type_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declarations: Option<String>,
}

impl Rule {
    pub fn new(matcher: Matcher, type_text: impl Into<String>) -> Self {
        Self {
            priority: 0,
            matcher,
            type_text: type_text.into(),
            declarations: None,
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn declarations(mut self, declarations: impl Into<String>) -> Self {
        self.declarations = Some(declarations.into());
        self
    }
}

/// Ordered list of rules; the first matching rule wins.
///
/// Deserialized sets are priority-sorted like pushed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
        // Stable sort keeps insertion order among equal priorities
        self.rules.sort_by_key(|rule| Reverse(rule.priority));
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// Append another set; its rules run after ours at equal priority
    pub fn extend(&mut self, other: RuleSet) {
        for rule in other.rules {
            self.push(rule);
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Overrides for the Kirby Panel global object
    pub fn kirby_panel() -> Self {
        RuleSet::new()
            // Use the real Vue type instead of expanding the app instance
            .with(Rule::new(Matcher::key("app").at_depth(0), "InstanceType<VueConstructor>"))
            // Language rules differ per language, so the shape is written by hand
            .with(Rule::new(
                Matcher::key("languages").at_depth(0),
                "{\n  code: string;\n  default: boolean;\n  direction: string;\n  name: string;\n  rules: Record<string, string>;\n}[]",
            ))
            .with(Rule::new(
                Matcher::child_named(["PanelPluginsComponents"]),
                "Record<string, ComponentPublicInstance>",
            ))
            // View props depend on the view
            .with(Rule::new(
                Matcher::key("tabs").in_interface("PanelViewProps"),
                "Record<string, any>[]",
            ))
            .with(Rule::new(
                Matcher::key("columns").in_interface("PanelViewPropsTab"),
                "Record<string, any>[]",
            ))
            // Model content is dynamic
            .with(Rule::new(
                Matcher::child_named([
                    "PanelPluginsTextareaButtons",
                    "PanelPluginsWriterMarks",
                    "PanelViewPropsVersionsLatest",
                    "PanelViewPropsVersionsChanges",
                ]),
                "Record<string, any>",
            ))
            // String-keyed dictionaries
            .with(Rule::new(
                Matcher::child_named([
                    "PanelLanguageRules",
                    "PanelTranslationData",
                    "PanelPluginsIcons",
                    "PanelSystemLocales",
                    "PanelSystemSlugs",
                    "PanelSystemAscii",
                ]),
                "Record<string, string>",
            ))
            .with(
                Rule::new(Matcher::any().with_own_key("_isVue"), "ComponentPublicInstance")
                    .priority(-1),
            )
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        let mut set = RuleSet::new();
        for rule in rules {
            set.push(rule);
        }
        set
    }
}

impl From<RuleSet> for Vec<Rule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl TypeResolver for RuleSet {
    fn resolve(&self, key: &str, value: &Value, ctx: &ResolveContext<'_>) -> Resolution {
        match self.rules.iter().find(|rule| rule.matcher.matches(key, value, ctx)) {
            Some(rule) => Resolution {
                type_text: Some(rule.type_text.clone()),
                extra_declarations: rule.declarations.clone(),
            },
            None => Resolution::infer(),
        }
    }
}
