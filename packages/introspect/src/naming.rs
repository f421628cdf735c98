//! Identifier helpers for generated declarations.

use std::borrow::Cow;

/// Render a property key: bare when it is a valid identifier, quoted otherwise
pub fn sanitize_key(key: &str) -> Cow<'_, str> {
    if is_identifier(key) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\"")))
    }
}

/// ASCII identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Split on anything that is not an ASCII letter or digit and upper-case the
/// first letter of every word. The rest of each word keeps its casing.
pub fn to_pascal_case(value: &str) -> String {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Name of the interface generated for `key` below `parent`
pub fn child_interface_name(parent: &str, key: &str) -> String {
    to_pascal_case(&format!("{}_{}", parent, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifiers() {
        assert_eq!(sanitize_key("name"), "name");
        assert_eq!(sanitize_key("_private"), "_private");
        assert_eq!(sanitize_key("$store"), "$store");
        assert_eq!(sanitize_key("camelCase2"), "camelCase2");
    }

    #[test]
    fn test_sanitize_quotes_invalid_keys() {
        assert_eq!(sanitize_key("content/values"), "\"content/values\"");
        assert_eq!(sanitize_key("2fa"), "\"2fa\"");
        assert_eq!(sanitize_key(""), "\"\"");
        assert_eq!(sanitize_key("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("Panel_view"), "PanelView");
        assert_eq!(to_pascal_case("PanelView_props"), "PanelViewProps");
        assert_eq!(to_pascal_case("Panel_isLoading"), "PanelIsLoading");
        assert_eq!(to_pascal_case("Panel_content/values"), "PanelContentValues");
        assert_eq!(to_pascal_case("a--b"), "AB");
    }

    #[test]
    fn test_child_interface_name() {
        assert_eq!(child_interface_name("Panel", "languages"), "PanelLanguages");
        assert_eq!(child_interface_name("PanelSystem", "ascii"), "PanelSystemAscii");
        assert_eq!(child_interface_name("Panel", "$helper"), "PanelHelper");
    }
}
