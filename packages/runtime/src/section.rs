/// API path that serves the data of section `name` on `parent`
/// (e.g. `pages/notes` + `drafts` -> `pages/notes/sections/drafts`)
pub fn section_endpoint(parent: &str, name: &str) -> String {
    format!("{}/sections/{}", parent, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_endpoint() {
        assert_eq!(section_endpoint("pages/notes", "drafts"), "pages/notes/sections/drafts");
        assert_eq!(section_endpoint("site", "pages"), "site/sections/pages");
    }
}
