//! Organization name matching

/// Case-insensitive substring matcher for organization names
#[derive(Debug, Clone)]
pub struct OrgMatcher {
    needle: String,
}

impl OrgMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches every organization
    pub fn is_match(&self, organization: &str) -> bool {
        organization.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let matcher = OrgMatcher::new("ORACLE");
        assert!(matcher.is_match("Oracle Corporation"));
        assert!(matcher.is_match("ORACLE-BMC-31898"));
        assert!(!matcher.is_match("Orcale typo"));
    }

    #[test]
    fn test_substring_only() {
        let matcher = OrgMatcher::new("cloud flare");
        assert!(!matcher.is_match("CLOUDFLARENET"));
        assert!(OrgMatcher::new("flare").is_match("CLOUDFLARENET"));
    }

    #[test]
    fn test_query_is_not_a_pattern() {
        let matcher = OrgMatcher::new("a.c");
        assert!(!matcher.is_match("abc"));
        assert!(matcher.is_match("A.C. Holdings"));
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert!(OrgMatcher::new("").is_match("anything"));
    }
}
