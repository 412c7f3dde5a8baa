//! Link templates derived from a quickstart id.

use serde::{Deserialize, Serialize};

/// Default template for the "fork this repo" link. `{id}` is replaced with
/// the quickstart id.
pub const DEFAULT_FORK_REPO_TEMPLATE: &str =
    "https://github.com/Snowflake-Labs/sfquickstarts/tree/master/site/sfguides/src/{id}";

/// URL template with an `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTemplate(String);

impl Default for LinkTemplate {
    fn default() -> Self {
        Self(DEFAULT_FORK_REPO_TEMPLATE.to_string())
    }
}

impl LinkTemplate {
    /// Create a template from a string containing `{id}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the template for a quickstart id.
    ///
    /// ```
    /// use sfguide_core::LinkTemplate;
    ///
    /// let link = LinkTemplate::new("https://example.com/src/{id}").render("demo");
    /// assert_eq!(link, "https://example.com/src/demo");
    /// ```
    pub fn render(&self, id: &str) -> String {
        self.0.replace("{id}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fork_repo_link() {
        assert_eq!(
            LinkTemplate::default().render("getting-started"),
            "https://github.com/Snowflake-Labs/sfquickstarts/tree/master/site/sfguides/src/getting-started"
        );
    }

    #[test]
    fn test_template_without_placeholder() {
        assert_eq!(LinkTemplate::new("static").render("x"), "static");
    }
}
