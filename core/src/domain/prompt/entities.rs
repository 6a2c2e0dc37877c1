use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub template: String,
}

impl PromptTemplate {
    pub fn new(name: &str, version: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            template: template.to_string(),
        }
    }

    /// Substitute `{key}` placeholders in a single pass over the template.
    /// Substituted values are never rescanned and unknown placeholders are
    /// left as-is.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];

            let value = tail.find('}').and_then(|close| {
                let key = &tail[1..close];
                vars.iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (*value, close))
            });

            match value {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}
