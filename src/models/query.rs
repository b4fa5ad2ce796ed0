//! Structured search query and its string encoding.

/// Search filters, encoded into the single `q` request parameter.
///
/// Empty fields and empty collections contribute nothing to the encoded
/// string, so a default `Query` encodes to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub since: String,
    pub until: String,
    pub from: String,
    pub to: String,
    pub lang: String,
    pub filters: Vec<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub geocode: String,
    pub near: String,
    pub within: String,
    pub url: String,
}

impl Query {
    /// Encode the query for the `q` parameter. Field order is fixed.
    pub fn encode(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }

        if !self.since.is_empty() {
            parts.push(format!("since:{}", self.since));
        }

        if !self.until.is_empty() {
            parts.push(format!("until:{}", self.until));
        }

        if !self.from.is_empty() {
            parts.push(format!("from:{}", self.from));
        }

        if !self.to.is_empty() {
            parts.push(format!("to:{}", self.to));
        }

        if !self.lang.is_empty() {
            parts.push(format!("lang:{}", self.lang));
        }

        for filter in &self.filters {
            parts.push(format!("filter:{}", filter));
        }

        for include in &self.includes {
            parts.push(format!("include:{}", include));
        }

        for exclude in &self.excludes {
            parts.push(format!("exclude:{}", exclude));
        }

        if !self.geocode.is_empty() {
            parts.push(format!("geocode:{}", self.geocode));
        }

        if !self.near.is_empty() {
            parts.push(format!("near:{}", self.near));
        }

        if !self.within.is_empty() {
            parts.push(format!("within:{}", self.within));
        }

        if !self.url.is_empty() {
            parts.push(format!("url:{}", self.url));
        }

        parts.join(" ")
    }

    /// A query is empty iff it encodes to the empty string.
    pub fn is_empty(&self) -> bool {
        self.encode().is_empty()
    }
}
