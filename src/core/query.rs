use std::fmt::Write;

/// Builder for IGDB's Apicalypse query language.
///
/// A query is a sequence of `;`-terminated clauses. IGDB accepts clauses in
/// any order, but the builder always emits the same fixed order
/// (`search`, `where`, `fields`, `sort`, `limit`, `offset`) so queries are
/// reproducible; optional clauses that were never set are simply not
/// emitted.
///
/// Values are interpolated verbatim. The builder does not escape search
/// terms or conditions against the query syntax, so callers must not feed
/// it untrusted text containing `"` or `;`.
#[derive(Debug, Clone, Default)]
pub struct ProviderQuery {
    search: Option<String>,
    condition: Option<String>,
    fields: Vec<String>,
    sort: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ProviderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-text `search "term"` clause
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// `where <condition>` clause
    pub fn filter(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// `fields a, b, c` projection clause
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// `sort <field> <direction>` clause
    pub fn sort(mut self, order: impl Into<String>) -> Self {
        self.sort = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render the final query string sent as the request body
    pub fn build(&self) -> String {
        let mut query = String::new();

        if let Some(term) = &self.search {
            let _ = write!(query, "search \"{}\";", term);
        }
        if let Some(condition) = &self.condition {
            if !query.is_empty() {
                query.push(' ');
            }
            let _ = write!(query, "where {};", condition);
        }
        if !self.fields.is_empty() {
            if !query.is_empty() {
                query.push(' ');
            }
            let _ = write!(query, "fields {};", self.fields.join(", "));
        }
        if let Some(order) = &self.sort {
            if !query.is_empty() {
                query.push(' ');
            }
            let _ = write!(query, "sort {};", order);
        }
        if let Some(limit) = self.limit {
            if !query.is_empty() {
                query.push(' ');
            }
            let _ = write!(query, "limit {};", limit);
        }
        if let Some(offset) = self.offset {
            if !query.is_empty() {
                query.push(' ');
            }
            let _ = write!(query, "offset {};", offset);
        }

        query
    }
}

/// Render an id list as the parenthesized set IGDB expects, e.g. `(1,5,3)`
pub fn id_set(ids: &[u64]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("({})", joined)
}
