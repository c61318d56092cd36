//! Query option accumulation and encoding.
//!
//! A [`Query`] collects filters, sparse fieldsets, includes, sort and limit for
//! a single list call, or a verbatim continuation link from a previous page.
//! Encoding is deterministic: keys are emitted in sorted order and values are
//! normalised, so equal accumulator state always yields the same string.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Trim, drop blanks and dedupe, keeping first-seen order.
pub fn normalize_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.as_ref().trim();
        if value.is_empty() || out.iter().any(|seen| seen == value) {
            continue;
        }
        out.push(value.to_string());
    }
    out
}

/// What a list call should request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget<'a> {
    /// Build the request from the endpoint path plus this query string
    /// (possibly empty).
    Fresh(String),
    /// Follow a continuation link verbatim, once validated.
    Continuation(&'a str),
}

/// Per-call query accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: BTreeMap<String, Vec<String>>,
    fields: BTreeMap<String, Vec<String>>,
    include: Vec<String>,
    sort: Vec<String>,
    limit: Option<u32>,
    next_url: Option<String>,
}

impl Query {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size. Non-positive values clear it so the server default
    /// applies.
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = u32::try_from(limit).ok().filter(|l| *l > 0);
    }

    /// Replace the values of `filter[key]`. An empty list after
    /// normalisation removes the filter.
    pub fn set_filter<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = normalize_list(values);
        if values.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), values);
        }
    }

    /// Replace the requested `fields[resource_type]`.
    pub fn set_fields<I, S>(&mut self, resource_type: &str, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = normalize_list(names);
        if names.is_empty() {
            self.fields.remove(resource_type);
        } else {
            self.fields.insert(resource_type.to_string(), names);
        }
    }

    /// Replace the related resources to include.
    pub fn set_include<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include = normalize_list(names);
    }

    /// Replace the sort keys (e.g. `-createdDate`).
    pub fn set_sort<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sort = normalize_list(keys);
    }

    /// Follow this continuation link instead of building a query. A blank
    /// link is ignored.
    pub fn set_next_url(&mut self, next_url: &str) {
        let next_url = next_url.trim();
        if !next_url.is_empty() {
            self.next_url = Some(next_url.to_string());
        }
    }

    /// The page size, if set.
    pub fn page_size(&self) -> Option<u32> {
        self.limit
    }

    /// The values of `filter[key]`, if set.
    pub fn filter_values(&self, key: &str) -> Option<&[String]> {
        self.filters.get(key).map(Vec::as_slice)
    }

    /// The continuation link, if set.
    pub fn continuation(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Encode the constructed parameters, ignoring any continuation link.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut params: Vec<(String, String)> = Vec::new();

        for (resource_type, names) in &self.fields {
            params.push((format!("fields[{resource_type}]"), names.join(",")));
        }
        for (key, values) in &self.filters {
            params.push((format!("filter[{key}]"), values.join(",")));
        }
        if !self.include.is_empty() {
            params.push(("include".to_string(), self.include.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if !self.sort.is_empty() {
            params.push(("sort".to_string(), self.sort.join(",")));
        }

        params.sort_by(|a, b| a.0.cmp(&b.0));

        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish()
    }

    /// Decide what to request: the continuation link wins outright, otherwise
    /// the encoded parameters.
    pub fn target(&self) -> QueryTarget<'_> {
        match self.next_url.as_deref() {
            Some(next) => QueryTarget::Continuation(next),
            None => QueryTarget::Fresh(self.encode()),
        }
    }
}

/// Chainable options shared by every list endpoint family.
///
/// Families implement the two accessors and add their own typed
/// `filter_*` methods on top.
pub trait ListOptions: Sized {
    /// The underlying accumulator.
    fn query(&self) -> &Query;

    /// Mutable access to the underlying accumulator.
    fn query_mut(&mut self) -> &mut Query;

    /// Page size; non-positive values are omitted.
    #[must_use]
    fn limit(mut self, limit: i64) -> Self {
        self.query_mut().set_limit(limit);
        self
    }

    /// Sort key, e.g. `-createdDate`. Blank keys are ignored.
    #[must_use]
    fn sort(mut self, key: &str) -> Self {
        self.query_mut().set_sort([key]);
        self
    }

    /// Sparse fieldset for a resource type.
    #[must_use]
    fn fields<I, S>(mut self, resource_type: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query_mut().set_fields(resource_type, names);
        self
    }

    /// Related resources to include.
    #[must_use]
    fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query_mut().set_include(names);
        self
    }

    /// Continuation link from a previous page. Overrides every other option.
    #[must_use]
    fn next_url(mut self, next_url: &str) -> Self {
        self.query_mut().set_next_url(next_url);
        self
    }
}

impl ListOptions for Query {
    fn query(&self) -> &Query {
        self
    }

    fn query_mut(&mut self) -> &mut Query {
        self
    }
}
