//! Canonical serialization of a search into `/search` query parameters.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::model::{Bound, BoundKind, Filters};

/// Decides when a numeric bound is worth sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OmissionPolicy {
    /// Omit zero and the facet's no-filter default; an explicit minimum of
    /// zero is indistinguishable from "no minimum".
    #[default]
    Truthy,
    /// Send any bound the user has touched, including an explicit zero.
    Touched,
}

impl OmissionPolicy {
    fn includes(self, kind: BoundKind, bound: Bound) -> bool {
        match self {
            OmissionPolicy::Truthy => bound.value != 0.0 && bound.value != kind.default_value(),
            OmissionPolicy::Touched => bound.touched,
        }
    }
}

/// Ordered key/value pairs for one `/search` call.
///
/// Keys appear in a fixed order and ingredients are sorted, so equal
/// inputs always produce equal requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    params: Vec<(&'static str, String)>,
}

impl SearchRequest {
    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for a repeated `key`.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| *k == key)
    }

    /// URL-encoded form, e.g. `query=pasta&page=1&size=15`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// Builds [`SearchRequest`]s under a fixed omission policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
    policy: OmissionPolicy,
}

impl RequestBuilder {
    pub fn new(policy: OmissionPolicy) -> Self {
        Self { policy }
    }

    pub fn build(&self, query: &str, filters: &Filters, page: u32, size: u32) -> SearchRequest {
        let mut params = Vec::new();

        if !query.is_empty() {
            params.push(("query", query.to_string()));
        }
        if !filters.category.is_empty() {
            params.push(("category", filters.category.clone()));
        }
        for ingredient in &filters.ingredients {
            params.push(("ingredients", ingredient.clone()));
        }
        for kind in BoundKind::ALL {
            let bound = filters.bound(kind);
            if self.policy.includes(kind, bound) {
                params.push((kind.param(), format_number(bound.value)));
            }
        }
        params.push(("page", page.to_string()));
        params.push(("size", size.to_string()));

        SearchRequest { params }
    }
}

fn format_number(value: f64) -> String {
    // f64 Display already renders 3.0 as "3" and 2.5 as "2.5".
    value.to_string()
}
