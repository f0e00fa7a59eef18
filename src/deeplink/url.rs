use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query parameter carrying the initial page of a paged screen.
pub const PAGE_PARAMETER: &str = "page";

/// Errors that can occur when parsing a deep link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Malformed query parameter '{pair}': expected key=value")]
    MalformedParameter { pair: String },

    #[error("Query parameter '{pair}' has an empty key")]
    EmptyParameterKey { pair: String },
}

/// A parsed deep link: ordered path segments plus query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Url {
    pub path_segments: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

impl Url {
    /// Parse a raw deep link.
    ///
    /// - Everything up to `://` and the host after it are stripped. Input
    ///   without `://` is treated as a bare path.
    /// - A `#fragment` is discarded.
    /// - Empty path segments are dropped, so `app://host/` has no segments.
    /// - Query pairs split on the first `=`; later duplicates win; empty
    ///   pairs (`a=1&&b=2`) are skipped.
    /// - A pair without `=` or with an empty key is an error.
    ///
    /// No percent-decoding is performed.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (location, query) = match raw.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (raw, None),
        };

        let path = match location.split_once("://") {
            Some((_, authority)) => authority.split_once('/').map_or("", |(_, path)| path),
            None => location,
        };

        let path_segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        let mut parameters = BTreeMap::new();
        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let Some((key, value)) = pair.split_once('=') else {
                return Err(UrlError::MalformedParameter {
                    pair: pair.to_string(),
                });
            };
            if key.is_empty() {
                return Err(UrlError::EmptyParameterKey {
                    pair: pair.to_string(),
                });
            }
            parameters.insert(key.to_string(), value.to_string());
        }

        Ok(Self {
            path_segments,
            parameters,
        })
    }

    /// Split off the first path segment.
    ///
    /// Returns `(None, Url::default())` once segments are exhausted.
    /// Parameters travel with the remainder.
    pub fn consume_path_segment(&self) -> (Option<String>, Url) {
        match self.path_segments.split_first() {
            Some((first, rest)) => (
                Some(first.clone()),
                Url {
                    path_segments: rest.to_vec(),
                    parameters: self.parameters.clone(),
                },
            ),
            None => (None, Url::default()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path_segments.is_empty()
    }

    /// `page` query parameter, or 0 when absent or not a valid index.
    pub fn page(&self) -> usize {
        self.parameters
            .get(PAGE_PARAMETER)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Serialize back to a full deep link under `scheme://host`.
    pub fn to_deep_link(&self, scheme: &str, host: &str) -> String {
        format!("{}://{}/{}", scheme, host, self)
    }
}

impl fmt::Display for Url {
    /// Path and query, without scheme or host: `a/b?k=v`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_segments.join("/"))?;
        for (index, (key, value)) in self.parameters.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, key, value)?;
        }
        Ok(())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}
