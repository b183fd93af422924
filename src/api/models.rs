/// Wire-format data structures for the shelter API
///
/// These match the JSON the remote service sends and receives.
/// Records are immutable once fetched and are not cached beyond
/// the current view.

use serde::{Deserialize, Serialize};

/// A single adoptable dog as returned by the service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dog {
    /// Opaque unique identifier
    pub id: String,
    /// Photo URL
    pub img: String,
    pub name: String,
    /// Age in years, non-negative
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// One page of search results: identifiers only, resolved to full
/// records with a separate fetch
#[derive(Deserialize, Debug, Clone)]
pub struct SearchPage {
    /// Identifiers for the current page, in the service's sort order
    #[serde(rename = "resultIds")]
    pub result_ids: Vec<String>,
    /// Total matches across all pages, used to compute the page count
    pub total: u64,
}

/// Response of the match endpoint: exactly one identifier chosen by
/// the service from the submitted favorites
#[derive(Deserialize, Debug, Clone)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub matched_id: String,
}
