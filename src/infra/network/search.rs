use super::requests::spotify_get_typed_for;
use super::Network;
use crate::core::model::{SearchKind, SearchResults};
use anyhow::Result;

const SEARCH_LIMIT: u32 = 10;

pub trait SearchApi {
  async fn search(&self, query: &str, kind: SearchKind) -> Result<SearchResults>;
}

impl SearchApi for Network {
  async fn search(&self, query: &str, kind: SearchKind) -> Result<SearchResults> {
    spotify_get_typed_for(
      self,
      "search",
      &[
        ("q", query.to_string()),
        ("type", kind.as_str().to_string()),
        ("limit", SEARCH_LIMIT.to_string()),
      ],
    )
    .await
  }
}
