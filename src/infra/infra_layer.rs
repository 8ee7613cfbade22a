// The infra module contains implementations of core traits.
// Each external system gets its own submodule.

#[path = "google/mod.rs"]
pub mod google;

#[path = "web/page_fetcher.rs"]
pub mod web;
