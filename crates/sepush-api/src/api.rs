//! `EskomSePushApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::endpoint::TestMode;
use crate::error::Result;
use crate::types::{
    AreaInformation, AreasNearby, AreasSearch, CheckAllowance, Status, TopicsNearby,
};

/// EskomSePush API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(EskomSePushApi: Send)]
pub trait LocalEskomSePushApi {
    /// Fetches the national status and municipal overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn status(&self) -> Result<Status>;

    /// Fetches events and schedule for an area id from
    /// [`areas_search`](Self::areas_search) or [`areas_nearby`](Self::areas_nearby).
    ///
    /// `test` requests synthetic sample events; the returned area name is
    /// then prefixed with `TESTING`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn area_information(&self, id: &str, test: Option<TestMode>) -> Result<AreaInformation>;

    /// Finds areas near GPS coordinates, closest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn areas_nearby(&self, lat: f64, lon: f64) -> Result<AreasNearby>;

    /// Searches areas by suburb name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn areas_search(&self, text: &str) -> Result<AreasSearch>;

    /// Finds user-reported topics near GPS coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn topics_nearby(&self, lat: f64, lon: f64) -> Result<TopicsNearby>;

    /// Checks the token's quota. Does not count towards the quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn check_allowance(&self) -> Result<CheckAllowance>;
}
