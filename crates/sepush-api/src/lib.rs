//! Typed async client for the EskomSePush load-shedding API.
//!
//! Covers the six Business API 2.0 operations: national status, area
//! information, areas nearby, areas search, topics nearby and allowance
//! check. Every call is one GET request authenticated with a token header;
//! an offline mode serves bundled documents instead.
//!
//! ```no_run
//! use sepush_api::{EskomSePushClient, LocalEskomSePushApi};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = EskomSePushClient::new("my-token")?;
//! let status = client.status().await?;
//! for (key, city) in status.cities.iter() {
//!     println!("{key}: stage {}", city.stage);
//! }
//! # Ok(())
//! # }
//! ```

/// `EskomSePushApi` trait.
pub mod api;
/// Client, builder and request executor.
pub mod client;
/// Custom deserializers.
pub mod de;
/// Endpoint descriptors.
pub mod endpoint;
/// Error taxonomy.
pub mod error;
/// Offline fixture loader.
pub mod fixtures;
/// Response types.
pub mod types;

pub use api::{EskomSePushApi, LocalEskomSePushApi};
pub use client::{EskomSePushClient, EskomSePushClientBuilder};
pub use de::parse_timestamp;
pub use endpoint::{Endpoint, RequestDescriptor, TOKEN_HEADER, TestMode};
pub use error::{DecodeContext, RequestError, Result};
pub use fixtures::{FixtureLoader, FixtureSource};
pub use types::{
    Allowance, Area, AreaInfo, AreaInformation, AreasNearby, AreasSearch, CheckAllowance, Cities,
    CityStatus, Event, NearbyArea, NextStage, Schedule, ScheduleDay, Status, TEST_DATA_PREFIX,
    Topic, TopicCategory, TopicsNearby,
};
