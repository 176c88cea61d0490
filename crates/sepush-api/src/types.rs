//! EskomSePush API response types.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use serde::Deserialize;

use crate::de::{deserialize_lenient_stage, deserialize_timestamp};

/// Name prefix the API puts on areas returned in test mode.
pub const TEST_DATA_PREFIX: &str = "TESTING";

// --- Status ---

/// Response from the `status` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Status {
    /// National and municipal statuses.
    #[serde(rename = "status")]
    pub cities: Cities,
}

/// The two statuses reported by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cities {
    /// City of Cape Town override.
    pub capetown: CityStatus,
    /// National (Eskom) status.
    pub eskom: CityStatus,
}

impl Cities {
    /// Iterates the statuses as `(key, status)`, national first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CityStatus)> {
        [("eskom", &self.eskom), ("capetown", &self.capetown)].into_iter()
    }
}

/// Load-shedding status of a single city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityStatus {
    /// Display name.
    pub name: String,
    /// Current stage (0 = not load-shedding).
    #[serde(deserialize_with = "deserialize_lenient_stage")]
    pub stage: i32,
    /// Upcoming stage changes, in order.
    pub next_stages: Vec<NextStage>,
    /// When the stage was last updated.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub stage_updated: DateTime<FixedOffset>,
}

/// A scheduled stage change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NextStage {
    /// Stage that takes effect.
    #[serde(deserialize_with = "deserialize_lenient_stage")]
    pub stage: i32,
    /// When it takes effect.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub stage_start_timestamp: DateTime<FixedOffset>,
}

// --- Area Information ---

/// Response from the `area` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AreaInformation {
    /// Active and upcoming outages, sorted by start time.
    pub events: Vec<Event>,
    /// Area name and region.
    pub info: AreaInfo,
    /// Raw weekly schedule.
    pub schedule: Schedule,
}

/// A single outage window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    /// Free-text note (typically the stage, e.g. "Stage 2").
    pub note: String,
    /// Outage start.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start: DateTime<FixedOffset>,
    /// Outage end.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end: DateTime<FixedOffset>,
}

impl Event {
    /// Returns `true` if `at` falls within `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<FixedOffset>) -> bool {
        self.start <= at && at < self.end
    }

    /// Length of the outage.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}

/// Area name and region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AreaInfo {
    /// Area name.
    pub name: String,
    /// Region name.
    pub region: String,
}

impl AreaInfo {
    /// Returns `true` if the API marked this area as synthetic test data.
    #[must_use]
    pub fn is_test_data(&self) -> bool {
        self.name.starts_with(TEST_DATA_PREFIX)
    }
}

/// Weekly schedule per stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Schedule {
    /// One entry per day.
    pub days: Vec<ScheduleDay>,
    /// Schedule source (URL or description).
    pub source: String,
}

/// Outage windows for one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Day name (e.g. "Monday").
    pub name: String,
    /// `stages[n - 1]` holds the windows (e.g. "20:00-22:30") for stage `n`.
    pub stages: Vec<Vec<String>>,
}

impl ScheduleDay {
    /// Windows affecting this area at `stage`.
    ///
    /// Some areas publish fewer than 8 stages; higher stages then follow
    /// the highest published one. Returns `None` for stage 0 (or below) or
    /// an empty schedule.
    #[must_use]
    pub fn windows_for_stage(&self, stage: i32) -> Option<&[String]> {
        let index = usize::try_from(stage.checked_sub(1)?).ok()?;
        self.stages
            .get(index)
            .or_else(|| self.stages.last())
            .map(Vec::as_slice)
    }
}

// --- Areas Nearby / Areas Search ---

/// Response from the `areas_nearby` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AreasNearby {
    /// Areas, closest first.
    pub areas: Vec<NearbyArea>,
}

/// An area found by GPS coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NearbyArea {
    /// Always -1 upstream.
    #[serde(default = "unknown_count")]
    pub count: i64,
    /// Area id for `area_information`.
    pub id: String,
    /// Area name.
    pub name: String,
    /// Region name.
    pub region: String,
}

const fn unknown_count() -> i64 {
    -1
}

/// Response from the `areas_search` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AreasSearch {
    /// Matching areas.
    pub areas: Vec<Area>,
}

/// An area found by text search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Area {
    /// Area id for `area_information`.
    pub id: String,
    /// Area name.
    pub name: String,
    /// Region name.
    pub region: String,
}

// --- Topics Nearby ---

/// Response from the `topics_nearby` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicsNearby {
    /// User-submitted topics.
    pub topics: Vec<Topic>,
}

/// A user-submitted, location-tagged post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Topic {
    /// Poster's last online time.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub active: DateTime<FixedOffset>,
    /// Message text.
    pub body: String,
    /// Topic category.
    pub category: TopicCategory,
    /// Estimated distance from the query point, in km.
    pub distance: f64,
    /// Poster's follower count.
    pub followers: u64,
    /// When the topic was posted.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<FixedOffset>,
}

/// Topic category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TopicCategory {
    /// "Advice".
    Advice,
    /// "Electricity".
    Electricity,
    /// "Water".
    Water,
    /// "Good Vibes".
    GoodVibes,
    /// "Internet".
    Internet,
    /// "Roads".
    Roads,
    /// "Missing Pets".
    MissingPets,
    /// "Events".
    Events,
    /// "Fires".
    Fires,
    /// "Safety".
    Safety,
    /// "Gaming".
    Gaming,
    /// Any category not listed above.
    Other(String),
}

impl From<String> for TopicCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Advice" => Self::Advice,
            "Electricity" => Self::Electricity,
            "Water" => Self::Water,
            "Good Vibes" => Self::GoodVibes,
            "Internet" => Self::Internet,
            "Roads" => Self::Roads,
            "Missing Pets" => Self::MissingPets,
            "Events" => Self::Events,
            "Fires" => Self::Fires,
            "Safety" => Self::Safety,
            "Gaming" => Self::Gaming,
            _ => Self::Other(s),
        }
    }
}

impl TopicCategory {
    /// Category label as sent by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Advice => "Advice",
            Self::Electricity => "Electricity",
            Self::Water => "Water",
            Self::GoodVibes => "Good Vibes",
            Self::Internet => "Internet",
            Self::Roads => "Roads",
            Self::MissingPets => "Missing Pets",
            Self::Events => "Events",
            Self::Fires => "Fires",
            Self::Safety => "Safety",
            Self::Gaming => "Gaming",
            Self::Other(s) => s,
        }
    }
}

// --- Check Allowance ---

/// Response from the `api_allowance` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckAllowance {
    /// Quota counters for the token.
    pub allowance: Allowance,
}

/// Quota counters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Allowance {
    /// Calls counted against the quota.
    pub count: u32,
    /// Quota size for the subscription.
    pub limit: u32,
    /// Quota period (typically "daily").
    #[serde(rename = "type")]
    pub kind: String,
}
