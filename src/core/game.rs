use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field projection requested from IGDB for every game query.
///
/// The relay never inspects these fields; they pass straight through to the
/// frontend. Only `id` is read locally, as the join/reorder key.
pub const GAME_FIELDS: [&str; 12] = [
    "name",
    "cover.url",
    "first_release_date",
    "rating",
    "summary",
    "genres.name",
    "platforms.name",
    "platforms.abbreviation",
    "platforms.category",
    "category",
    "total_rating",
    "aggregated_rating",
];

/// IGDB popularity type code for "most played" rankings
pub const MOST_PLAYED_POPULARITY_TYPE: u32 = 4;

/// A game entity as returned by IGDB.
///
/// Everything except `id` is an opaque passthrough: IGDB's field set evolves
/// and the relay has no reason to model it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub id: u64,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// One row from the `popularity_primitives` resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularityEntry {
    pub game_id: u64,
    pub value: f64,
}

/// A popularity row joined with its full game record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MostPlayedEntry {
    pub game_id: u64,
    pub popularity_value: f64,
    pub game: GameRecord,
}
