pub mod game;
pub mod query;

pub use game::{GameRecord, MostPlayedEntry, PopularityEntry, GAME_FIELDS, MOST_PLAYED_POPULARITY_TYPE};
pub use query::ProviderQuery;
