use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::RelayConfig;
use crate::core::query::id_set;
use crate::core::{
    GameRecord, MostPlayedEntry, PopularityEntry, ProviderQuery, GAME_FIELDS,
    MOST_PLAYED_POPULARITY_TYPE,
};
use crate::error::{RelayError, Result};
use crate::igdb::token::{Credentials, TokenManager};

/// Authenticated IGDB query forwarder.
///
/// Every operation follows the same path: build an Apicalypse query, ensure
/// a valid token, POST to the resource, and map the response. Outbound
/// calls carry no timeout; a hung upstream hangs only the serving request.
pub struct IgdbClient {
    client: Client,
    token: TokenManager,
    base_url: String,
    client_id: String,
}

impl IgdbClient {
    pub fn new(config: &RelayConfig) -> Self {
        let client = Client::new();
        let credentials = Credentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        };
        let token = TokenManager::new(client.clone(), credentials, config.token_url.clone());

        Self {
            client,
            token,
            base_url: config.api_base_url.clone(),
            client_id: config.client_id.clone(),
        }
    }

    /// Forward a query string to an IGDB resource and parse the JSON reply.
    ///
    /// Non-success responses become [`RelayError::Upstream`] carrying the
    /// provider's status text and body verbatim for diagnostics.
    pub async fn request<T: DeserializeOwned>(&self, resource: &str, query: &str) -> Result<T> {
        let token = self.token.ensure_valid_token().await?;
        let url = format!("{}/{}", self.base_url, urlencoding::encode(resource));

        tracing::debug!("IGDB request: {} [{}]", url, query);

        let response = self
            .client
            .post(&url)
            .header("Client-ID", &self.client_id)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "text/plain")
            .body(query.to_string())
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(RelayError::Transport)?;
            tracing::error!("IGDB error: {} - {}", status, body);

            return Err(RelayError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
                body,
            });
        }

        let body = response.text().await.map_err(RelayError::Transport)?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Full-text game search, optionally restricted to category ids
    pub async fn search_games(
        &self,
        term: &str,
        limit: u32,
        category_ids: &[u64],
    ) -> Result<Vec<GameRecord>> {
        let mut query = ProviderQuery::new()
            .search(term)
            .fields(GAME_FIELDS)
            .limit(limit);

        if !category_ids.is_empty() {
            query = query.filter(format!("category = {}", id_set(category_ids)));
        }

        self.request("games", &query.build()).await
    }

    /// Top games by the "most played" popularity ranking.
    ///
    /// Two-step fan-out: fetch the ranked popularity rows, then the game
    /// records for exactly those ids, and join them locally. Popularity
    /// order is preserved; rows whose game record is missing on the
    /// provider side are dropped rather than failing the whole call.
    pub async fn most_played_games(&self, limit: u32) -> Result<Vec<MostPlayedEntry>> {
        let ranking_query = ProviderQuery::new()
            .fields(["game_id", "value"])
            .filter(format!("popularity_type = {}", MOST_PLAYED_POPULARITY_TYPE))
            .sort("value desc")
            .limit(limit)
            .build();

        let ranking: Vec<PopularityEntry> =
            self.request("popularity_primitives", &ranking_query).await?;

        if ranking.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<u64> = ranking.iter().map(|entry| entry.game_id).collect();
        let games_query = ProviderQuery::new()
            .fields(GAME_FIELDS)
            .filter(format!("id = {}", id_set(&ids)))
            .build();

        let games: Vec<GameRecord> = self.request("games", &games_query).await?;

        Ok(join_by_popularity(ranking, games))
    }

    /// Fetch game records for an explicit id list, in input order.
    ///
    /// IGDB does not guarantee response order, so the result is reordered
    /// locally; ids with no matching record are silently omitted. An empty
    /// id list is rejected before any network call.
    pub async fn games_by_ids(&self, ids: &[u64]) -> Result<Vec<GameRecord>> {
        if ids.is_empty() {
            return Err(RelayError::Validation("gameIds array is required".to_string()));
        }

        let query = ProviderQuery::new()
            .fields(GAME_FIELDS)
            .filter(format!("id = {}", id_set(ids)))
            .build();

        let games: Vec<GameRecord> = self.request("games", &query).await?;

        Ok(reorder_by_ids(ids, games))
    }

    /// Escape hatch: forward an already-built query to an arbitrary
    /// resource. The query contents are the caller's responsibility.
    pub async fn raw_query(&self, resource: &str, query: &str) -> Result<Value> {
        self.request(resource, query).await
    }
}

fn join_by_popularity(
    ranking: Vec<PopularityEntry>,
    games: Vec<GameRecord>,
) -> Vec<MostPlayedEntry> {
    let by_id: HashMap<u64, GameRecord> =
        games.into_iter().map(|game| (game.id, game)).collect();

    ranking
        .into_iter()
        .filter_map(|entry| {
            by_id.get(&entry.game_id).map(|game| MostPlayedEntry {
                game_id: entry.game_id,
                popularity_value: entry.value,
                game: game.clone(),
            })
        })
        .collect()
}

fn reorder_by_ids(ids: &[u64], games: Vec<GameRecord>) -> Vec<GameRecord> {
    let by_id: HashMap<u64, GameRecord> =
        games.into_iter().map(|game| (game.id, game)).collect();

    ids.iter().filter_map(|id| by_id.get(id).cloned()).collect()
}
