//! WASM bindings for frontend payout previews

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{plan_distribution, rank_players, PoolConfig, Standing};

fn parse_standings(json: &str) -> Result<Vec<Standing>, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid standings: {}", e)))
}

/// Preview the payout of `prize_pool` for the given standings.
///
/// # Arguments
/// * `prize_pool` - Total collected entry fees
/// * `standings_json` - JSON array of Standing, in join order
/// * `config_json` - JSON PoolConfig
///
/// # Returns
/// DistributionPlan as a JS object
#[wasm_bindgen]
pub fn preview_payouts(
    prize_pool: u64,
    standings_json: &str,
    config_json: &str,
) -> Result<JsValue, JsError> {
    let standings = parse_standings(standings_json)?;
    let config = PoolConfig::from_json(config_json)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;

    let plan = plan_distribution(prize_pool, &standings, &config)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&plan)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Rank standings for a live leaderboard.
#[wasm_bindgen]
pub fn get_leaderboard(standings_json: &str) -> Result<JsValue, JsError> {
    let standings = parse_standings(standings_json)?;
    serde_wasm_bindgen::to_value(&rank_players(&standings))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
