//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use recipe_search::api::SearchClient;
use recipe_search::config::ApiConfig;
use recipe_search::search::{ControllerSettings, ResultPage, SearchStateController};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to a fresh `config.toml` in a temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn client_for(base_url: &str) -> SearchClient {
    SearchClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    })
    .expect("valid client")
}

pub fn controller() -> SearchStateController {
    SearchStateController::new(ControllerSettings::default(), None)
}

/// JSON body for `/search` with `count` recipes numbered from `first_id`.
pub fn search_body(first_id: i64, count: usize, total: u64) -> String {
    let recipes: Vec<serde_json::Value> = (0..count as i64)
        .map(|i| {
            serde_json::json!({
                "id": first_id + i,
                "title": format!("Recipe {}", first_id + i),
                "desc": "Tasty",
                "ingredients": ["flour", "egg"],
                "directions": ["Mix", "Bake"],
                "rating": 4.5,
                "protein": 12.0,
                "categories": ["Dessert"]
            })
        })
        .collect();
    serde_json::json!({ "recipes": recipes, "total": total }).to_string()
}

pub fn result_page(first_id: i64, count: usize, total: u64) -> ResultPage {
    serde_json::from_str(&search_body(first_id, count, total)).expect("valid page")
}
