use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::search::{Filters, NavigationState};

/// Terminal client for searching recipes.
#[derive(Debug, Parser)]
#[command(name = "recipe-search", version, about)]
pub struct Cli {
    /// Path to config file (default: platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Initial search query
    #[arg(long, short = 'q', value_name = "TEXT")]
    pub query: Option<String>,

    /// Initial category filter
    #[arg(long, short = 'c', value_name = "NAME")]
    pub category: Option<String>,

    /// Results per page (1-100)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,
}

impl Cli {
    /// Overlay command-line values on a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.api_base_url {
            config.api.base_url = url.clone();
        }
        if let Some(size) = self.page_size {
            config.search.page_size = size;
        }
    }

    /// Seed for the first list view, if `--query` or `--category` was given.
    pub fn initial_state(&self) -> Option<NavigationState> {
        if self.query.is_none() && self.category.is_none() {
            return None;
        }
        let mut filters = Filters::default();
        if let Some(category) = &self.category {
            filters = filters.with_category(category.clone());
        }
        Some(NavigationState {
            query: self.query.clone().unwrap_or_default(),
            filters,
            page: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_config() {
        let cli = Cli::parse_from([
            "recipe-search",
            "--api-base-url",
            "http://127.0.0.1:9000",
            "--page-size",
            "30",
        ]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.search.page_size, 30);
    }

    #[test]
    fn query_and_category_seed_list_view() {
        let cli = Cli::parse_from(["recipe-search", "-q", "soup", "--category", "Dinner"]);
        let seed = cli.initial_state().unwrap();
        assert_eq!(seed.query, "soup");
        assert_eq!(seed.filters.category, "Dinner");
        assert_eq!(seed.page, 1);
    }

    #[test]
    fn no_seed_without_flags() {
        let cli = Cli::parse_from(["recipe-search"]);
        assert!(cli.initial_state().is_none());
    }
}
