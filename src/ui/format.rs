//! Text for recipe cards and the detail page.

use crate::search::{Recipe, Stars};

pub const MISSING_VALUE: &str = "N/A";
pub const UNRATED: &str = "Unrated";
pub const NO_RESULTS: &str = "No recipes found";

pub fn star_string(stars: Stars) -> String {
    let mut out = String::with_capacity(usize::from(Stars::MAX) * 3);
    out.extend(std::iter::repeat('★').take(usize::from(stars.full)));
    out.extend(std::iter::repeat('½').take(usize::from(stars.half)));
    out.extend(std::iter::repeat('☆').take(usize::from(stars.empty)));
    out
}

/// Stars plus the numeric value, or "Unrated".
pub fn rating_label(recipe: &Recipe) -> String {
    match recipe.effective_rating() {
        Some(rating) => format!("{} {:.1}", star_string(recipe.stars()), rating),
        None => UNRATED.to_string(),
    }
}

/// A nutrition figure with its unit, or "N/A" when the recipe lacks it.
pub fn nutrition(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{}", v.round()),
        Some(v) => format!("{}{}", v.round(), unit),
        None => MISSING_VALUE.to_string(),
    }
}

pub fn pager(page: u32, total_pages: u64) -> String {
    format!("Page {} of {}", page, total_pages.max(1))
}

/// First `max_chars` characters of `text`, with an ellipsis if cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
