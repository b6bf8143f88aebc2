//! Data carried between the backend and the search controller.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single recipe as returned by the backend.
///
/// The client only ever holds a read-only copy scoped to the current
/// result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Recipe {
    /// Rating treated as present only when it is non-zero.
    pub fn effective_rating(&self) -> Option<f64> {
        self.rating.filter(|r| *r != 0.0)
    }

    pub fn stars(&self) -> Stars {
        Stars::from_rating(self.rating.unwrap_or(0.0))
    }
}

/// Star breakdown of a rating out of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl Stars {
    pub const MAX: u8 = 5;

    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, f64::from(Self::MAX));
        let full = rating.floor() as u8;
        let half = u8::from(full < Self::MAX && rating.fract() >= 0.5);
        Self {
            full,
            half,
            empty: Self::MAX - full - half,
        }
    }
}

/// One page of search results.
///
/// `total` counts matches across every page, not just this one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(rename = "recipes", default)]
    pub items: Vec<Recipe>,
    #[serde(default)]
    pub total: u64,
}

impl ResultPage {
    pub fn find(&self, id: i64) -> Option<&Recipe> {
        self.items.iter().find(|r| r.id == id)
    }
}

/// Numeric facet with a closed range and slider step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFacet {
    Rating,
    Protein,
}

impl RangeFacet {
    pub fn lower(self) -> f64 {
        0.0
    }

    pub fn upper(self) -> f64 {
        match self {
            RangeFacet::Rating => 5.0,
            RangeFacet::Protein => 100.0,
        }
    }

    pub fn step(self) -> f64 {
        match self {
            RangeFacet::Rating => 0.1,
            RangeFacet::Protein => 1.0,
        }
    }

    /// Clamp to the facet range and snap to the slider step.
    pub fn normalize(self, value: f64) -> f64 {
        let step = self.step();
        let snapped = (value / step).round() * step;
        // Keep one decimal for rating so 0.1 steps do not drift.
        let snapped = (snapped * 10.0).round() / 10.0;
        snapped.clamp(self.lower(), self.upper())
    }
}

/// Identifies one of the four debounced numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundKind {
    MinRating,
    MaxRating,
    MinProtein,
    MaxProtein,
}

impl BoundKind {
    pub const ALL: [BoundKind; 4] = [
        BoundKind::MinRating,
        BoundKind::MaxRating,
        BoundKind::MinProtein,
        BoundKind::MaxProtein,
    ];

    /// Query parameter name on the `/search` endpoint.
    pub fn param(self) -> &'static str {
        match self {
            BoundKind::MinRating => "min_rating",
            BoundKind::MaxRating => "max_rating",
            BoundKind::MinProtein => "min_protein",
            BoundKind::MaxProtein => "max_protein",
        }
    }

    pub fn facet(self) -> RangeFacet {
        match self {
            BoundKind::MinRating | BoundKind::MaxRating => RangeFacet::Rating,
            BoundKind::MinProtein | BoundKind::MaxProtein => RangeFacet::Protein,
        }
    }

    /// Value that means "no filtering" on this bound.
    pub fn default_value(self) -> f64 {
        match self {
            BoundKind::MinRating | BoundKind::MinProtein => self.facet().lower(),
            BoundKind::MaxRating | BoundKind::MaxProtein => self.facet().upper(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundKind::MinRating => "Min rating",
            BoundKind::MaxRating => "Max rating",
            BoundKind::MinProtein => "Min protein (g)",
            BoundKind::MaxProtein => "Max protein (g)",
        }
    }
}

/// A numeric bound plus whether the user has ever moved it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub touched: bool,
}

impl Bound {
    pub fn untouched(value: f64) -> Self {
        Self {
            value,
            touched: false,
        }
    }

    pub fn set(value: f64) -> Self {
        Self {
            value,
            touched: true,
        }
    }
}

/// Immutable snapshot of every facet.
///
/// `min <= max` is expected but not enforced; an inverted range is sent
/// to the backend as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub category: String,
    pub ingredients: BTreeSet<String>,
    pub min_rating: Bound,
    pub max_rating: Bound,
    pub min_protein: Bound,
    pub max_protein: Bound,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            category: String::new(),
            ingredients: BTreeSet::new(),
            min_rating: Bound::untouched(BoundKind::MinRating.default_value()),
            max_rating: Bound::untouched(BoundKind::MaxRating.default_value()),
            min_protein: Bound::untouched(BoundKind::MinProtein.default_value()),
            max_protein: Bound::untouched(BoundKind::MaxProtein.default_value()),
        }
    }
}

impl Filters {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients.insert(ingredient.into());
        self
    }

    pub fn with_bound(mut self, kind: BoundKind, value: f64) -> Self {
        *self.bound_mut(kind) = Bound::set(value);
        self
    }

    pub fn bound(&self, kind: BoundKind) -> Bound {
        match kind {
            BoundKind::MinRating => self.min_rating,
            BoundKind::MaxRating => self.max_rating,
            BoundKind::MinProtein => self.min_protein,
            BoundKind::MaxProtein => self.max_protein,
        }
    }

    pub fn bound_mut(&mut self, kind: BoundKind) -> &mut Bound {
        match kind {
            BoundKind::MinRating => &mut self.min_rating,
            BoundKind::MaxRating => &mut self.max_rating,
            BoundKind::MinProtein => &mut self.min_protein,
            BoundKind::MaxProtein => &mut self.max_protein,
        }
    }

    /// True when no facet narrows the result set.
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_empty()
            && self.ingredients.is_empty()
            && BoundKind::ALL
                .iter()
                .all(|kind| self.bound(*kind).value == kind.default_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_are_unfiltered() {
        let filters = Filters::default();
        assert!(filters.is_unfiltered());
        assert_eq!(filters.max_rating.value, 5.0);
        assert_eq!(filters.max_protein.value, 100.0);
        assert!(!filters.min_rating.touched);
    }

    #[test]
    fn category_makes_filters_active() {
        assert!(!Filters::default().with_category("Dessert").is_unfiltered());
    }

    #[test]
    fn touching_bound_back_to_default_stays_unfiltered() {
        let filters = Filters::default().with_bound(BoundKind::MinRating, 0.0);
        assert!(filters.min_rating.touched);
        assert!(filters.is_unfiltered());
    }

    #[test]
    fn normalize_clamps_and_snaps() {
        assert_eq!(RangeFacet::Rating.normalize(7.0), 5.0);
        assert_eq!(RangeFacet::Rating.normalize(-1.0), 0.0);
        assert_eq!(RangeFacet::Rating.normalize(2.54), 2.5);
        assert_eq!(RangeFacet::Protein.normalize(41.6), 42.0);
    }

    #[test]
    fn stars_follow_half_rule() {
        assert_eq!(Stars::from_rating(3.5), Stars { full: 3, half: 1, empty: 1 });
        assert_eq!(Stars::from_rating(3.4), Stars { full: 3, half: 0, empty: 2 });
        assert_eq!(Stars::from_rating(5.0), Stars { full: 5, half: 0, empty: 0 });
        assert_eq!(Stars::from_rating(0.0), Stars { full: 0, half: 0, empty: 5 });
    }

    #[test]
    fn recipe_decodes_backend_shape() {
        let json = r#"{"id": 7, "title": "Soup", "desc": "Warm", "ingredients": ["water"],
            "directions": ["boil"], "categories": ["Dinner"], "calories": 120,
            "protein": null, "rating": 4.375}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.description.as_deref(), Some("Warm"));
        assert_eq!(recipe.calories, Some(120.0));
        assert_eq!(recipe.protein, None);
        assert_eq!(recipe.effective_rating(), Some(4.375));
    }

    #[test]
    fn result_page_find_by_id() {
        let page: ResultPage =
            serde_json::from_str(r#"{"recipes": [{"id": 1, "title": "A"}], "total": 1}"#)
                .unwrap();
        assert!(page.find(1).is_some());
        assert!(page.find(2).is_none());
    }
}
