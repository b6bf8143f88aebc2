//! Facet state and snapshot emission.

use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use super::model::{Bound, BoundKind, Filters};

/// Holds the live facet inputs and emits [`Filters`] snapshots.
///
/// Category and ingredient changes produce a snapshot immediately. Each of
/// the four numeric bounds has its own debouncer; a bound only lands in a
/// snapshot after its channel settles, and channels never cancel each other.
#[derive(Debug, Clone)]
pub struct FilterAggregator {
    current: Filters,
    channels: [Debouncer<f64>; 4],
    disposed: bool,
}

impl FilterAggregator {
    pub fn new(delay: Duration) -> Self {
        Self::with_filters(Filters::default(), delay)
    }

    /// Start from an existing snapshot, e.g. one restored from navigation.
    pub fn with_filters(filters: Filters, delay: Duration) -> Self {
        Self {
            current: filters,
            channels: std::array::from_fn(|_| Debouncer::new(delay)),
            disposed: false,
        }
    }

    /// The last emitted snapshot.
    pub fn snapshot(&self) -> &Filters {
        &self.current
    }

    /// Value the slider should display, including unsettled input.
    pub fn live_value(&self, kind: BoundKind) -> f64 {
        self.channels[index(kind)]
            .pending()
            .copied()
            .unwrap_or(self.current.bound(kind).value)
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Option<Filters> {
        if self.disposed {
            return None;
        }
        let category = category.into();
        if self.current.category == category {
            return None;
        }
        self.current.category = category;
        tracing::debug!(category = %self.current.category, "Category facet changed");
        Some(self.current.clone())
    }

    /// Add or remove an ingredient from the selected set.
    pub fn set_ingredient(&mut self, ingredient: &str, selected: bool) -> Option<Filters> {
        if self.disposed {
            return None;
        }
        let changed = if selected {
            self.current.ingredients.insert(ingredient.to_string())
        } else {
            self.current.ingredients.remove(ingredient)
        };
        if !changed {
            return None;
        }
        tracing::debug!(ingredient, selected, "Ingredient facet changed");
        Some(self.current.clone())
    }

    pub fn toggle_ingredient(&mut self, ingredient: &str) -> Option<Filters> {
        let selected = !self.current.ingredients.contains(ingredient);
        self.set_ingredient(ingredient, selected)
    }

    /// Feed a raw slider value into its debounce channel.
    pub fn set_bound(&mut self, kind: BoundKind, value: f64, now: Instant) {
        if self.disposed {
            return;
        }
        let value = kind.facet().normalize(value);
        self.channels[index(kind)].schedule(value, now);
    }

    /// Nudge a slider by `steps` slider increments from its live value.
    pub fn step_bound(&mut self, kind: BoundKind, steps: i32, now: Instant) {
        let next = self.live_value(kind) + kind.facet().step() * f64::from(steps);
        self.set_bound(kind, next, now);
    }

    /// Apply every channel that has settled by `now`.
    ///
    /// Returns one snapshot if at least one channel settled and changed its
    /// bound. Channels settling at different times yield separate snapshots
    /// on separate polls.
    pub fn poll(&mut self, now: Instant) -> Option<Filters> {
        if self.disposed {
            return None;
        }
        let mut changed = false;
        for kind in BoundKind::ALL {
            if let Some(value) = self.channels[index(kind)].poll(now) {
                let bound = self.current.bound_mut(kind);
                let next = Bound::set(value);
                if *bound != next {
                    *bound = next;
                    changed = true;
                    tracing::debug!(bound = kind.param(), value, "Range facet settled");
                }
            }
        }
        changed.then(|| self.current.clone())
    }

    /// Earliest instant at which [`poll`](Self::poll) may emit.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.channels.iter().filter_map(Debouncer::deadline).min()
    }

    /// Cancel all pending timers. Nothing is emitted afterwards.
    pub fn dispose(&mut self) {
        for channel in &mut self.channels {
            channel.cancel();
        }
        self.disposed = true;
    }
}

fn index(kind: BoundKind) -> usize {
    match kind {
        BoundKind::MinRating => 0,
        BoundKind::MaxRating => 1,
        BoundKind::MinProtein => 2,
        BoundKind::MaxProtein => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn category_emits_immediately() {
        let mut agg = FilterAggregator::new(DELAY);
        let snapshot = agg.set_category("Dessert").unwrap();
        assert_eq!(snapshot.category, "Dessert");
        assert!(agg.set_category("Dessert").is_none());
    }

    #[test]
    fn ingredient_toggle_adds_and_removes() {
        let mut agg = FilterAggregator::new(DELAY);
        let added = agg.toggle_ingredient("egg").unwrap();
        assert!(added.ingredients.contains("egg"));
        let removed = agg.toggle_ingredient("egg").unwrap();
        assert!(removed.ingredients.is_empty());
        assert!(agg.set_ingredient("milk", false).is_none());
    }

    #[test]
    fn slider_drag_collapses_to_one_snapshot() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.set_bound(BoundKind::MinRating, 1.0, t0);
        agg.set_bound(BoundKind::MinRating, 2.0, ms(t0, 100));
        agg.set_bound(BoundKind::MinRating, 3.0, ms(t0, 200));

        assert!(agg.poll(ms(t0, 450)).is_none());
        let snapshot = agg.poll(ms(t0, 500)).unwrap();
        assert_eq!(snapshot.min_rating, Bound::set(3.0));
        assert!(agg.poll(ms(t0, 900)).is_none());
    }

    #[test]
    fn channels_settle_independently() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.set_bound(BoundKind::MinRating, 2.0, t0);
        agg.set_bound(BoundKind::MaxProtein, 40.0, ms(t0, 200));

        let first = agg.poll(ms(t0, 300)).unwrap();
        assert_eq!(first.min_rating.value, 2.0);
        assert_eq!(first.max_protein.value, 100.0);

        let second = agg.poll(ms(t0, 500)).unwrap();
        assert_eq!(second.min_rating.value, 2.0);
        assert_eq!(second.max_protein.value, 40.0);
    }

    #[test]
    fn other_channel_does_not_restart_timer() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.set_bound(BoundKind::MinProtein, 10.0, t0);
        agg.set_bound(BoundKind::MaxProtein, 90.0, ms(t0, 250));
        let snapshot = agg.poll(ms(t0, 300)).unwrap();
        assert_eq!(snapshot.min_protein.value, 10.0);
        assert_eq!(agg.next_deadline(), Some(ms(t0, 550)));
    }

    #[test]
    fn dispose_cancels_pending_emission() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.set_bound(BoundKind::MaxRating, 4.0, t0);
        agg.dispose();
        assert!(agg.next_deadline().is_none());
        assert!(agg.poll(ms(t0, 1_000)).is_none());
        assert!(agg.set_category("Lunch").is_none());
    }

    #[test]
    fn live_value_reflects_unsettled_input() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.step_bound(BoundKind::MaxRating, -3, t0);
        assert_eq!(agg.live_value(BoundKind::MaxRating), 4.7);
        assert_eq!(agg.snapshot().max_rating.value, 5.0);
    }

    #[test]
    fn settling_on_same_value_after_touch_emits_once() {
        let t0 = Instant::now();
        let mut agg = FilterAggregator::new(DELAY);
        agg.set_bound(BoundKind::MinRating, 0.0, t0);
        // Untouched -> touched is a change even at the same value.
        assert!(agg.poll(ms(t0, 300)).is_some());
        agg.set_bound(BoundKind::MinRating, 0.0, ms(t0, 400));
        assert!(agg.poll(ms(t0, 700)).is_none());
    }
}
