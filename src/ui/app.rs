use std::time::Instant;

use crate::api::ApiError;
use crate::search::{
    BoundKind, Completion, DetailLookup, FetchCommand, RequestId, ResultPage, Route,
    SearchStateController,
};

/// Which list-view panel receives navigation keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Search,
    Category,
    Ingredients,
    Ranges,
    Results,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Search,
        Focus::Category,
        Focus::Ingredients,
        Focus::Ranges,
        Focus::Results,
    ];

    fn is_filter(self) -> bool {
        matches!(self, Focus::Category | Focus::Ingredients | Focus::Ranges)
    }
}

/// Terminal-side state around the search controller.
///
/// Holds cursors, the query being typed and the commands waiting to be
/// executed. Input handlers never touch the network; the runtime drains
/// [`App::take_commands`] after every event.
pub struct App {
    controller: SearchStateController,
    should_quit: bool,
    focus: Focus,
    editing: bool,
    input: String,
    category_cursor: usize,
    ingredient_cursor: usize,
    range_cursor: usize,
    result_cursor: usize,
    detail_scroll: u16,
    commands: Vec<FetchCommand>,
}

impl App {
    pub fn new(controller: SearchStateController) -> Self {
        let input = controller.query().to_string();
        Self {
            controller,
            should_quit: false,
            focus: Focus::Search,
            editing: false,
            input,
            category_cursor: 0,
            ingredient_cursor: 0,
            range_cursor: 0,
            result_cursor: 0,
            detail_scroll: 0,
            commands: Vec::new(),
        }
    }

    /// Queue the initial search.
    pub fn start(&mut self) {
        let cmd = self.controller.start();
        self.commands.push(cmd);
    }

    pub fn controller(&self) -> &SearchStateController {
        &self.controller
    }

    pub fn take_commands(&mut self) -> Vec<FetchCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.controller.dispose();
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn ingredient_cursor(&self) -> usize {
        self.ingredient_cursor
    }

    pub fn range_cursor(&self) -> usize {
        self.range_cursor
    }

    pub fn result_cursor(&self) -> usize {
        self.result_cursor
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn route(&self) -> Route {
        self.controller.route()
    }

    /// Category choices as shown: "All" (no filter) followed by the loaded options.
    pub fn category_choices(&self) -> Vec<&str> {
        std::iter::once("")
            .chain(self.controller.options().categories.iter().map(String::as_str))
            .collect()
    }

    pub fn detail(&self) -> Option<DetailLookup> {
        self.controller.detail()
    }

    // --- events from the runtime ---

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(cmd) = self.controller.tick(now) {
            self.commands.push(cmd);
        }
    }

    pub fn on_search_complete(
        &mut self,
        request_id: RequestId,
        result: Result<ResultPage, ApiError>,
    ) {
        if self.controller.on_search_complete(request_id, result) == Completion::Applied {
            self.result_cursor = 0;
            if !self.controller.view().show_filters() && self.focus.is_filter() {
                self.focus = Focus::Search;
            }
        }
    }

    pub fn on_categories_loaded(&mut self, result: Result<Vec<String>, ApiError>) {
        self.controller.set_category_options(result);
        self.category_cursor = self.selected_category_index();
    }

    pub fn on_ingredients_loaded(&mut self, result: Result<Vec<String>, ApiError>) {
        self.controller.set_ingredient_options(result);
        self.ingredient_cursor = 0;
    }

    // --- query editing ---

    pub fn begin_edit(&mut self) {
        self.focus = Focus::Search;
        self.editing = true;
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Leave edit mode without submitting; the field reverts to the active query.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.input = self.controller.query().to_string();
    }

    pub fn submit(&mut self) {
        self.editing = false;
        let query = self.input.trim().to_string();
        self.input = query.clone();
        if let Some(cmd) = self.controller.submit_query(query) {
            self.commands.push(cmd);
        }
    }

    // --- list navigation ---

    pub fn focus_next(&mut self) {
        self.focus = self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.cycle_focus(Focus::ORDER.len() - 1);
    }

    fn cycle_focus(&self, step: usize) -> Focus {
        let show_filters = self.controller.view().show_filters();
        let start = Focus::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        (1..=Focus::ORDER.len())
            .map(|offset| Focus::ORDER[(start + offset * step) % Focus::ORDER.len()])
            .find(|f| show_filters || !f.is_filter())
            .unwrap_or(Focus::Search)
    }

    /// Up/Down within the focused panel.
    pub fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Search => {}
            Focus::Category => {
                let len = self.category_choices().len();
                self.category_cursor = step_index(self.category_cursor, delta, len);
            }
            Focus::Ingredients => {
                let len = self.controller.options().ingredients.len();
                self.ingredient_cursor = step_index(self.ingredient_cursor, delta, len);
            }
            Focus::Ranges => {
                self.range_cursor = step_index(self.range_cursor, delta, BoundKind::ALL.len());
            }
            Focus::Results => {
                let len = self.controller.view().results().len();
                self.result_cursor = step_index(self.result_cursor, delta, len);
            }
        }
    }

    /// Left/Right on the focused range slider.
    pub fn adjust_range(&mut self, steps: i32, now: Instant) {
        if self.focus != Focus::Ranges {
            return;
        }
        let kind = BoundKind::ALL[self.range_cursor];
        self.controller.step_bound(kind, steps, now);
    }

    pub fn toggle_ingredient(&mut self) {
        if self.focus != Focus::Ingredients {
            return;
        }
        let Some(ingredient) = self
            .controller
            .options()
            .ingredients
            .get(self.ingredient_cursor)
            .cloned()
        else {
            return;
        };
        if let Some(cmd) = self.controller.toggle_ingredient(&ingredient) {
            self.commands.push(cmd);
        }
    }

    /// Enter outside edit mode: apply the category or open the selected recipe.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Search => self.begin_edit(),
            Focus::Category => {
                let choice = self
                    .category_choices()
                    .get(self.category_cursor)
                    .map(|c| c.to_string());
                if let Some(category) = choice {
                    if let Some(cmd) = self.controller.set_category(category) {
                        self.commands.push(cmd);
                    }
                }
            }
            Focus::Ingredients => self.toggle_ingredient(),
            Focus::Ranges => {}
            Focus::Results => self.open_selected(),
        }
    }

    pub fn next_page(&mut self) {
        if let Some(cmd) = self.controller.next_page() {
            self.commands.push(cmd);
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(cmd) = self.controller.prev_page() {
            self.commands.push(cmd);
        }
    }

    fn open_selected(&mut self) {
        let Some(id) = self
            .controller
            .view()
            .results()
            .get(self.result_cursor)
            .map(|recipe| recipe.id)
        else {
            return;
        };
        self.detail_scroll = 0;
        if let DetailLookup::NotInCurrentView { id } = self.controller.open_detail(id) {
            tracing::warn!(id, "Selected recipe missing from held results");
        }
    }

    // --- detail view ---

    pub fn scroll_detail(&mut self, delta: i16) {
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
    }

    pub fn back(&mut self) {
        if self.controller.route() == Route::List {
            return;
        }
        if let Some(cmd) = self.controller.back_to_list() {
            self.commands.push(cmd);
            self.result_cursor = 0;
        }
        self.input = self.controller.query().to_string();
        self.category_cursor = self.selected_category_index();
    }

    fn selected_category_index(&self) -> usize {
        let current = self.controller.filters().category.as_str();
        self.category_choices()
            .iter()
            .position(|c| *c == current)
            .unwrap_or(0)
    }
}

fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ControllerSettings, DEFAULT_DEBOUNCE};

    fn app() -> App {
        App::new(SearchStateController::new(ControllerSettings::default(), None))
    }

    fn page_of(total: u64, ids: &[i64]) -> ResultPage {
        let items = ids
            .iter()
            .map(|id| serde_json::from_value(serde_json::json!({"id": id, "title": "r"})).unwrap())
            .collect();
        ResultPage { items, total }
    }

    fn loaded_app() -> App {
        let mut app = app();
        app.start();
        let cmd = app.take_commands().pop().unwrap();
        app.on_search_complete(cmd.request_id, Ok(page_of(40, &[1, 2, 3])));
        app
    }

    #[test]
    fn typing_then_enter_submits_query() {
        let mut app = loaded_app();
        app.begin_edit();
        for ch in "soup".chars() {
            app.push_char(ch);
        }
        app.submit();
        let cmds = app.take_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].request.get("query"), Some("soup"));
        assert!(!app.is_editing());
    }

    #[test]
    fn cancel_edit_restores_active_query() {
        let mut app = loaded_app();
        app.begin_edit();
        app.push_char('x');
        app.cancel_edit();
        assert_eq!(app.input(), "");
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn focus_skips_filters_in_error_state() {
        let mut app = app();
        app.start();
        let cmd = app.take_commands().pop().unwrap();
        app.on_search_complete(cmd.request_id, Err(ApiError::Status { status: 500 }));

        app.focus_next();
        assert_eq!(app.focus(), Focus::Results);
        app.focus_next();
        assert_eq!(app.focus(), Focus::Search);
        app.focus_prev();
        assert_eq!(app.focus(), Focus::Results);
    }

    #[test]
    fn category_choice_starts_with_all() {
        let mut app = loaded_app();
        app.on_categories_loaded(Ok(vec!["Dessert".into(), "Dinner".into()]));
        assert_eq!(app.category_choices(), vec!["", "Dessert", "Dinner"]);

        app.focus_next();
        app.move_cursor(1);
        app.activate();
        let cmds = app.take_commands();
        assert_eq!(cmds[0].request.get("category"), Some("Dessert"));
    }

    #[test]
    fn range_adjustment_waits_for_tick() {
        let t0 = Instant::now();
        let mut app = loaded_app();
        app.focus = Focus::Ranges;
        app.adjust_range(5, t0);
        assert!(app.take_commands().is_empty());
        app.on_tick(t0 + DEFAULT_DEBOUNCE);
        let cmds = app.take_commands();
        assert_eq!(cmds[0].request.get("min_rating"), Some("0.5"));
    }

    #[test]
    fn enter_on_result_opens_detail_and_back_returns() {
        let mut app = loaded_app();
        app.focus = Focus::Results;
        app.move_cursor(1);
        app.activate();
        assert_eq!(app.route(), Route::Detail { id: 2 });
        assert!(app.detail().and_then(|d| d.recipe().cloned()).is_some());

        app.back();
        assert_eq!(app.route(), Route::List);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn cursor_is_clamped_to_list() {
        let mut app = loaded_app();
        app.focus = Focus::Results;
        app.move_cursor(10);
        assert_eq!(app.result_cursor(), 2);
        app.move_cursor(-10);
        assert_eq!(app.result_cursor(), 0);
    }

    #[test]
    fn quit_disposes_pending_sliders() {
        let t0 = Instant::now();
        let mut app = loaded_app();
        app.focus = Focus::Ranges;
        app.adjust_range(1, t0);
        app.request_quit();
        app.on_tick(t0 + DEFAULT_DEBOUNCE);
        assert!(app.take_commands().is_empty());
        assert!(app.should_quit());
    }
}
