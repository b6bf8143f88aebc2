use crate::search::{BoundKind, DetailLookup, RangeFacet, Recipe, SearchView};
use crate::ui::app::{App, Focus};
use crate::ui::footer::Footer;
use crate::ui::format::{nutrition, rating_label, truncate, MISSING_VALUE, NO_RESULTS};
use crate::ui::header::SearchBar;
use crate::ui::layout::{filter_sections, layout_regions, split_body};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FOCUS_BORDER, GLOBAL_BORDER, MUTED, STAR, STATUS_ERROR, TEXT,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    frame.render_widget(Clear, body);

    match app.detail() {
        Some(lookup) => {
            let detail_area = Rect {
                height: area.height.saturating_sub(footer.height),
                ..area
            };
            draw_detail(frame, app, &lookup, detail_area);
            frame.render_widget(Footer::widget(footer, None), footer);
        }
        None => {
            let view = app.controller().view();
            let bar = SearchBar::new(app.input(), app.is_editing(), app.focus() == Focus::Search);
            frame.render_widget(bar.widget(), header);
            if app.is_editing() && header.width > 2 && header.height > 1 {
                let x = header.x + bar.cursor_offset().min(header.width - 2);
                frame.set_cursor_position((x, header.y + 1));
            }

            let (panel, results) = split_body(body, view.show_filters());
            if let Some(panel) = panel {
                draw_filters(frame, app, &view, panel);
            }
            draw_results(frame, app, &view, results);
            frame.render_widget(Footer::widget(footer, Some(&view)), footer);
        }
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { FOCUS_BORDER } else { GLOBAL_BORDER };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn highlight() -> Style {
    Style::default()
        .bg(ACTIVE_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

fn draw_filters(frame: &mut Frame<'_>, app: &App, view: &SearchView<'_>, panel: Rect) {
    let (categories_area, ingredients_area, ranges_area) = filter_sections(panel);

    let selected_category = view.filters.category.as_str();
    let categories: Vec<ListItem> = app
        .category_choices()
        .into_iter()
        .map(|choice| {
            let label = if choice.is_empty() { "All" } else { choice };
            let marker = if choice == selected_category { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, label))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(app.category_cursor()));
    frame.render_stateful_widget(
        List::new(categories)
            .block(panel_block(" Category ", app.focus() == Focus::Category))
            .highlight_style(highlight()),
        categories_area,
        &mut state,
    );

    let ingredients: Vec<ListItem> = app
        .controller()
        .options()
        .ingredients
        .iter()
        .map(|name| {
            let mark = if view.filters.ingredients.contains(name) { "[x] " } else { "[ ] " };
            ListItem::new(format!("{}{}", mark, name))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(app.ingredient_cursor()));
    frame.render_stateful_widget(
        List::new(ingredients)
            .block(panel_block(" Ingredients ", app.focus() == Focus::Ingredients))
            .highlight_style(highlight()),
        ingredients_area,
        &mut state,
    );

    let ranges_focused = app.focus() == Focus::Ranges;
    let lines: Vec<Line> = BoundKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let value = app.controller().live_bound(*kind);
            let text = match kind.facet() {
                RangeFacet::Rating => format!("{:<12}{:>6.1}", kind.label(), value),
                RangeFacet::Protein => format!("{:<12}{:>6.0}", kind.label(), value),
            };
            let style = if ranges_focused && i == app.range_cursor() {
                highlight()
            } else {
                Style::default().fg(TEXT)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(panel_block(" Ranges ", ranges_focused)),
        ranges_area,
    );
}

fn draw_results(frame: &mut Frame<'_>, app: &App, view: &SearchView<'_>, area: Rect) {
    let title = if view.show_results() {
        format!(" Results ({}) ", view.total)
    } else {
        " Results ".to_string()
    };
    let block = panel_block(&title, app.focus() == Focus::Results);

    if let Some(message) = view.error() {
        let text = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(STATUS_ERROR),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    if view.is_loading() {
        let text = Paragraph::new(Span::styled("Loading…", Style::default().fg(MUTED))).block(block);
        frame.render_widget(text, area);
        return;
    }

    if view.is_empty() {
        let text = Paragraph::new(Span::styled(NO_RESULTS, Style::default().fg(MUTED))).block(block);
        frame.render_widget(text, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view.results().iter().map(|r| result_card(r, width)).collect();
    let mut state = ListState::default().with_selected(Some(app.result_cursor()));
    frame.render_stateful_widget(
        List::new(items).block(block).highlight_style(highlight()),
        area,
        &mut state,
    );
}

fn rating_span(recipe: &Recipe) -> Span<'static> {
    let color = if recipe.effective_rating().is_some() { STAR } else { MUTED };
    Span::styled(rating_label(recipe), Style::default().fg(color))
}

fn result_card(recipe: &Recipe, width: usize) -> ListItem<'static> {
    let summary = recipe
        .description
        .as_deref()
        .map(|d| truncate(d, width))
        .unwrap_or_default();
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                truncate(&recipe.title, width.saturating_sub(16)),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            rating_span(recipe),
        ]),
        Line::from(Span::styled(summary, Style::default().fg(MUTED))),
    ])
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, lookup: &DetailLookup, area: Rect) {
    let block = panel_block(" Recipe ", true);
    let recipe = match lookup {
        DetailLookup::Found(recipe) => recipe,
        DetailLookup::NotInCurrentView { id } => {
            let text = Paragraph::new(Line::from(Span::styled(
                format!("Recipe {} is not in the current results. Press Esc to go back.", id),
                Style::default().fg(STATUS_ERROR),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        }
    };

    frame.render_widget(
        Paragraph::new(detail_lines(recipe))
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll(), 0))
            .block(block),
        area,
    );
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

pub fn detail_lines(recipe: &Recipe) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        recipe.title.clone(),
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    ))];

    lines.push(Line::from(rating_span(recipe)));
    if let Some(date) = &recipe.date {
        lines.push(Line::from(Span::styled(date.clone(), Style::default().fg(MUTED))));
    }
    if let Some(description) = &recipe.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }

    lines.push(Line::from(""));
    lines.push(section("Nutrition"));
    lines.push(Line::from(format!(
        "Calories: {}   Protein: {}   Fat: {}   Sodium: {}",
        nutrition(recipe.calories, ""),
        nutrition(recipe.protein, "g"),
        nutrition(recipe.fat, "g"),
        nutrition(recipe.sodium, "mg"),
    )));

    lines.push(Line::from(""));
    lines.push(section("Ingredients"));
    if recipe.ingredients.is_empty() {
        lines.push(Line::from(MISSING_VALUE));
    }
    lines.extend(recipe.ingredients.iter().map(|i| Line::from(format!("• {}", i))));

    lines.push(Line::from(""));
    lines.push(section("Directions"));
    if recipe.directions.is_empty() {
        lines.push(Line::from(MISSING_VALUE));
    }
    lines.extend(
        recipe
            .directions
            .iter()
            .enumerate()
            .map(|(n, step)| Line::from(format!("{}. {}", n + 1, step))),
    );

    if !recipe.categories.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Categories"));
        lines.push(Line::from(recipe.categories.join(", ")));
    }
    lines
}
