//! Search modal rendering.
//!
//! Layout is computed separately from drawing so the event loop can keep the
//! rectangles of the last frame for pointer hit-testing.

use crate::model::Document;
use crate::state::{AppState, ModalLayout, SearchPattern, SearchTiming};
use crate::view::highlight::{excerpt, flatten_whitespace, highlight_spans, truncate_to_width};
use crate::view::styles::SearchStyles;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal rows taken by one result (title, excerpt, meta).
pub const ITEM_HEIGHT: u16 = 3;

const PANEL_MAX_WIDTH: u16 = 90;
const TRIGGER_LABEL: &str = "⌕ Search  Ctrl+K";
const ACTIVE_MARKER: &str = "▶ ";
const INACTIVE_MARKER: &str = "  ";
const EXCERPT_LEAD_CHARS: usize = 24;
const SEARCH_ICON: &str = "⌕";
const CLEAR_ICON: &str = "✕";
/// Icon plus the space after it.
const INPUT_PREFIX_WIDTH: u16 = 2;

/// Result count and duration of the last pass, e.g. `"3 results - in 0.004 seconds"`.
pub fn results_summary(count: usize, timing: &SearchTiming) -> String {
    format!("{count} results - in {} seconds", timing.seconds_display())
}

/// Compute the screen regions for `state` within `area`.
pub fn compute_layout(area: Rect, state: &AppState) -> ModalLayout {
    if !state.is_open() {
        return ModalLayout {
            trigger: Some(trigger_rect(area)),
            ..ModalLayout::default()
        };
    }

    let panel = panel_rect(area);
    let inner = panel.inner(Margin::new(1, 1));
    let [input, results, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let clear_button = if state.query().is_empty() {
        None
    } else {
        Some(Rect::new(input.x + 1, input.y + 1, 2, 1).intersection(input))
    };

    ModalLayout {
        trigger: None,
        panel: Some(panel),
        input: Some(input),
        clear_button,
        results: Some(results),
        footer: Some(footer),
    }
}

fn trigger_rect(area: Rect) -> Rect {
    let width = (TRIGGER_LABEL.width() as u16 + 4).min(area.width);
    let height = 3_u16.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn panel_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(PANEL_MAX_WIDTH);
    let height = area.height.saturating_sub(2);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Draw the whole widget for the current frame.
pub fn render(frame: &mut Frame, state: &AppState, styles: &SearchStyles, layout: &ModalLayout) {
    let area = frame.area();
    match layout.panel {
        None => render_closed(frame, area, state, styles, layout),
        Some(panel) => {
            frame.render_widget(Block::default().style(styles.overlay), area);
            frame.render_widget(Clear, panel);
            frame.render_widget(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(styles.border)
                    .title(" Search "),
                panel,
            );
            if let Some(input) = layout.input {
                render_input(frame, input, state, styles);
            }
            if let Some(results) = layout.results {
                render_results(frame, results, state, styles);
            }
            if let Some(footer) = layout.footer {
                render_footer(frame, footer, state, styles);
            }
        }
    }
}

fn render_closed(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &SearchStyles,
    layout: &ModalLayout,
) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled("sitesearch", styles.title)),
        Line::from(Span::styled(
            format!("{} documents indexed", state.corpus().len()),
            styles.meta,
        )),
    ]);
    frame.render_widget(header, area);

    if let Some(trigger) = layout.trigger {
        let label = Paragraph::new(Line::from(vec![
            Span::styled("⌕ Search  ", styles.trigger),
            Span::styled("Ctrl+K", styles.hint_key),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(styles.trigger),
        );
        frame.render_widget(label, trigger);
    }

    if area.height > 0 {
        let hints = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("q", styles.hint_key),
                Span::styled(" to quit", styles.footer),
            ])),
            hints,
        );
    }
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState, styles: &SearchStyles) {
    let query = state.query();
    let icon = if query.is_empty() {
        SEARCH_ICON
    } else {
        CLEAR_ICON
    };

    // Borders, icon and the space after it.
    let text_width = usize::from(area.width.saturating_sub(2 + INPUT_PREFIX_WIDTH));
    let (visible, cursor_offset) = query_window(query.text(), query.cursor(), text_width);

    let line = Line::from(vec![
        Span::styled(icon, styles.hint_key),
        Span::raw(" "),
        Span::raw(visible),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(styles.border),
        ),
        area,
    );

    if state.input_focused() && area.width > 2 && area.height > 2 {
        let offset = u16::try_from(cursor_offset).unwrap_or(u16::MAX);
        let column = area
            .x
            .saturating_add(1 + INPUT_PREFIX_WIDTH)
            .saturating_add(offset);
        let last_column = area.x.saturating_add(area.width - 2);
        frame.set_cursor_position(Position::new(column.min(last_column), area.y + 1));
    }
}

/// Slice of `text` that fits in `max_width` columns with the cursor in view.
///
/// Returns the visible text and the cursor's column within it. The window
/// scrolls only as far as needed to keep the character before the cursor
/// visible and one column free for the cursor itself.
fn query_window(text: &str, cursor: usize, max_width: usize) -> (String, usize) {
    if max_width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    let mut start = cursor;
    let mut before = 0;
    while start > 0 {
        let width = chars[start - 1].width().unwrap_or(0);
        if before + width > max_width - 1 {
            break;
        }
        before += width;
        start -= 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for &ch in &chars[start..] {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            break;
        }
        used += width;
        visible.push(ch);
    }
    (visible, before)
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, styles: &SearchStyles) {
    let results = state.results();
    if results.is_empty() {
        let message = if state.query().is_empty() {
            format!("Type to search {} documents", state.corpus().len())
        } else {
            format!("No results for \"{}\"", state.query().text())
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles.meta)).alignment(Alignment::Center),
            area,
        );
        return;
    }

    let viewport = state.viewport();
    let offset = viewport.offset().min(results.len());
    let rows = (area.height / ITEM_HEIGHT).max(1) as usize;
    let end = (offset + rows).min(results.len());
    let active = state.active_marker();
    let width = area.width as usize;

    let items: Vec<ListItem> = (offset..end)
        .filter_map(|position| {
            let doc = results.document(state.corpus(), position)?;
            Some(result_item(doc, state.pattern(), active == Some(position), width, styles))
        })
        .collect();

    let selected = active.filter(|i| (offset..end).contains(i)).map(|i| i - offset);
    let mut list_state = ListState::default().with_selected(selected);
    let list = List::new(items).highlight_style(styles.active);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn result_item(
    doc: &Document,
    pattern: Option<&SearchPattern>,
    is_active: bool,
    width: usize,
    styles: &SearchStyles,
) -> ListItem<'static> {
    let text_width = width.saturating_sub(ACTIVE_MARKER.width());
    let marker = if is_active {
        ACTIVE_MARKER
    } else {
        INACTIVE_MARKER
    };

    let mut title = vec![Span::styled(marker, styles.hint_key)];
    title.extend(highlight_spans(
        &truncate_to_width(doc.title(), text_width),
        pattern,
        styles.title,
        styles.highlight,
    ));

    let source = excerpt_source(doc, pattern);
    let flat = flatten_whitespace(source);
    let snippet = if flat.width() <= text_width {
        flat
    } else {
        excerpt(source, pattern, EXCERPT_LEAD_CHARS)
    };
    let mut body = vec![Span::raw(INACTIVE_MARKER)];
    body.extend(highlight_spans(
        &truncate_to_width(&snippet, text_width),
        pattern,
        styles.excerpt,
        styles.highlight,
    ));

    let meta = meta_line(doc);
    let meta = Line::from(vec![
        Span::raw(INACTIVE_MARKER),
        Span::styled(truncate_to_width(&meta, text_width).into_owned(), styles.meta),
    ]);

    ListItem::new(Text::from(vec![Line::from(title), Line::from(body), meta]))
}

/// Description when it matches (or nothing matches elsewhere), else content.
fn excerpt_source<'a>(doc: &'a Document, pattern: Option<&SearchPattern>) -> &'a str {
    match (doc.description(), pattern) {
        (Some(description), Some(p)) if !p.is_match(description) && p.is_match(doc.content()) => {
            doc.content()
        }
        (Some(description), _) => description,
        (None, _) => doc.content(),
    }
}

fn meta_line(doc: &Document) -> String {
    let tags = doc
        .tags_joined()
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{}", t.replace(' ', " #")));
    [doc.categories_joined().filter(|c| !c.is_empty()), tags]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ")
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, styles: &SearchStyles) {
    let separator = Span::styled("  │  ", styles.footer);
    let mut spans = vec![
        Span::styled("Ctrl+K / Cmd+K", styles.hint_key),
        Span::styled(" to open", styles.footer),
    ];
    if !state.query().is_empty() {
        spans.push(separator.clone());
        spans.push(Span::styled(
            results_summary(state.results().len(), &state.timing()),
            styles.footer,
        ));
    }
    spans.push(separator);
    spans.push(Span::styled("ESC", styles.hint_key));
    spans.push(Span::styled(" to close", styles.footer));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
