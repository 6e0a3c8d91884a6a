use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{Focus, FormField, FormState, MessageType, StatusMessage};
use super::layout::{AppLayout, ResultsLayout};
use crate::client::SearchError;
use crate::i18n::{Language, UiText};
use crate::map::category_color;
use crate::models::{Category, PersonRecord, SearchSummary};
use crate::report::{NOT_AVAILABLE, record_date};
use crate::session::SessionStatus;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(217, 119, 6); // amber
const ERROR_RED: Color = Color::Rgb(239, 68, 68);
const SUCCESS_GREEN: Color = Color::Rgb(16, 185, 129);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything the renderer needs, borrowed from the app for one frame.
pub struct RenderState<'a> {
    pub text: &'static UiText,
    pub language: Language,
    pub session_status: SessionStatus,
    pub searched_once: bool,
    pub error: Option<&'a SearchError>,
    pub form: &'a FormState,
    pub active_field: FormField,
    pub focus: Focus,
    pub loading_message: &'a str,
    pub elapsed_seconds: u64,
    pub summary: Option<&'a SearchSummary>,
    pub visible: &'a [PersonRecord],
    pub total_count: usize,
    pub map_point_count: usize,
    pub selected_idx: usize,
    pub selected_for_report: &'a BTreeSet<String>,
    pub location_filter: &'a str,
    pub editing_location: bool,
    pub selected_categories: &'a BTreeSet<Category>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, layout.header_area, state);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(layout.body_area);

    render_form(frame, body[0], state);
    render_content(frame, body[1], state);
    render_status_bar(frame, layout.status_area, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = Line::from(vec![
        Span::styled(
            state.text.app_title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.text.app_subtitle, Style::default().fg(MUTED)),
        Span::raw("  "),
        Span::styled(format!("[{}]", state.language.code().to_uppercase()), Style::default().fg(MUTED)),
    ]);

    let paragraph = Paragraph::new(title)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(MUTED)));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame, area: Rect, state: &RenderState) {
    let field_line = |label: &'static str, value: &str, field: FormField| {
        let active = state.focus == Focus::Form && state.active_field == field;
        let marker = if active { "› " } else { "  " };
        let label_style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<32}", label), label_style),
            Span::styled(format!("{}{}", value, cursor), Style::default().fg(BRIGHT)),
        ])
    };

    let mode = if state.form.fuzzy { state.text.form_fuzzy } else { state.text.form_exact };
    let lines = vec![
        field_line(state.text.form_first_name, &state.form.first_name, FormField::FirstName),
        field_line(state.text.form_last_name1, &state.form.last_name1, FormField::LastName1),
        field_line(state.text.form_last_name2, &state.form.last_name2, FormField::LastName2),
        field_line(
            state.text.form_service_number,
            &state.form.service_number,
            FormField::ServiceNumber,
        ),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(mode, Style::default().fg(ACCENT)),
            Span::styled("  (F2)", Style::default().fg(MUTED)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if state.focus == Focus::Form { ACCENT } else { MUTED }))
        .title(format!(" {} ", state.text.form_investigate));
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_content(frame: &mut Frame, area: Rect, state: &RenderState) {
    if state.session_status == SessionStatus::Loading {
        render_loading(frame, area, state);
        return;
    }
    if let Some(error) = state.error {
        render_error(frame, area, state, error);
        return;
    }
    if !state.searched_once {
        render_onboarding(frame, area, state);
        return;
    }
    if state.summary.is_some() {
        render_results(frame, area, state);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, state: &RenderState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.loading_message,
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}s", state.elapsed_seconds),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(state.text.loading_hint, Style::default().fg(MUTED))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Esc: {}", state.text.stop_search),
            Style::default().fg(MUTED),
        )),
    ];

    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED));
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(block).centered(),
        area,
    );
}

fn render_error(frame: &mut Frame, area: Rect, state: &RenderState, error: &SearchError) {
    let message = match error {
        SearchError::AuthFailure => state.text.error_auth,
        _ => state.text.error_transient,
    };

    let paragraph = Paragraph::new(Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(ERROR_RED))),
    ]))
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ERROR_RED)));
    frame.render_widget(paragraph, area);
}

fn render_onboarding(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut lines = vec![Line::from("")];
    for (i, instruction) in state.text.onboarding.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(ACCENT)),
            Span::raw(*instruction),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)));
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState) {
    let layout = ResultsLayout::new(area);

    render_summary(frame, layout.summary_area, state);
    render_record_list(frame, layout.list_area, state);
    render_record_detail(frame, layout.detail_area, state.visible.get(state.selected_idx), state);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &RenderState) {
    let Some(summary) = state.summary else {
        return;
    };

    let mut counters = format!(
        "{}: {}/{}  ·  mapa: {}",
        state.text.identified_records,
        state.visible.len(),
        state.total_count,
        state.map_point_count,
    );
    if !state.selected_categories.is_empty() {
        let labels: Vec<&str> =
            state.selected_categories.iter().map(|c| c.label()).collect();
        counters.push_str(&format!("  ·  {}", labels.join(", ")));
    }
    if !summary.grounding_sources.is_empty() {
        counters.push_str(&format!(
            "  ·  {}: {}",
            state.text.grounding_title,
            summary.grounding_sources.len()
        ));
    }

    let filter_cursor = if state.editing_location { "_" } else { "" };
    let lines = vec![
        Line::from(Span::styled(
            summary.key_findings.clone(),
            Style::default().fg(BRIGHT).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(counters, Style::default().fg(MUTED))),
        Line::from(vec![
            Span::styled(
                format!("{}: ", state.text.location_filter_label),
                Style::default().fg(if state.editing_location { ACCENT } else { MUTED }),
            ),
            Span::styled(
                format!("{}{}", state.location_filter, filter_cursor),
                Style::default().fg(BRIGHT),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", state.text.analysis_title));
    frame.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(block), area);
}

fn render_record_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    if state.visible.is_empty() {
        let paragraph = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(state.text.no_results_found, Style::default().fg(MUTED))),
        ]))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .visible
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let marker = if state.selected_for_report.contains(&record.id) { "✓" } else { " " };
            let content = format!("[{}] {} · {}", marker, record.full_name, record.category.label());

            let style = if idx == state.selected_idx {
                Style::default().fg(BRIGHT).bg(SUCCESS_GREEN).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(category_rgb(record.category))
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(format!(" {} ", state.text.identified_records)),
    );
    frame.render_widget(list, area);
}

fn render_record_detail(
    frame: &mut Frame,
    area: Rect,
    record: Option<&PersonRecord>,
    state: &RenderState,
) {
    let content = if let Some(record) = record {
        let value = |v: Option<&str>| v.unwrap_or(NOT_AVAILABLE).to_string();

        let mut lines = vec![
            Line::from(Span::styled(
                record.full_name.clone(),
                Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
            )),
            detail_line("Categoría", record.category.label().to_string()),
            detail_line("Estado", if record.status.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                record.status.clone()
            }),
            detail_line("Rango", value(record.rank.as_deref())),
            detail_line("Unidad", value(record.unit.as_deref())),
            detail_line("Ubicación", value(record.location.as_deref())),
            detail_line("Nacimiento", value(record.birth_place.as_deref())),
            detail_line("Fecha", record_date(record)),
        ];

        if let Some((lat, lng)) = record.coordinates() {
            lines.push(detail_line("Coordenadas", format!("{:.4}, {:.4}", lat, lng)));
        }

        lines.push(Line::from(""));
        for detail in record.details.lines() {
            lines.push(Line::from(detail.to_string()));
        }
        if let Some(notes) = &record.additional_notes {
            lines.push(Line::from(""));
            lines.push(detail_line("Notas", notes.clone()));
        }

        if !record.sources.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                state.text.sources_title,
                Style::default().fg(ACCENT),
            )));
            for source in &record.sources {
                let signature = source.search_path.as_deref().unwrap_or("S/S");
                lines.push(Line::from(format!("  {} ({})", source.title, signature)));
                if !source.url.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", source.url),
                        Style::default().fg(MUTED),
                    )));
                }
            }
        }

        Text::from(lines)
    } else {
        Text::from(state.text.no_results_found)
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)));
    frame.render_widget(paragraph, area);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(MUTED)),
        Span::raw(value),
    ])
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => SUCCESS_GREEN,
            MessageType::Error => ERROR_RED,
        };
        (format!(" {} ", message.text), Style::default().fg(color).bg(BAR_BG))
    } else {
        let hints = match state.focus {
            Focus::Form => state.text.key_hints_form,
            Focus::Results => state.text.key_hints_results,
        };
        (format!(" {} ", hints), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Category marker color as an RGB terminal color (same table the map
/// points use).
fn category_rgb(category: Category) -> Color {
    let hex = category_color(category);
    let parse = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(0x44);
    Color::Rgb(parse(1..3), parse(3..5), parse(5..7))
}
