use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Cell, Clear, Gauge, Paragraph, Row, Table};

use crate::evaluate::ScoredEntry;
use crate::output::{format_score, indicator_label, DISCLAIMER};
use crate::tui::app::{App, InputMode};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let body = Layout::horizontal([
        Constraint::Percentage(45),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    render_title(frame, chunks[0], app);
    render_table(frame, body[0], app);
    render_detail(frame, body[1], app);
    render_status_bar(frame, chunks[2], app);

    match app.input_mode {
        InputMode::SearchInput => render_search_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "SERC | Corruption Risk Assessment";
    let mut spans = vec![Span::styled(title, Style::default().fg(app.colors.title_color).bold())];

    let file_text = app.data_path.display().to_string();
    let padding_len = (area.width as usize).saturating_sub(title.len() + file_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(file_text, Style::default().fg(app.colors.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.entries.is_empty() {
        let empty_msg = Paragraph::new("No officials in data file")
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(empty_msg, area);
        return;
    }

    let colors = &app.colors;
    let rows: Vec<Row> = app
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let score = entry.result.score;
            let band = app.bands.classify(score);
            let band_color = colors.band_color(band);

            let mut score_spans = vec![Span::styled(
                format!("{:>7} ", format_score(score)),
                Style::default().fg(band_color),
            )];
            score_spans.extend(score_bar(score, 6, band_color, colors.bar_empty).spans);
            if entry.result.is_vetoed() {
                score_spans.push(Span::styled("!", Style::default().fg(colors.veto_color).bold()));
            }

            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(colors.index_color)),
                Cell::from(Line::from(score_spans)),
                Cell::from(entry.record.display_name().to_string()),
                Cell::from(entry.record.id.clone()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Length(16), // Score + bar: "100.00% ██████!"
        Constraint::Fill(1),    // Name
        Constraint::Length(10), // ID
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Score", "Official", "ID"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .block(Block::bordered().title(" Officials "))
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(entry) = app.selected_entry() else {
        frame.render_widget(Block::bordered(), area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2), // Name / role / id
        Constraint::Length(3), // Gauge
        Constraint::Length(2), // Band message, veto
        Constraint::Fill(1),   // Indicator chart
    ])
    .split(area);

    let record = &entry.record;
    let header = vec![
        Line::from(Span::styled(record.display_name().to_string(), Style::default().bold())),
        Line::from(Span::styled(
            format!("{}  ID {}", record.role, record.id),
            Style::default().fg(app.colors.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let band = app.bands.classify(entry.result.score);
    let band_color = app.colors.band_color(band);
    let gauge = Gauge::default()
        .block(Block::bordered().title(" Risk index "))
        .gauge_style(Style::default().fg(band_color))
        .ratio((entry.result.score / 100.0).clamp(0.0, 1.0))
        .label(format!("{}  {}", format_score(entry.result.score), band.label()));
    frame.render_widget(gauge, chunks[1]);

    let mut message = vec![Line::from(Span::styled(band.message(), Style::default().fg(band_color)))];
    if let Some(ref name) = entry.result.vetoed_by {
        message.push(Line::from(Span::styled(
            format!("Veto: {} at or above threshold", indicator_label(name)),
            Style::default().fg(app.colors.veto_color).bold(),
        )));
    }
    frame.render_widget(Paragraph::new(message), chunks[2]);

    render_indicator_chart(frame, chunks[3], app, entry);
}

/// Horizontal bar per indicator on a fixed 0-100 axis. Absent indicators show
/// an empty bar labelled "-".
fn render_indicator_chart(frame: &mut Frame, area: Rect, app: &App, entry: &ScoredEntry) {
    let bars: Vec<Bar> = entry
        .result
        .contributions
        .iter()
        .map(|c| {
            let (value, text, color) = match c.value {
                Some(v) => (
                    v.clamp(0.0, 100.0).round() as u64,
                    format!("{:.0}", v),
                    app.colors.band_color(app.bands.classify(v)),
                ),
                None => (0, "-".to_string(), app.colors.bar_absent),
            };
            let marker = if c.critical { "*" } else { " " };
            Bar::default()
                .value(value)
                .text_value(text)
                .label(Line::from(format!("{}{}", marker, indicator_label(&c.name))))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::bordered().title(" Risk profile (0-100) "))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(100)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") || msg.starts_with("Failed") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} officials", app.entries.len());
        let warnings = if app.warning_count > 0 {
            format!("{} warnings", app.warning_count)
        } else {
            String::new()
        };

        let elapsed = app.last_reload.elapsed();
        let reload_time = if elapsed.as_secs() < 60 {
            format!("loaded {}s ago", elapsed.as_secs())
        } else {
            format!("loaded {}m ago", elapsed.as_secs() / 60)
        };

        let hints = [
            ("j/k", ":nav "),
            ("b", ":breakdown "),
            ("/", ":find id "),
            ("r", ":reload "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw(" "),
            Span::styled(warnings, Style::default().fg(colors.flash_error)),
            Span::raw(" "),
            Span::styled(reload_time, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, width: usize, filled_color: Color, empty_color: Color) -> Line<'static> {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(filled_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(empty_color)));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_search_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(40, 4, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Find official by ID ")
        .border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(format!("{}|", app.search_input)), chunks[0]);
    frame.render_widget(
        Paragraph::new("Enter: select | Esc: cancel").style(Style::default().fg(app.colors.muted)),
        chunks[1],
    );
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("b / Enter     ", "Indicator breakdown"),
        ("/             ", "Find official by ID"),
        ("r             ", "Reload data file"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, action)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(DISCLAIMER, Style::default().fg(app.colors.muted))));
    help_lines.push(Line::from(Span::styled("Press any key to close", Style::default().fg(app.colors.muted))));

    frame.render_widget(Paragraph::new(help_lines).wrap(ratatui::widgets::Wrap { trim: true }), inner);
}

/// Table of value, weight and contribution for the selected official
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(entry) = app.selected_entry() else {
        return;
    };
    let result = &entry.result;

    let height = result.contributions.len() as u16 + 7;
    let popup_area = centered_rect_fixed(64, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Line::from(format!(" {} ", entry.record.display_name())).style(app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .split(inner);

    let rows: Vec<Row> = result
        .contributions
        .iter()
        .map(|c| {
            let name = format!("{}{}", if c.critical { "*" } else { " " }, indicator_label(&c.name));
            let (value, contribution) = match c.value {
                Some(v) => (format!("{:.1}", v), format!("{:.2}", c.contribution)),
                None => ("-".to_string(), "-".to_string()),
            };
            let style = if c.value.is_none() {
                Style::default().fg(app.colors.bar_absent)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(value),
                Cell::from(format!("{:.0}%", c.weight * 100.0)),
                Cell::from(contribution),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Indicator", "Value", "Weight", "Contrib"])
            .style(app.colors.header_style)
            .bottom_margin(1),
    );
    frame.render_widget(table, chunks[0]);

    let summary = match result.vetoed_by {
        Some(ref name) => format!(
            "Weighted sum {:.2}, overridden by veto on {}",
            result.weighted_sum,
            indicator_label(name)
        ),
        None => format!("Weighted sum {:.2} = {}", result.weighted_sum, format_score(result.score)),
    };
    let footer = vec![
        Line::from(summary),
        Line::from(Span::styled("* critical  |  Esc/b: close", Style::default().fg(app.colors.muted))),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
