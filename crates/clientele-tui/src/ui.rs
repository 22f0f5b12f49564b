//! Rendering routines for the Clientele TUI.

use crate::app::{App, Focus};
use clientele_core::{
    COLUMNS, CustomerForm, EmptyState, FilterField, FormField, GenderClass, LoadState,
    TableBody, TableRow,
};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};

const PRIMARY: Color = Color::Rgb(59, 130, 246); // #3B82F6
const SECONDARY: Color = Color::Rgb(96, 165, 250); // #60A5FA
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(96, 165, 250); // #60A5FA
const MALE: Color = Color::Rgb(96, 165, 250);
const FEMALE: Color = Color::Rgb(244, 114, 182);
const OTHER: Color = Color::Rgb(167, 139, 250);
const ERROR: Color = Color::Rgb(255, 110, 110);
const YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b

const HEADER_HEIGHT: u16 = 5;
const FILTER_PANEL_HEIGHT: u16 = 8;
const FORM_WIDTH: u16 = 60;
const FORM_HEIGHT: u16 = 14;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let banner_height = u16::from(app.screen.banner().is_some());
    let filter_height = if app.show_filters && matches!(app.screen.load_state(), LoadState::Ready)
    {
        FILTER_PANEL_HEIGHT
    } else {
        0
    };

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header
            Constraint::Length(filter_height), // filter panel
            Constraint::Length(banner_height), // save error banner
            Constraint::Min(0),                // table
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    if filter_height > 0 {
        draw_filters(frame, app, root[1]);
    }
    if let Some(banner) = app.screen.banner() {
        draw_banner(frame, banner, root[2]);
    }
    match app.screen.load_state().clone() {
        LoadState::Loading => draw_loading(frame, app, root[3]),
        LoadState::Failed(message) => draw_failed(frame, &message, root[3]),
        LoadState::Ready => draw_table(frame, app, root[3]),
    }
    draw_status_bar(frame, app, root[4]);

    if let Some(form) = app.screen.form() {
        draw_form(frame, app, form, area);
    }
}

/// Draw the title block with record counts.
fn draw_header(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = Style::default().fg(TEXT_MUTED);
    let value_style = Style::default().fg(TEXT).add_modifier(Modifier::BOLD);

    let visible = app.screen.visible_count();
    let total = app.screen.total_count();
    let mut stats = vec![
        Span::styled("  Total Records ", label_style),
        Span::styled(visible.to_string(), value_style),
    ];
    if visible != total {
        stats.push(Span::styled(format!(" (of {total})"), label_style));
    }

    let mut filter_button = vec![Span::styled("    [f] Filter", label_style)];
    if app.screen.criteria().is_active() {
        filter_button.push(Span::styled(" ●", Style::default().fg(PRIMARY)));
    }
    stats.extend(filter_button);
    stats.push(Span::styled("  [n] Add New Customer", label_style));

    let lines = vec![
        Line::from(Span::styled(
            "  Customer Management",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Manage your customer information",
            Style::default().fg(TEXT_MUTED),
        )),
        Line::from(stats),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the filter panel with one input per criterion and the active tags.
fn draw_filters(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Filters;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { BORDER_ACTIVE } else { BORDER }))
        .title(Span::styled(
            " Filter Records ",
            Style::default().fg(SECONDARY),
        ));
    if app.screen.criteria().is_active() {
        block = block.title_bottom(Line::from(Span::styled(
            " Ctrl+X Clear All ",
            Style::default().fg(TEXT_MUTED),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'_>> = FilterField::ALL
        .iter()
        .map(|field| {
            let value = app.screen.criteria().get(*field).to_string();
            let is_selected = focused && app.filter_field == *field;
            filter_line(*field, value, is_selected)
        })
        .collect();

    let active = app.screen.criteria().active();
    if !active.is_empty() {
        let mut tags = vec![Span::styled(" Active Filters: ", Style::default().fg(TEXT_MUTED))];
        for (index, (field, query)) in active.iter().enumerate() {
            tags.push(Span::styled(
                format!("[{}] {}: {} ×", index + 1, field.label(), query),
                Style::default().fg(Color::Rgb(10, 10, 10)).bg(SECONDARY),
            ));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(tags));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn filter_line(field: FilterField, value: String, is_selected: bool) -> Line<'static> {
    let marker_style = if is_selected {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    let marker = if is_selected { ">" } else { " " };
    let display = match (field, value.is_empty()) {
        (FilterField::Name, true) => Span::styled("Search by name...", Style::default().fg(TEXT_MUTED)),
        (FilterField::Gender, true) => Span::styled("< All Genders >", Style::default().fg(TEXT_MUTED)),
        (FilterField::Country, true) => {
            Span::styled("< All Countries >", Style::default().fg(TEXT_MUTED))
        }
        (FilterField::Date, true) => Span::styled("e.g. Mar 5", Style::default().fg(TEXT_MUTED)),
        (FilterField::Gender | FilterField::Country, false) => {
            Span::styled(format!("< {value} >"), Style::default().fg(TEXT))
        }
        (FilterField::Name | FilterField::Date, false) => {
            Span::styled(value, Style::default().fg(TEXT))
        }
    };
    Line::from(vec![
        Span::styled(format!(" {marker} "), marker_style),
        Span::styled(format!("{:<9}", field.label()), marker_style),
        display,
    ])
}

fn draw_banner(frame: &mut Frame<'_>, banner: &str, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {banner} "),
            Style::default().fg(Color::Rgb(10, 10, 10)).bg(ERROR),
        ),
        Span::styled("  [d] dismiss", Style::default().fg(TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_loading(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let spinner = SPINNER[app.spinner % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(spinner, Style::default().fg(PRIMARY))),
        Line::from(Span::styled("Loading data...", Style::default().fg(TEXT))),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

fn draw_failed(frame: &mut Frame<'_>, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("⚠", Style::default().fg(YELLOW))),
        Line::from(Span::styled(message.to_string(), Style::default().fg(ERROR))),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Try Again",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draw the record table or, when nothing is visible, the empty state.
fn draw_table(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if app.focus == Focus::Table {
            BORDER_ACTIVE
        } else {
            BORDER
        }));
    let selected = app.selected;

    match app.screen.body() {
        TableBody::Empty(state) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            draw_empty_state(frame, state, inner);
        }
        TableBody::Rows(rows) => {
            let total: u32 = COLUMNS.iter().map(|column| u32::from(column.width)).sum();
            let widths: Vec<Constraint> = COLUMNS
                .iter()
                .map(|column| Constraint::Ratio(u32::from(column.width), total))
                .collect();
            let header = Row::new(COLUMNS.iter().map(|column| {
                Cell::from(column.header).style(
                    Style::default()
                        .fg(TEXT_MUTED)
                        .add_modifier(Modifier::BOLD),
                )
            }))
            .height(1)
            .bottom_margin(1);
            let rows: Vec<Row<'_>> = rows.iter().map(table_row).collect();
            let table = Table::new(rows, widths)
                .header(header)
                .block(block)
                .row_highlight_style(Style::default().bg(Color::Rgb(30, 41, 59)))
                .highlight_symbol("▌");
            let mut state = TableState::default().with_selected(Some(selected));
            frame.render_stateful_widget(table, area, &mut state);
        }
    }
}

fn table_row(row: &TableRow<'_>) -> Row<'static> {
    let gender_color = match row.gender.class {
        GenderClass::Male => MALE,
        GenderClass::Female => FEMALE,
        GenderClass::Other => OTHER,
    };
    let name = Text::from(vec![
        Line::from(Span::styled(
            row.name.clone(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Friends", Style::default().fg(TEXT_MUTED))),
    ]);
    let created = Text::from(vec![
        Line::from(Span::styled(row.created.date.clone(), Style::default().fg(TEXT))),
        Line::from(Span::styled(
            row.created.time.clone(),
            Style::default().fg(TEXT_MUTED),
        )),
    ]);
    Row::new(vec![
        Cell::from(name),
        Cell::from(Span::styled(
            format!(" {} ", row.gender.text),
            Style::default().fg(gender_color),
        )),
        Cell::from(created),
        Cell::from(Span::styled(row.country.clone(), Style::default().fg(TEXT))),
        Cell::from(Span::styled("[e] Edit", Style::default().fg(SECONDARY))),
    ])
    .height(2)
}

fn draw_empty_state(frame: &mut Frame<'_>, state: EmptyState, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.title(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state.hint(), Style::default().fg(TEXT_MUTED))),
        Line::from(""),
        Line::from(Span::styled(
            format!("[Enter] {}", state.action().label()),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draw the create/edit form as a centered modal.
fn draw_form(frame: &mut Frame<'_>, app: &App, form: &CustomerForm, area: Rect) {
    let modal = centered(area, FORM_WIDTH, FORM_HEIGHT);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", form.subtitle()),
            Style::default().fg(TEXT_MUTED),
        )),
        Line::from(""),
    ];
    for field in FormField::ALL {
        lines.push(form_line(form, field, app.form_field == field));
    }
    lines.push(Line::from(""));

    let submit_style = if form.can_submit() {
        Style::default()
            .fg(Color::Rgb(10, 10, 10))
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    let cancel_style = if form.can_close() {
        Style::default().fg(TEXT)
    } else {
        Style::default().fg(BORDER)
    };
    lines.push(Line::from(vec![
        Span::styled(" [Esc] Cancel ", cancel_style),
        Span::raw("  "),
        Span::styled(format!(" [Enter] {} ", form.submit_label()), submit_style),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab next field  ←/→ choose option",
        Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn form_line(form: &CustomerForm, field: FormField, is_selected: bool) -> Line<'static> {
    let label_style = if is_selected {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    };
    let value = form.value(field);
    let value_span = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(TEXT_MUTED))
    } else if field == FormField::Name {
        Span::styled(value.to_string(), Style::default().fg(TEXT))
    } else {
        Span::styled(format!("< {value} >"), Style::default().fg(TEXT))
    };
    let value_span = if form.is_saving() {
        value_span.style(Style::default().fg(TEXT_MUTED))
    } else {
        value_span
    };
    Line::from(vec![
        Span::styled(if is_selected { " > " } else { "   " }, label_style),
        Span::styled(format!("{:<14}", field.label()), label_style),
        Span::styled("* ", Style::default().fg(ERROR)),
        value_span,
    ])
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = match app.status.as_str() {
        "saving" | "loading" => PRIMARY,
        "ready" | "saved" => TEXT_MUTED,
        _ => YELLOW,
    };

    let key = |text: &'static str| Span::styled(text, Style::default().fg(TEXT_MUTED));
    let hint = |text: &'static str| Span::styled(text, Style::default().fg(BORDER));
    let shortcuts = if app.screen.form().is_some() {
        vec![
            key(" Enter"),
            hint(" save"),
            key("  Esc"),
            hint(" cancel"),
            key("  Tab"),
            hint(" next"),
        ]
    } else if app.focus == Focus::Filters {
        vec![
            key(" Tab"),
            hint(" field"),
            key("  ←/→"),
            hint(" choose"),
            key("  Del"),
            hint(" clear"),
            key("  Esc"),
            hint(" back"),
        ]
    } else {
        vec![
            key(" q"),
            hint(" quit"),
            key("  ↑/↓"),
            hint(" select"),
            key("  e"),
            hint(" edit"),
            key("  n"),
            hint(" new"),
            key("  f"),
            hint(" filters"),
            key("  c"),
            hint(" clear"),
            key("  r"),
            hint(" reload"),
        ]
    };

    let right_text = format!(" {} ", app.status);
    let right_len = right_text.len() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len.min(area.width),
        ..area
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(status_color),
        ))),
        right_area,
    );
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::{Screen, Snapshot};
    use clientele_protocol::CustomerRecord;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with(records: Vec<CustomerRecord>) -> App {
        let mut app = App::new(Screen::default());
        app.apply_loaded(Ok(Snapshot {
            records,
            countries: Vec::new(),
        }));
        app
    }

    #[test]
    fn renders_rows_with_fallbacks() {
        let ann = CustomerRecord {
            name: Some("Ann".to_string()),
            gender: Some("female".to_string()),
            country: Some("France".to_string()),
            created_at: Some("2025-03-05T10:00:00Z".to_string()),
            ..CustomerRecord::new(1u64)
        };
        let mut app = app_with(vec![ann, CustomerRecord::new(2u64)]);
        let screen = render(&mut app);
        assert!(screen.contains("Customer Management"));
        assert!(screen.contains("Total Records 2"));
        assert!(screen.contains("Ann"));
        assert!(screen.contains("Mar 5, 2025"));
        assert!(screen.contains("Unknown"));
        assert!(screen.contains("Jan 20, 2025"));
    }

    fn named(id: u64, name: &str) -> CustomerRecord {
        CustomerRecord {
            name: Some(name.to_string()),
            ..CustomerRecord::new(id)
        }
    }

    #[test]
    fn header_counts_hidden_records_only() {
        let mut app = app_with(vec![named(1, "Ann"), named(2, "Dana")]);
        app.screen.set_filter(FilterField::Name, "an");
        let screen = render(&mut app);
        assert!(screen.contains("Total Records 2"));
        assert!(!screen.contains("(of 2)"));

        app.screen.set_filter(FilterField::Name, "dan");
        let screen = render(&mut app);
        assert!(screen.contains("Total Records 1 (of 2)"));
    }

    #[test]
    fn renders_empty_state_and_failure() {
        let mut app = app_with(Vec::new());
        let screen = render(&mut app);
        assert!(screen.contains("No records found"));
        assert!(screen.contains("Add First Customer"));

        let mut failed = App::new(Screen::default());
        failed.apply_loaded(Err(clientele_core::StoreError::Timeout));
        let screen = render(&mut failed);
        assert!(screen.contains("Failed to load data. Please check your connection."));
        assert!(screen.contains("Try Again"));
    }

    #[test]
    fn renders_form_modal() {
        let mut app = app_with(Vec::new());
        app.screen.open_create();
        let screen = render(&mut app);
        assert!(screen.contains("Add New Customer"));
        assert!(screen.contains("Create a new customer profile"));
        assert!(screen.contains("Enter customer name"));
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, FORM_WIDTH, FORM_HEIGHT);
        assert_eq!(rect, area);
        let rect = centered(Rect::new(0, 0, 100, 30), 60, 14);
        assert_eq!(rect, Rect::new(20, 8, 60, 14));
    }
}
