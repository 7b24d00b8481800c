use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Tabs},
};

use super::app::{App, NotificationKind, Tab};
use super::form::FormField;
use super::list::{FilterDialog, FilterField};
use crate::models::transaction::format_date;

pub const COLUMN_HEADERS: [&str; 4] = ["Description", "Amount", "Date", "Category"];

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(size);

    render_tabs(f, app, chunks[0]);
    match app.tab {
        Tab::Transactions => render_transaction_list(f, app, chunks[1]),
        Tab::NewTransaction => render_form(f, app, chunks[1]),
    }
    render_help_panel(f, app, chunks[2]);

    if let (Tab::Transactions, Some(dialog)) = (app.tab, app.list.dialog.as_ref()) {
        render_filter_dialog(f, app, dialog, size);
    }
    if app.notification.is_some() {
        render_notification(f, app, size);
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab {
        Tab::Transactions => 0,
        Tab::NewTransaction => 1,
    };
    let tabs = Tabs::new(vec!["My transactions", "New transaction"])
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

pub fn render_transaction_list(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.list.visible();
    let rows: Vec<Row> = visible.iter().map(|t| t.to_row()).collect();

    let header = Row::new(COLUMN_HEADERS.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));

    let title = if app.list.filtered.is_some() {
        format!(
            "Transactions ({} total, {} shown, filtered)",
            app.list.transactions.len(),
            visible.len()
        )
    } else {
        format!("Transactions ({} total)", app.list.transactions.len())
    };

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD))
        .highlight_symbol("➤ ");

    f.render_stateful_widget(table, area, &mut app.list.table_state.clone());
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn field_line<'a>(label: &'a str, value: String, placeholder: bool, focused: bool) -> Line<'a> {
    let value_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        field_style(focused)
    };
    Line::from(vec![
        Span::styled(format!("{:<13}", label), field_style(focused)),
        Span::styled(value, value_style),
    ])
}

pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let screen = &app.form;
    let form = &screen.form;

    let category = if screen.loading {
        ("Loading categories...".to_string(), true)
    } else {
        match screen.selected_category() {
            Some(c) => (c.name.clone(), false),
            None => ("Select a category (←/→)".to_string(), true),
        }
    };

    let mut lines = vec![
        field_line(
            "Description",
            form.description.clone(),
            false,
            screen.focus == FormField::Description,
        ),
        field_line("Amount (R$)", form.amount.clone(), false, screen.focus == FormField::Amount),
    ];
    if screen.date_picker {
        lines.push(field_line(
            "Date",
            format_date(form.date),
            false,
            screen.focus == FormField::Date,
        ));
    }
    lines.push(field_line(
        "Category",
        category.0,
        category.1,
        screen.focus == FormField::Category,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ Enter: Save ]",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("New transaction").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_filter_dialog(f: &mut Frame, app: &App, dialog: &FilterDialog, area: Rect) {
    let optional_date = |date: Option<chrono::NaiveDate>| match date {
        Some(d) => (format_date(d), false),
        None => ("--/--/----".to_string(), true),
    };

    let category = match &dialog.draft.category {
        Some(name) => (name.clone(), false),
        None => ("All categories".to_string(), true),
    };
    let mut lines = vec![field_line(
        "Category",
        category.0,
        category.1,
        dialog.focus == FilterField::Category,
    )];
    if dialog.dates_enabled {
        let start = optional_date(dialog.draft.start);
        let end = optional_date(dialog.draft.end);
        lines.push(field_line("From", start.0, start.1, dialog.focus == FilterField::Start));
        lines.push(field_line("To", end.0, end.1, dialog.focus == FilterField::End));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!("{} categories available", app.list.categories.len())));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Filter (Enter to apply, Esc to cancel)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    let popup_area = centered_rect(60, 40, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn render_notification(f: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.notification.as_ref() else {
        return;
    };
    let color = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    };

    let text = vec![
        Line::from(""),
        Line::from(notification.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default()
            .title(notification.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)));

    let popup_area = centered_rect(50, 30, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn key_hint<'a>(key: &'a str, action: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ]
}

pub fn render_help_panel(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    match app.tab {
        Tab::Transactions if app.list.dialog.is_some() => {
            spans.extend(key_hint("↑/↓", " Field • "));
            spans.extend(key_hint("←/→", " Change • "));
            spans.extend(key_hint("Del", " Unset • "));
            spans.extend(key_hint("Enter", " Apply • "));
            spans.extend(key_hint("Esc", " Cancel"));
        }
        Tab::Transactions => {
            spans.extend(key_hint("↑/↓", " Move • "));
            if app.options.filtering {
                spans.extend(key_hint("f", " Filter • "));
                spans.extend(key_hint("x", " Clear filter • "));
            }
            spans.extend(key_hint("r", " Reload • "));
            spans.extend(key_hint("Tab", " New transaction • "));
            spans.extend(key_hint("q", " Quit"));
        }
        Tab::NewTransaction => {
            spans.extend(key_hint("↑/↓", " Field • "));
            spans.extend(key_hint("←/→", " Change • "));
            if app.options.date_picker {
                spans.extend(key_hint("PgUp/PgDn", " Month • "));
            }
            spans.extend(key_hint("Enter", " Save • "));
            spans.extend(key_hint("Tab", " List • "));
            spans.extend(key_hint("Ctrl+C", " Quit"));
        }
    }

    let help = Paragraph::new(Line::from(spans))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help "))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(layout[1])[1]
}
