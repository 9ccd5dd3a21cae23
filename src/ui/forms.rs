//! Form rendering: the auth screens and inline editors.

use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph, Wrap},
};

use super::helpers::{centered, error_line, hint_line, panel, spinner};
use super::theme::{title_style, COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};
use crate::app::{App, Form, Screen};

/// One `Label: value` line per field, the focused one highlighted.
fn field_lines(form: &Form, width: usize) -> Vec<Line<'static>> {
    form.fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focused_index();
            let label_style = if focused {
                Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            let value = tail(field.value(), width.saturating_sub(field.label.len() + 2));
            Line::from(vec![
                Span::styled(format!("{}: ", field.label), label_style),
                Span::styled(value, Style::default().fg(COLOR_HEADER)),
            ])
        })
        .collect()
}

/// Keep the end of `s` so the cursor stays visible.
fn tail(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(max_chars)).collect()
}

fn place_cursor(frame: &mut Frame, inner: Rect, form: &Form) {
    let index = form.focused_index();
    let Some(field) = form.fields().get(index) else {
        return;
    };
    let x = inner.x + (field.label.len() + 2 + field.width()) as u16;
    let y = inner.y + index as u16;
    if x < inner.right() && y < inner.bottom() {
        frame.set_cursor_position((x, y));
    }
}

/// Editor drawn above a list; Enter submits, Esc closes.
pub fn render_inline_form(frame: &mut Frame, area: Rect, form: &Form, title: &str) {
    let block = panel(title).title_bottom(hint_line(" [Enter] send  [Tab] next field  [Esc] cancel "));
    let inner = block.inner(area);
    frame.render_widget(
        Paragraph::new(field_lines(form, inner.width as usize)).block(block),
        area,
    );
    place_cursor(frame, inner, form);
}

/// Sign-in and registration screens.
pub fn render_auth(frame: &mut Frame, app: &App) {
    let registering = app.screen == Screen::Register;
    let form = if registering {
        &app.register_form
    } else {
        &app.login_form
    };
    let height = form.fields().len() as u16 + 8;
    let area = centered(frame.area(), 56u16.min(frame.area().width), height.min(frame.area().height));
    frame.render_widget(Clear, area);

    let block = panel(if registering { "Create account" } else { "plaza" });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [intro_area, fields_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(form.fields().len() as u16),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let intro = if registering {
        "Username and email are required."
    } else {
        "Sign in with your username."
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(intro, title_style()))),
        intro_area,
    );
    frame.render_widget(
        Paragraph::new(field_lines(form, fields_area.width as usize)),
        fields_area,
    );
    place_cursor(frame, fields_area, form);

    let session = &app.ctx.session;
    let status = if session.is_loading() {
        Line::from(format!("{} Contacting server…", spinner(app.tick_count)))
    } else if let Some(notice) = session.error() {
        error_line(notice, false)
    } else if let Some(status) = &app.status {
        hint_line(status)
    } else {
        Line::default()
    };
    frame.render_widget(
        Paragraph::new(status).wrap(Wrap { trim: true }),
        status_area.inner(Margin::new(0, 1)),
    );

    let help = if registering {
        "[Tab] next field  [Enter] register  [Esc] back"
    } else {
        "[Enter] sign in  [Tab] register  [Esc] quit"
    };
    frame.render_widget(
        Paragraph::new(hint_line(help)).alignment(Alignment::Center),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
    }

    #[test]
    fn test_field_lines_label_each_field() {
        let mut form = Form::new(&["Username", "Email"]);
        form.push('x');
        let lines = field_lines(&form, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "Username: ");
        assert_eq!(lines[0].spans[1].content, "x");
    }
}
