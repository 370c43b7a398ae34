use ratatui::{
    prelude::*,
    widgets::{block::Title, Block, Borders, Paragraph, Wrap},
    layout::{Constraint, Direction, Layout},
    text::{Span, Line},
};
use crate::controller::SummaryController;
use crate::models::{ApiStatus, CopyFeedback, Phase, SummaryRequest};
use crate::theme::Theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Everything a frame needs, borrowed from the controller.
pub struct Screen<'a> {
    pub request: &'a SummaryRequest,
    pub feedback: CopyFeedback,
    pub api_status: ApiStatus,
    pub api_url: &'a str,
    pub tick: usize,
}

impl<'a> Screen<'a> {
    pub fn from_controller(controller: &'a SummaryController, api_url: &'a str, tick: usize) -> Self {
        Self {
            request: controller.request(),
            feedback: controller.feedback(),
            api_status: controller.api_status(),
            api_url,
            tick,
        }
    }
}

/// Renders the whole screen.
pub fn render(f: &mut Frame, screen: &Screen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // url input
            Constraint::Length(1), // submit line
            Constraint::Min(3),    // body
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    render_header(f, chunks[0], theme);
    render_input(f, chunks[1], screen, theme);
    render_submit_line(f, chunks[2], screen, theme);
    render_body(f, chunks[3], screen, theme);
    render_footer(f, chunks[4], screen, theme);
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled("Post Summarizer", theme.title)),
        Line::from(Span::styled(
            "Get an AI-generated summary of any post in seconds",
            theme.subtitle,
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let pending = screen.request.phase().is_pending();
    let url = screen.request.url();
    let (text, style) = if url.is_empty() {
        ("Paste post URL here...".to_string(), theme.input_disabled)
    } else if pending {
        (url.to_string(), theme.input_disabled)
    } else {
        (format!("{}_", url), theme.input)
    };
    let border = if pending { theme.blurred_border } else { theme.focus_border };
    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title("URL")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);
}

fn render_submit_line(f: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let line = if screen.request.phase().is_pending() {
        let frame = SPINNER[screen.tick % SPINNER.len()];
        Line::from(Span::styled(format!(" {} Generating Summary...", frame), theme.pending))
    } else if screen.request.url().trim().is_empty() {
        Line::from(Span::styled(" [Enter] Summarize Post", theme.input_disabled))
    } else {
        Line::from(Span::styled(" [Enter] Summarize Post", theme.input))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_body(f: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    match screen.request.phase() {
        Phase::Succeeded { summary } => render_result(f, area, summary, screen.feedback, theme),
        Phase::Failed { message } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(1)])
                .split(area);
            let error = Paragraph::new(message.as_str())
                .style(theme.error_text)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title("Error  [Enter] retry  [Ctrl+R] start over")
                        .borders(Borders::ALL)
                        .border_style(theme.error_border),
                );
            f.render_widget(error, parts[0]);
            render_how_it_works(f, parts[1], theme);
        }
        Phase::Pending => {}
        Phase::Idle => render_how_it_works(f, area, theme),
    }
}

fn render_result(f: &mut Frame, area: Rect, summary: &str, feedback: CopyFeedback, theme: &Theme) {
    let copy_label = if feedback.copied() {
        Span::styled("✓ Copied!", theme.copied)
    } else {
        Span::styled("[Ctrl+Y] Copy", Style::default().fg(theme.text_secondary))
    };
    let block = Block::default()
        .title("Summary")
        .title(Title::from(copy_label).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(theme.result_border);
    let lines = vec![
        Line::from(Span::styled(summary.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "[Ctrl+R] Summarize Another Post",
            Style::default().fg(theme.text_secondary),
        )),
    ];
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn render_how_it_works(f: &mut Frame, area: Rect, theme: &Theme) {
    let steps = [
        "Copy any post URL",
        "Paste it in the input above",
        "Get an AI-generated summary instantly",
    ];
    let mut lines = vec![Line::from(Span::styled("How it works:", theme.title)), Line::from("")];
    for (i, step) in steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), theme.step_number),
            Span::styled(*step, Style::default().fg(theme.text)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let (status, status_style) = match screen.api_status {
        ApiStatus::Unknown => ("checking", theme.footer),
        ApiStatus::Online => ("online", theme.api_online),
        ApiStatus::Offline => ("offline", theme.api_offline),
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter Submit | Ctrl+Y Copy | Ctrl+R Reset | Ctrl+U Clear | Esc Quit | API ",
            theme.footer,
        ),
        Span::styled(format!("{} ({})", screen.api_url, status), status_style),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.blurred_border)));
    f.render_widget(footer, area);
}
