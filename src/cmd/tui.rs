use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::stdout;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::{
    search::{
        count_matches, display_nodes, match_start_lines, segment, DisplayNode, MatchNavigator,
        Query,
    },
    types::{Document, FocusTarget, Segment},
};

/// Full-screen document viewer: header, search bar, highlighted content.
///
/// Owns one document and the search state derived from it. Every edit of
/// the search box re-runs the whole normalize/segment/count/navigate
/// pipeline synchronously; opening a new document means constructing a
/// new viewer.
pub struct ViewerApp {
    document: Document,
    input: Input,
    navigator: MatchNavigator,
    segments: Vec<Segment>,
    scroll: usize,
    viewport_height: usize,
    pending_focus: Option<FocusTarget>,
}

impl ViewerApp {
    /// Open a viewer over `document`. An initial term, when present, is
    /// applied exactly as if the user had typed it.
    pub fn open(document: Document, initial_term: Option<&str>) -> Self {
        let mut app = Self {
            document,
            input: Input::new(initial_term.unwrap_or("").to_string()),
            navigator: MatchNavigator::new(),
            segments: Vec::new(),
            scroll: 0,
            viewport_height: 0,
            pending_focus: None,
        };
        app.run_search();
        app
    }

    pub fn run(&mut self) -> Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        enable_raw_mode()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal);

        disable_raw_mode()?;
        terminal.show_cursor()?;

        res
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        self.pending_focus = self.navigator.next();
                    }
                    KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.pending_focus = self.navigator.next();
                    }
                    KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.pending_focus = self.navigator.prev();
                    }
                    KeyCode::Down => self.scroll_by(1),
                    KeyCode::Up => self.scroll_by(-1),
                    KeyCode::PageDown => self.scroll_by(self.viewport_height as isize),
                    KeyCode::PageUp => self.scroll_by(-(self.viewport_height as isize)),
                    KeyCode::Home => self.scroll = 0,
                    KeyCode::End => self.scroll = self.content_line_count(),
                    _ => {
                        if let Some(change) = self.input.handle_event(&Event::Key(key)) {
                            if change.value {
                                self.run_search();
                            }
                        }
                    }
                }
            }
        }
    }

    /// Recompute segments, total and navigation state for the current
    /// search box value.
    fn run_search(&mut self) {
        let query = Query::new(self.input.value());
        self.segments = segment(&query, &self.document.content);
        let total = count_matches(&query, &self.document.content);
        debug_assert_eq!(
            total,
            self.segments.iter().filter(|s| s.is_match).count()
        );
        self.pending_focus = self.navigator.search(total);
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.content_line_count();
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    fn content_line_count(&self) -> usize {
        self.document.content.lines().count()
    }

    /// Center the focused occurrence's first line in the viewport.
    fn apply_focus(&mut self, focus: FocusTarget) {
        let starts = match_start_lines(&self.segments);
        if let Some(&line) = starts.get(focus.match_index) {
            self.scroll = line.saturating_sub(self.viewport_height / 2);
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3), // Header
                    Constraint::Length(3), // Search bar
                    Constraint::Min(0),    // Content
                    Constraint::Length(2), // Status bar
                ]
                .as_ref(),
            )
            .split(size);

        self.viewport_height = chunks[2].height.saturating_sub(2) as usize;
        if let Some(focus) = self.pending_focus.take() {
            self.apply_focus(focus);
        }

        self.draw_header(f, chunks[0]);
        self.draw_search_bar(f, chunks[1]);
        self.draw_content(f, chunks[2]);
        self.draw_status_bar(f, chunks[3]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                self.document.filename.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Uploaded: {}", self.document.uploaded),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let paragraph = Paragraph::new(title)
            .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(paragraph, area);
    }

    fn draw_search_bar(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(22)].as_ref())
            .split(area);

        let input_width = chunks[0].width.saturating_sub(2) as usize;
        let input_scroll = self.input.visual_scroll(input_width);
        let search_input = Paragraph::new(self.input.value())
            .scroll((0, input_scroll as u16))
            .block(Block::default().title("Search in document").borders(Borders::ALL));
        f.render_widget(search_input, chunks[0]);
        f.set_cursor(
            chunks[0].x
                + (self.input.visual_cursor().max(input_scroll) - input_scroll) as u16
                + 1,
            chunks[0].y + 1,
        );

        let (indicator, style) = match (self.input.value().trim().is_empty(), self.navigator.total()) {
            (true, _) => (String::new(), Style::default()),
            (false, 0) => (
                "No matches found".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            (false, total) => (
                format!("{} of {}", self.navigator.current(), total),
                Style::default().fg(Color::Yellow),
            ),
        };
        let indicator = Paragraph::new(Span::styled(indicator, style))
            .block(Block::default().title("Matches").borders(Borders::ALL));
        f.render_widget(indicator, chunks[1]);
    }

    fn draw_content(&self, f: &mut Frame, area: Rect) {
        let nodes = display_nodes(&self.segments, self.navigator.current());
        let lines = styled_lines(&nodes);

        let content = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        f.render_widget(content, area);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(
            "Enter/Ctrl+N next  Ctrl+P previous  ↑↓/PgUp/PgDn scroll  Esc close",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
        f.render_widget(status, area);
    }
}

/// Turn display nodes into styled terminal lines, splitting at newlines.
/// Matches get a yellow highlight; the focused occurrence gets the
/// stronger emphasis marker.
fn styled_lines(nodes: &[DisplayNode]) -> Vec<Line<'static>> {
    let match_style = Style::default().fg(Color::Black).bg(Color::Yellow);
    let focused_style = Style::default()
        .fg(Color::Black)
        .bg(Color::LightYellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for node in nodes {
        let (text, style) = match node {
            DisplayNode::Plain { text } => (text, Style::default()),
            DisplayNode::Match { text, focused: true, .. } => (text, focused_style),
            DisplayNode::Match { text, .. } => (text, match_style),
        };
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));

    lines
}
