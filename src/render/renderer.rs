use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, Position, Snapshot};
use crate::input::{key_label, BindingAction, KeyBindings, SettingsDialog, REPLAY_KEY, SETTINGS_KEY};
use crate::metrics::GameMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Head,
    Body,
    Apple,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        bindings: &KeyBindings,
        dialog: &SettingsDialog,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        if snapshot.is_running() {
            let grid = self.render_grid(snapshot);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(snapshot, metrics, bindings);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_controls(bindings);
        frame.render_widget(controls, chunks[2]);

        if dialog.is_open() {
            let area = centered_rect(36, 11, frame.area());
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_settings(bindings, dialog), area);
        }
    }

    /// Classify every cell of the grid, row-major
    fn cells(snapshot: &Snapshot) -> Vec<Cell> {
        let grid = snapshot.grid;
        let columns = grid.columns().max(0) as usize;
        let rows = grid.rows().max(0) as usize;
        let mut cells = vec![Cell::Empty; columns * rows];
        let mut mark = |pos: Position, cell: Cell| {
            if let Some((col, row)) = grid.cell_of(pos) {
                cells[row as usize * columns + col as usize] = cell;
            }
        };

        mark(snapshot.apple, Cell::Apple);
        // Tail first so the head wins when segments overlap
        for &segment in snapshot.body.iter().skip(1).rev() {
            mark(segment, Cell::Body);
        }
        if let Some(head) = snapshot.head() {
            mark(head, Cell::Head);
        }
        cells
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let columns = snapshot.grid.columns().max(1) as usize;
        let cells = Self::cells(snapshot);

        let lines: Vec<Line> = cells
            .chunks(columns)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                        Cell::Apple => Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.length().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.cadence.as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        bindings: &KeyBindings,
    ) -> Paragraph<'_> {
        let reason = match snapshot.collision {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            None => "",
        };
        let key = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(Color::Gray);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, hint)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.length().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Best this session: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} ({} games)", metrics.high_score, metrics.games_played),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", hint),
                Span::styled(key_label(bindings.get(BindingAction::Restart)), key),
                Span::styled(" or ", hint),
                Span::styled(key_label(REPLAY_KEY), key),
                Span::styled(" to play again, ", hint),
                Span::styled(
                    "Esc",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", hint),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, bindings: &KeyBindings) -> Paragraph<'_> {
        let movement: String = [
            BindingAction::Up,
            BindingAction::Left,
            BindingAction::Down,
            BindingAction::Right,
        ]
        .into_iter()
        .map(|action| key_label(bindings.get(action)))
        .collect();

        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled(movement, key),
            Span::raw(" to move | "),
            Span::styled(key_label(REPLAY_KEY), key),
            Span::raw(" replay | "),
            Span::styled(key_label(SETTINGS_KEY), key),
            Span::raw(" controls | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_settings(&self, bindings: &KeyBindings, dialog: &SettingsDialog) -> Paragraph<'_> {
        let mut lines = vec![Line::from("")];

        for (action, key) in bindings.iter() {
            let selected = action == dialog.selected();
            let value = if dialog.awaiting() == Some(action) {
                "Press a key...".to_string()
            } else {
                key_label(key)
            };
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>8}: ", action.label()), Style::default().fg(Color::Yellow)),
                Span::styled(format!(" {value:<14}"), style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: rebind  Esc: close",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Controls "),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangle of at most `width` x `height` centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
