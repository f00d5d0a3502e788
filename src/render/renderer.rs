use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{
    AbilityKind, Difficulty, FoodKind, ObstacleKind, Position, Round, RoundPhase,
};
use crate::metrics::SessionStats;
use crate::scene::Scene;

// PvZ palette, squeezed into terminal colors
const LAWN: Color = Color::Green;
const SUN_YELLOW: Color = Color::Yellow;
const SHIELD_BLUE: Color = Color::Cyan;
const ZOMBIE_GRAY: Color = Color::Gray;
const CHERRY_RED: Color = Color::Red;

/// Draws the current scene from read-only round state. Never mutates the
/// simulation.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        scene: Scene,
        round: &Round,
        stats: &SessionStats,
        difficulty: Difficulty,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Scene area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_header(round, stats);
        frame.render_widget(header, chunks[0]);

        // Center the scene area horizontally
        let scene_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match scene {
            Scene::Menu => {
                let menu = self.render_menu(difficulty, stats);
                frame.render_widget(menu, scene_area);
            }
            Scene::Playing => {
                let lawn = self.render_lawn(round);
                frame.render_widget(lawn, scene_area);
            }
            Scene::GameOver { score } => {
                let game_over = self.render_game_over(score, stats);
                frame.render_widget(game_over, scene_area);
            }
        }

        let controls = self.render_controls(scene);
        frame.render_widget(controls, chunks[2]);
    }

    fn cell_span(&self, round: &Round, pos: Position) -> Span<'static> {
        let snake = round.snake();

        if pos == snake.head() {
            let color = if snake.is_shielded() { SHIELD_BLUE } else { LAWN };
            return Span::styled("■ ", Style::default().fg(color).add_modifier(Modifier::BOLD));
        }
        if snake.occupies(pos) {
            return Span::styled("□ ", Style::default().fg(LAWN));
        }
        if let Some(food) = round.foods().iter().find(|f| f.position == pos) {
            let (glyph, color) = match food.kind {
                FoodKind::Sun => ("* ", SUN_YELLOW),
                FoodKind::Sunflower => ("@ ", SUN_YELLOW),
                FoodKind::Walnut => ("o ", Color::LightYellow),
                FoodKind::Peashooter => ("} ", Color::LightGreen),
            };
            return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
        }
        if let Some(obstacle) = round.obstacles().iter().find(|o| o.cell() == pos) {
            let (glyph, color) = match obstacle.kind {
                ObstacleKind::Tombstone => ("# ", ZOMBIE_GRAY),
                ObstacleKind::Zombie => ("Z ", CHERRY_RED),
            };
            return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
        }

        Span::styled(". ", Style::default().fg(Color::DarkGray))
    }

    fn render_lawn(&self, round: &Round) -> Paragraph<'static> {
        let grid = round.config().grid;
        let mut lines = Vec::new();

        for y in 0..grid.height {
            let mut spans = Vec::new();
            for x in 0..grid.width {
                spans.push(self.cell_span(round, Position::new(x, y)));
            }
            lines.push(Line::from(spans));
        }

        if let Some(ability_line) = self.ability_line(round) {
            lines.push(Line::from(""));
            lines.push(ability_line);
        }

        let (title, border_color) = if round.phase() == RoundPhase::Paused {
            (" Paused - press Space to resume ", SUN_YELLOW)
        } else {
            (" The Lawn ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn ability_line(&self, round: &Round) -> Option<Line<'static>> {
        let snake = round.snake();
        let mut spans = Vec::new();
        if let Some(ticks) = snake.ability_remaining(AbilityKind::Shield) {
            spans.push(Span::styled(
                format!("Shield {ticks} "),
                Style::default().fg(SHIELD_BLUE).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(ticks) = snake.ability_remaining(AbilityKind::SpeedBoost) {
            spans.push(Span::styled(
                format!("Speed {ticks} "),
                Style::default().fg(SUN_YELLOW).add_modifier(Modifier::BOLD),
            ));
        }
        if spans.is_empty() {
            None
        } else {
            Some(Line::from(spans))
        }
    }

    /// Round clock as mm:ss
    fn format_clock(elapsed: std::time::Duration) -> String {
        let total_secs = elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    fn render_header(&self, round: &Round, stats: &SessionStats) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(SUN_YELLOW)),
            Span::styled(
                round.score().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(SUN_YELLOW)),
            Span::styled(
                round.snake().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(SUN_YELLOW)),
            Span::styled(
                Self::format_clock(stats.round_elapsed()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(SUN_YELLOW)),
            Span::styled(
                stats.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, difficulty: Difficulty, stats: &SessionStats) -> Paragraph<'static> {
        let mut difficulty_spans = vec![Span::styled(
            "Difficulty:  ",
            Style::default().fg(Color::Gray),
        )];
        for option in Difficulty::ALL {
            let style = if option == difficulty {
                Style::default().fg(LAWN).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            difficulty_spans.push(Span::styled(format!("{}  ", option.name()), style));
        }

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "PLANTS vs. ZOMBIES SNAKE",
                Style::default().fg(LAWN).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Eat suns, dodge tombstones, outrun the zombies.",
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(difficulty_spans),
            Line::from(vec![Span::styled(
                "(change with Left/Right)",
                Style::default().fg(Color::DarkGray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default().fg(LAWN).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(CHERRY_RED).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                match stats.last_score {
                    Some(last) => format!(
                        "Rounds played: {}   Last score: {last}",
                        stats.rounds_played
                    ),
                    None => format!("Rounds played: {}", stats.rounds_played),
                },
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(LAWN)),
        )
    }

    fn render_game_over(&self, score: u32, stats: &SessionStats) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "THE ZOMBIES GOT YOU",
                Style::default().fg(CHERRY_RED).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(SUN_YELLOW)),
                Span::styled(
                    score.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(SUN_YELLOW)),
                Span::styled(
                    stats.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default().fg(LAWN).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to replant or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(CHERRY_RED).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(CHERRY_RED)),
        )
    }

    fn render_controls(&self, scene: Scene) -> Paragraph<'static> {
        let text = match scene {
            Scene::Playing => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(SHIELD_BLUE)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(SHIELD_BLUE)),
                Span::raw(" to steer | "),
                Span::styled("Space", Style::default().fg(SUN_YELLOW)),
                Span::raw(" to pause | "),
                Span::styled("Q", Style::default().fg(CHERRY_RED)),
                Span::raw(" for the menu"),
            ])],
            _ => vec![Line::from(vec![
                Span::styled("Enter", Style::default().fg(LAWN)),
                Span::raw(" to play | "),
                Span::styled("Q", Style::default().fg(CHERRY_RED)),
                Span::raw(" to quit"),
            ])],
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
