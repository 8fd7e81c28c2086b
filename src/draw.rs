use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::props::{Direction, Seasons, TrackMarkers};
use crate::state::betslip::BetLine;
use crate::state::game_log::{GameLogRow, stat_groups};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nfl_api::{RosterPlayer, SeasonType};

static TABS: &[&str; 4] = &["Teams", "Roster", "Player", "Betslip"];

const HELP_TEXT: &str = "\
Navigation
  1 2 3 4      Teams / Roster / Player / Betslip
  j k, ↑ ↓     move selection
  Enter        open team, expand or collapse player
  Esc          back
  ?            this help
  \"            toggle log pane
  f            full screen
  q            quit

Player
  j k          choose prop
  a, Enter     add prop to betslip
  s            cycle game log season

Betslip
  + -, → ←     move line one step
  e, Enter     type a line value
  o            toggle over / under
  t            cycle time frame (L5, L10, L20, seasons)
  T            back to the current season
  x            remove line
  X            clear betslip";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Teams => draw_teams(f, layout.main, app),
            MenuItem::Roster => draw_roster(f, layout.main, app),
            MenuItem::Player => draw_player(f, layout.main, app),
            MenuItem::Betslip => draw_betslip(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Teams => 0,
        MenuItem::Roster => 1,
        MenuItem::Player => 2,
        MenuItem::Betslip => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS
        .iter()
        .map(|t| {
            if *t == "Betslip" && !app.state.betslip.is_empty() {
                Line::from(format!("{t} ({})", app.state.betslip.lines().len()))
            } else {
                Line::from(*t)
            }
        })
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let reference = &app.state.reference;
    let block = default_border(Color::White).title(teams_title(
        reference.rostered_team_count(),
        reference.teams().len(),
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut index = 0;
    for group in reference.teams_by_division() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            group.division,
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )));
        for team in group.teams {
            let selected = index == app.state.teams.selected;
            if selected {
                selected_line = lines.len();
            }
            let marker = if selected { "▶ " } else { "  " };
            let color = team_color(team.color.as_deref());
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(format!("{:<4}", team.abbr), Style::default().fg(color)),
                Span::styled(team.name.clone(), highlight(selected)),
            ];
            if !reference.has_roster(&team.abbr) {
                spans.push(Span::styled(
                    "  no roster",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
            index += 1;
        }
    }

    if lines.is_empty() {
        draw_message(f, inner, "No team data loaded.");
        return;
    }

    let scroll = scroll_offset(selected_line, inner.height);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

fn draw_roster(f: &mut Frame, area: Rect, app: &App) {
    let Some(team) = app.state.selected_team() else {
        draw_placeholder(f, area, "Pick a team on the Teams tab (1) and press Enter.");
        return;
    };

    let title = format!(" {} Roster ", team.name);
    let block = default_border(team_color(team.color.as_deref())).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [list_area, card_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(inner);

    let expanded = app.state.player.player_id.as_deref();
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut index = 0;
    for (position, players) in app.state.reference.roster_by_position(&team.abbr) {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            position,
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )));
        for player in players {
            let selected = index == app.state.roster.selected;
            if selected {
                selected_line = lines.len();
            }
            let marker = match (selected, expanded == Some(player.player_id.as_str())) {
                (_, true) => "▼ ",
                (true, false) => "▶ ",
                _ => "  ",
            };
            let jersey = player
                .jersey_number
                .map(|n| format!("#{n:<3}"))
                .unwrap_or_else(|| "    ".to_string());
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(jersey, Style::default().fg(Color::DarkGray)),
                Span::styled(player.name.clone(), highlight(selected)),
            ]));
            index += 1;
        }
    }

    if lines.is_empty() {
        draw_message(
            f,
            list_area,
            "No players on file for this team. Set PROPSLIP_ROSTERS_JSON to a full nflverse roster export.",
        );
    } else {
        let scroll = scroll_offset(selected_line, list_area.height);
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), list_area);
    }

    match app.state.selected_player() {
        Some(player) => draw_player_card(f, card_area, app, player),
        None => draw_message(f, card_area, "Enter on a player to expand."),
    }
}

fn draw_player_card(f: &mut Frame, area: Rect, app: &App, player: &RosterPlayer) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", player.initials()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = bio_lines(player);
    lines.push(Line::from(""));
    lines.extend(prop_menu_lines(app, false));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "l or 3 for game log, a to add from the Player tab",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn bio_lines(player: &RosterPlayer) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let jersey = player
        .jersey_number
        .map(|n| format!("#{n} "))
        .unwrap_or_default();
    let weight = player
        .weight
        .map(|w| format!("{w} lbs"))
        .unwrap_or_else(|| "--".to_string());
    let age = player
        .age
        .map(|a| format!("{a:.0}"))
        .unwrap_or_else(|| "--".to_string());
    let exp = match player.years_exp {
        Some(0) => "Rookie".to_string(),
        Some(y) => format!("{y} yrs"),
        None => "--".to_string(),
    };

    vec![
        Line::from(vec![
            Span::styled(
                player.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {jersey}{} {}", player.position, player.team), dim),
        ]),
        Line::from(vec![
            Span::styled("HT ", dim),
            Span::raw(player.height_display()),
            Span::styled("  WT ", dim),
            Span::raw(weight),
            Span::styled("  AGE ", dim),
            Span::raw(age),
            Span::styled("  EXP ", dim),
            Span::raw(exp),
        ]),
    ]
}

fn prop_menu_lines(app: &App, show_cursor: bool) -> Vec<Line<'static>> {
    let options = app.state.prop_options();
    if options.is_empty() {
        return vec![Line::from(Span::styled(
            "No props offered for this position.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = vec![Line::from(Span::styled(
        "Props",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))];
    for (i, option) in options.iter().enumerate() {
        let selected = show_cursor && i == app.state.player.selected_prop;
        let marker = if selected { "▶ " } else { "  " };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(option.label.to_string(), highlight(selected)),
        ];
        if app.state.is_prop_added(option) {
            spans.push(Span::styled(" ✓ added", Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

// ---------------------------------------------------------------------------
// Player detail: game log + prop menu
// ---------------------------------------------------------------------------

fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let Some(player) = app.state.selected_player() else {
        draw_placeholder(f, area, "Expand a player on the Roster tab (2) first.");
        return;
    };

    let block = default_border(Color::White).title(format!(" {} ", player.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [bio_area, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(bio_lines(player)), bio_area);

    let [log_area, menu_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)]).areas(body);

    draw_game_log(f, log_area, app, player);

    let menu_block = default_border(Color::DarkGray);
    let menu_inner = menu_block.inner(menu_area);
    f.render_widget(menu_block, menu_area);
    f.render_widget(Paragraph::new(prop_menu_lines(app, true)), menu_inner);
}

fn draw_game_log(f: &mut Frame, area: Rect, app: &App, player: &RosterPlayer) {
    let table = app.state.game_log_table();
    let block = default_border(Color::DarkGray).title(format!(
        " Game Log {}: {} games (s: season) ",
        table.season,
        table.len()
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.player.is_loading() {
        draw_message(f, inner, "Loading game logs...");
        return;
    }
    if app.state.player.load_failed {
        draw_message(f, inner, "No data. The game log request failed.");
        return;
    }
    if table.is_empty() {
        draw_message(f, inner, "No game logs found for this season.");
        return;
    }

    let groups = stat_groups(&player.position);
    let mut header = vec!["WK", "OPP", "RESULT"];
    for group in &groups {
        header.extend(group.headers());
    }
    let column_count = header.len();

    let row_for = |row: &GameLogRow| {
        let mut cells = vec![
            Cell::from(row.record.week.to_string()),
            Cell::from(row.record.opponent.clone()),
            Cell::from(row.result().to_string()),
        ];
        for group in &groups {
            cells.extend(group.cells(row).into_iter().map(Cell::from));
        }
        Row::new(cells)
    };

    let mut rows: Vec<Row> = table.regular.iter().map(row_for).collect();
    if !table.playoffs.is_empty() {
        rows.push(
            Row::new(vec![Cell::from(SeasonType::Post.label())])
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        );
        rows.extend(table.playoffs.iter().map(row_for));
    }

    let mut widths = vec![
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(9),
    ];
    widths.extend(std::iter::repeat_n(
        Constraint::Length(6),
        column_count.saturating_sub(3),
    ));

    let table = Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        )
        .column_spacing(1);
    f.render_widget(table, inner);
}

// ---------------------------------------------------------------------------
// Betslip
// ---------------------------------------------------------------------------

/// Rows each betslip entry takes up.
const BET_LINE_HEIGHT: u16 = 4;

fn draw_betslip(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.state.betslip.summary();
    let title = format!(
        " Betslip: {} Lines | {:.1}% Hit Rate ",
        summary.lines, summary.hit_rate
    );
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.betslip.is_empty() {
        draw_message(
            f,
            inner,
            "No props yet. Expand a player and press a on the Player tab.",
        );
        return;
    }

    let [list_area, gauge_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(inner);

    let visible = usize::from((list_area.height / BET_LINE_HEIGHT).max(1));
    let selected = app.state.betslip.selected;
    let first = selected.saturating_sub(visible - 1);

    let seasons = app.state.betslip.seasons();
    let mut lines = Vec::new();
    for (i, line) in app.state.betslip.lines().iter().enumerate().skip(first).take(visible) {
        lines.extend(bet_line_lines(
            line,
            i == selected,
            seasons,
            list_area.width,
            app.state.line_input.as_deref().filter(|_| i == selected),
        ));
    }
    f.render_widget(Paragraph::new(lines), list_area);

    if let Some(line) = app.state.betslip.selected_line() {
        draw_hit_rate_gauge(f, gauge_area, line);
    }
}

fn bet_line_lines(
    line: &BetLine,
    selected: bool,
    seasons: Seasons,
    width: u16,
    input: Option<&str>,
) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let marker = if selected { "▶ " } else { "  " };
    let direction_color = match line.direction {
        Direction::Over => Color::Green,
        Direction::Under => Color::Red,
    };
    let line_value = match input {
        Some(buf) => format!("[{buf}_]"),
        None => format!("{:.1}", line.line_value),
    };
    let edge = line.edge();
    let edge_color = if edge >= 0.0 { Color::Green } else { Color::Red };

    vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(line.player.clone(), highlight(selected)),
            Span::styled(format!("  {} {}", line.team, line.position), dim),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::raw(format!("{} ", line.prop_label)),
            Span::styled(
                line.direction.label(),
                Style::default().fg(direction_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {line_value}")),
            Span::styled(format!("  [{}]", line.time_frame.label(seasons)), dim),
            Span::raw(format!("  H: {}/{} ", line.stats.hits, line.stats.total_games)),
            Span::styled(format!("({edge:+.1}%)"), Style::default().fg(edge_color)),
            Span::raw(format!("  A: {:.1}%", line.stats.hit_rate)),
        ]),
        stats_line(line),
        marker_track(&line.markers(), line.stats.total_games > 0, width.saturating_sub(4)),
    ]
}

fn stats_line(line: &BetLine) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let s = &line.stats;
    Line::from(vec![
        Span::raw("  "),
        Span::styled("L ", dim),
        Span::styled(format!("{:.0}", s.low), Style::default().fg(Color::Red)),
        Span::styled("  AVG ", dim),
        Span::styled(format!("{:.1}", s.average), Style::default().fg(Color::Yellow)),
        Span::styled("  MED ", dim),
        Span::raw(format!("{:.1}", s.median)),
        Span::styled("  H ", dim),
        Span::styled(format!("{:.0}", s.high), Style::default().fg(Color::Green)),
    ])
}

/// Number line with low/average/high markers and the current line.
fn marker_track(markers: &TrackMarkers, has_games: bool, width: u16) -> Line<'static> {
    let width = usize::from(width.max(10));
    let column = |pct: f64| ((pct / 100.0) * (width - 1) as f64).round() as usize;

    let mut cells = vec![('─', Color::DarkGray); width];
    if has_games {
        cells[column(markers.low).min(width - 1)] = ('L', Color::Red);
        cells[column(markers.high).min(width - 1)] = ('H', Color::Green);
        cells[column(markers.average).min(width - 1)] = ('A', Color::Yellow);
    }
    cells[column(markers.line).min(width - 1)] = ('┃', Color::Cyan);

    let mut spans = vec![Span::raw("  ")];
    spans.extend(
        cells
            .into_iter()
            .map(|(c, color)| Span::styled(c.to_string(), Style::default().fg(color))),
    );
    Line::from(spans)
}

fn draw_hit_rate_gauge(f: &mut Frame, area: Rect, line: &BetLine) {
    let rate = line.stats.hit_rate.clamp(0.0, 100.0);
    let color = match rate {
        r if r >= 60.0 => Color::Green,
        r if r >= 40.0 => Color::Yellow,
        _ => Color::Red,
    };
    let gauge = Gauge::default()
        .block(default_border(Color::DarkGray).title(" Hit Rate "))
        .gauge_style(Style::default().fg(color))
        .ratio(rate / 100.0)
        .label(format!(
            "{:.1}% ({} of {} games)",
            rate, line.stats.hits, line.stats.total_games
        ));
    f.render_widget(gauge, area);
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    draw_message(f, inner, msg);
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn team_color(hex: Option<&str>) -> Color {
    hex.and_then(|h| h.parse::<Color>().ok())
        .unwrap_or(Color::White)
}

fn teams_title(rostered: usize, total: usize) -> String {
    if rostered < total {
        format!(" Teams (rosters on file: {rostered} of {total}) ")
    } else {
        " Teams ".to_string()
    }
}

/// First visible row so that `selected_line` stays on screen.
fn scroll_offset(selected_line: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    u16::try_from(selected_line.saturating_sub(height - 1)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn track_places_markers() {
        let markers = TrackMarkers {
            low: 0.5,
            average: 50.0,
            high: 99.5,
            line: 25.0,
        };
        let text = track_text(&marker_track(&markers, true, 21));
        let cells: Vec<char> = text.trim_start().chars().collect();
        assert_eq!(cells.len(), 21);
        assert_eq!(cells[0], 'L');
        assert_eq!(cells[5], '┃');
        assert_eq!(cells[10], 'A');
        assert_eq!(cells[20], 'H');
    }

    #[test]
    fn empty_history_only_shows_line() {
        let markers = TrackMarkers {
            line: 50.0,
            ..Default::default()
        };
        let text = track_text(&marker_track(&markers, false, 11));
        assert!(!text.contains('L'));
        assert!(text.contains('┃'));
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(3, 10), 0);
        assert_eq!(scroll_offset(15, 10), 6);
        assert_eq!(scroll_offset(0, 0), 0);
    }

    #[test]
    fn teams_title_flags_partial_rosters() {
        assert_eq!(teams_title(4, 32), " Teams (rosters on file: 4 of 32) ");
        assert_eq!(teams_title(32, 32), " Teams ");
    }

    #[test]
    fn team_colors_parse_hex() {
        assert_eq!(team_color(Some("#E31837")), Color::Rgb(0xE3, 0x18, 0x37));
        assert_eq!(team_color(Some("nope")), Color::White);
        assert_eq!(team_color(None), Color::White);
    }
}
