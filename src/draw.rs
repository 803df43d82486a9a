use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::state::app_state::{ChartData, PaneFocus};
use crate::state::network::{LoadingState, ERROR_CHAR};
use nhl_api::colors::{self, TeamColorProfile};

static TABS: &[&str; 2] = &["Dashboard", "Ice Time"];
const TAB_BAR_HEIGHT: u16 = 3;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    terminal
        .draw(|f| {
            let main = if app.settings.full_screen {
                f.area()
            } else {
                let [tab_bar, main] =
                    Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)])
                        .areas(f.area());
                draw_tabs(f, tab_bar, app);
                main
            };

            match app.state.active_tab {
                MenuItem::Dashboard => draw_dashboard(f, main, app),
                MenuItem::IceTime => draw_ice_time(f, main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "Help: q=quit  1=Dashboard  2=Ice Time  h/l=pane  j/k=move  Enter=select\n\
                     c=chart  s=season  g=game depth  r=reload chart  f=fullscreen  \"=logs",
                ),
            }

            if app.state.show_logs {
                draw_logs(f, main);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn hex_color(hex: &str) -> Color {
    match colors::parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::White,
    }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let [tabs_area, help_area] =
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area);

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::IceTime => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tabs_area);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, help_area);
}

// ---------------------------------------------------------------------------
// Dashboard: team / player / game selectors + single-game ice time
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let [status, content, toi_panel] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(7),
    ])
    .areas(area);

    draw_status_line(f, status, app);

    let [teams_area, players_area, games_area] = Layout::horizontal([
        Constraint::Percentage(26),
        Constraint::Percentage(37),
        Constraint::Percentage(37),
    ])
    .areas(content);

    let dash = &app.state.dashboard;

    let team_rows: Vec<String> = dash
        .teams
        .iter()
        .map(|t| format!("{} {}", t.abbrev, t.name))
        .collect();
    draw_list_pane(
        f,
        teams_area,
        " Teams ",
        &team_rows,
        dash.selected_team,
        dash.focus == PaneFocus::Teams,
    );

    let player_rows: Vec<String> = dash
        .roster
        .iter()
        .map(|p| {
            let number = p
                .sweater_number
                .map(|n| format!("#{n:<2}"))
                .unwrap_or_else(|| "#--".to_owned());
            format!("{number} {} ({})", p.full_name(), p.position)
        })
        .collect();
    draw_list_pane(
        f,
        players_area,
        " Roster ",
        &player_rows,
        dash.selected_player,
        dash.focus == PaneFocus::Players,
    );

    let game_rows: Vec<String> = dash
        .games
        .iter()
        .map(|g| format!("{}  {}", g.game_date, g.matchup()))
        .collect();
    draw_list_pane(
        f,
        games_area,
        " Completed Games ",
        &game_rows,
        dash.selected_game,
        dash.focus == PaneFocus::Games,
    );

    draw_toi_panel(f, toi_panel, app);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let dash = &app.state.dashboard;
    let season_label = dash
        .seasons
        .get(dash.season_index)
        .map(|s| s.label.clone())
        .unwrap_or_default();
    let team_label = dash.active_team.as_deref().unwrap_or("none");

    let mut spans = vec![Span::styled(
        format!(
            "Team: {team_label}  Season: {season_label}  Games: {}  ",
            dash.game_limit
        ),
        Style::default().fg(Color::Gray),
    )];
    if let Some(at) = dash.last_loaded_at.as_deref() {
        spans.push(Span::styled(
            format!("Updated {at}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        spans.push(Span::styled(err.to_owned(), Style::default().fg(Color::Red)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_list_pane(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selected: usize,
    focused: bool,
) {
    let block = default_border(if focused { Color::Yellow } else { Color::DarkGray }).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if items.is_empty() {
        f.render_widget(
            Paragraph::new("Nothing here yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Scroll the window so the selection stays visible.
    let visible = inner.height as usize;
    let start = selected.saturating_sub(visible.saturating_sub(1));
    let width = inner.width as usize;

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(idx, item)| {
            let marker = if idx == selected { '>' } else { ' ' };
            let clipped: String = item.chars().take(width.saturating_sub(2)).collect();
            let style = if idx == selected && focused {
                Style::default().fg(Color::Yellow)
            } else if idx == selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker} {clipped}"), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_toi_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Ice Time ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dash = &app.state.dashboard;

    if let Some(notice) = dash.toi_notice.as_deref() {
        f.render_widget(
            Paragraph::new(notice).style(Style::default().fg(Color::Yellow)),
            inner,
        );
        return;
    }

    let Some(toi) = dash.toi.as_ref() else {
        f.render_widget(
            Paragraph::new(
                "Pick a player and a completed game, then press Enter on the games pane.\n\
                 Press Enter on the roster pane (or c) for the recent-games chart.",
            )
            .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let opponent = dash
        .games
        .iter()
        .find(|g| g.id.to_string() == toi.game_id)
        .zip(dash.active_team.as_deref())
        .map(|(game, team)| format!("  {}", game.opponent_of(team)))
        .unwrap_or_default();

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled(toi.name.clone(), value.fg(Color::White)),
            Span::styled(format!("{opponent}  game {}", toi.game_id), label),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("TOI ", label),
            Span::styled(format!("{:<7}", toi.time_on_ice), value),
            Span::styled("EV ", label),
            Span::styled(format!("{:<7}", toi.even_time_on_ice), value),
            Span::styled("PP ", label),
            Span::styled(format!("{:<7}", toi.power_play_time_on_ice), value),
            Span::styled("SH ", label),
            Span::styled(format!("{:<7}", toi.shorthanded_time_on_ice), value),
            Span::styled("Shifts ", label),
            Span::styled(toi.shifts.to_string(), value),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Ice-time chart: one bar per recent game, colored by team
// ---------------------------------------------------------------------------

fn draw_ice_time(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Ice Time Tracker ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(chart) = app.state.chart.chart.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Chart load failed:\n{err}")
        } else {
            "No chart loaded.\nSelect a player on the dashboard and press Enter or c.".to_owned()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, bars, cards] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(inner);

    let profile = colors::team_colors(&chart.team);
    draw_chart_header(f, header, app, chart, profile);
    draw_chart_bars(f, bars, app, chart, profile);
    draw_chart_cards(f, cards, app);
}

fn draw_chart_header(
    f: &mut Frame,
    area: Rect,
    app: &App,
    chart: &ChartData,
    profile: &TeamColorProfile,
) {
    let average = app.state.chart.average_minutes();
    let badge_fg = if profile.dark_text { Color::Black } else { Color::White };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                chart.player_name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", chart.team),
                Style::default().bg(hex_color(&profile.neo_primary)).fg(badge_fg),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" AVG {average:.1} min "),
                Style::default().bg(hex_color(&profile.neo_secondary)).fg(badge_fg),
            ),
        ]),
        Line::from(Span::styled(
            "Keys: j/k=highlight  r=reload  Esc=back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_chart_bars(
    f: &mut Frame,
    area: Rect,
    app: &App,
    chart: &ChartData,
    profile: &TeamColorProfile,
) {
    if chart.records.is_empty() {
        f.render_widget(
            Paragraph::new("No completed games in this window")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let max_minutes = chart
        .records
        .iter()
        .map(|r| r.toi_minutes)
        .fold(1.0_f64, f64::max);

    // date(8) + opp(9) + toi(6) + avg(8) + markers/spacing
    let bar_budget = (area.width as usize).saturating_sub(36).max(8);
    let highlighted = app.state.chart.highlighted;
    let team_color = hex_color(&profile.neo_primary);

    let lines: Vec<Line> = chart
        .records
        .iter()
        .enumerate()
        .take(area.height as usize)
        .map(|(idx, record)| {
            let selected = idx == highlighted;
            let opponent_profile = colors::team_colors(record.opponent_abbrev);
            let bar_color = if selected {
                hex_color(&opponent_profile.neo_primary)
            } else {
                team_color
            };

            let bar_len =
                ((record.toi_minutes / max_minutes) * bar_budget as f64).round().max(0.0) as usize;
            let bar: String = "█".repeat(bar_len.min(bar_budget));

            let marker = if selected { '>' } else { ' ' };
            let label_style = if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(format!("{marker} {:>7} ", record.date_label), label_style),
                Span::styled(format!("{:<8} ", record.opponent), label_style),
                Span::styled(bar, Style::default().fg(bar_color)),
                Span::styled(format!(" {:>5}", record.time_on_ice), label_style),
            ];
            if let Some(rolling) = chart.rolling.as_ref()
                && let Some(avg) = rolling.get(idx)
            {
                spans.push(Span::styled(
                    format!("  ~{avg:.1}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_chart_cards(f: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.state.chart.highlighted_record() else {
        return;
    };

    let [ev, pp, sh, shifts] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .areas(area);

    fn card(f: &mut Frame, area: Rect, title: &str, value: String) {
        let block = default_border(Color::DarkGray).title(format!(" {title} "));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(value)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            inner,
        );
    }

    card(f, ev, "Even", record.even_time_on_ice.clone());
    card(f, pp, "Power Play", record.power_play_time_on_ice.clone());
    card(f, sh, "Shorthanded", record.shorthanded_time_on_ice.clone());
    card(f, shifts, "Shifts", record.shifts.to_string());
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let [_, logs_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(area);
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "));
    f.render_widget(widget, logs_area);
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
