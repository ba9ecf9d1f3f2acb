// Plain-text rendering of boards, games, and players for the terminal.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use oneonone_baseball::{Board, ScoredGame};
use oneonone_core::model::{
    slot_abbr, FantasyGame, GameBoxScore, GamePhase, GameScore, PlayerRecord, Scoreboard,
    Selection, TeamLine,
};
use oneonone_core::store::GameId;

pub fn board(day: NaiveDate, board: &Board) -> String {
    let mut out = String::new();
    match board {
        Board::Ready(matchups) => {
            let _ = writeln!(out, "Board for {day}");
            for m in matchups {
                let _ = writeln!(
                    out,
                    "{:>2}  [1] {:<24} [2] {}",
                    slot_abbr(m.position),
                    m.first.full_name(),
                    m.second.full_name()
                );
            }
        }
        Board::NoGameAvailable => {
            let _ = writeln!(out, "No game available for {day}.");
        }
        Board::Unsatisfiable { position, attempts } => {
            let _ = writeln!(
                out,
                "Could not build a board for {day}: no two teams can fill {} (after {attempts} draws).",
                slot_abbr(*position)
            );
        }
    }
    out
}

fn picks(out: &mut String, label: &str, picks: &[Selection], scored: bool) {
    let _ = writeln!(out, "{label}:");
    for s in picks {
        if scored {
            let _ = writeln!(out, "  {:>2}  {:<24} {:>4}", slot_abbr(s.position), s.full_name(), s.score);
        } else {
            let _ = writeln!(out, "  {:>2}  {}", slot_abbr(s.position), s.full_name());
        }
    }
}

pub fn game(id: &str, game: &FantasyGame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game {id}");
    let scored = game.is_scored();
    picks(&mut out, "You", &game.user_picks, scored);
    picks(&mut out, "Opponent", &game.opponent_picks, scored);
    if let (Some(outcome), Some(user), Some(opp)) =
        (game.outcome(), game.user_total(), game.opponent_total())
    {
        let _ = writeln!(out, "Result: {outcome} {user}-{opp}");
    }
    out
}

pub fn scored(scored: &ScoredGame) -> String {
    game(&scored.id, &scored.game)
}

/// One line per game: id, draft date, and either the result or whether it
/// can be scored yet.
pub fn history(games: &[(GameId, FantasyGame)], now: DateTime<Utc>, tz: &Tz) -> String {
    if games.is_empty() {
        return "No games played yet.\n".to_string();
    }
    let mut out = String::new();
    for (id, g) in games {
        let created = g.created_at.with_timezone(tz).date_naive();
        let status = match (g.outcome(), g.user_total(), g.opponent_total()) {
            (Some(outcome), Some(user), Some(opp)) => format!("{} {user}-{opp}", outcome.letter()),
            _ if g.is_settled(now, tz) => "ready to score".to_string(),
            _ => format!("in progress (scores after {})", g.scoring_day(tz)),
        };
        let _ = writeln!(out, "{id}  {created}  {status}");
    }
    out
}

pub fn player(p: &PlayerRecord) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", p.full_name());
    if let Some(pos) = p.primary_position.as_deref().or(p.position.as_deref()) {
        let _ = write!(out, " ({pos})");
    }
    if let Some(num) = &p.jersey_number {
        let _ = write!(out, " #{num}");
    }
    out.push('\n');
    if let Some(h) = &p.hitting {
        let _ = writeln!(
            out,
            "  AB {}  H {}  BB {}  HR {}  RBI {}  R {}  SB {}",
            h.at_bats, h.hits, h.walks, h.home_runs, h.rbi, h.runs, h.stolen_bases
        );
    }
    if let Some(pt) = &p.pitching {
        let er = pt.earned_runs.map_or("-".to_string(), |er| er.to_string());
        let _ = writeln!(
            out,
            "  IP {:.1}  ER {er}  H {}  BB {}  K {}  W-L {}-{}  SV {}",
            pt.innings_pitched,
            pt.hits_allowed,
            pt.walks_allowed,
            pt.strikeouts,
            pt.wins,
            pt.losses,
            pt.saves
        );
    }
    if p.has_no_stats() {
        out.push_str("  no statistics\n");
    }
    out
}

fn club(t: &TeamLine) -> &str {
    if t.abbr.is_empty() {
        &t.name
    } else {
        &t.abbr
    }
}

fn status(g: &GameScore, tz: &Tz) -> String {
    match g.phase {
        GamePhase::Final { innings: 9 } => "Final".to_string(),
        GamePhase::Final { innings } => format!("Final/{innings}"),
        GamePhase::InProgress { inning, top } => {
            format!("{} {inning}", if top { "Top" } else { "Bot" })
        }
        GamePhase::Scheduled => g.scheduled.map_or("TBD".to_string(), |at| {
            at.with_timezone(tz).format("%-I:%M %p").to_string()
        }),
    }
}

/// `AWAY r - r HOME  status`, with runs omitted before first pitch.
fn score_line(g: &GameScore, tz: &Tz) -> String {
    let (away, home) = (club(&g.away), club(&g.home));
    if g.phase.has_started() {
        format!(
            "{away:>4} {} - {} {home:<4} {}",
            g.away.runs,
            g.home.runs,
            status(g, tz)
        )
    } else {
        format!("{away:>4}   -   {home:<4} {}", status(g, tz))
    }
}

pub fn scoreboard(board: &Scoreboard, tz: &Tz) -> String {
    if board.games.is_empty() {
        return format!("No games on {}.\n", board.date);
    }
    let mut out = String::new();
    let _ = writeln!(out, "Scores for {}", board.date);
    for g in &board.games {
        let _ = writeln!(out, "{}  {}", score_line(g, tz), g.id);
    }
    out
}

fn line_score(out: &mut String, g: &GameScore) {
    let innings = g.away.innings.len().max(g.home.innings.len());
    let _ = write!(out, "{:<5}", "");
    for n in 1..=innings {
        let _ = write!(out, "{n:>3}");
    }
    let _ = writeln!(out, "  {:>3}{:>3}{:>3}", "R", "H", "E");
    for t in [&g.away, &g.home] {
        let _ = write!(out, "{:<5}", club(t));
        for n in 0..innings {
            match t.innings.get(n).copied().flatten() {
                Some(r) => {
                    let _ = write!(out, "{r:>3}");
                }
                None => {
                    let _ = write!(out, "{:>3}", "x");
                }
            }
        }
        let _ = writeln!(out, "  {:>3}{:>3}{:>3}", t.runs, t.hits, t.errors);
    }
}

fn box_lines(out: &mut String, t: &TeamLine, players: &[PlayerRecord]) {
    if players.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", club(t));
    for p in players {
        if let Some(h) = &p.hitting {
            let _ = writeln!(
                out,
                "  {:<24} {}-{}  BB {}  HR {}  RBI {}  R {}",
                p.full_name(),
                h.hits,
                h.at_bats,
                h.walks,
                h.home_runs,
                h.rbi,
                h.runs
            );
        }
        if let Some(pt) = &p.pitching {
            let _ = writeln!(
                out,
                "  {:<24} IP {:.1}  H {}  ER {}  BB {}  K {}",
                p.full_name(),
                pt.innings_pitched,
                pt.hits_allowed,
                pt.earned_runs.map_or("-".to_string(), |er| er.to_string()),
                pt.walks_allowed,
                pt.strikeouts
            );
        }
    }
}

pub fn box_score(b: &GameBoxScore, tz: &Tz) -> String {
    let g = &b.score;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} at {} {}",
        g.away.market, g.away.name, g.home.market, g.home.name
    );
    let _ = writeln!(out, "{}", score_line(g, tz).trim());
    if g.phase.has_started() {
        line_score(&mut out, g);
    } else {
        for (t, sp) in [(&g.away, &b.away_probable), (&g.home, &b.home_probable)] {
            let name = sp.as_ref().map_or("TBD".to_string(), PlayerRecord::full_name);
            let _ = writeln!(out, "{} probable: {name}", club(t));
        }
    }
    let d = &b.decisions;
    for (label, p) in [("W", &d.win), ("L", &d.loss), ("S", &d.save)] {
        if let Some(p) = p {
            let _ = writeln!(out, "{label}: {}", p.full_name());
        }
    }
    box_lines(&mut out, &g.away, &b.away_players);
    box_lines(&mut out, &g.home, &b.home_players);
    out
}
