// Sportradar MLB v7 response shapes and their conversion into the model.
//
// Only the fields the game uses are declared; everything is defaulted so a
// sparse pre-game payload decodes the same way as a settled one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use oneonone_core::model::{
    DaySchedule, DayStatistics, GameBoxScore, GamePairing, GamePhase, GameScore, GameStatLines,
    HittingStats, LightDaySchedule, LineupEntry, PitchingDecisions, PitchingStats, PlayerRecord,
    ScheduledGame, Scoreboard, TeamLine, TeamSnapshot,
};

// ---------------------------------------------------------------------------
// Daily endpoints (summary.json / boxscore.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DailyResponse {
    pub league: League,
}

#[derive(Debug, Deserialize)]
pub struct League {
    #[serde(default)]
    pub games: Vec<GameEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct GameEnvelope {
    pub game: Game,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Game {
    pub id: String,
    pub status: String,
    pub scheduled: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub outcome: Option<LiveState>,
    #[serde(rename = "final")]
    pub final_state: Option<FinalState>,
    pub pitching: Option<Decisions>,
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LiveState {
    pub current_inning: u8,
    pub current_inning_half: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FinalState {
    pub inning: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Decisions {
    pub win: Option<Player>,
    pub loss: Option<Player>,
    pub save: Option<Player>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub market: String,
    pub abbr: String,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub win: u32,
    pub loss: u32,
    pub scoring: Vec<Inning>,
    pub probable_pitcher: Option<Player>,
    pub roster: Option<Vec<Player>>,
    pub lineup: Option<Vec<Lineup>>,
    pub players: Option<Vec<Player>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Inning {
    pub number: u8,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// A count, or "X" for an inning not batted.
    pub runs: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct Lineup {
    pub id: String,
    #[serde(default)]
    pub order: u8,
    pub position: u8,
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub player: Player,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub primary_position: Option<String>,
    pub jersey_number: Option<String>,
    pub statistics: Option<Statistics>,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Season {
    pub year: i32,
    #[serde(rename = "type")]
    pub season_type: String,
    pub totals: Option<SeasonTotals>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonTotals {
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub hitting: Option<Hitting>,
    pub pitching: Option<Pitching>,
}

#[derive(Debug, Deserialize)]
pub struct Hitting {
    pub overall: HittingOverall,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HittingOverall {
    pub ab: u32,
    pub rbi: u32,
    pub runs: Runs,
    pub onbase: OnBase,
    pub steal: Steal,
}

#[derive(Debug, Deserialize)]
pub struct Pitching {
    pub overall: PitchingOverall,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PitchingOverall {
    pub ip_2: f64,
    pub onbase: OnBase,
    pub runs: Runs,
    pub outs: Outs,
    pub games: GameResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OnBase {
    pub h: u32,
    pub bb: u32,
    pub hr: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Runs {
    pub total: u32,
    pub earned: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Steal {
    pub stolen: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Outs {
    pub ktotal: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameResult {
    pub win: u32,
    pub loss: u32,
    pub save: u32,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

impl From<HittingOverall> for HittingStats {
    fn from(h: HittingOverall) -> Self {
        HittingStats {
            at_bats: h.ab,
            hits: h.onbase.h,
            walks: h.onbase.bb,
            home_runs: h.onbase.hr,
            rbi: h.rbi,
            runs: h.runs.total,
            stolen_bases: h.steal.stolen,
        }
    }
}

impl From<PitchingOverall> for PitchingStats {
    fn from(p: PitchingOverall) -> Self {
        PitchingStats {
            innings_pitched: p.ip_2,
            earned_runs: p.runs.earned,
            hits_allowed: p.onbase.h,
            walks_allowed: p.onbase.bb,
            strikeouts: p.outs.ktotal,
            wins: p.games.win,
            losses: p.games.loss,
            saves: p.games.save,
        }
    }
}

impl From<Player> for PlayerRecord {
    fn from(p: Player) -> Self {
        // Profiles carry season totals instead of a top-level line; use the
        // most recent regular season.
        let statistics = p.statistics.or_else(|| {
            p.seasons
                .into_iter()
                .filter(|s| s.season_type == "REG")
                .max_by_key(|s| s.year)
                .and_then(|s| s.totals)
                .map(|t| t.statistics)
        });
        let (hitting, pitching) = match statistics {
            Some(s) => (
                s.hitting.map(|h| h.overall.into()),
                s.pitching.map(|p| p.overall.into()),
            ),
            None => (None, None),
        };
        PlayerRecord {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            position: p.position,
            primary_position: p.primary_position,
            jersey_number: p.jersey_number,
            hitting,
            pitching,
        }
    }
}

impl From<Lineup> for LineupEntry {
    fn from(l: Lineup) -> Self {
        LineupEntry {
            player_id: l.id,
            order: l.order,
            position: l.position,
        }
    }
}

impl From<Team> for TeamSnapshot {
    fn from(t: Team) -> Self {
        TeamSnapshot {
            id: t.id,
            name: t.name,
            market: t.market,
            abbr: t.abbr,
            lineup: t.lineup.map(|l| l.into_iter().map(Into::into).collect()),
            roster: t.roster.map(|r| r.into_iter().map(Into::into).collect()),
            probable_pitcher: t.probable_pitcher.map(Into::into),
        }
    }
}

/// Team id for a side, falling back to the game-level id string when the
/// team object omits it.
fn team_with_id(mut team: Team, fallback_id: &str) -> Team {
    if team.id.is_empty() {
        team.id = fallback_id.to_string();
    }
    team
}

pub fn into_day_schedule(resp: DailyResponse, date: NaiveDate) -> DaySchedule {
    let games = resp
        .league
        .games
        .into_iter()
        .map(|env| {
            let g = env.game;
            ScheduledGame {
                id: g.id,
                status: g.status,
                home: team_with_id(g.home, &g.home_team).into(),
                away: team_with_id(g.away, &g.away_team).into(),
            }
        })
        .collect();
    DaySchedule { date, games }
}

pub fn into_light_schedule(resp: DailyResponse, date: NaiveDate) -> LightDaySchedule {
    let games = resp
        .league
        .games
        .into_iter()
        .map(|env| {
            let g = env.game;
            GamePairing {
                home: team_with_id(g.home, &g.home_team).into(),
                away: team_with_id(g.away, &g.away_team).into(),
            }
        })
        .collect();
    LightDaySchedule { date, games }
}

pub fn into_day_statistics(resp: DailyResponse, date: NaiveDate) -> DayStatistics {
    let players = |t: Team| -> Vec<PlayerRecord> {
        t.players
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect()
    };
    let games = resp
        .league
        .games
        .into_iter()
        .map(|env| GameStatLines {
            home: players(env.game.home),
            away: players(env.game.away),
        })
        .collect();
    DayStatistics { date, games }
}

impl From<&Team> for TeamLine {
    fn from(t: &Team) -> Self {
        let mut innings: Vec<&Inning> = t
            .scoring
            .iter()
            .filter(|i| i.kind.as_deref().map_or(true, |k| k == "inning"))
            .collect();
        innings.sort_by_key(|i| i.number);
        TeamLine {
            id: t.id.clone(),
            name: t.name.clone(),
            market: t.market.clone(),
            abbr: t.abbr.clone(),
            runs: t.runs,
            hits: t.hits,
            errors: t.errors,
            wins: t.win,
            losses: t.loss,
            innings: innings.iter().map(|i| inning_runs(&i.runs)).collect(),
        }
    }
}

fn inning_runs(v: &serde_json::Value) -> Option<u32> {
    match v {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn phase(g: &Game) -> GamePhase {
    match g.status.as_str() {
        "inprogress" => {
            let (inning, half) = g
                .outcome
                .as_ref()
                .map_or((1, "T"), |o| (o.current_inning.max(1), o.current_inning_half.as_str()));
            GamePhase::InProgress {
                inning,
                top: half != "B",
            }
        }
        "complete" | "closed" => {
            let innings = g
                .final_state
                .as_ref()
                .map(|f| f.inning)
                .filter(|&n| n > 0)
                .unwrap_or_else(|| u8::try_from(g.home.scoring.len().max(9)).unwrap_or(9));
            GamePhase::Final { innings }
        }
        _ => GamePhase::Scheduled,
    }
}

fn game_score(g: &Game) -> GameScore {
    GameScore {
        id: g.id.clone(),
        scheduled: g
            .scheduled
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc)),
        phase: phase(g),
        away: TeamLine::from(&g.away),
        home: TeamLine::from(&g.home),
    }
}

pub fn into_scoreboard(resp: DailyResponse, date: NaiveDate) -> Scoreboard {
    let games = resp.league.games.iter().map(|env| game_score(&env.game)).collect();
    Scoreboard { date, games }
}

pub fn into_box_score(env: GameEnvelope) -> GameBoxScore {
    let score = game_score(&env.game);
    let g = env.game;
    let decisions = g.pitching.unwrap_or_default();
    let players = |t: Option<Vec<Player>>| -> Vec<PlayerRecord> {
        t.unwrap_or_default().into_iter().map(Into::into).collect()
    };
    GameBoxScore {
        score,
        away_probable: g.away.probable_pitcher.map(Into::into),
        home_probable: g.home.probable_pitcher.map(Into::into),
        decisions: PitchingDecisions {
            win: decisions.win.map(Into::into),
            loss: decisions.loss.map(Into::into),
            save: decisions.save.map(Into::into),
        },
        away_players: players(g.away.players),
        home_players: players(g.home.players),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SUMMARY: &str = r#"{
      "league": {
        "date": "2024-06-01",
        "games": [
          { "game": {
              "id": "g1", "status": "closed",
              "home_team": "sea-id", "away_team": "hou-id",
              "home": {
                "id": "sea-id", "name": "Mariners", "market": "Seattle", "abbr": "SEA",
                "runs": 3, "hits": 7,
                "lineup": [
                  { "id": "p-c", "inning": 0, "order": 6, "position": 2, "sequence": 1 },
                  { "id": "p-sp", "inning": 0, "order": 0, "position": 1, "sequence": 1 }
                ],
                "roster": [
                  { "id": "p-c", "first_name": "Cal", "last_name": "Raleigh", "primary_position": "C" },
                  { "id": "p-sp", "first_name": "Logan", "last_name": "Gilbert", "primary_position": "SP" }
                ],
                "players": [
                  { "id": "p-c", "first_name": "Cal", "last_name": "Raleigh",
                    "statistics": { "hitting": { "overall": {
                      "ab": 4, "rbi": 3, "obp": 0.5,
                      "runs": { "total": 1 },
                      "onbase": { "h": 2, "bb": 1, "hr": 1, "tb": 5 },
                      "outs": { "ktotal": 1 },
                      "steal": { "stolen": 0 } } } } },
                  { "id": "p-sp", "first_name": "Logan", "last_name": "Gilbert",
                    "statistics": { "pitching": { "overall": {
                      "ip_2": 6.1, "era": "2.84",
                      "onbase": { "h": 5, "bb": 1, "hr": 0 },
                      "runs": { "total": 3, "earned": 2, "unearned": 1 },
                      "outs": { "ktotal": 8 },
                      "games": { "win": 1, "loss": 0, "save": 0 } } } } }
                ]
              },
              "away": {
                "id": "hou-id", "name": "Astros", "market": "Houston", "abbr": "HOU"
              }
          } }
        ]
      }
    }"#;

    const BOXSCORE: &str = r#"{
      "league": { "games": [
        { "game": {
            "id": "g2", "status": "scheduled",
            "home_team": "hou-id", "away_team": "sea-id",
            "home": { "id": "hou-id", "name": "Astros", "market": "Houston", "abbr": "HOU",
                      "probable_pitcher": { "id": "hou-sp", "first_name": "Framber", "last_name": "Valdez" } },
            "away": { "name": "Mariners", "market": "Seattle", "abbr": "SEA" }
        } }
      ] }
    }"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn decode(body: &str) -> DailyResponse {
        serde_json::from_str(body).expect("fixture should decode")
    }

    #[test]
    fn summary_decodes_into_day_schedule() {
        let day = into_day_schedule(decode(SUMMARY), date());
        assert_eq!(day.games.len(), 1);
        let sea = &day.games[0].home;
        assert_eq!(sea.id, "sea-id");
        assert_eq!(sea.display_name(), "Seattle Mariners");
        assert!(sea.is_draftable());
        assert_eq!(sea.player_in_slot(2).unwrap().last_name, "Raleigh");

        let hou = &day.games[0].away;
        assert!(!hou.is_draftable());
        assert!(!hou.is_pitcher_eligible());
    }

    #[test]
    fn boxscore_decodes_probable_pitchers_and_fills_missing_team_id() {
        let light = into_light_schedule(decode(BOXSCORE), date());
        let g = &light.games[0];
        assert_eq!(g.home.probable_pitcher.as_ref().unwrap().id, "hou-sp");
        assert_eq!(g.away.id, "sea-id");
        assert!(g.away.probable_pitcher.is_none());
    }

    #[test]
    fn statistics_map_box_score_fields() {
        let stats = into_day_statistics(decode(SUMMARY), date());
        assert_eq!(stats.player_count(), 2);

        let c = stats.find_player("p-c").unwrap();
        assert_eq!(
            c.hitting,
            Some(HittingStats {
                at_bats: 4,
                hits: 2,
                walks: 1,
                home_runs: 1,
                rbi: 3,
                runs: 1,
                stolen_bases: 0,
            })
        );

        let sp = stats.find_player("p-sp").unwrap().pitching.clone().unwrap();
        assert_eq!(sp.innings_pitched, 6.1);
        assert_eq!(sp.earned_runs, Some(2));
        assert_eq!(sp.hits_allowed, 5);
        assert_eq!(sp.walks_allowed, 1);
        assert_eq!(sp.strikeouts, 8);
        assert_eq!(sp.wins, 1);
    }

    #[test]
    fn game_without_player_lists_yields_empty_lines() {
        let stats = into_day_statistics(decode(BOXSCORE), date());
        assert_eq!(stats.games.len(), 1);
        assert_eq!(stats.player_count(), 0);
    }

    #[test]
    fn profile_uses_latest_regular_season_totals() {
        let body = r#"{ "player": {
            "id": "p1", "first_name": "Julio", "last_name": "Rodriguez",
            "seasons": [
              { "year": 2022, "type": "REG", "totals": { "statistics": { "hitting": { "overall": {
                  "ab": 511, "rbi": 75, "runs": { "total": 84 },
                  "onbase": { "h": 145, "bb": 40, "hr": 28 }, "steal": { "stolen": 25 } } } } } },
              { "year": 2023, "type": "PST", "totals": { "statistics": { "hitting": { "overall": {
                  "ab": 10, "rbi": 1, "runs": { "total": 1 },
                  "onbase": { "h": 2, "bb": 0, "hr": 0 }, "steal": { "stolen": 0 } } } } } },
              { "year": 2023, "type": "REG", "totals": { "statistics": { "hitting": { "overall": {
                  "ab": 654, "rbi": 103, "runs": { "total": 102 },
                  "onbase": { "h": 180, "bb": 47, "hr": 32 }, "steal": { "stolen": 37 } } } } } }
            ] } }"#;
        let resp: ProfileResponse = serde_json::from_str(body).unwrap();
        let player: PlayerRecord = resp.player.into();
        let h = player.hitting.unwrap();
        assert_eq!(h.hits, 180);
        assert_eq!(h.stolen_bases, 37);
        assert!(player.pitching.is_none());
    }

    const SCOREBOARD: &str = r#"{
      "league": { "games": [
        { "game": {
            "id": "g-final", "status": "closed", "scheduled": "2024-06-01T20:10:00+00:00",
            "final": { "inning": 9, "inning_half": "T" },
            "home": { "id": "sea-id", "name": "Mariners", "market": "Seattle", "abbr": "SEA",
                      "runs": 4, "hits": 9, "errors": 0, "win": 36, "loss": 28,
                      "scoring": [
                        { "number": 2, "sequence": 2, "runs": 3, "type": "inning" },
                        { "number": 1, "sequence": 1, "runs": 1, "type": "inning" },
                        { "number": 9, "sequence": 9, "runs": "X", "type": "inning" }
                      ] },
            "away": { "id": "hou-id", "name": "Astros", "market": "Houston", "abbr": "HOU",
                      "runs": 2, "hits": 6, "errors": 1, "win": 29, "loss": 34 }
        } },
        { "game": {
            "id": "g-live", "status": "inprogress", "scheduled": "2024-06-01T23:05:00+00:00",
            "outcome": { "current_inning": 6, "current_inning_half": "B" },
            "home": { "id": "nyy-id", "abbr": "NYY", "runs": 1 },
            "away": { "id": "bos-id", "abbr": "BOS", "runs": 0 }
        } },
        { "game": {
            "id": "g-late", "status": "scheduled", "scheduled": "2024-06-02T02:10:00+00:00",
            "home": { "id": "lad-id", "abbr": "LAD" },
            "away": { "id": "sd-id", "abbr": "SD" }
        } }
      ] }
    }"#;

    #[test]
    fn scoreboard_maps_line_scores_and_phase() {
        let board = into_scoreboard(decode(SCOREBOARD), date());
        assert_eq!(board.date, date());
        assert_eq!(board.games.len(), 3);

        let fin = &board.games[0];
        assert_eq!(fin.phase, GamePhase::Final { innings: 9 });
        assert_eq!(fin.home.runs, 4);
        assert_eq!(fin.home.hits, 9);
        assert_eq!(fin.away.errors, 1);
        assert_eq!((fin.home.wins, fin.home.losses), (36, 28));
        // Innings are ordered by number; the unplayed bottom of the ninth is blank.
        assert_eq!(fin.home.innings, vec![Some(1), Some(3), None]);
        assert_eq!(
            fin.scheduled,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 20, 10, 0).unwrap())
        );

        assert_eq!(
            board.games[1].phase,
            GamePhase::InProgress { inning: 6, top: false }
        );
        assert_eq!(board.games[2].phase, GamePhase::Scheduled);
        assert!(!board.games[2].phase.has_started());
    }

    #[test]
    fn box_score_carries_decisions_and_player_lines() {
        let body = r#"{ "game": {
            "id": "g1", "status": "complete",
            "pitching": {
              "win": { "id": "p-sp", "first_name": "Logan", "last_name": "Gilbert" },
              "loss": { "id": "hou-sp", "first_name": "Framber", "last_name": "Valdez" }
            },
            "home": { "id": "sea-id", "abbr": "SEA", "runs": 3,
                      "scoring": [ { "number": 1, "runs": "2" }, { "number": 2, "runs": 1 } ],
                      "players": [ { "id": "p-c", "first_name": "Cal", "last_name": "Raleigh",
                        "statistics": { "hitting": { "overall": { "ab": 4, "onbase": { "h": 2 } } } } } ] },
            "away": { "id": "hou-id", "abbr": "HOU",
                      "probable_pitcher": { "id": "hou-sp", "first_name": "Framber", "last_name": "Valdez" } }
        } }"#;
        let env: GameEnvelope = serde_json::from_str(body).unwrap();
        let bx = into_box_score(env);

        // No `final` block: the inning count falls back to a full game.
        assert_eq!(bx.score.phase, GamePhase::Final { innings: 9 });
        assert_eq!(bx.score.home.innings, vec![Some(2), Some(1)]);
        assert_eq!(bx.decisions.win.as_ref().unwrap().last_name, "Gilbert");
        assert_eq!(bx.decisions.loss.as_ref().unwrap().id, "hou-sp");
        assert!(bx.decisions.save.is_none());
        assert_eq!(bx.away_probable.as_ref().unwrap().id, "hou-sp");
        assert!(bx.home_probable.is_none());
        assert_eq!(bx.home_players.len(), 1);
        assert_eq!(bx.home_players[0].hitting.as_ref().unwrap().hits, 2);
        assert!(bx.away_players.is_empty());
    }
}
