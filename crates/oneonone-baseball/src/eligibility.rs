// Team eligibility: teams that played on day D and play again on day D+1.

use oneonone_core::model::{DaySchedule, LightDaySchedule, PlayerRecord, TeamSnapshot};
use tracing::debug;

/// Build the pool of valid teams for a new board.
///
/// Every team from `day` whose id also appears in `next_day` is returned,
/// annotated with the probable pitcher `next_day` assigned it. Each day-D
/// side is checked against every next-day game, home side first then away;
/// a team referenced by several games appears several times.
pub fn valid_teams(day: &DaySchedule, next_day: &LightDaySchedule) -> Vec<TeamSnapshot> {
    let mut valid = Vec::new();

    for game in &day.games {
        for team in [&game.home, &game.away] {
            for next in &next_day.games {
                if let Some(pitcher) = next_day_pitcher(team, &next.home, &next.away) {
                    valid.push(team.with_probable_pitcher(pitcher));
                }
            }
        }
    }

    debug!(
        day = %day.date,
        next_day = %next_day.date,
        valid = valid.len(),
        "computed eligible team pool"
    );
    valid
}

/// If `team` plays in the next-day game between `home` and `away`, return
/// the probable pitcher assigned to its side (which may itself be absent).
fn next_day_pitcher(
    team: &TeamSnapshot,
    home: &TeamSnapshot,
    away: &TeamSnapshot,
) -> Option<Option<PlayerRecord>> {
    if team.id == home.id {
        Some(home.probable_pitcher.clone())
    } else if team.id == away.id {
        Some(away.probable_pitcher.clone())
    } else {
        None
    }
}
