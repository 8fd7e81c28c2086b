//! Static reference tables: team metadata and seasonal rosters.
//!
//! Both tables ship embedded in the binary. `PROPSLIP_TEAMS_JSON` and
//! `PROPSLIP_ROSTERS_JSON` swap in fuller nflverse exports.

use crate::client::{ApiError, ApiResult};
use crate::wire::{WireRosterPlayer, WireTeam};
use crate::{RosterPlayer, Team};

const EMBEDDED_TEAMS_JSON: &str = include_str!("../data/teams.json");
const EMBEDDED_ROSTERS_JSON: &str = include_str!("../data/rosters.json");

/// Display order for roster position groups. Positions outside this list are
/// not shown.
pub const POSITION_ORDER: [&str; 11] =
    ["QB", "RB", "WR", "TE", "OL", "DL", "LB", "DB", "K", "P", "LS"];

const CONFERENCES: [&str; 2] = ["AFC", "NFC"];
const DIVISIONS: [&str; 4] = ["East", "North", "South", "West"];

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    teams: Vec<Team>,
    players: Vec<RosterPlayer>,
}

/// One division's teams, sorted by name.
#[derive(Debug, Clone)]
pub struct DivisionGroup<'a> {
    pub conference: &'static str,
    pub division: String,
    pub teams: Vec<&'a Team>,
}

impl ReferenceData {
    pub fn new(teams: Vec<Team>, players: Vec<RosterPlayer>) -> Self {
        Self { teams, players }
    }

    /// Load the reference tables, honouring the env var overrides.
    pub fn load() -> ApiResult<Self> {
        let teams_json = read_override("PROPSLIP_TEAMS_JSON")?;
        let rosters_json = read_override("PROPSLIP_ROSTERS_JSON")?;
        Self::from_json(
            teams_json.as_deref().unwrap_or(EMBEDDED_TEAMS_JSON),
            rosters_json.as_deref().unwrap_or(EMBEDDED_ROSTERS_JSON),
        )
    }

    pub fn embedded() -> ApiResult<Self> {
        Self::from_json(EMBEDDED_TEAMS_JSON, EMBEDDED_ROSTERS_JSON)
    }

    pub fn from_json(teams_json: &str, rosters_json: &str) -> ApiResult<Self> {
        let teams: Vec<WireTeam> = serde_json::from_str(teams_json)
            .map_err(|e| ApiError::Other(format!("invalid teams json: {e}")))?;
        let players: Vec<WireRosterPlayer> = serde_json::from_str(rosters_json)
            .map_err(|e| ApiError::Other(format!("invalid rosters json: {e}")))?;
        Ok(Self {
            teams: teams.into_iter().map(map_team).collect(),
            players: players.into_iter().map(map_player).collect(),
        })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, abbr: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.abbr.eq_ignore_ascii_case(abbr))
    }

    pub fn player(&self, player_id: &str) -> Option<&RosterPlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Teams grouped AFC then NFC, East/North/South/West within each.
    /// Teams with an unrecognised division are left out.
    pub fn teams_by_division(&self) -> Vec<DivisionGroup<'_>> {
        let mut groups = Vec::with_capacity(8);
        for conference in CONFERENCES {
            for division in DIVISIONS {
                let name = format!("{conference} {division}");
                let mut teams: Vec<&Team> = self
                    .teams
                    .iter()
                    .filter(|t| t.conference == conference && t.division == name)
                    .collect();
                if teams.is_empty() {
                    continue;
                }
                teams.sort_by(|a, b| a.name.cmp(&b.name));
                groups.push(DivisionGroup {
                    conference,
                    division: name,
                    teams,
                });
            }
        }
        groups
    }

    /// Flat team list in the same order as `teams_by_division`.
    pub fn ordered_teams(&self) -> Vec<&Team> {
        self.teams_by_division()
            .into_iter()
            .flat_map(|g| g.teams)
            .collect()
    }

    pub fn has_roster(&self, team_abbr: &str) -> bool {
        self.players
            .iter()
            .any(|p| p.team.eq_ignore_ascii_case(team_abbr))
    }

    /// Number of teams with at least one player on file.
    pub fn rostered_team_count(&self) -> usize {
        self.teams.iter().filter(|t| self.has_roster(&t.abbr)).count()
    }

    pub fn roster(&self, team_abbr: &str) -> Vec<&RosterPlayer> {
        self.players
            .iter()
            .filter(|p| p.team.eq_ignore_ascii_case(team_abbr))
            .collect()
    }

    /// Roster grouped by position in `POSITION_ORDER`, each group sorted by
    /// last name. Empty groups are skipped.
    pub fn roster_by_position(&self, team_abbr: &str) -> Vec<(&'static str, Vec<&RosterPlayer>)> {
        let roster = self.roster(team_abbr);
        POSITION_ORDER
            .iter()
            .filter_map(|&pos| {
                let mut players: Vec<&RosterPlayer> =
                    roster.iter().copied().filter(|p| p.position == pos).collect();
                if players.is_empty() {
                    return None;
                }
                players.sort_by(|a, b| a.last_name.cmp(&b.last_name));
                Some((pos, players))
            })
            .collect()
    }
}

fn read_override(var: &str) -> ApiResult<Option<String>> {
    match std::env::var(var) {
        Ok(path) if !path.trim().is_empty() => std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}"))),
        _ => Ok(None),
    }
}

fn map_team(t: WireTeam) -> Team {
    let name = t.team_name.unwrap_or_else(|| t.team_abbr.clone());
    Team {
        nickname: t.team_nick.unwrap_or_else(|| name.clone()),
        name,
        abbr: t.team_abbr,
        conference: t.team_conf.unwrap_or_default(),
        division: t.team_division.unwrap_or_default(),
        color: t.team_color,
        logo_url: t.team_logo_espn,
    }
}

fn map_player(p: WireRosterPlayer) -> RosterPlayer {
    let first_name = p.first_name.unwrap_or_default();
    let last_name = p.last_name.unwrap_or_default();
    let name = p
        .player_name
        .unwrap_or_else(|| format!("{first_name} {last_name}").trim().to_string());
    RosterPlayer {
        player_id: p.player_id,
        name,
        first_name,
        last_name,
        team: p.team.unwrap_or_default(),
        position: p.position.unwrap_or_default(),
        jersey_number: p.jersey_number,
        height: p.height,
        weight: p.weight,
        age: p.age,
        years_exp: p.years_exp,
        headshot_url: p.headshot_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_parse() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.teams().len(), 32);
        assert!(data.team("kc").is_some());
        assert!(!data.roster("KC").is_empty());
    }

    #[test]
    fn divisions_are_ordered_and_sorted() {
        let data = ReferenceData::embedded().unwrap();
        let groups = data.teams_by_division();
        assert_eq!(groups.len(), 8);
        assert_eq!(groups[0].division, "AFC East");
        assert_eq!(groups[7].division, "NFC West");
        let names: Vec<&str> = groups[0].teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Buffalo Bills", "Miami Dolphins", "New England Patriots", "New York Jets"]
        );
        assert_eq!(data.ordered_teams().len(), 32);
    }

    #[test]
    fn roster_groups_follow_position_order() {
        let teams = r#"[{"team_abbr": "KC"}]"#;
        let rosters = r#"[
            {"player_id": "a", "first_name": "Travis", "last_name": "Kelce", "team": "KC", "position": "TE"},
            {"player_id": "b", "first_name": "Patrick", "last_name": "Mahomes", "team": "KC", "position": "QB"},
            {"player_id": "c", "first_name": "Carson", "last_name": "Wentz", "team": "KC", "position": "QB"},
            {"player_id": "d", "first_name": "Some", "last_name": "Body", "team": "KC", "position": "FB"},
            {"player_id": "e", "first_name": "Josh", "last_name": "Allen", "team": "BUF", "position": "QB"}
        ]"#;
        let data = ReferenceData::from_json(teams, rosters).unwrap();
        let groups = data.roster_by_position("KC");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "QB");
        let qbs: Vec<&str> = groups[0].1.iter().map(|p| p.last_name.as_str()).collect();
        assert_eq!(qbs, vec!["Mahomes", "Wentz"]);
        assert_eq!(groups[1].0, "TE");
    }

    #[test]
    fn player_name_falls_back_to_first_and_last() {
        let data = ReferenceData::from_json(
            "[]",
            r#"[{"player_id": "x", "first_name": "Dak", "last_name": "Prescott"}]"#,
        )
        .unwrap();
        assert_eq!(data.player("x").map(|p| p.name.as_str()), Some("Dak Prescott"));
    }

    #[test]
    fn embedded_roster_coverage_is_reported() {
        let data = ReferenceData::embedded().unwrap();
        assert!(data.has_roster("kc"));
        assert!(!data.has_roster("NYJ"));
        assert_eq!(data.rostered_team_count(), 4);
    }

    #[test]
    fn float_encoded_roster_columns_load() {
        let rosters = r#"[{
            "player_id": "00-0033873", "player_name": "Patrick Mahomes",
            "team": "KC", "position": "QB",
            "jersey_number": 15.0, "height": 74.0, "weight": 225.0,
            "age": 29.1, "years_exp": 7.0
        }]"#;
        let data = ReferenceData::from_json("[]", rosters).unwrap();
        let player = data.player("00-0033873").unwrap();
        assert_eq!(player.jersey_number, Some(15));
        assert_eq!(player.height, Some(74));
        assert_eq!(player.weight, Some(225));
        assert_eq!(player.years_exp, Some(7));
    }
}
