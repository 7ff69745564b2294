//! All-time standings: every owner's record across every season.

use serde::Serialize;

use crate::cli::types::{LeagueId, Season};
use crate::core::store::ObjectStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::EspnClient;
use crate::season;

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    /// Seasons that actually played (matchup period past 1).
    pub seasons: Vec<Season>,
    pub teams: Vec<OwnerRecord>,
}

#[derive(Debug, Serialize)]
pub struct OwnerRecord {
    pub name: String,
    pub id: String,
    pub seasons: Vec<SeasonSummary>,
}

#[derive(Debug, Serialize)]
pub struct SeasonSummary {
    pub year: Season,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub reg_season_champ: bool,
    pub playoff_champ: bool,
    pub toilet_bowl: bool,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Fold one season's standings document into the accumulated owner records.
///
/// Owners are matched by display name first, then member id, so a renamed
/// owner keeps one record.
fn fold_season_records(
    owners: &mut Vec<OwnerRecord>,
    doc: &crate::espn::types::StandingsDocument,
    year: Season,
) -> Result<()> {
    for team in &doc.teams {
        let member = doc
            .members
            .iter()
            .find(|m| m.id == team.primary_owner)
            .ok_or_else(|| {
                AlmanacError::malformed(format!(
                    "owner {} missing from mTeam members in {year}",
                    team.primary_owner
                ))
            })?;
        let owner = format!(
            "{} {}",
            capitalize(member.first_name.trim()),
            capitalize(member.last_name.trim())
        );

        let record = &team.record.overall;
        let summary = SeasonSummary {
            year,
            wins: record.wins,
            losses: record.losses,
            ties: record.ties,
            reg_season_champ: team.playoff_seed == 1,
            playoff_champ: team.rank_calculated_final == 1,
            toilet_bowl: team.playoff_seed == doc.status.teams_joined,
        };

        let existing = owners
            .iter()
            .position(|o| o.name == owner)
            .or_else(|| owners.iter().position(|o| o.id == member.id));
        match existing {
            Some(i) => owners[i].seasons.push(summary),
            None => owners.push(OwnerRecord {
                name: owner,
                id: member.id.clone(),
                seasons: vec![summary],
            }),
        }
    }
    Ok(())
}

/// Build standings from the first season through the latest.
pub async fn all_time<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
) -> Result<StandingsResponse> {
    let end = season::latest_season(client, league_id).await?;
    let start = season::first_season(client, league_id).await?;

    let mut response = StandingsResponse {
        seasons: Vec::new(),
        teams: Vec::new(),
    };

    for year in start.as_u16()..=end.as_u16() {
        let year = Season::new(year);
        let doc = client.standings_teams(league_id, year).await?;
        if doc.status.current_matchup_period == 1 {
            continue;
        }
        response.seasons.push(year);
        fold_season_records(&mut response.teams, &doc, year)?;
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn::types::StandingsDocument;
    use serde_json::json;

    fn standings_doc(
        owner_id: &str,
        first: &str,
        last: &str,
        wins: u16,
        seed: u16,
    ) -> StandingsDocument {
        serde_json::from_value(json!({
            "status": { "currentMatchupPeriod": 17, "teamsJoined": 2 },
            "members": [
                { "id": owner_id, "firstName": first, "lastName": last }
            ],
            "teams": [
                {
                    "id": 1,
                    "playoffSeed": seed,
                    "rankCalculatedFinal": seed,
                    "primaryOwner": owner_id,
                    "record": { "overall": { "wins": wins, "losses": 14 - wins, "ties": 0 } }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("joe"), "Joe");
        assert_eq!(capitalize("BLOW"), "Blow");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_renamed_owner_collapses_into_one_record_by_member_id() {
        let mut owners = Vec::new();
        let first = standings_doc("{OWNER-1}", "joe", "blow", 10, 1);
        let renamed = standings_doc("{OWNER-1}", "joseph", "blow", 8, 2);

        fold_season_records(&mut owners, &first, Season::new(2022)).unwrap();
        fold_season_records(&mut owners, &renamed, Season::new(2023)).unwrap();

        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].name, "Joe Blow");
        assert_eq!(owners[0].seasons.len(), 2);
        assert_eq!(owners[0].seasons[1].year, Season::new(2023));
    }

    #[test]
    fn test_readded_owner_collapses_into_one_record_by_name() {
        // same human, fresh ESPN member id after leaving and rejoining
        let mut owners = Vec::new();
        let original = standings_doc("{OWNER-1}", "joe", "blow", 10, 1);
        let rejoined = standings_doc("{OWNER-9}", "JOE", "BLOW", 4, 2);

        fold_season_records(&mut owners, &original, Season::new(2020)).unwrap();
        fold_season_records(&mut owners, &rejoined, Season::new(2023)).unwrap();

        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, "{OWNER-1}");
        assert_eq!(owners[0].seasons.len(), 2);
    }

    #[test]
    fn test_distinct_owners_stay_separate() {
        let mut owners = Vec::new();
        fold_season_records(
            &mut owners,
            &standings_doc("{OWNER-1}", "joe", "blow", 10, 1),
            Season::new(2022),
        )
        .unwrap();
        fold_season_records(
            &mut owners,
            &standings_doc("{OWNER-2}", "pat", "jones", 7, 2),
            Season::new(2022),
        )
        .unwrap();
        assert_eq!(owners.len(), 2);
    }

    #[test]
    fn test_champ_and_toilet_bowl_flags() {
        let mut owners = Vec::new();
        let doc = standings_doc("{OWNER-1}", "joe", "blow", 12, 1);
        fold_season_records(&mut owners, &doc, Season::new(2022)).unwrap();
        let season = &owners[0].seasons[0];
        assert!(season.reg_season_champ);
        assert!(season.playoff_champ);
        assert!(!season.toilet_bowl);

        let mut owners = Vec::new();
        // seed equals teamsJoined: last place
        let doc = standings_doc("{OWNER-2}", "pat", "jones", 2, 2);
        fold_season_records(&mut owners, &doc, Season::new(2022)).unwrap();
        assert!(owners[0].seasons[0].toilet_bowl);
    }

    #[test]
    fn test_owner_missing_from_members_is_malformed() {
        let mut doc = standings_doc("{OWNER-1}", "joe", "blow", 10, 1);
        doc.members.clear();
        let err = fold_season_records(&mut Vec::new(), &doc, Season::new(2022)).unwrap_err();
        assert!(matches!(err, AlmanacError::Malformed { .. }));
    }
}
