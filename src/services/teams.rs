//! Installer team management and the geography match used at checkout.

use validator::Validate;

use crate::domain::geo::GeoPoint;
use crate::domain::team::{NewTeamMember, Team, TeamMember};
use crate::forms::teams::SaveTeamForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{TeamReader, TeamWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::SERVICE_ADMIN_ROLE;

/// Picks the team for a lead: suburb list first, polygon fallback second.
pub fn match_team<'a>(
    teams: &'a [Team],
    suburb: Option<&str>,
    point: Option<GeoPoint>,
) -> Option<&'a Team> {
    if let Some(suburb) = suburb {
        if let Some(team) = teams.iter().find(|team| team.serves_suburb(suburb)) {
            return Some(team);
        }
    }

    if let Some(point) = point {
        return teams.iter().find(|team| team.covers_point(point));
    }

    None
}

pub struct TeamsPageData {
    pub teams: Vec<(Team, Vec<TeamMember>)>,
}

/// Loads every team with its crew roster.
pub fn load_teams_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<TeamsPageData>
where
    R: TeamReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let teams = repo.list_teams(false)?;
    let mut rows = Vec::with_capacity(teams.len());
    for team in teams {
        let members = repo.list_team_members(team.id)?;
        rows.push((team, members));
    }

    Ok(TeamsPageData { teams: rows })
}

/// Creates or updates a team along with its roster.
pub fn save_team<R>(repo: &R, user: &AuthenticatedUser, form: &SaveTeamForm) -> ServiceResult<()>
where
    R: TeamReader + TeamWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Team form failed validation".to_string()));
    }

    let new_team = form.to_new_team().map_err(ServiceError::Form)?;
    let members = form.parse_members().map_err(ServiceError::Form)?;

    let team = match form.team_id() {
        Some(team_id) => {
            repo.get_team_by_id(team_id)?.ok_or(ServiceError::NotFound)?;
            repo.update_team(team_id, &new_team)?
        }
        None => repo.create_team(&new_team)?,
    };

    let members = members
        .into_iter()
        .map(|(name, email)| NewTeamMember::new(team.id, name, email))
        .collect::<Vec<_>>();
    repo.replace_team_members(team.id, &members)?;

    Ok(())
}

/// Removes a team and its roster.
pub fn delete_team<R>(repo: &R, user: &AuthenticatedUser, team_id: i32) -> ServiceResult<()>
where
    R: TeamWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_team(team_id).map_err(|err| {
        log::error!("Failed to delete team {team_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i32, suburbs: &[&str], area: Vec<GeoPoint>) -> Team {
        Team {
            id,
            name: format!("Team {id}"),
            suburbs: suburbs.iter().map(|s| s.to_string()).collect(),
            service_area: area,
            active: true,
        }
    }

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(-34.0, 150.0),
            GeoPoint::new(-34.0, 151.0),
            GeoPoint::new(-33.0, 151.0),
            GeoPoint::new(-33.0, 150.0),
        ]
    }

    #[test]
    fn suburb_match_wins_over_polygon() {
        let teams = vec![
            team(1, &["Penrith"], square()),
            team(2, &["Parramatta"], vec![]),
        ];
        // The point sits inside team 1's polygon, but the suburb list match
        // on team 2 takes priority.
        let matched = match_team(
            &teams,
            Some("parramatta"),
            Some(GeoPoint::new(-33.5, 150.5)),
        );
        assert_eq!(matched.map(|t| t.id), Some(2));
    }

    #[test]
    fn polygon_fallback_when_no_suburb_matches() {
        let teams = vec![team(1, &["Penrith"], square())];
        let matched = match_team(&teams, Some("Newtown"), Some(GeoPoint::new(-33.5, 150.5)));
        assert_eq!(matched.map(|t| t.id), Some(1));
    }

    #[test]
    fn no_match_without_suburb_or_point() {
        let teams = vec![team(1, &["Penrith"], square())];
        assert!(match_team(&teams, None, None).is_none());
        assert!(match_team(&teams, Some("Newtown"), None).is_none());
    }
}
