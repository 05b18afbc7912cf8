//! Diesel models for installer teams; geography columns hold JSON text.

use diesel::prelude::*;

use crate::domain::geo::GeoPoint;
use crate::domain::team::{
    NewTeam as DomainNewTeam, NewTeamMember as DomainNewMember, Team as DomainTeam,
    TeamMember as DomainMember,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::teams)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub suburbs: String,
    pub service_area: String,
    pub active: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam {
    pub name: String,
    pub suburbs: String,
    pub service_area: String,
    pub active: bool,
}

impl TryFrom<Team> for DomainTeam {
    type Error = TypeConstraintError;

    fn try_from(team: Team) -> Result<Self, Self::Error> {
        let suburbs: Vec<String> = serde_json::from_str(&team.suburbs).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("bad suburb list for team {}", team.id))
        })?;
        let service_area: Vec<GeoPoint> =
            serde_json::from_str(&team.service_area).map_err(|_| {
                TypeConstraintError::InvalidValue(format!(
                    "bad service area for team {}",
                    team.id
                ))
            })?;
        Ok(Self {
            id: team.id,
            name: team.name,
            suburbs,
            service_area,
            active: team.active,
        })
    }
}

impl From<&DomainNewTeam> for NewTeam {
    fn from(team: &DomainNewTeam) -> Self {
        Self {
            name: team.name.clone(),
            suburbs: serde_json::to_string(&team.suburbs).unwrap_or_else(|_| "[]".to_string()),
            service_area: serde_json::to_string(&team.service_area)
                .unwrap_or_else(|_| "[]".to_string()),
            active: team.active,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Team, foreign_key = team_id))]
#[diesel(table_name = crate::schema::team_members)]
pub struct TeamMember {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::team_members)]
pub struct NewTeamMember {
    pub team_id: i32,
    pub name: String,
    pub email: String,
}

impl From<TeamMember> for DomainMember {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            team_id: member.team_id,
            name: member.name,
            email: member.email,
        }
    }
}

impl From<&DomainNewMember> for NewTeamMember {
    fn from(member: &DomainNewMember) -> Self {
        Self {
            team_id: member.team_id,
            name: member.name.clone(),
            email: member.email.clone(),
        }
    }
}
