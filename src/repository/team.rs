//! Repository implementation for installer teams.

use diesel::{Connection, prelude::*};

use crate::domain::team::{NewTeam, NewTeamMember, Team, TeamMember};
use crate::models::team::{
    NewTeam as DbNewTeam, NewTeamMember as DbNewMember, Team as DbTeam, TeamMember as DbMember,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TeamReader, TeamWriter};

impl TeamReader for DieselRepository {
    fn get_team_by_id(&self, id: i32) -> RepositoryResult<Option<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let team = teams::table.find(id).first::<DbTeam>(&mut conn).optional()?;

        match team {
            Some(team) => Ok(Some(Team::try_from(team).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_teams(&self, active_only: bool) -> RepositoryResult<Vec<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let mut query = teams::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(teams::active.eq(true));
        }

        query
            .order(teams::name.asc())
            .load::<DbTeam>(&mut conn)?
            .into_iter()
            .map(|team| Team::try_from(team).map_err(RepositoryError::from))
            .collect()
    }

    fn list_team_members(&self, team_id: i32) -> RepositoryResult<Vec<TeamMember>> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let members = team_members::table
            .filter(team_members::team_id.eq(team_id))
            .order(team_members::name.asc())
            .load::<DbMember>(&mut conn)?;

        Ok(members.into_iter().map(Into::into).collect())
    }

    fn find_team_for_member(&self, email: &str) -> RepositoryResult<Option<Team>> {
        use crate::schema::{team_members, teams};

        let mut conn = self.conn()?;
        let team = teams::table
            .inner_join(team_members::table)
            .filter(team_members::email.eq(email.to_lowercase()))
            .select(teams::all_columns)
            .first::<DbTeam>(&mut conn)
            .optional()?;

        match team {
            Some(team) => Ok(Some(Team::try_from(team).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }
}

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let db_new_team: DbNewTeam = new_team.into();
        let team = diesel::insert_into(teams::table)
            .values(&db_new_team)
            .get_result::<DbTeam>(&mut conn)?;

        Team::try_from(team).map_err(RepositoryError::from)
    }

    fn update_team(&self, team_id: i32, updates: &NewTeam) -> RepositoryResult<Team> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let changeset: DbNewTeam = updates.into();
        let team = diesel::update(teams::table.find(team_id))
            .set(changeset)
            .get_result::<DbTeam>(&mut conn)?;

        Team::try_from(team).map_err(RepositoryError::from)
    }

    fn replace_team_members(
        &self,
        team_id: i32,
        members: &[NewTeamMember],
    ) -> RepositoryResult<usize> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let rows: Vec<DbNewMember> = members.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(move |conn| {
            diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
                .execute(conn)?;

            let result = diesel::insert_into(team_members::table)
                .values(rows)
                .execute(conn)?;

            Ok(result)
        })
        .map_err(RepositoryError::from)
    }

    fn delete_team(&self, team_id: i32) -> RepositoryResult<()> {
        use crate::schema::{team_members, teams};

        let mut conn = self.conn()?;
        conn.transaction::<(), diesel::result::Error, _>(move |conn| {
            diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
                .execute(conn)?;
            diesel::delete(teams::table.find(team_id)).execute(conn)?;
            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}
