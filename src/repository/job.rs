//! Repository implementation for installation jobs and scheduling tokens.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::job::{
    InstallationJob, NewInstallationJob, NewScheduleToken, ScheduleToken, UpdateInstallationJob,
};
use crate::models::job::{
    InstallationJob as DbJob, NewInstallationJob as DbNewJob, NewScheduleToken as DbNewToken,
    ScheduleToken as DbToken, UpdateInstallationJob as DbUpdateJob,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, JobListQuery, JobReader, JobWriter, ScheduleTokenReader,
    ScheduleTokenWriter,
};

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<InstallationJob>> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;
        let job = installation_jobs::table
            .find(id)
            .first::<DbJob>(&mut conn)
            .optional()?;

        match job {
            Some(job) => Ok(Some(
                InstallationJob::try_from(job).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_job_by_lead_id(&self, lead_id: i32) -> RepositoryResult<Option<InstallationJob>> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;
        let job = installation_jobs::table
            .filter(installation_jobs::lead_id.eq(lead_id))
            .first::<DbJob>(&mut conn)
            .optional()?;

        match job {
            Some(job) => Ok(Some(
                InstallationJob::try_from(job).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<InstallationJob>)> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = installation_jobs::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(installation_jobs::status.eq(status.to_string()));
            }
            if let Some(team_id) = query.team_id {
                items = items.filter(installation_jobs::team_id.eq(team_id));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(installation_jobs::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let jobs = items
            .load::<DbJob>(&mut conn)?
            .into_iter()
            .map(|job| InstallationJob::try_from(job).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, jobs))
    }

    fn latest_job_number_with_prefix(&self, prefix: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;
        let number = installation_jobs::table
            .filter(installation_jobs::job_number.like(format!("{prefix}%")))
            .order(installation_jobs::job_number.desc())
            .select(installation_jobs::job_number)
            .first::<String>(&mut conn)
            .optional()?;

        Ok(number)
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewInstallationJob) -> RepositoryResult<InstallationJob> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;
        let db_new_job: DbNewJob = new_job.into();
        let job = diesel::insert_into(installation_jobs::table)
            .values(&db_new_job)
            .get_result::<DbJob>(&mut conn)?;

        InstallationJob::try_from(job).map_err(RepositoryError::from)
    }

    fn update_job(
        &self,
        job_id: i32,
        updates: &UpdateInstallationJob,
    ) -> RepositoryResult<InstallationJob> {
        use crate::schema::installation_jobs;

        let mut conn = self.conn()?;
        let changeset: DbUpdateJob = updates.into();
        let job = diesel::update(installation_jobs::table.find(job_id))
            .set((
                changeset,
                installation_jobs::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbJob>(&mut conn)?;

        InstallationJob::try_from(job).map_err(RepositoryError::from)
    }
}

impl ScheduleTokenReader for DieselRepository {
    fn get_schedule_token(&self, token: &str) -> RepositoryResult<Option<ScheduleToken>> {
        use crate::schema::schedule_tokens;

        let mut conn = self.conn()?;
        let found = schedule_tokens::table
            .filter(schedule_tokens::token.eq(token))
            .first::<DbToken>(&mut conn)
            .optional()?;

        Ok(found.map(Into::into))
    }
}

impl ScheduleTokenWriter for DieselRepository {
    fn create_schedule_token(
        &self,
        new_token: &NewScheduleToken,
    ) -> RepositoryResult<ScheduleToken> {
        use crate::schema::schedule_tokens;

        let mut conn = self.conn()?;
        let db_new_token: DbNewToken = new_token.into();
        let token = diesel::insert_into(schedule_tokens::table)
            .values(&db_new_token)
            .get_result::<DbToken>(&mut conn)?;

        Ok(token.into())
    }

    fn mark_schedule_token_used(&self, token_id: i32) -> RepositoryResult<()> {
        use crate::schema::schedule_tokens;

        let mut conn = self.conn()?;
        diesel::update(schedule_tokens::table.find(token_id))
            .set(schedule_tokens::used_at.eq(Some(Utc::now().naive_utc())))
            .execute(&mut conn)?;

        Ok(())
    }
}
