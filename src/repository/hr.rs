//! Repository implementation for positions, vacancies, and applications.

use diesel::prelude::*;

use crate::domain::hr::{
    Application, ApplicationStatus, NewApplication, NewPosition, NewVacancy, Position, Vacancy,
    VacancyStatus,
};
use crate::models::hr::{
    Application as DbApplication, NewApplication as DbNewApplication,
    NewPosition as DbNewPosition, NewVacancy as DbNewVacancy, Position as DbPosition,
    Vacancy as DbVacancy,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, HrReader, HrWriter};

impl HrReader for DieselRepository {
    fn list_positions(&self) -> RepositoryResult<Vec<Position>> {
        use crate::schema::positions;

        let mut conn = self.conn()?;
        let positions = positions::table
            .order(positions::title.asc())
            .load::<DbPosition>(&mut conn)?;

        Ok(positions.into_iter().map(Into::into).collect())
    }

    fn get_position_by_id(&self, id: i32) -> RepositoryResult<Option<Position>> {
        use crate::schema::positions;

        let mut conn = self.conn()?;
        let position = positions::table
            .find(id)
            .first::<DbPosition>(&mut conn)
            .optional()?;

        Ok(position.map(Into::into))
    }

    fn list_vacancies(&self) -> RepositoryResult<Vec<(Vacancy, Position)>> {
        use crate::schema::{positions, vacancies};

        let mut conn = self.conn()?;
        let rows = vacancies::table
            .inner_join(positions::table)
            .order(vacancies::opened_on.desc())
            .select((vacancies::all_columns, positions::all_columns))
            .load::<(DbVacancy, DbPosition)>(&mut conn)?;

        rows.into_iter()
            .map(|(vacancy, position)| {
                let vacancy = Vacancy::try_from(vacancy).map_err(RepositoryError::from)?;
                Ok((vacancy, position.into()))
            })
            .collect()
    }

    fn get_vacancy_by_id(&self, id: i32) -> RepositoryResult<Option<Vacancy>> {
        use crate::schema::vacancies;

        let mut conn = self.conn()?;
        let vacancy = vacancies::table
            .find(id)
            .first::<DbVacancy>(&mut conn)
            .optional()?;

        match vacancy {
            Some(vacancy) => Ok(Some(
                Vacancy::try_from(vacancy).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_applications(&self, vacancy_id: Option<i32>) -> RepositoryResult<Vec<Application>> {
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let mut query = applications::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(vacancy_id) = vacancy_id {
            query = query.filter(applications::vacancy_id.eq(vacancy_id));
        }

        query
            .order(applications::created_at.desc())
            .load::<DbApplication>(&mut conn)?
            .into_iter()
            .map(|application| Application::try_from(application).map_err(RepositoryError::from))
            .collect()
    }

    fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>> {
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let application = applications::table
            .find(id)
            .first::<DbApplication>(&mut conn)
            .optional()?;

        match application {
            Some(application) => Ok(Some(
                Application::try_from(application).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl HrWriter for DieselRepository {
    fn create_position(&self, new_position: &NewPosition) -> RepositoryResult<Position> {
        use crate::schema::positions;

        let mut conn = self.conn()?;
        let db_new_position: DbNewPosition = new_position.into();
        let position = diesel::insert_into(positions::table)
            .values(&db_new_position)
            .get_result::<DbPosition>(&mut conn)?;

        Ok(position.into())
    }

    fn update_position(
        &self,
        position_id: i32,
        updates: &NewPosition,
    ) -> RepositoryResult<Position> {
        use crate::schema::positions;

        let mut conn = self.conn()?;
        let changeset: DbNewPosition = updates.into();
        let position = diesel::update(positions::table.find(position_id))
            .set(changeset)
            .get_result::<DbPosition>(&mut conn)?;

        Ok(position.into())
    }

    fn create_vacancy(&self, new_vacancy: &NewVacancy) -> RepositoryResult<Vacancy> {
        use crate::schema::vacancies;

        let mut conn = self.conn()?;
        let db_new_vacancy: DbNewVacancy = new_vacancy.into();
        let vacancy = diesel::insert_into(vacancies::table)
            .values(&db_new_vacancy)
            .get_result::<DbVacancy>(&mut conn)?;

        Vacancy::try_from(vacancy).map_err(RepositoryError::from)
    }

    fn set_vacancy_status(
        &self,
        vacancy_id: i32,
        status: VacancyStatus,
    ) -> RepositoryResult<Vacancy> {
        use crate::schema::vacancies;

        let mut conn = self.conn()?;
        let vacancy = diesel::update(vacancies::table.find(vacancy_id))
            .set(vacancies::status.eq(status.to_string()))
            .get_result::<DbVacancy>(&mut conn)?;

        Vacancy::try_from(vacancy).map_err(RepositoryError::from)
    }

    fn create_application(
        &self,
        new_application: &NewApplication,
    ) -> RepositoryResult<Application> {
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let db_new_application: DbNewApplication = new_application.into();
        let application = diesel::insert_into(applications::table)
            .values(&db_new_application)
            .get_result::<DbApplication>(&mut conn)?;

        Application::try_from(application).map_err(RepositoryError::from)
    }

    fn set_application_status(
        &self,
        application_id: i32,
        status: ApplicationStatus,
    ) -> RepositoryResult<Application> {
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let application = diesel::update(applications::table.find(application_id))
            .set(applications::status.eq(status.to_string()))
            .get_result::<DbApplication>(&mut conn)?;

        Application::try_from(application).map_err(RepositoryError::from)
    }
}
