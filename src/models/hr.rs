//! Diesel models for positions, vacancies, and applications.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::hr::{
    Application as DomainApplication, ApplicationStatus, NewApplication as DomainNewApplication,
    NewPosition as DomainNewPosition, NewVacancy as DomainNewVacancy, Position as DomainPosition,
    Vacancy as DomainVacancy, VacancyStatus,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::positions)]
pub struct Position {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::positions)]
pub struct NewPosition<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub active: bool,
}

impl From<Position> for DomainPosition {
    fn from(position: Position) -> Self {
        Self {
            id: position.id,
            title: position.title,
            description: position.description,
            active: position.active,
        }
    }
}

impl<'a> From<&'a DomainNewPosition> for NewPosition<'a> {
    fn from(position: &'a DomainNewPosition) -> Self {
        Self {
            title: position.title.as_str(),
            description: position.description.as_deref(),
            active: position.active,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Position, foreign_key = position_id))]
#[diesel(table_name = crate::schema::vacancies)]
pub struct Vacancy {
    pub id: i32,
    pub position_id: i32,
    pub headcount: i32,
    pub status: String,
    pub opened_on: NaiveDate,
    pub closes_on: Option<NaiveDate>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vacancies)]
pub struct NewVacancy {
    pub position_id: i32,
    pub headcount: i32,
    pub status: String,
    pub opened_on: NaiveDate,
    pub closes_on: Option<NaiveDate>,
}

impl TryFrom<Vacancy> for DomainVacancy {
    type Error = TypeConstraintError;

    fn try_from(vacancy: Vacancy) -> Result<Self, Self::Error> {
        Ok(Self {
            id: vacancy.id,
            position_id: vacancy.position_id,
            headcount: vacancy.headcount,
            status: vacancy.status.parse::<VacancyStatus>()?,
            opened_on: vacancy.opened_on,
            closes_on: vacancy.closes_on,
        })
    }
}

impl From<&DomainNewVacancy> for NewVacancy {
    fn from(vacancy: &DomainNewVacancy) -> Self {
        Self {
            position_id: vacancy.position_id,
            headcount: vacancy.headcount,
            status: VacancyStatus::Open.to_string(),
            opened_on: vacancy.opened_on,
            closes_on: vacancy.closes_on,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Vacancy, foreign_key = vacancy_id))]
#[diesel(table_name = crate::schema::applications)]
pub struct Application {
    pub id: i32,
    pub vacancy_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::applications)]
pub struct NewApplication<'a> {
    pub vacancy_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub status: String,
}

impl TryFrom<Application> for DomainApplication {
    type Error = TypeConstraintError;

    fn try_from(application: Application) -> Result<Self, Self::Error> {
        Ok(Self {
            id: application.id,
            vacancy_id: application.vacancy_id,
            name: application.name,
            email: application.email,
            phone: application.phone,
            status: application.status.parse::<ApplicationStatus>()?,
            created_at: application.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewApplication> for NewApplication<'a> {
    fn from(application: &'a DomainNewApplication) -> Self {
        Self {
            vacancy_id: application.vacancy_id,
            name: application.name.as_str(),
            email: application.email.as_deref(),
            phone: application.phone.as_deref(),
            status: ApplicationStatus::Received.to_string(),
        }
    }
}
