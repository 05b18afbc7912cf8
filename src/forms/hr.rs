use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::hr::{NewApplication, NewPosition, NewVacancy};
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a position.
pub struct PositionForm {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub active: Option<String>,
}

impl PositionForm {
    pub fn position_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }
}

impl From<&PositionForm> for NewPosition {
    fn from(form: &PositionForm) -> Self {
        NewPosition::new(
            form.title.clone(),
            form.description.clone(),
            form.active.is_some(),
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for opening a vacancy against a position.
pub struct VacancyForm {
    pub position_id: i32,
    pub headcount: String,
    pub opened_on: String,
    pub closes_on: Option<String>,
}

impl VacancyForm {
    pub fn to_new_vacancy(&self) -> Result<NewVacancy, TypeConstraintError> {
        let headcount = self.headcount.trim().parse::<i32>().map_err(|_| {
            TypeConstraintError::InvalidValue(format!("cannot parse headcount: {}", self.headcount))
        })?;
        if headcount < 1 {
            return Err(TypeConstraintError::InvalidValue(
                "headcount must be at least one".to_string(),
            ));
        }

        let opened_on = self.opened_on.trim().parse::<NaiveDate>().map_err(|_| {
            TypeConstraintError::InvalidValue(format!("cannot parse date: {}", self.opened_on))
        })?;

        let closes_on = match self.closes_on.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<NaiveDate>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("cannot parse date: {raw}"))
            })?),
        };

        Ok(NewVacancy {
            position_id: self.position_id,
            headcount,
            opened_on,
            closes_on,
        })
    }
}

#[derive(Deserialize, Validate)]
/// Form data for registering a candidate application.
pub struct ApplicationForm {
    pub vacancy_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&ApplicationForm> for NewApplication {
    fn from(form: &ApplicationForm) -> Self {
        NewApplication::new(
            form.vacancy_id,
            form.name.clone(),
            form.email.clone(),
            form.phone.clone(),
        )
    }
}

#[derive(Deserialize)]
/// Status move requested for an application.
pub struct ApplicationStatusForm {
    pub id: i32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacancy_form_validates_headcount_and_dates() {
        let form = VacancyForm {
            position_id: 1,
            headcount: "2".to_string(),
            opened_on: "2026-08-01".to_string(),
            closes_on: Some("".to_string()),
        };
        let vacancy = form.to_new_vacancy().expect("valid vacancy");
        assert_eq!(vacancy.headcount, 2);
        assert_eq!(vacancy.closes_on, None);

        let zero = VacancyForm {
            position_id: 1,
            headcount: "0".to_string(),
            opened_on: "2026-08-01".to_string(),
            closes_on: None,
        };
        assert!(zero.to_new_vacancy().is_err());
    }
}
