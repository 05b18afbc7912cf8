//! HR onboarding: positions, vacancies, and candidate applications.

use validator::Validate;

use crate::domain::hr::{
    Application, ApplicationStatus, NewApplication, NewPosition, Position, Vacancy, VacancyStatus,
};
use crate::forms::hr::{ApplicationForm, ApplicationStatusForm, PositionForm, VacancyForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{HrReader, HrWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub struct HrPageData {
    pub positions: Vec<Position>,
    pub vacancies: Vec<(Vacancy, Position)>,
    pub applications: Vec<Application>,
}

/// Loads the combined HR admin page.
pub fn load_hr_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<HrPageData>
where
    R: HrReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(HrPageData {
        positions: repo.list_positions()?,
        vacancies: repo.list_vacancies()?,
        applications: repo.list_applications(None)?,
    })
}

/// Creates or updates a position definition.
pub fn save_position<R>(repo: &R, user: &AuthenticatedUser, form: &PositionForm) -> ServiceResult<()>
where
    R: HrReader + HrWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Position form failed validation".to_string(),
        ));
    }

    let new_position: NewPosition = form.into();

    match form.position_id() {
        Some(position_id) => {
            repo.get_position_by_id(position_id)?
                .ok_or(ServiceError::NotFound)?;
            repo.update_position(position_id, &new_position)?;
        }
        None => {
            repo.create_position(&new_position)?;
        }
    }

    Ok(())
}

/// Opens a vacancy against an existing position.
pub fn open_vacancy<R>(repo: &R, user: &AuthenticatedUser, form: &VacancyForm) -> ServiceResult<()>
where
    R: HrReader + HrWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_position_by_id(form.position_id)?
        .ok_or_else(|| ServiceError::Form("Unknown position selected.".to_string()))?;

    let new_vacancy = form.to_new_vacancy()?;
    repo.create_vacancy(&new_vacancy)?;

    Ok(())
}

/// Closes an open vacancy.
pub fn close_vacancy<R>(repo: &R, user: &AuthenticatedUser, vacancy_id: i32) -> ServiceResult<()>
where
    R: HrReader + HrWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let vacancy = repo
        .get_vacancy_by_id(vacancy_id)?
        .ok_or(ServiceError::NotFound)?;
    if vacancy.status == VacancyStatus::Closed {
        return Err(ServiceError::Form(
            "This vacancy is already closed.".to_string(),
        ));
    }

    repo.set_vacancy_status(vacancy_id, VacancyStatus::Closed)?;
    Ok(())
}

/// Registers a candidate application against an open vacancy.
pub fn add_application<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ApplicationForm,
) -> ServiceResult<()>
where
    R: HrReader + HrWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Application form failed validation".to_string(),
        ));
    }

    let vacancy = repo
        .get_vacancy_by_id(form.vacancy_id)?
        .ok_or_else(|| ServiceError::Form("Unknown vacancy selected.".to_string()))?;
    if vacancy.status != VacancyStatus::Open {
        return Err(ServiceError::Form(
            "Applications can only be added to open vacancies.".to_string(),
        ));
    }

    let new_application: NewApplication = form.into();
    repo.create_application(&new_application)?;

    Ok(())
}

/// Moves an application through the pipeline, enforcing transition rules.
pub fn advance_application<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ApplicationStatusForm,
) -> ServiceResult<Application>
where
    R: HrReader + HrWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let application = repo
        .get_application_by_id(form.id)?
        .ok_or(ServiceError::NotFound)?;

    let next = form.status.parse::<ApplicationStatus>()?;
    if !application.status.can_transition_to(next) {
        return Err(ServiceError::Form(format!(
            "Cannot move an application from {} to {next}.",
            application.status
        )));
    }

    repo.set_application_status(form.id, next)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::repository::mock::MockRepository;

    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "staff@example.com".to_string(),
            name: "Staff".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@example.com".to_string(),
            name: "Viewer".to_string(),
            roles: vec![],
            exp: 0,
        }
    }

    fn application(status: ApplicationStatus) -> Application {
        Application {
            id: 5,
            vacancy_id: 1,
            name: "Casey".to_string(),
            email: None,
            phone: None,
            status,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn advance_requires_valid_transition() {
        let mut repo = MockRepository::new();
        repo.expect_get_application_by_id()
            .returning(|_| Ok(Some(application(ApplicationStatus::Received))));
        repo.expect_set_application_status().times(0);

        let form = ApplicationStatusForm {
            id: 5,
            status: "offer".to_string(),
        };
        let result = advance_application(&repo, &staff_user(), &form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn advance_applies_allowed_transition() {
        let mut repo = MockRepository::new();
        repo.expect_get_application_by_id()
            .returning(|_| Ok(Some(application(ApplicationStatus::Received))));
        repo.expect_set_application_status()
            .withf(|id, status| *id == 5 && *status == ApplicationStatus::Interview)
            .returning(|_, status| Ok(application(status)));

        let form = ApplicationStatusForm {
            id: 5,
            status: "interview".to_string(),
        };
        let updated = advance_application(&repo, &staff_user(), &form).unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interview);
    }

    #[test]
    fn hr_page_requires_access_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_positions().times(0);

        let result = load_hr_page(&repo, &viewer_user());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
