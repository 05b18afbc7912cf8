use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// An HR role definition vacancies are opened against.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPosition {
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
}

impl NewPosition {
    pub fn new(title: String, description: Option<String>, active: bool) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            active,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for VacancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacancyStatus::Open => write!(f, "open"),
            VacancyStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for VacancyStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(VacancyStatus::Open),
            "closed" => Ok(VacancyStatus::Closed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown vacancy status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vacancy {
    pub id: i32,
    pub position_id: i32,
    pub headcount: i32,
    pub status: VacancyStatus,
    pub opened_on: NaiveDate,
    pub closes_on: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewVacancy {
    pub position_id: i32,
    pub headcount: i32,
    pub opened_on: NaiveDate,
    pub closes_on: Option<NaiveDate>,
}

/// Stages a candidate moves through from application to onboarding.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Received,
    Interview,
    Offer,
    Onboarding,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// Hired and rejected applications are terminal.
    pub fn is_decided(self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }

    /// Forward-only pipeline; rejection is allowed from any active stage.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        if self.is_decided() {
            return false;
        }
        match next {
            ApplicationStatus::Received => false,
            ApplicationStatus::Interview => self == ApplicationStatus::Received,
            ApplicationStatus::Offer => self == ApplicationStatus::Interview,
            ApplicationStatus::Onboarding => self == ApplicationStatus::Offer,
            ApplicationStatus::Hired => self == ApplicationStatus::Onboarding,
            ApplicationStatus::Rejected => true,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Received => "received",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Onboarding => "onboarding",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ApplicationStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(ApplicationStatus::Received),
            "interview" => Ok(ApplicationStatus::Interview),
            "offer" => Ok(ApplicationStatus::Offer),
            "onboarding" => Ok(ApplicationStatus::Onboarding),
            "hired" => Ok(ApplicationStatus::Hired),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown application status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: i32,
    pub vacancy_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewApplication {
    pub vacancy_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewApplication {
    pub fn new(
        vacancy_id: i32,
        name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            vacancy_id,
            name: name.trim().to_string(),
            email: email
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_moves_forward_only() {
        use ApplicationStatus::*;
        assert!(Received.can_transition_to(Interview));
        assert!(Interview.can_transition_to(Offer));
        assert!(Offer.can_transition_to(Onboarding));
        assert!(Onboarding.can_transition_to(Hired));
        assert!(!Received.can_transition_to(Offer));
        assert!(!Interview.can_transition_to(Received));
    }

    #[test]
    fn rejection_allowed_from_any_active_stage() {
        use ApplicationStatus::*;
        for stage in [Received, Interview, Offer, Onboarding] {
            assert!(stage.can_transition_to(Rejected));
        }
    }

    #[test]
    fn decided_applications_are_terminal() {
        use ApplicationStatus::*;
        assert!(!Hired.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Interview));
        assert!(!Rejected.can_transition_to(Received));
    }
}
