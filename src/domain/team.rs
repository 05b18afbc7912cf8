use serde::{Deserialize, Serialize};

use crate::domain::geo::{GeoPoint, point_in_polygon};

/// An installer crew with the geography it services.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: i32,
    pub name: String,
    /// Suburb names the team covers, matched case-insensitively.
    pub suburbs: Vec<String>,
    /// Service-area polygon used when a suburb match fails.
    pub service_area: Vec<GeoPoint>,
    pub active: bool,
}

impl Team {
    /// Suburb-list match; the primary team-assignment mechanism.
    pub fn serves_suburb(&self, suburb: &str) -> bool {
        let needle = suburb.trim();
        if needle.is_empty() {
            return false;
        }
        self.suburbs
            .iter()
            .any(|s| s.eq_ignore_ascii_case(needle))
    }

    /// Polygon fallback for addresses outside the suburb list.
    pub fn covers_point(&self, point: GeoPoint) -> bool {
        point_in_polygon(point, &self.service_area)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub suburbs: Vec<String>,
    pub service_area: Vec<GeoPoint>,
    pub active: bool,
}

impl NewTeam {
    pub fn new(
        name: String,
        suburbs: Vec<String>,
        service_area: Vec<GeoPoint>,
        active: bool,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            suburbs: suburbs
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            service_area,
            active,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeamMember {
    pub team_id: i32,
    pub name: String,
    pub email: String,
}

impl NewTeamMember {
    pub fn new(team_id: i32, name: String, email: String) -> Self {
        Self {
            team_id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: 1,
            name: "West Crew".to_string(),
            suburbs: vec!["Parramatta".to_string(), "Blacktown".to_string()],
            service_area: vec![
                GeoPoint::new(-34.0, 150.0),
                GeoPoint::new(-34.0, 151.0),
                GeoPoint::new(-33.0, 151.0),
                GeoPoint::new(-33.0, 150.0),
            ],
            active: true,
        }
    }

    #[test]
    fn suburb_match_is_case_insensitive() {
        assert!(team().serves_suburb("parramatta"));
        assert!(team().serves_suburb("BLACKTOWN "));
        assert!(!team().serves_suburb("Newtown"));
        assert!(!team().serves_suburb(""));
    }

    #[test]
    fn polygon_fallback_uses_service_area() {
        assert!(team().covers_point(GeoPoint::new(-33.5, 150.5)));
        assert!(!team().covers_point(GeoPoint::new(-30.0, 150.5)));
    }
}
