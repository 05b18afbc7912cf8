use serde::Deserialize;
use validator::Validate;

use crate::domain::geo::GeoPoint;
use crate::domain::team::NewTeam;

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a team.
///
/// Suburbs and members arrive as textarea lines; the service area is a JSON
/// array of `[lat, lng]` pairs pasted from the mapping tool.
pub struct SaveTeamForm {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    pub suburbs: Option<String>,
    pub service_area: Option<String>,
    pub members: Option<String>,
    pub active: Option<String>,
}

impl SaveTeamForm {
    pub fn team_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }

    pub fn to_new_team(&self) -> Result<NewTeam, String> {
        let suburbs = self
            .suburbs
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        let service_area = match self
            .service_area
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            None => Vec::new(),
            Some(raw) => {
                let pairs: Vec<[f64; 2]> = serde_json::from_str(raw)
                    .map_err(|e| format!("service area is not a [lat, lng] list: {e}"))?;
                pairs
                    .into_iter()
                    .map(|[lat, lng]| GeoPoint::new(lat, lng))
                    .collect()
            }
        };

        Ok(NewTeam::new(
            self.name.clone(),
            suburbs,
            service_area,
            self.active.is_some(),
        ))
    }

    /// Crew roster lines in the `Name, email` form.
    pub fn parse_members(&self) -> Result<Vec<(String, String)>, String> {
        self.members
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (name, email) = line
                    .split_once(',')
                    .ok_or_else(|| format!("member line needs `Name, email`: {line}"))?;
                let email = email.trim();
                if email.is_empty() {
                    return Err(format!("member line needs an email: {line}"));
                }
                Ok((name.trim().to_string(), email.to_lowercase()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suburbs_polygon_and_members() {
        let form = SaveTeamForm {
            id: Some("".to_string()),
            name: "West Crew".to_string(),
            suburbs: Some("Parramatta\n Blacktown \n\n".to_string()),
            service_area: Some("[[-34.0,150.0],[-34.0,151.0],[-33.0,151.0]]".to_string()),
            members: Some("Sam Rivers, sam@example.com\nKim Wu, KIM@example.com".to_string()),
            active: Some("on".to_string()),
        };

        assert_eq!(form.team_id(), None);
        let team = form.to_new_team().expect("valid team");
        assert_eq!(team.suburbs, vec!["Parramatta", "Blacktown"]);
        assert_eq!(team.service_area.len(), 3);
        assert!(team.active);

        let members = form.parse_members().expect("valid members");
        assert_eq!(
            members,
            vec![
                ("Sam Rivers".to_string(), "sam@example.com".to_string()),
                ("Kim Wu".to_string(), "kim@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_bad_polygon_and_member_lines() {
        let form = SaveTeamForm {
            id: None,
            name: "Crew".to_string(),
            suburbs: None,
            service_area: Some("not json".to_string()),
            members: Some("missing-email-line".to_string()),
            active: None,
        };
        assert!(form.to_new_team().is_err());
        assert!(form.parse_members().is_err());
    }
}
