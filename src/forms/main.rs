use std::io::BufReader;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::NewLead;

#[derive(Deserialize, Validate)]
/// Form data for adding a single lead.
pub struct AddLeadForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub source: Option<String>,
}

impl From<AddLeadForm> for NewLead {
    fn from(form: AddLeadForm) -> Self {
        NewLead::new(
            form.name,
            form.email,
            form.phone,
            form.address,
            form.suburb,
            form.state,
            form.postcode,
            form.source,
        )
    }
}

#[derive(MultipartForm)]
pub struct UploadLeadsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadLeadsForm {
    /// Parses the uploaded CSV into leads.
    ///
    /// Rows without a name are skipped; the second tuple element reports how
    /// many rows were dropped.
    pub fn parse(&mut self) -> Result<(Vec<NewLead>, usize), String> {
        let file = self
            .csv
            .file
            .reopen()
            .map_err(|e| format!("cannot reopen upload: {e}"))?;
        let mut rdr = csv::Reader::from_reader(BufReader::new(file));

        let headers = rdr
            .headers()
            .map_err(|e| format!("cannot read CSV headers: {e}"))?
            .clone();

        let mut leads = Vec::new();
        let mut skipped = 0usize;

        for record in rdr.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping malformed CSV row: {e}");
                    skipped += 1;
                    continue;
                }
            };

            let field = |name: &str| -> Option<String> {
                headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(name))
                    .and_then(|i| record.get(i))
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            };

            let Some(name) = field("name") else {
                skipped += 1;
                continue;
            };

            let lead = NewLead::new(
                name,
                field("email"),
                field("phone"),
                field("address"),
                field("suburb"),
                field("state"),
                field("postcode"),
                field("source"),
            )
            .with_system(
                field("system_size_kw").and_then(|v| v.parse::<f64>().ok()),
                field("panel_count").and_then(|v| v.parse::<i32>().ok()),
            );

            leads.push(lead);
        }

        Ok((leads, skipped))
    }
}
