use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::types::TypeConstraintError;

#[derive(Deserialize)]
/// Installation date picked by the customer on the scheduling portal.
pub struct BookingForm {
    pub date: String,
}

impl BookingForm {
    pub fn parsed_date(&self) -> Result<NaiveDate, TypeConstraintError> {
        self.date.trim().parse::<NaiveDate>().map_err(|_| {
            TypeConstraintError::InvalidValue(format!("cannot parse date: {}", self.date))
        })
    }
}
