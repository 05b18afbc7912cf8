//! Repository implementation for generated documents.

use diesel::prelude::*;

use crate::domain::document::{Document, NewDocument};
use crate::domain::types::PublicId;
use crate::models::document::{Document as DbDocument, NewDocument as DbNewDocument};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, DocumentReader, DocumentWriter};

impl DocumentReader for DieselRepository {
    fn get_document_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> RepositoryResult<Option<Document>> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        let document = documents::table
            .filter(documents::public_id.eq(public_id.to_string()))
            .first::<DbDocument>(&mut conn)
            .optional()?;

        match document {
            Some(document) => Ok(Some(
                Document::try_from(document).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_documents_for_lead(&self, lead_id: i32) -> RepositoryResult<Vec<Document>> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        documents::table
            .filter(documents::lead_id.eq(lead_id))
            .order(documents::created_at.desc())
            .load::<DbDocument>(&mut conn)?
            .into_iter()
            .map(|document| Document::try_from(document).map_err(RepositoryError::from))
            .collect()
    }

    fn list_documents_for_job(&self, job_id: i32) -> RepositoryResult<Vec<Document>> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        documents::table
            .filter(documents::job_id.eq(job_id))
            .order(documents::created_at.desc())
            .load::<DbDocument>(&mut conn)?
            .into_iter()
            .map(|document| Document::try_from(document).map_err(RepositoryError::from))
            .collect()
    }
}

impl DocumentWriter for DieselRepository {
    fn create_document(&self, new_document: &NewDocument) -> RepositoryResult<Document> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        let db_new_document: DbNewDocument = new_document.into();
        let document = diesel::insert_into(documents::table)
            .values(&db_new_document)
            .get_result::<DbDocument>(&mut conn)?;

        Document::try_from(document).map_err(RepositoryError::from)
    }
}
