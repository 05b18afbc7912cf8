use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Slug, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: Slug,
    pub body: String,
    pub published: bool,
}

impl NewBlogPost {
    /// Derives the slug from the title unless one is supplied.
    pub fn new(
        title: String,
        slug: Option<String>,
        body: String,
        published: bool,
    ) -> Result<Self, TypeConstraintError> {
        let title = title.trim().to_string();
        let slug = match slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(explicit) => Slug::new(explicit)?,
            None => Slug::new(title.as_str())?,
        };
        Ok(Self {
            title,
            slug,
            body,
            published,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateBlogPost {
    pub title: String,
    pub body: String,
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_title() {
        let post = NewBlogPost::new(
            "Winter Solar Output".to_string(),
            None,
            "body".to_string(),
            false,
        )
        .expect("valid post");
        assert_eq!(post.slug.as_str(), "winter-solar-output");
    }

    #[test]
    fn explicit_slug_wins() {
        let post = NewBlogPost::new(
            "Winter Solar Output".to_string(),
            Some("winter-2026".to_string()),
            "body".to_string(),
            true,
        )
        .expect("valid post");
        assert_eq!(post.slug.as_str(), "winter-2026");
    }
}
