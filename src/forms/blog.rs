use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a blog post.
pub struct BlogPostForm {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub title: String,
    /// Optional explicit slug; derived from the title when empty.
    pub slug: Option<String>,
    pub body: String,
    pub published: Option<String>,
}

impl BlogPostForm {
    pub fn post_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }

    pub fn is_published(&self) -> bool {
        self.published.is_some()
    }
}
