//! Diesel models for blog posts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{BlogPost as DomainPost, NewBlogPost as DomainNewPost};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct NewBlogPost<'a> {
    pub title: &'a str,
    pub slug: String,
    pub body: &'a str,
    pub published: bool,
}

impl From<BlogPost> for DomainPost {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            body: post.body,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPost> for NewBlogPost<'a> {
    fn from(post: &'a DomainNewPost) -> Self {
        Self {
            title: post.title.as_str(),
            slug: post.slug.as_str().to_string(),
            body: post.body.as_str(),
            published: post.published,
        }
    }
}
