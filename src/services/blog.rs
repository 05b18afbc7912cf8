//! Blog post management for the marketing site.

use validator::Validate;

use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::forms::blog::BlogPostForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BlogReader, BlogWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::SERVICE_ADMIN_ROLE;

pub struct BlogPageData {
    pub posts: Vec<BlogPost>,
}

/// Loads every post, drafts included, for the admin page.
pub fn load_blog_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<BlogPageData>
where
    R: BlogReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    Ok(BlogPageData {
        posts: repo.list_blog_posts(false)?,
    })
}

/// Creates or updates a post; slugs are unique and derived from the title.
pub fn save_post<R>(repo: &R, user: &AuthenticatedUser, form: &BlogPostForm) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Post form failed validation".to_string()));
    }

    match form.post_id() {
        Some(post_id) => {
            repo.get_blog_post_by_id(post_id)?
                .ok_or(ServiceError::NotFound)?;
            repo.update_blog_post(
                post_id,
                &UpdateBlogPost {
                    title: form.title.clone(),
                    body: form.body.clone(),
                    published: form.is_published(),
                },
            )?;
        }
        None => {
            let new_post = NewBlogPost::new(
                form.title.clone(),
                form.slug.clone(),
                form.body.clone(),
                form.is_published(),
            )?;

            if repo.get_blog_post_by_slug(new_post.slug.as_str())?.is_some() {
                return Err(ServiceError::Form(format!(
                    "A post with slug `{}` already exists.",
                    new_post.slug
                )));
            }

            repo.create_blog_post(&new_post)?;
        }
    }

    Ok(())
}

/// Removes a post.
pub fn delete_post<R>(repo: &R, user: &AuthenticatedUser, post_id: i32) -> ServiceResult<()>
where
    R: BlogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_blog_post(post_id).map_err(|err| {
        log::error!("Failed to delete post {post_id}: {err}");
        ServiceError::from(err)
    })
}
