//! Repository implementation for blog posts.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::models::blog::{BlogPost as DbPost, NewBlogPost as DbNewPost};
use crate::repository::errors::RepositoryResult;
use crate::repository::{BlogReader, BlogWriter, DieselRepository};

impl BlogReader for DieselRepository {
    fn list_blog_posts(&self, published_only: bool) -> RepositoryResult<Vec<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let mut query = blog_posts::table.into_boxed::<diesel::sqlite::Sqlite>();
        if published_only {
            query = query.filter(blog_posts::published.eq(true));
        }

        let posts = query
            .order(blog_posts::created_at.desc())
            .load::<DbPost>(&mut conn)?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let post = blog_posts::table
            .find(id)
            .first::<DbPost>(&mut conn)
            .optional()?;

        Ok(post.map(Into::into))
    }

    fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let post = blog_posts::table
            .filter(blog_posts::slug.eq(slug))
            .first::<DbPost>(&mut conn)
            .optional()?;

        Ok(post.map(Into::into))
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog_post(&self, new_post: &NewBlogPost) -> RepositoryResult<BlogPost> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let db_new_post: DbNewPost = new_post.into();
        let post = diesel::insert_into(blog_posts::table)
            .values(&db_new_post)
            .get_result::<DbPost>(&mut conn)?;

        Ok(post.into())
    }

    fn update_blog_post(
        &self,
        post_id: i32,
        updates: &UpdateBlogPost,
    ) -> RepositoryResult<BlogPost> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let post = diesel::update(blog_posts::table.find(post_id))
            .set((
                blog_posts::title.eq(updates.title.as_str()),
                blog_posts::body.eq(updates.body.as_str()),
                blog_posts::published.eq(updates.published),
                blog_posts::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbPost>(&mut conn)?;

        Ok(post.into())
    }

    fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        diesel::delete(blog_posts::table.find(post_id)).execute(&mut conn)?;

        Ok(())
    }
}
