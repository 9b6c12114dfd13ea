//! Validated write input
//!
//! Every field is required. Values are trimmed; a blank one is rejected with
//! a message naming the field as the client sent it.

use kernel::id::BlogId;

use crate::error::{BlogsError, BlogsResult};

fn required(value: &str, message: &'static str) -> BlogsResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BlogsError::Invalid(message));
    }
    Ok(value.to_string())
}

/// Content of a blog being created or replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub github_url: String,
    pub category: String,
    pub description: String,
    pub tags: String,
}

impl BlogDraft {
    /// Fields are checked in order; the first blank one is reported
    pub fn new(
        title: &str,
        github_url: &str,
        category: &str,
        description: &str,
        tags: &str,
    ) -> BlogsResult<Self> {
        Ok(Self {
            title: required(title, "Invalid title")?,
            github_url: required(github_url, "Invalid githubUrl")?,
            category: required(category, "Invalid category")?,
            description: required(description, "Invalid description")?,
            tags: required(tags, "Invalid tags")?,
        })
    }
}

/// A guest comment about to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub blog_id: BlogId,
    pub guest_user: String,
    pub comment: String,
}

impl CommentDraft {
    pub fn new(blog_id: &str, guest_user: &str, comment: &str) -> BlogsResult<Self> {
        let blog_id = blog_id
            .trim()
            .parse()
            .map_err(|_| BlogsError::Invalid("Invalid blogId"))?;

        Ok(Self {
            blog_id,
            guest_user: required(guest_user, "Invalid guestUser")?,
            comment: required(comment, "Invalid comment")?,
        })
    }
}
