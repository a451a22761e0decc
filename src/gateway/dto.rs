/*
 * Responsibility
 * - Wire types for the posts service (Post, PostInput, page envelopes)
 * - Envelope normalization: both pagination conventions collapse into PostPage
 * - Field names on the wire are camelCase (userId, createdAt, totalPages)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as the service returns it. Server-assigned `id` and `created_at`;
/// the client never mutates a `Post` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// The mutable subset submitted on create/update. No id, no timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl PostInput {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

/// Normalized page shape handed to the controller, whatever the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total_pages: u32,
}

/// The two list envelopes seen in the wild:
/// - `Paged`: Spring-style, zero-based pages, `content` + `totalPages`
/// - `Offset`: one-based pages, `data` + `total` + `limit`; totalPages has
///   to be derived client-side
///
/// Untagged so the response shape itself selects the variant. Extra fields
/// (`totalElements`, `number`, `page`, ...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageEnvelope {
    #[serde(rename_all = "camelCase")]
    Paged {
        content: Vec<Post>,
        total_pages: u32,
    },
    Offset {
        data: Vec<Post>,
        total: u64,
        limit: u32,
    },
}

impl PageEnvelope {
    pub fn into_page(self) -> PostPage {
        match self {
            PageEnvelope::Paged {
                content,
                total_pages,
            } => PostPage {
                items: content,
                total_pages,
            },
            PageEnvelope::Offset { data, total, limit } => {
                // limit = 0 would only come from a broken backend; avoid the
                // division instead of erroring on an otherwise usable body.
                let per_page = u64::from(limit.max(1));
                PostPage {
                    items: data,
                    total_pages: total.div_ceil(per_page) as u32,
                }
            }
        }
    }
}
