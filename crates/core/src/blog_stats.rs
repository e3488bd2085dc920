//! Aggregate statistics over a collection of blogs.

use serde::Serialize;

/// The fields the statistics helpers need from a blog.
pub trait BlogSummary {
    fn likes(&self) -> i64;
    fn author(&self) -> Option<&str>;
}

/// An author together with how many blogs they have written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    pub author: String,
    pub blogs: usize,
}

/// Sum of likes across all blogs.
pub fn total_likes<B: BlogSummary>(blogs: &[B]) -> i64 {
    blogs.iter().map(BlogSummary::likes).sum()
}

/// The blog with the most likes. The latest one wins a tie.
pub fn favorite_blog<B: BlogSummary>(blogs: &[B]) -> Option<&B> {
    blogs.iter().fold(None, |best: Option<&B>, blog| match best {
        Some(current) if current.likes() > blog.likes() => Some(current),
        _ => Some(blog),
    })
}

/// The author with the most blogs.
///
/// Blogs without an author are ignored. The author seen first wins a tie.
pub fn most_blogs<B: BlogSummary>(blogs: &[B]) -> Option<AuthorBlogCount> {
    // Vec keeps first-appearance order for tie breaking.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for author in blogs.iter().filter_map(BlogSummary::author) {
        match counts.iter_mut().find(|(name, _)| *name == author) {
            Some((_, count)) => *count += 1,
            None => counts.push((author, 1)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, entry| match best {
            Some(current) if current.1 >= entry.1 => Some(current),
            _ => Some(entry),
        })
        .map(|(author, blogs)| AuthorBlogCount {
            author: author.to_string(),
            blogs,
        })
}
