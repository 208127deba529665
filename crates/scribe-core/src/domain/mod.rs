//! Domain entities - the core business objects.

mod post;
mod user;

pub(crate) use post::is_blank;
pub use post::{BlogFilter, BlogPatch, BlogPost, Comment, DEFAULT_AUTHOR, NewComment};
pub use user::User;
