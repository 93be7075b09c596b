/// HTTP handlers for the admin and public surfaces
///
/// - `admin`: login plus the auth-gated moderation endpoints
/// - `blogs`: post CRUD, publish toggling, AI draft generation
/// - `comments`: public comment submission and reading
pub mod admin;
pub mod blogs;
pub mod comments;

pub use admin::{approve_comment, dashboard, delete_comment, list_all_blogs, list_comments, login};
pub use blogs::{add_blog, delete_blog, generate_content, get_blog, list_published_blogs, toggle_publish};
pub use comments::{add_comment, get_blog_comments};
