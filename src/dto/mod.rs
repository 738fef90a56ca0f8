mod requests;
mod responses;

pub use requests::{AddPostRequest, ListPostsQuery, UpdatePostRequest, validate_uuid};
pub use responses::{HealthResponse, PostPage};
