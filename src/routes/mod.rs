mod health;
mod post;

pub use health::health_check;
pub use post::{add_post, get_post, list_posts, update_post};
