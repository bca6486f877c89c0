pub mod api;
pub mod token;

pub use api::ApiClient;
pub use token::AuthToken;
