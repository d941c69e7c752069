pub mod api_client;
pub mod auth_service;
pub mod classroom_service;
pub mod error;
pub mod http;

pub use api_client::{ApiClient, Auth};
pub use auth_service::AuthService;
pub use classroom_service::ClassroomService;
pub use error::ApiError;
#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
