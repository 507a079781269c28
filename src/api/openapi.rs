//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::domain::{LoginRequest, RegisterRequest};
use crate::services::TokenPair;
use crate::types::{ErrorMessage, MessageResponse};

/// OpenAPI documentation for the accounts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User registration and password login issuing JWT access/refresh tokens",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenPair,
            MessageResponse,
            ErrorMessage,
        )
    ),
    tags(
        (name = "Authentication", description = "User registration and login")
    )
)]
pub struct ApiDoc;
