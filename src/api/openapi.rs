use utoipa::OpenApi;

use crate::errors::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Error Resolver",
        version = "0.1.0",
        description = "Resolves errors attached by upstream handlers into safe HTTP responses. The example routes show each resolution path.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::example_ok,
        crate::api::handlers::example_not_found_error,
        crate::api::handlers::example_not_found_object,
        crate::api::handlers::example_unexpected,
    ),
    components(schemas(ErrorBody)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "examples", description = "Handlers exercising each resolution path"),
    )
)]
pub struct ApiDoc;
