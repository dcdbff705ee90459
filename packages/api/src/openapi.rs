use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Iris Prediction API",
        version = "1.0.0",
        description = "Classifies Iris flowers from four measurements (cm): sepal length, sepal width, petal length, petal width.",
        license(name = "MIT")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "prediction", description = "Species prediction")
    ),
    paths(
        crate::routes::health::health,
        crate::routes::predict::predict,
    ),
    components(schemas(
        crate::routes::health::HealthResponse,
        crate::prediction::PredictionRequest,
        crate::prediction::PredictionResponse,
    ))
)]
pub struct ApiDoc;
