//! OpenAPI 3 contract of the REST surface.

use axum::Json;
use campus_core::{Address, NewStudent, Student, StudentPatch};
use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    handlers,
    models::{HealthResponse, MessageResponse, StudentUpdateResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus student records",
        description = "Create, read, replace, merge and delete student records."
    ),
    paths(
        handlers::healthcheck,
        handlers::create_student,
        handlers::list_students,
        handlers::get_student,
        handlers::find_by_name_prefix,
        handlers::find_by_age_range,
        handlers::patch_student,
        handlers::replace_student,
        handlers::delete_student,
    ),
    components(schemas(
        Address,
        Student,
        NewStudent,
        StudentPatch,
        HealthResponse,
        MessageResponse,
        StudentUpdateResponse,
        ErrorBody,
    )),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
