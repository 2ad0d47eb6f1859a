use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::{NewStudent, Student, StudentId, StudentPatch};
use log::debug;

use crate::{
    error::{AppError, AppResult, ErrorBody},
    models::{
        AgeRangeQuery, HealthResponse, MessageResponse, NamePrefixQuery, StudentUpdateResponse,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Service liveness and version",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: campus_core::core_version(),
    })
}

#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    summary = "Create a new student",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student created", body = MessageResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(student) = payload.map_err(reject_body)?;

    let id = state
        .with_student_service(move |service| service.create(&student))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("A new student is successfully created with ID: {id}"),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/students/all",
    tag = "students",
    summary = "List all students",
    responses((status = 200, description = "Every stored student", body = [Student]))
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<Student>>> {
    let students = state
        .with_student_service(|service| service.find_all())
        .await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    summary = "Get a student by id",
    params(("id" = String, Path, description = "Student id (UUID)")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = ErrorBody)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Student>> {
    let id = existing_id(&raw_id)?;
    let student = state
        .with_student_service(move |service| service.find_by_id(id))
        .await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    summary = "Find students whose name starts with a prefix",
    params(NamePrefixQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 204, description = "No student matched"),
        (status = 400, description = "Missing `name` parameter", body = ErrorBody)
    )
)]
pub async fn find_by_name_prefix(
    State(state): State<AppState>,
    query: Result<Query<NamePrefixQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(NamePrefixQuery { name }) = query.map_err(reject_query)?;
    let students = state
        .with_student_service(move |service| service.find_starting_with(&name))
        .await?;
    Ok(list_or_no_content(students))
}

#[utoipa::path(
    get,
    path = "/students/age",
    tag = "students",
    summary = "Find students within an inclusive age range",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 204, description = "No student matched"),
        (status = 400, description = "Missing or invalid bounds", body = ErrorBody)
    )
)]
pub async fn find_by_age_range(
    State(state): State<AppState>,
    query: Result<Query<AgeRangeQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(AgeRangeQuery { min_age, max_age }) = query.map_err(reject_query)?;
    let students = state
        .with_student_service(move |service| service.find_by_age_range(min_age, max_age))
        .await?;
    Ok(list_or_no_content(students))
}

#[utoipa::path(
    patch,
    path = "/students/{id}",
    tag = "students",
    summary = "Partially update a student",
    params(("id" = String, Path, description = "Student id (UUID)")),
    request_body = StudentPatch,
    responses(
        (status = 200, description = "Present fields merged", body = StudentUpdateResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn patch_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> AppResult<Json<StudentUpdateResponse>> {
    let id = existing_id(&raw_id)?;
    let Json(patch) = payload.map_err(reject_body)?;

    let student = state
        .with_student_service(move |service| service.partial_update(id, &patch))
        .await?;

    Ok(Json(StudentUpdateResponse {
        message: format!("Student partially updated successfully with ID: {id}"),
        student,
    }))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    summary = "Replace a student, creating it when absent",
    params(("id" = String, Path, description = "Student id (UUID)")),
    request_body = StudentPatch,
    responses(
        (status = 200, description = "Student stored", body = StudentUpdateResponse),
        (status = 400, description = "Missing required field or invalid id", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn replace_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> AppResult<Json<StudentUpdateResponse>> {
    let id = StudentId::parse_str(&raw_id)
        .map_err(|_| AppError::bad_request(format!("invalid student id `{raw_id}`")))?;
    let Json(record) = payload.map_err(reject_body)?;

    let student = state
        .with_student_service(move |service| service.full_update(id, record))
        .await?;

    Ok(Json(StudentUpdateResponse {
        message: format!("Student updated successfully with ID: {id}"),
        student,
    }))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    summary = "Delete a student",
    params(("id" = String, Path, description = "Student id (UUID)")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorBody)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = existing_id(&raw_id)?;
    state
        .with_student_service(move |service| service.delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// A malformed id cannot name a stored student.
fn existing_id(raw_id: &str) -> AppResult<StudentId> {
    StudentId::parse_str(raw_id)
        .map_err(|_| AppError::not_found(format!("student not found: {raw_id}")))
}

fn list_or_no_content(students: Vec<Student>) -> Response {
    if students.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(students).into_response()
    }
}

fn reject_body(rejection: JsonRejection) -> AppError {
    debug!(
        "event=http_request module=server status=rejected reason=body error={}",
        rejection.body_text()
    );
    AppError::bad_request(rejection.body_text())
}

fn reject_query(rejection: QueryRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}
