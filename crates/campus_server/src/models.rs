//! Request and response envelopes of the REST surface.

use campus_core::Student;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Envelope for PUT and PATCH responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentUpdateResponse {
    pub message: String,
    pub student: Student,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NamePrefixQuery {
    /// Case-sensitive name prefix.
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    /// Lower bound, inclusive.
    pub min_age: i32,
    /// Upper bound, inclusive.
    pub max_age: i32,
}
