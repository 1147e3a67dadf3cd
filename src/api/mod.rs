use std::{borrow::Cow, fmt::Display};

use actix_web::{error, http::StatusCode, HttpResponse};

pub mod request;
pub mod response;

/// RFC 7807 error returned when a request cannot be processed at all.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    p_type: Cow<'static, str>,
    pub status: u16,
    pub title: Cow<'static, str>,
    pub detail: Cow<'static, str>,
}

impl ProblemDetails {
    pub fn new(
        status: u16,
        title: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) -> Self {
        ProblemDetails {
            p_type: "about:blank".into(),
            status,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn internal_server_error() -> Self {
        ProblemDetails::new(
            500,
            "Internal Server Error",
            concat!(
                "There was a problem while processing your request. ",
                "Please contact the system administrator."
            ),
        )
    }

    pub fn invalid_request(detail: impl Into<Cow<'static, str>>) -> Self {
        ProblemDetails::new(400, "Invalid Request", detail)
    }

    pub fn request_too_large(max_size: usize) -> Self {
        ProblemDetails::new(
            413,
            "Request Too Large",
            format!("The request exceeds the maximum size of {} bytes.", max_size),
        )
    }

    pub fn too_many_items(max_items: usize) -> Self {
        ProblemDetails::new(
            400,
            "Too Many Items",
            format!(
                "The request references more than the maximum of {} items.",
                max_items
            ),
        )
    }
}

impl Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

impl error::ResponseError for ProblemDetails {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(("Content-Type", "application/problem+json"))
            .body(serde_json::to_string(&self).unwrap_or_default())
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
