use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::{InvalidField, KernelError};
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    error: String,
}

#[derive(Debug)]
pub struct ErrorStatus {
    report: Report<KernelError>,
    failure: &'static str,
}

impl ErrorStatus {
    pub fn new(report: Report<KernelError>, failure: &'static str) -> Self {
        Self { report, failure }
    }

    pub fn status(&self) -> StatusCode {
        match self.report.current_context() {
            KernelError::Validation | KernelError::Capacity => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Concurrency | KernelError::Timeout | KernelError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-facing message. Store failures only expose the route's failure text.
    pub fn message(&self) -> String {
        match self.report.current_context() {
            KernelError::Validation => {
                // frames are newest first
                let mut fields = self
                    .report
                    .frames()
                    .filter_map(|frame| frame.downcast_ref::<InvalidField>())
                    .map(InvalidField::name)
                    .collect::<Vec<_>>();
                fields.reverse();
                if fields.is_empty() {
                    KernelError::Validation.to_string()
                } else {
                    format!("Missing or invalid required fields: {}", fields.join(", "))
                }
            }
            KernelError::NotFound => "Lesson not found".to_string(),
            KernelError::Capacity => KernelError::Capacity.to_string(),
            KernelError::Concurrency | KernelError::Timeout | KernelError::Internal => {
                self.failure.to_string()
            }
        }
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        let report = Report::new(KernelError::Validation).attach_printable(rejection.body_text());
        Self::new(report, "Malformed request body")
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        let report = Report::new(KernelError::Validation).attach_printable(rejection.body_text());
        Self::new(report, "Malformed query string")
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.report);
        } else {
            tracing::debug!("{:?}", self.report);
        }
        let body = ErrorResponse {
            success: false,
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
