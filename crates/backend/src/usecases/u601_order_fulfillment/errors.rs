use super::gateway::GatewayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::usecases::common::UseCaseError;
use thiserror::Error;

/// Ошибки UseCase исполнения заказа
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// Некорректная форма запроса (предусловия по флагам не проверяются)
    #[error("{0}")]
    Validation(String),

    /// Сервис заказов не ответил или отклонил вызов
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: GatewayError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl FulfillmentError {
    pub fn upstream(context: impl Into<String>, source: GatewayError) -> Self {
        FulfillmentError::Upstream {
            context: context.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FulfillmentError::Validation(_) => StatusCode::BAD_REQUEST,
            FulfillmentError::Upstream {
                source: GatewayError::NotFound(_),
                ..
            } => StatusCode::NOT_FOUND,
            FulfillmentError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            FulfillmentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Тело ошибки для уведомления в UI
    pub fn to_use_case_error(&self) -> UseCaseError {
        match self {
            FulfillmentError::Validation(message) => UseCaseError::validation(message.clone()),
            FulfillmentError::Upstream {
                context,
                source: GatewayError::NotFound(what),
            } => UseCaseError::not_found(format!("{} not found", what)).with_details(context.clone()),
            FulfillmentError::Upstream { context, source } => {
                UseCaseError::external(context.clone()).with_details(source.to_string())
            }
            FulfillmentError::Internal(message) => UseCaseError::internal(message.clone()),
        }
    }
}

impl IntoResponse for FulfillmentError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_use_case_error())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            FulfillmentError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FulfillmentError::upstream("Load order", GatewayError::NotFound("Order ORD-1".into()))
                .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FulfillmentError::upstream("Load order", GatewayError::Network("timeout".into()))
                .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_action_failure_is_retryable() {
        let err = FulfillmentError::upstream(
            "Mark as Packed failed",
            GatewayError::Status {
                code: 409,
                body: "picklist not scanned".into(),
            },
        );
        let body = err.to_use_case_error();
        assert_eq!(body.code, "EXTERNAL_ERROR");
        assert!(body.retryable);
        assert_eq!(body.message, "Mark as Packed failed");
        assert!(body.details.unwrap().contains("picklist not scanned"));
    }

    #[test]
    fn test_validation_is_not_retryable() {
        let body = FulfillmentError::Validation("SKU is required".into()).to_use_case_error();
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(!body.retryable);
    }
}
