//! # Employee Service エラー定義
//!
//! Employee Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! クライアントには短い固定メッセージを `text/plain` で返し、
//! 原因（インフラ層エラーと SpanTrace）はログにだけ出力する。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use grouplink_infra::InfraError;
use thiserror::Error;

/// Employee Service で発生するエラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 不正なリクエスト
    #[error("{0}")]
    BadRequest(&'static str),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(&'static str),

    /// 既に存在する
    #[error("{0}")]
    Conflict(&'static str),

    /// ストア操作の失敗
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source:  InfraError,
    },
}

impl ServiceError {
    /// インフラ層エラーを指定メッセージの `Store` エラーに変換する関数を返す
    ///
    /// ```ignore
    /// repo.list(&mask, &filter)
    ///     .await
    ///     .map_err(ServiceError::store("error in listing employees"))?;
    /// ```
    pub fn store(message: &'static str) -> impl FnOnce(InfraError) -> Self {
        move |source| Self::Store { message, source }
    }

    /// HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Conflict(message) => {
                tracing::warn!(status = status.as_u16(), "{message}");
                message
            }
            Self::Store { message, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{message}"
                );
                message
            }
        };

        (status, message).into_response()
    }
}
