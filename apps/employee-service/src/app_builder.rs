//! # Employee Service アプリケーション構築
//!
//! ルーター構築を担当する。`main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ルーティング
//!
//! `/employee/company` は静的パスのため、`/employee/{id}` より優先してマッチする。
//! POST 以外は `company` を ID とする一覧・削除に振り分ける。
//! 会社 ID は base64 のため `/` を含みうるので、残りのパス全体を受け取る。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
    EmployeeState,
    ReadinessState,
    create_group_employee,
    delete_company_segment_employee,
    delete_group_employee,
    health_check,
    link_employee_to_company,
    list_company_employees,
    list_company_segment_employees,
    list_group_employees,
    readiness_check,
};

/// グループ社員 API のルーター
pub fn employee_routes(state: Arc<EmployeeState>) -> Router {
    Router::new()
        .route("/employee", post(create_group_employee))
        .route(
            "/employee/{id}",
            get(list_group_employees).delete(delete_group_employee),
        )
        .route(
            "/employee/company",
            post(link_employee_to_company)
                .get(list_company_segment_employees)
                .delete(delete_company_segment_employee),
        )
        .route("/employee/company/{*company_id}", get(list_company_employees))
        .with_state(state)
}

/// ヘルスチェックのルーター
pub fn health_routes(readiness_state: Arc<ReadinessState>) -> Router {
    Router::new().route("/health", get(health_check)).merge(
        Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
    )
}

/// アプリケーション全体のルーターを構築する
pub fn build_app(employee_state: Arc<EmployeeState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .merge(health_routes(readiness_state))
        .merge(employee_routes(employee_state))
        .layer(TraceLayer::new_for_http())
}
