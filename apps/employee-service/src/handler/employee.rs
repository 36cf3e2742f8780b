//! # グループ社員ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /employee/{id}` - グループに所属する社員の一覧
//! - `POST /employee` - グループ社員の作成
//! - `DELETE /employee/{id}` - グループ社員の削除
//!
//! 一覧と削除は同じパスを共有するため、パスパラメータ名も共通にしている。
//! 一覧ではグループ ID、削除では社員 ID を表す。
//!
//! `/employee/company` は会社リンク作成の静的パスと重なる。GET と DELETE は
//! `company` をグループ ID / 社員 ID として扱う専用ハンドラで受ける。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use grouplink_domain::employee::Employee;

use crate::{error::ServiceError, usecase::EmployeeUseCaseImpl};

/// グループ社員 API の共有状態
pub struct EmployeeState {
    pub usecase: EmployeeUseCaseImpl,
}

/// 静的パス `/employee/company` の末尾セグメント
const COMPANY_SEGMENT: &str = "company";

/// GET /employee/{id}
///
/// `parent` がグループ ID に一致する社員を全フィールドで返す。
pub async fn list_group_employees(
    State(state): State<Arc<EmployeeState>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Employee>>, ServiceError> {
    let employees = state.usecase.list_group_employees(&group_id).await?;
    Ok(Json(employees))
}

/// GET /employee/company
///
/// グループ ID `company` の一覧。
pub async fn list_company_segment_employees(
    state: State<Arc<EmployeeState>>,
) -> Result<Json<Vec<Employee>>, ServiceError> {
    list_group_employees(state, Path(COMPANY_SEGMENT.to_string())).await
}

/// POST /employee
///
/// ボディの `id` は作成先のグループ ID として扱う。
///
/// ## レスポンス
///
/// - `201 Created`: 採番された ID を設定した社員
/// - `400 Bad Request`: ボディのデコード失敗、メールアドレスが空
/// - `404 Not Found`: メールアドレスのユーザーが存在しない
/// - `409 Conflict`: 同じグループに同じメールアドレスの社員が存在する
pub async fn create_group_employee(
    State(state): State<Arc<EmployeeState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Employee>), ServiceError> {
    let request: Employee = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "社員のデコードに失敗しました");
        ServiceError::BadRequest("error in decoding employee")
    })?;

    let created = state.usecase.create_employee(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /employee/{id}
///
/// 成功時は 200 と空のボディを返す。存在しない ID でも成功する。
///
/// `()` は axum で `200 OK` の空レスポンスになるため、ステータスは明示しない。
pub async fn delete_group_employee(
    State(state): State<Arc<EmployeeState>>,
    Path(employee_id): Path<String>,
) -> Result<(), ServiceError> {
    state.usecase.delete_employee(&employee_id).await
}

/// DELETE /employee/company
///
/// 社員 ID `company` の削除。
pub async fn delete_company_segment_employee(
    state: State<Arc<EmployeeState>>,
) -> Result<(), ServiceError> {
    delete_group_employee(state, Path(COMPANY_SEGMENT.to_string())).await
}
