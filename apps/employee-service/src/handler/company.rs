//! # 会社リンクハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /employee/company/{company_id}` - 会社にリンクされたグループ社員の一覧
//! - `POST /employee/company` - グループ社員を会社にリンク
//!
//! ## 会社 ID のエンコード
//!
//! パスの会社 ID は標準 base64（パディングあり）でエンコードされている。
//! デコード後の文字列はさらにクエリ文字列形式でアンエスケープする
//! （`%XX` と `+` → 空白）。アンエスケープに失敗した場合はデコード後の値を
//! そのまま使う。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use grouplink_domain::employee::Employee;
use serde::Deserialize;

use super::EmployeeState;
use crate::error::ServiceError;

/// 会社リンク作成リクエスト
///
/// 欠けているフィールドは空文字列として扱う。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinkEmployeeToCompanyRequest {
    pub employee_id: String,
    pub company_id:  String,
}

/// GET /employee/company/{company_id}
///
/// 会社 ID のデコードに失敗した場合はストアを呼ばずに 400 を返す。
pub async fn list_company_employees(
    State(state): State<Arc<EmployeeState>>,
    Path(encoded_company_id): Path<String>,
) -> Result<Json<Vec<Employee>>, ServiceError> {
    let company_id = decode_company_id(&encoded_company_id)?;
    let employees = state.usecase.list_company_employees(&company_id).await?;
    Ok(Json(employees))
}

/// POST /employee/company
///
/// 社員・会社の存在は確認せずにリンクを 1 件追加する。
/// 成功時は 201 と空のボディを返す。
pub async fn link_employee_to_company(
    State(state): State<Arc<EmployeeState>>,
    body: Bytes,
) -> Result<StatusCode, ServiceError> {
    let request: LinkEmployeeToCompanyRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "リンク作成リクエストのデコードに失敗しました");
        ServiceError::BadRequest("error in decoding request")
    })?;

    state
        .usecase
        .link_employee_to_company(&request.employee_id, &request.company_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// パスの会社 ID をデコードする
///
/// base64 として不正、またはデコード結果が UTF-8 でない場合は 400。
pub fn decode_company_id(encoded: &str) -> Result<String, ServiceError> {
    let bytes = STANDARD.decode(encoded).map_err(|e| {
        tracing::debug!(error = %e, "会社 ID の base64 デコードに失敗しました");
        ServiceError::BadRequest("error in decoding company id")
    })?;
    let decoded = String::from_utf8(bytes).map_err(|e| {
        tracing::debug!(error = %e, "会社 ID が UTF-8 ではありません");
        ServiceError::BadRequest("error in decoding company id")
    })?;

    Ok(query_unescape(&decoded).unwrap_or(decoded))
}

/// クエリ文字列形式でアンエスケープする
///
/// 不完全な `%` エスケープや、結果が UTF-8 でない場合は `None`。
/// `urlencoding::decode` は不正な `%` をそのまま通すため、先に走査して弾く。
fn query_unescape(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(&value.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Y21wXzAx", "cmp_01")]
    #[case("Y29tcGFuaWVzL2NtcF8wMQ==", "companies/cmp_01")]
    #[case("YWNtZStjb3Jw", "acme corp")]
    #[case("YWNtZSUyMGNvcnA=", "acme corp")]
    #[case("YSUyRmI=", "a/b")]
    #[case("", "")]
    fn test_decode_company_idがbase64とエスケープを解除する(
        #[case] encoded: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(decode_company_id(encoded).unwrap(), expected);
    }

    #[rstest]
    #[case("YSV6eg==", "a%zz")]
    #[case("YSsleg==", "a+%z")]
    #[case("JQ==", "%")]
    fn test_不正なエスケープはデコード後の値をそのまま使う(
        #[case] encoded: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(decode_company_id(encoded).unwrap(), expected);
    }

    #[rstest]
    #[case("a%zz")]
    #[case("a%2")]
    #[case("%")]
    #[case("%ff")]
    fn test_query_unescapeは不正なエスケープと非utf8を拒否する(#[case] value: &str) {
        assert_eq!(query_unescape(value), None);
    }

    #[rstest]
    #[case("not base64!")]
    #[case("Y21wXzAx=")]
    #[case("Y21wXzAx===")]
    #[case("/w==")]
    fn test_不正な会社idはbad_request(#[case] encoded: &str) {
        let result = decode_company_id(encoded);

        assert!(matches!(
            result,
            Err(ServiceError::BadRequest("error in decoding company id"))
        ));
    }

    #[test]
    fn test_リンク作成リクエストの欠けたフィールドは空文字列() {
        let request: LinkEmployeeToCompanyRequest =
            serde_json::from_str(r#"{"employee_id":"emp_1"}"#).unwrap();

        assert_eq!(request.employee_id, "emp_1");
        assert_eq!(request.company_id, "");
    }
}
