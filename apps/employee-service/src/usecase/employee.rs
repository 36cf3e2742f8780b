//! # グループ社員ユースケース
//!
//! グループ社員の一覧・作成・削除と、会社とのリンクを扱う。
//!
//! ## 作成時の検証順序
//!
//! 1. メールアドレスが空でないこと（400）
//! 2. 同じ親・メールアドレスの社員が存在しないこと（409）
//! 3. メールアドレスのユーザープロフィールが存在すること（404）
//! 4. 社員を作成し、採番された ID をレスポンスに設定する
//!
//! いずれかで失敗した時点で打ち切り、以降のストア操作は行わない。

use std::sync::Arc;

use grouplink_domain::{
    employee::{Employee, EmployeeFieldMask, EmployeeFilter},
    id,
    link::{Link, ListLinksRequest},
    user_profile::UserProfileFilter,
};
use grouplink_infra::repository::{EmployeeRepository, LinkRepository, UserProfileRepository};

use crate::error::ServiceError;

/// グループ社員ユースケース
pub struct EmployeeUseCaseImpl {
    employee_repository:     Arc<dyn EmployeeRepository>,
    user_profile_repository: Arc<dyn UserProfileRepository>,
    link_repository:         Arc<dyn LinkRepository>,
}

impl EmployeeUseCaseImpl {
    pub fn new(
        employee_repository: Arc<dyn EmployeeRepository>,
        user_profile_repository: Arc<dyn UserProfileRepository>,
        link_repository: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            employee_repository,
            user_profile_repository,
            link_repository,
        }
    }

    /// グループに所属する社員の一覧を取得する
    pub async fn list_group_employees(&self, group_id: &str) -> Result<Vec<Employee>, ServiceError> {
        self.employee_repository
            .list(
                &EmployeeFieldMask::All,
                &EmployeeFilter::ParentEq(group_id.to_string()),
            )
            .await
            .map_err(ServiceError::store("error in listing employees"))
    }

    /// グループ社員を作成する
    ///
    /// リクエストの `id` は作成先のグループとして扱う。
    /// 成功時は保存した内容に採番された ID を付けて返す。
    #[tracing::instrument(skip_all, fields(parent = %request.id))]
    pub async fn create_employee(&self, request: Employee) -> Result<Employee, ServiceError> {
        let email = request
            .required_email()
            .map_err(|_| ServiceError::BadRequest("error in request, email is required"))?
            .to_string();

        let duplicate = EmployeeFilter::and([
            EmployeeFilter::EmailEq(email.clone()),
            EmployeeFilter::ParentEq(request.id.clone()),
        ]);
        match self
            .employee_repository
            .get(&EmployeeFieldMask::All, &duplicate)
            .await
        {
            Ok(_) => return Err(ServiceError::Conflict("employee already exists")),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(ServiceError::store("error in getting employee")(e)),
        }

        if let Err(e) = self
            .user_profile_repository
            .get(&UserProfileFilter::EmailEq(email))
            .await
        {
            tracing::warn!(error = %e, "ユーザープロフィールを取得できませんでした");
            return Err(ServiceError::NotFound("error in getting user"));
        }

        let new_employee = request.to_new_employee();
        let ids = self
            .employee_repository
            .create(std::slice::from_ref(&new_employee))
            .await
            .map_err(ServiceError::store("error in creating employee"))?;
        let Some(new_id) = ids.into_iter().next() else {
            return Err(ServiceError::store("error in creating employee")(
                grouplink_infra::InfraError::unexpected("採番された ID が返されませんでした"),
            ));
        };

        tracing::info!(employee_id = %new_id, "グループ社員を作成しました");
        Ok(new_employee.into_employee(new_id))
    }

    /// グループ社員を削除する
    ///
    /// 存在しない ID の削除も成功として扱う。
    pub async fn delete_employee(&self, raw_id: &str) -> Result<(), ServiceError> {
        let employee_id = id::normalize(raw_id);

        self.employee_repository
            .delete(&EmployeeFilter::IdEq(employee_id.to_string()))
            .await
            .map_err(ServiceError::store("error in deleting employee"))
    }

    /// 会社にリンクされたグループ社員の一覧を取得する
    ///
    /// `company_id` はデコード済みの会社 ID。
    pub async fn list_company_employees(
        &self,
        company_id: &str,
    ) -> Result<Vec<Employee>, ServiceError> {
        let links = self
            .link_repository
            .list(&ListLinksRequest::employees_of_company(company_id))
            .await
            .map_err(ServiceError::store("error in listing links"))?;

        let employee_ids: Vec<String> = links
            .iter()
            .map(|link| id::normalize(&link.first_resource_id).to_string())
            .collect();

        self.employee_repository
            .list(&EmployeeFieldMask::All, &EmployeeFilter::IdIn(employee_ids))
            .await
            .map_err(ServiceError::store("error in listing employees"))
    }

    /// グループ社員を会社にリンクする
    ///
    /// 社員・会社の存在は確認しない。
    pub async fn link_employee_to_company(
        &self,
        employee_id: &str,
        company_id: &str,
    ) -> Result<(), ServiceError> {
        self.link_repository
            .add(&[Link::group_employee_company(employee_id, company_id)])
            .await
            .map_err(ServiceError::store("error in linking employee to company"))
    }
}
