//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! grouplink-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは呼び出された操作名を記録する。また [`fail_on`](MockEmployeeRepository::fail_on)
//! で指定した操作を `InfraErrorKind::Unexpected` で失敗させられる。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use grouplink_domain::{
    employee::{Employee, EmployeeFieldMask, EmployeeFilter, NewEmployee},
    id::{self, EMPLOYEE_ID_PREFIX},
    link::{Link, ListLinksRequest},
    user_profile::{UserProfile, UserProfileFilter},
};

use crate::{
    error::InfraError,
    repository::{EmployeeRepository, LinkRepository, UserProfileRepository},
};

/// 操作の呼び出し記録と失敗注入
#[derive(Clone, Default)]
struct CallLog {
    calls:   Arc<Mutex<Vec<&'static str>>>,
    failing: Arc<Mutex<Vec<&'static str>>>,
}

impl CallLog {
    fn record(&self, operation: &'static str) -> Result<(), InfraError> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(InfraError::unexpected(format!("{operation} failed")));
        }
        Ok(())
    }

    fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

// ===== MockEmployeeRepository =====

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
    employees: Arc<Mutex<Vec<Employee>>>,
    log:       CallLog,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }

    /// 現在保持している社員のスナップショット
    pub fn employees(&self) -> Vec<Employee> {
        self.employees.lock().unwrap().clone()
    }

    /// 呼び出された操作名（`list` / `get` / `create` / `delete`）
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.calls()
    }

    /// 指定した操作を失敗させる
    pub fn fail_on(&self, operation: &'static str) {
        self.log.fail_on(operation);
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn list(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, InfraError> {
        self.log.record("list")?;
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| mask.apply(e.clone()))
            .collect())
    }

    async fn get(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Employee, InfraError> {
        self.log.record("get")?;
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| filter.matches(e))
            .map(|e| mask.apply(e.clone()))
            .ok_or_else(|| InfraError::not_found("Employee"))
    }

    async fn create(&self, employees: &[NewEmployee]) -> Result<Vec<String>, InfraError> {
        self.log.record("create")?;
        let mut stored = self.employees.lock().unwrap();
        let ids: Vec<String> = employees
            .iter()
            .map(|new_employee| {
                let id = id::generate(EMPLOYEE_ID_PREFIX);
                stored.push(new_employee.clone().into_employee(id.clone()));
                id
            })
            .collect();
        Ok(ids)
    }

    async fn delete(&self, filter: &EmployeeFilter) -> Result<(), InfraError> {
        self.log.record("delete")?;
        self.employees.lock().unwrap().retain(|e| !filter.matches(e));
        Ok(())
    }
}

// ===== MockUserProfileRepository =====

#[derive(Clone, Default)]
pub struct MockUserProfileRepository {
    profiles: Arc<Mutex<Vec<UserProfile>>>,
    log:      CallLog,
}

impl MockUserProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, profile: UserProfile) {
        self.profiles.lock().unwrap().push(profile);
    }

    /// メールアドレスだけを持つプロフィールを追加する
    pub fn add_email(&self, id: &str, email: &str) {
        self.add_profile(UserProfile {
            id:         id.to_string(),
            email:      email.to_string(),
            first_name: None,
            last_name:  None,
        });
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.calls()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.log.fail_on(operation);
    }
}

#[async_trait]
impl UserProfileRepository for MockUserProfileRepository {
    async fn get(&self, filter: &UserProfileFilter) -> Result<UserProfile, InfraError> {
        self.log.record("get")?;
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| filter.matches(p))
            .cloned()
            .ok_or_else(|| InfraError::not_found("UserProfile"))
    }
}

// ===== MockLinkRepository =====

#[derive(Clone, Default)]
pub struct MockLinkRepository {
    links: Arc<Mutex<Vec<Link>>>,
    log:   CallLog,
}

impl MockLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    /// 現在保持しているリンクのスナップショット
    pub fn links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    /// 呼び出された操作名（`list` / `add`）
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.calls()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.log.fail_on(operation);
    }
}

#[async_trait]
impl LinkRepository for MockLinkRepository {
    async fn list(&self, request: &ListLinksRequest) -> Result<Vec<Link>, InfraError> {
        self.log.record("list")?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| request.matches(l))
            .cloned()
            .collect())
    }

    async fn add(&self, links: &[Link]) -> Result<(), InfraError> {
        self.log.record("add")?;
        self.links.lock().unwrap().extend_from_slice(links);
        Ok(())
    }
}
