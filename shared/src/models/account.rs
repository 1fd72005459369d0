//! Account Model

use serde::{Deserialize, Serialize};

/// Default establishment credit granted to a new account
pub const DEFAULT_ESTABLISHMENT: f64 = 60_000.0;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AccountRole {
    #[default]
    Student,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

/// Account entity (student or warden) with its ledger fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
    pub department: String,
    pub year: String,
    pub role: AccountRole,
    /// Fixed initial credit, set at creation
    pub establishment: f64,
    /// Cumulative deposits, only ever increases
    pub deposit: f64,
    pub balance: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn financial(&self) -> Financial {
        Financial {
            establishment: self.establishment,
            deposit: self.deposit,
            balance: self.balance,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
    pub department: String,
    pub year: String,
    pub password: String,
}

/// Ledger view of an account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Financial {
    pub establishment: f64,
    pub deposit: f64,
    pub balance: f64,
}

/// Personal details (no ledger, no credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub fullname: String,
    pub student_id: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
}

impl From<&Account> for PersonalInfo {
    fn from(account: &Account) -> Self {
        Self {
            fullname: account.full_name(),
            student_id: account.student_id.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            department: account.department.clone(),
            year: account.year.clone(),
        }
    }
}

/// Deposit request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: f64,
}

/// Deposit response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResponse {
    pub financial: Financial,
    pub message: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
}
