//! Record shapes for the mock data tables.
//!
//! Field names serialize in camelCase to match the fixture documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Advisor,
    Admin,
}

/// Direction of money for transactions and categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Dashboard figures shown for client accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_goal: f64,
}

/// An application user.
///
/// Clients carry `stats`; advisors carry `specialty`, `rating` and
/// `sessions_completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub avatar: String,
    pub join_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<UserStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_completed: Option<u32>,
}

impl User {
    pub fn is_advisor(&self) -> bool {
        self.role == Role::Advisor
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u32,
    pub user_id: u32,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    /// Amount with expenses negated.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// A financial advisor listed for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub available: bool,
    pub rating: f32,
    pub sessions_completed: u32,
    pub bio: String,
}

/// A transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon: String,
}
