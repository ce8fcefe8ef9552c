//! The embedded fixture set and read-only lookups over it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FixtureError, Result};
use crate::records::{Advisor, Category, Transaction, TransactionKind, User};

const EMBEDDED: &str = include_str!("../data/fixtures.json");

/// All mock records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
    pub advisors: Vec<Advisor>,
    pub categories: Vec<Category>,
}

impl Fixtures {
    /// Parses the fixture set bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] if the bundled document does not
    /// match the record shapes.
    pub fn load() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Parses a fixture document. Missing tables are empty.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: Self = serde_json::from_str(json)?;
        debug!(
            users = fixtures.users.len(),
            transactions = fixtures.transactions.len(),
            advisors = fixtures.advisors.len(),
            categories = fixtures.categories.len(),
            "fixtures loaded"
        );
        Ok(fixtures)
    }

    /// Finds a user by id.
    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Finds a user by email, ignoring ASCII case.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    /// Returns a user's transactions, newest first.
    pub fn transactions_for_user(&self, user_id: u32) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        transactions
    }

    /// Income minus expenses over a user's transactions.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownUser`] when no user has this id.
    pub fn balance_for_user(&self, user_id: u32) -> Result<f64> {
        if self.user(user_id).is_none() {
            return Err(FixtureError::UnknownUser(user_id));
        }
        Ok(self
            .transactions
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .map(Transaction::signed_amount)
            .sum())
    }

    /// Returns advisors open for booking.
    pub fn available_advisors(&self) -> Vec<&Advisor> {
        self.advisors.iter().filter(|a| a.available).collect()
    }

    /// Returns the categories for one transaction direction.
    pub fn categories_of_kind(&self, kind: TransactionKind) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.kind == kind).collect()
    }

    /// Finds a category by exact name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Role;

    #[test]
    fn test_embedded_fixtures_parse() {
        let fixtures = Fixtures::load().unwrap();
        assert_eq!(fixtures.users.len(), 4);
        assert_eq!(fixtures.transactions.len(), 6);
        assert_eq!(fixtures.advisors.len(), 3);
        assert_eq!(fixtures.categories.len(), 8);
    }

    #[test]
    fn test_user_by_email_ignores_case() {
        let fixtures = Fixtures::load().unwrap();
        let user = fixtures.user_by_email("Sarah@Example.com").unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Client);
        assert!(fixtures.user_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_transactions_newest_first() {
        let fixtures = Fixtures::load().unwrap();
        let ids: Vec<u32> = fixtures
            .transactions_for_user(1)
            .iter()
            .map(|tx| tx.id)
            .collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_balance_for_user() {
        let fixtures = Fixtures::load().unwrap();
        let balance = fixtures.balance_for_user(1).unwrap();
        assert!((balance - 4237.55).abs() < 1e-9);
        assert_eq!(fixtures.balance_for_user(4).unwrap(), 0.0);
        assert!(matches!(
            fixtures.balance_for_user(99),
            Err(FixtureError::UnknownUser(99))
        ));
    }

    #[test]
    fn test_available_advisors() {
        let fixtures = Fixtures::load().unwrap();
        let names: Vec<&str> = fixtures
            .available_advisors()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Michael Chen", "Emily Rodriguez"]);
    }

    #[test]
    fn test_categories_of_kind() {
        let fixtures = Fixtures::load().unwrap();
        assert_eq!(fixtures.categories_of_kind(TransactionKind::Income).len(), 3);
        assert_eq!(fixtures.categories_of_kind(TransactionKind::Expense).len(), 5);
        assert_eq!(fixtures.category_by_name("Food").unwrap().icon, "🛒");
    }

    #[test]
    fn test_from_json_missing_tables() {
        let fixtures = Fixtures::from_json(r#"{"categories": []}"#).unwrap();
        assert!(fixtures.users.is_empty());
        assert!(Fixtures::from_json("not json").is_err());
    }
}
