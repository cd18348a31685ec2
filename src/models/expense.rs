use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::amount::validate_amount;
use super::Month;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum ExpenseCategory {
    Housing,
    #[serde(rename = "Food & Groceries")]
    FoodGroceries,
    Transportation,
    Utilities,
    Healthcare,
    Insurance,
    Entertainment,
    Shopping,
    Education,
    Subscriptions,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Travel,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    Other,
}

impl ExpenseCategory {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::FoodGroceries => "Food & Groceries",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Insurance => "Insurance",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Subscriptions => "Subscriptions",
            Self::DiningOut => "Dining Out",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label. A few common spellings are accepted
    /// so the category can be typed without quoting on the command bar.
    pub(crate) fn parse(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let found = Self::all()
            .iter()
            .find(|c| c.as_str().to_lowercase() == lower)
            .copied();
        if let Some(cat) = found {
            return Ok(cat);
        }
        match lower.as_str() {
            "food" | "groceries" | "food-groceries" | "food&groceries" => Ok(Self::FoodGroceries),
            "dining" | "dining-out" | "diningout" | "restaurants" => Ok(Self::DiningOut),
            "personal-care" | "personalcare" => Ok(Self::PersonalCare),
            "rent" | "mortgage" => Ok(Self::Housing),
            _ => Err(Error::UnknownCategory(s.trim().to_string())),
        }
    }

    pub(crate) fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Housing,
            Self::FoodGroceries,
            Self::Transportation,
            Self::Utilities,
            Self::Healthcare,
            Self::Insurance,
            Self::Entertainment,
            Self::Shopping,
            Self::Education,
            Self::Subscriptions,
            Self::DiningOut,
            Self::Travel,
            Self::PersonalCare,
            Self::Other,
        ]
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum ExpenseType {
    #[default]
    #[serde(rename = "essential")]
    Essential,
    #[serde(rename = "non-essential")]
    NonEssential,
}

impl ExpenseType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::NonEssential => "non-essential",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "essential" | "e" => Ok(Self::Essential),
            "non-essential" | "nonessential" | "non_essential" | "n" => Ok(Self::NonEssential),
            _ => Err(Error::UnknownExpenseType(s.trim().to_string())),
        }
    }
}

impl FromStr for ExpenseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExpenseEntry {
    pub(crate) id: String,
    pub(crate) month: Month,
    pub(crate) category: ExpenseCategory,
    pub(crate) amount: Decimal,
    #[serde(rename = "type")]
    pub(crate) expense_type: ExpenseType,
}

impl ExpenseEntry {
    pub(crate) fn new(
        month: Month,
        category: ExpenseCategory,
        amount: Decimal,
        expense_type: ExpenseType,
    ) -> Result<Self> {
        Self::replacing(&super::new_id(), month, category, amount, expense_type)
    }

    pub(crate) fn replacing(
        id: &str,
        month: Month,
        category: ExpenseCategory,
        amount: Decimal,
        expense_type: ExpenseType,
    ) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            month,
            category,
            amount: validate_amount(amount)?,
            expense_type,
        })
    }

    pub(crate) fn is_essential(&self) -> bool {
        self.expense_type == ExpenseType::Essential
    }
}
