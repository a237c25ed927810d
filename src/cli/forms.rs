//! Interactive data entry for new transactions.
//!
//! The form asks for each field in turn and re-prompts until the answer is
//! valid. Prompting goes through [`FormInteraction`] so the flow can be driven
//! without a terminal.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::output;
use crate::domain::{transaction::parse_date, Category, Transaction, TransactionType};

/// Lifecycle outcome of a form run.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Source of answers for a form. `None` means the user backed out.
pub trait FormInteraction {
    fn text(&mut self, prompt: &str, default: &str) -> Result<Option<String>, dialoguer::Error>;

    fn choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: usize,
    ) -> Result<Option<usize>, dialoguer::Error>;

    /// Reports a rejected answer before the field is asked again.
    fn invalid(&mut self, message: &str);
}

/// Terminal prompts rendered with `dialoguer`.
pub struct DialoguerInteraction<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerInteraction<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl FormInteraction for DialoguerInteraction<'_> {
    fn text(&mut self, prompt: &str, default: &str) -> Result<Option<String>, dialoguer::Error> {
        let mut input = Input::<String>::with_theme(self.theme).with_prompt(prompt);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map(Some)
    }

    fn choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: usize,
    ) -> Result<Option<usize>, dialoguer::Error> {
        Select::with_theme(self.theme)
            .with_prompt(prompt)
            .items(options)
            .default(default)
            .interact_opt()
    }

    fn invalid(&mut self, message: &str) {
        output::warning(message);
    }
}

/// Collects date, category, type and amount for one transaction.
pub struct TransactionForm {
    today: NaiveDate,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn run(
        &self,
        interaction: &mut impl FormInteraction,
    ) -> Result<FormResult<Transaction>, dialoguer::Error> {
        let default_date = self.today.format("%Y-%m-%d").to_string();
        let date = loop {
            let Some(answer) = interaction.text("Date (YYYY-MM-DD)", &default_date)? else {
                return Ok(FormResult::Cancelled);
            };
            let answer = if answer.trim().is_empty() {
                default_date.as_str()
            } else {
                answer.trim()
            };
            match parse_date(answer) {
                Ok(date) => break date,
                Err(err) => interaction.invalid(&err.to_string()),
            }
        };

        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let Some(category) = interaction.choice("Category", &categories, 0)? else {
            return Ok(FormResult::Cancelled);
        };
        let kinds: Vec<&str> = TransactionType::ALL.iter().map(|k| k.as_str()).collect();
        let Some(kind) = interaction.choice("Type", &kinds, 0)? else {
            return Ok(FormResult::Cancelled);
        };
        let (Some(category), Some(kind)) = (
            Category::ALL.get(category).copied(),
            TransactionType::ALL.get(kind).copied(),
        ) else {
            return Ok(FormResult::Cancelled);
        };

        loop {
            let Some(answer) = interaction.text("Amount", "0.00")? else {
                return Ok(FormResult::Cancelled);
            };
            let parsed = answer.trim().parse::<f64>().map_err(|_| {
                format!("`{}` is not a number", answer.trim())
            });
            let result = parsed.and_then(|amount| {
                Transaction::new(date, category, kind, amount).map_err(|err| err.to_string())
            });
            match result {
                Ok(transaction) => return Ok(FormResult::Completed(transaction)),
                Err(message) => interaction.invalid(&message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockInteraction {
        texts: VecDeque<Option<String>>,
        choices: VecDeque<Option<usize>>,
        rejected: Vec<String>,
        offered: Vec<(String, String)>,
    }

    impl MockInteraction {
        fn new(texts: Vec<Option<&str>>, choices: Vec<Option<usize>>) -> Self {
            Self {
                texts: texts.into_iter().map(|t| t.map(String::from)).collect(),
                choices: choices.into(),
                rejected: Vec::new(),
                offered: Vec::new(),
            }
        }
    }

    impl FormInteraction for MockInteraction {
        fn text(&mut self, _prompt: &str, _default: &str) -> Result<Option<String>, dialoguer::Error> {
            Ok(self.texts.pop_front().unwrap_or(None))
        }

        fn choice(
            &mut self,
            prompt: &str,
            options: &[&str],
            default: usize,
        ) -> Result<Option<usize>, dialoguer::Error> {
            self.offered
                .push((prompt.to_string(), options[default].to_string()));
            Ok(self.choices.pop_front().unwrap_or(None))
        }

        fn invalid(&mut self, message: &str) {
            self.rejected.push(message.to_string());
        }
    }

    fn form() -> TransactionForm {
        TransactionForm::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    fn index_of<T: PartialEq>(all: &[T], wanted: T) -> usize {
        all.iter().position(|item| *item == wanted).unwrap()
    }

    #[test]
    fn completes_with_valid_answers() {
        let mut interaction = MockInteraction::new(
            vec![Some("2024-01-05"), Some("50")],
            vec![
                Some(index_of(&Category::ALL, Category::Food)),
                Some(index_of(&TransactionType::ALL, TransactionType::Expense)),
            ],
        );
        let result = form().run(&mut interaction).unwrap();
        let FormResult::Completed(txn) = result else {
            panic!("form should complete");
        };
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.amount, 50.0);
    }

    #[test]
    fn blank_date_uses_today() {
        let mut interaction = MockInteraction::new(
            vec![Some("  "), Some("2000")],
            vec![
                Some(index_of(&Category::ALL, Category::Salary)),
                Some(index_of(&TransactionType::ALL, TransactionType::Income)),
            ],
        );
        let FormResult::Completed(txn) = form().run(&mut interaction).unwrap() else {
            panic!("form should complete");
        };
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut interaction = MockInteraction::new(
            vec![Some("yesterday"), Some("2024-02-01"), Some("-10"), Some("abc"), Some("12.5")],
            vec![Some(0), Some(0)],
        );
        let result = form().run(&mut interaction).unwrap();
        assert!(matches!(result, FormResult::Completed(ref txn) if txn.amount == 12.5));
        assert_eq!(interaction.rejected.len(), 3);
        assert!(interaction.rejected[2].contains("abc"));
    }

    #[test]
    fn type_prompt_starts_on_income() {
        let mut interaction = MockInteraction::new(
            vec![Some("2024-01-10"), Some("2000")],
            vec![Some(index_of(&Category::ALL, Category::Salary)), Some(0)],
        );
        let FormResult::Completed(txn) = form().run(&mut interaction).unwrap() else {
            panic!("form should complete");
        };
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(interaction.offered[1], ("Type".to_string(), "Income".to_string()));
    }

    #[test]
    fn escape_cancels_the_form() {
        let mut interaction = MockInteraction::new(vec![Some("2024-02-01")], vec![None]);
        assert_eq!(form().run(&mut interaction).unwrap(), FormResult::Cancelled);
    }
}
