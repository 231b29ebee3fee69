//! Classification axes of a task (status / priority / complexity).
//!
//! 各値は固定ラベル（variant 名）を持ち、フィルタの toggle はこのラベルで照合します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::SorterError;

/// A closed set of labelled values that a filter category can match on.
pub trait Classification: Copy + Eq + fmt::Debug + 'static {
    /// The filter category this axis belongs to.
    const CATEGORY: Category;

    /// All values in display order.
    fn all() -> &'static [Self];

    /// Stable display label (also the filter toggle label).
    fn label(self) -> &'static str;

    /// Case-insensitive lookup by label.
    fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|value| value.label().eq_ignore_ascii_case(label.trim()))
    }

    fn labels() -> Vec<&'static str> {
        Self::all().iter().map(|value| value.label()).collect()
    }
}

/// The three independent filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Status,
    Priority,
    Complexity,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Status, Category::Priority, Category::Complexity];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Status => "status",
            Category::Priority => "priority",
            Category::Complexity => "complexity",
        }
    }

    /// Default toggle labels for this category.
    pub fn labels(self) -> Vec<&'static str> {
        match self {
            Category::Status => Status::labels(),
            Category::Priority => Priority::labels(),
            Category::Complexity => Complexity::labels(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status.
///
/// - Rejected: 却下
/// - Pending: 入力中（新規作成時のデフォルト）
/// - Active: 作業中
/// - Completed: 完了
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    Rejected,
    #[default]
    #[serde(alias = "InProgress", alias = "in_progress")]
    Pending,
    Active,
    Completed,
}

impl Classification for Status {
    const CATEGORY: Category = Category::Status;

    fn all() -> &'static [Self] {
        &[Status::Rejected, Status::Pending, Status::Active, Status::Completed]
    }

    fn label(self) -> &'static str {
        match self {
            Status::Rejected => "Rejected",
            Status::Pending => "Pending",
            Status::Active => "Active",
            Status::Completed => "Completed",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("inprogress")
            || label.eq_ignore_ascii_case("in_progress")
            || label.eq_ignore_ascii_case("in-progress")
        {
            return Some(Status::Pending);
        }
        Self::all()
            .iter()
            .copied()
            .find(|value| value.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Classification for Priority {
    const CATEGORY: Category = Category::Priority;

    fn all() -> &'static [Self] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Estimated effort.
///
/// - Trivial: ほぼ手間なし
/// - Simple: 簡単
/// - Moderate: 平均的
/// - Complex: 高度
/// - Critical: 非常に複雑、専門知識が必要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Complexity {
    Trivial,
    #[default]
    Simple,
    Moderate,
    Complex,
    Critical,
}

impl Classification for Complexity {
    const CATEGORY: Category = Category::Complexity;

    fn all() -> &'static [Self] {
        &[
            Complexity::Trivial,
            Complexity::Simple,
            Complexity::Moderate,
            Complexity::Complex,
            Complexity::Critical,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Complexity::Trivial => "Trivial",
            Complexity::Simple => "Simple",
            Complexity::Moderate => "Moderate",
            Complexity::Complex => "Complex",
            Complexity::Critical => "Critical",
        }
    }
}

macro_rules! impl_label_traits {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = SorterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::from_label(s).ok_or_else(|| SorterError::UnknownLabel {
                    category: <$ty as Classification>::CATEGORY,
                    label: s.to_string(),
                })
            }
        }
    )*};
}

impl_label_traits!(Status, Priority, Complexity);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_new_task_values() {
        assert_eq!(Status::default(), Status::Pending);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Complexity::default(), Complexity::Simple);
    }

    #[rstest]
    #[case::exact("High", Priority::High)]
    #[case::lowercase("low", Priority::Low)]
    #[case::padded("  medium ", Priority::Medium)]
    fn priority_parses_case_insensitively(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(input.parse::<Priority>().unwrap(), expected);
    }

    #[rstest]
    #[case::variant("Pending")]
    #[case::camel("InProgress")]
    #[case::kebab("in-progress")]
    fn in_progress_aliases_map_to_pending(#[case] input: &str) {
        assert_eq!(input.parse::<Status>().unwrap(), Status::Pending);
    }

    #[test]
    fn unknown_label_reports_category() {
        let err = "Urgent".parse::<Priority>().unwrap_err();
        assert!(matches!(
            err,
            SorterError::UnknownLabel { category: Category::Priority, ref label } if label == "Urgent"
        ));
    }

    #[test]
    fn category_labels_follow_display_order() {
        assert_eq!(
            Category::Status.labels(),
            vec!["Rejected", "Pending", "Active", "Completed"]
        );
        assert_eq!(Category::Complexity.labels().len(), 5);
    }
}
