//! The closed category taxonomy and its keyword tables.
//!
//! All matching data lives here as versioned tables, not as string literals
//! scattered through the classifier, so tests can enumerate every
//! keyword-to-category mapping. The tables are read-only configuration:
//! build a [`Taxonomy`] once at startup and share it by reference.

use serde::{Deserialize, Serialize};

/// Whether money leaves (expense) or enters (income) the tracked account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tag from the closed taxonomy, partitioned by direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Expense
    Groceries,
    Transport,
    Entertainment,
    Clothing,
    Health,
    Utilities,
    OtherExpense,
    // Income
    Salary,
    SideJob,
    OtherIncome,
}

impl Category {
    pub fn direction(&self) -> Direction {
        match self {
            Self::Groceries
            | Self::Transport
            | Self::Entertainment
            | Self::Clothing
            | Self::Health
            | Self::Utilities
            | Self::OtherExpense => Direction::Expense,
            Self::Salary | Self::SideJob | Self::OtherIncome => Direction::Income,
        }
    }

    /// The fallback bucket that matches when nothing else does.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::OtherExpense | Self::OtherIncome)
    }

    /// Russian display label, as the ledger collaborator shows it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Groceries => "Продукты питания",
            Self::Transport => "Транспорт",
            Self::Entertainment => "Развлечения",
            Self::Clothing => "Одежда",
            Self::Health => "Здоровье/медицина",
            Self::Utilities => "Коммунальные услуги",
            Self::OtherExpense => "Прочие расходы",
            Self::Salary => "Зарплата",
            Self::SideJob => "Подработка",
            Self::OtherIncome => "Прочие доходы",
        }
    }
}

/// Expense categories with their trigger stems, in tie-break priority order.
///
/// Specific categories come first; the Other bucket closes the list with an
/// empty stem set and wins only when every other score is zero.
const EXPENSE_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Health,
        &[
            "аптек",
            "лекарств",
            "врач",
            "больниц",
            "поликлиник",
            "стоматолог",
            "анализ",
            "медицин",
            "таблетк",
            "витамин",
            "лечен",
            "прививк",
        ],
    ),
    (
        Category::Utilities,
        &[
            "коммунал",
            "жкх",
            "электричеств",
            "газ",
            "вода",
            "воду",
            "интернет",
            "телефон",
            "квартплат",
            "аренд",
            "отоплен",
        ],
    ),
    (
        Category::Transport,
        &[
            "такси",
            "автобус",
            "метро",
            "транспорт",
            "бензин",
            "топлив",
            "заправк",
            "проезд",
            "билет",
            "поезд",
            "электричк",
            "трамва",
            "троллейбус",
            "парковк",
            "убер",
            "uber",
            "taxi",
        ],
    ),
    (
        Category::Clothing,
        &[
            "одежд",
            "обув",
            "куртк",
            "плать",
            "рубашк",
            "джинс",
            "костюм",
            "шорт",
            "футболк",
            "свитер",
            "пальто",
            "сапог",
            "кроссовк",
            "туфл",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "кино",
            "кинотеатр",
            "театр",
            "концерт",
            "бар",
            "клуб",
            "развлечен",
            "игр",
            "боулинг",
            "книг",
            "steam",
            "cinema",
        ],
    ),
    (
        Category::Groceries,
        &[
            "продукт",
            "еда",
            "еду",
            "ресторан",
            "кафе",
            "столов",
            "супермаркет",
            "пятёрочк",
            "пятерочк",
            "магнит",
            "перекрёсток",
            "ашан",
            "лента",
            "хлеб",
            "молоко",
            "мясо",
            "овощ",
            "фрукт",
            "кофе",
            "обед",
            "ужин",
            "завтрак",
            "пицц",
            "бургер",
            "grocery",
            "food",
        ],
    ),
    (Category::OtherExpense, &[]),
];

/// Income categories with their trigger stems, in tie-break priority order.
const INCOME_TABLE: &[(Category, &[&str])] = &[
    (Category::Salary, &["зарплат", "оклад", "получк", "зп"]),
    (
        Category::SideJob,
        &["подработк", "фриланс", "халтур", "заказ", "услуг", "проект"],
    ),
    (Category::OtherIncome, &[]),
];

/// Verbs and nouns that mark a message as income.
///
/// Any one of these flips the direction; they are matched as word prefixes,
/// so "получил" also covers "получила".
const INCOME_MARKERS: &[&str] = &[
    "зарплат",
    "доход",
    "подработк",
    "заработал",
    "получил",
    "пришло",
    "премия",
    "премию",
    "аванс",
    "фриланс",
];

/// Verbs that mark a message as an expense.
///
/// Expense is already the default direction; these only reinforce it and
/// count as financial context for unitless numbers.
const EXPENSE_MARKERS: &[&str] = &[
    "потрат",
    "купил",
    "заплат",
    "оплат",
    "покупк",
    "трат",
];

/// Read-only keyword configuration for the classifier and the extractor.
#[derive(Clone, Copy, Debug)]
pub struct Taxonomy {
    expense: &'static [(Category, &'static [&'static str])],
    income: &'static [(Category, &'static [&'static str])],
    income_markers: &'static [&'static str],
    expense_markers: &'static [&'static str],
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Taxonomy {
    /// The built-in tables above.
    pub const fn builtin() -> Self {
        Self {
            expense: EXPENSE_TABLE,
            income: INCOME_TABLE,
            income_markers: INCOME_MARKERS,
            expense_markers: EXPENSE_MARKERS,
        }
    }

    /// Categories of one direction with their stems, priority-ordered.
    pub fn categories(&self, direction: Direction) -> &'static [(Category, &'static [&'static str])] {
        match direction {
            Direction::Expense => self.expense,
            Direction::Income => self.income,
        }
    }

    /// The fallback bucket for a direction.
    pub fn other(&self, direction: Direction) -> Category {
        match direction {
            Direction::Expense => Category::OtherExpense,
            Direction::Income => Category::OtherIncome,
        }
    }

    pub fn income_markers(&self) -> &'static [&'static str] {
        self.income_markers
    }

    pub fn expense_markers(&self) -> &'static [&'static str] {
        self.expense_markers
    }

    pub fn has_income_marker(&self, text: &str) -> bool {
        self.income_markers
            .iter()
            .any(|stem| stem_occurrences(text, stem) > 0)
    }

    /// Whether the text shows any financial context at all: a direction
    /// marker or any category stem. Used to admit bare numbers that carry
    /// no currency unit.
    pub fn has_financial_keyword(&self, text: &str) -> bool {
        if self.has_income_marker(text) {
            return true;
        }
        if self
            .expense_markers
            .iter()
            .any(|stem| stem_occurrences(text, stem) > 0)
        {
            return true;
        }
        self.expense
            .iter()
            .chain(self.income.iter())
            .flat_map(|(_, stems)| stems.iter())
            .any(|stem| stem_occurrences(text, stem) > 0)
    }
}

/// Count the words of `text` that start with `stem`.
///
/// Word-prefix matching keeps the stems tolerant of Russian suffix
/// inflection ("зарплат" covers "зарплату") without firing inside unrelated
/// words ("газ" stays quiet in "магазин"). Punctuation around a word is
/// ignored. `text` is expected to be normalized (lowercase).
pub fn stem_occurrences(text: &str, stem: &str) -> usize {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty() && w.starts_with(stem))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stem_belongs_to_exactly_one_category() {
        let tax = Taxonomy::builtin();
        let mut seen: Vec<(&str, Category)> = Vec::new();
        for direction in [Direction::Expense, Direction::Income] {
            for (category, stems) in tax.categories(direction) {
                for stem in *stems {
                    if let Some((_, owner)) = seen.iter().find(|(s, _)| s == stem) {
                        panic!("stem {stem:?} owned by both {owner:?} and {category:?}");
                    }
                    seen.push((stem, *category));
                }
            }
        }
        assert!(!seen.is_empty());
    }

    #[test]
    fn priority_lists_cover_each_direction_once_with_other_last() {
        let tax = Taxonomy::builtin();
        for direction in [Direction::Expense, Direction::Income] {
            let table = tax.categories(direction);
            let mut cats: Vec<Category> = table.iter().map(|(c, _)| *c).collect();
            let last = *cats.last().unwrap();
            assert!(last.is_other());
            assert!(table.last().unwrap().1.is_empty());
            assert!(cats.iter().all(|c| c.direction() == direction));
            cats.sort_by_key(|c| *c as u8);
            cats.dedup();
            assert_eq!(cats.len(), table.len());
        }
    }

    #[test]
    fn stems_are_lowercase() {
        let tax = Taxonomy::builtin();
        for direction in [Direction::Expense, Direction::Income] {
            for (_, stems) in tax.categories(direction) {
                for stem in *stems {
                    assert_eq!(*stem, stem.to_lowercase());
                }
            }
        }
    }

    #[test]
    fn stem_matching_is_word_prefix_based() {
        assert_eq!(stem_occurrences("получил зарплату", "зарплат"), 1);
        assert_eq!(stem_occurrences("зашёл в магазин", "газ"), 0);
        assert_eq!(stem_occurrences("кофе, кофейня и чай", "кофе"), 2);
    }

    #[test]
    fn income_markers_cover_feminine_forms() {
        let tax = Taxonomy::builtin();
        assert!(tax.has_income_marker("получила перевод"));
        assert!(tax.has_income_marker("заработала вчера"));
        assert!(!tax.has_income_marker("потратил на обед"));
    }

    #[test]
    fn financial_keyword_check_sees_category_stems() {
        let tax = Taxonomy::builtin();
        assert!(tax.has_financial_keyword("на обед ушло 200"));
        assert!(!tax.has_financial_keyword("сегодня хорошая погода"));
    }

    #[test]
    fn labels_match_direction_partition() {
        assert_eq!(Category::Groceries.label(), "Продукты питания");
        assert_eq!(Category::Salary.direction(), Direction::Income);
        assert_eq!(Category::OtherExpense.direction(), Direction::Expense);
        assert!(Category::OtherIncome.is_other());
        assert!(!Category::Transport.is_other());
    }
}
