//! Direction and category classification over normalized text.

use crate::{
    extract::SignHint,
    taxonomy::{stem_occurrences, Category, Direction, Taxonomy},
};

/// Decide direction and category for a message.
///
/// Never fails: a message with no category signal lands in the direction's
/// Other bucket.
pub fn classify(text: &str, sign: SignHint, taxonomy: &Taxonomy) -> (Direction, Category) {
    let direction = direction_of(text, sign, taxonomy);
    (direction, pick_category(text, direction, taxonomy))
}

/// Ordered direction rules, first match wins:
/// an explicit `+` on the amount, then any income marker, then the expense
/// default. Expense verbs reinforce the default but are never required.
fn direction_of(text: &str, sign: SignHint, taxonomy: &Taxonomy) -> Direction {
    if sign == SignHint::Plus {
        return Direction::Income;
    }
    if taxonomy.has_income_marker(text) {
        return Direction::Income;
    }
    Direction::Expense
}

/// Score every category of the direction by stem occurrences and take the
/// best one. Ties break toward the earlier entry of the priority table, so
/// the outcome is deterministic; a zero-score message falls through to the
/// Other bucket that closes the table.
fn pick_category(text: &str, direction: Direction, taxonomy: &Taxonomy) -> Category {
    let mut best: Option<(Category, usize)> = None;

    for (category, stems) in taxonomy.categories(direction) {
        let score: usize = stems.iter().map(|stem| stem_occurrences(text, stem)).sum();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((*category, score)),
        }
    }

    match best {
        Some((category, _)) => category,
        None => taxonomy.other(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax() -> Taxonomy {
        Taxonomy::builtin()
    }

    #[test]
    fn expense_is_the_default_direction() {
        let (d, c) = classify("такси 300 рублей", SignHint::None, &tax());
        assert_eq!(d, Direction::Expense);
        assert_eq!(c, Category::Transport);
    }

    #[test]
    fn plus_sign_forces_income() {
        let (d, c) = classify("10000 руб премия", SignHint::Plus, &tax());
        assert_eq!(d, Direction::Income);
        assert_eq!(c, Category::OtherIncome);
    }

    #[test]
    fn income_marker_beats_expense_default() {
        let (d, c) = classify("получил зарплату 50000 руб", SignHint::None, &tax());
        assert_eq!(d, Direction::Income);
        assert_eq!(c, Category::Salary);
    }

    #[test]
    fn highest_stem_count_wins() {
        // One transport stem against two grocery stems.
        let (_, c) = classify(
            "купил хлеб и молоко по дороге на автобус",
            SignHint::None,
            &tax(),
        );
        assert_eq!(c, Category::Groceries);
    }

    #[test]
    fn ties_break_by_priority_order() {
        // "билет" (Transport) and "кино" (Entertainment) score one each;
        // Transport sits earlier in the priority table.
        let (_, c) = classify("билет в кино", SignHint::None, &tax());
        assert_eq!(c, Category::Transport);
    }

    #[test]
    fn no_signal_falls_back_to_other() {
        let (d, c) = classify("потратил 500 на всякое", SignHint::None, &tax());
        assert_eq!(d, Direction::Expense);
        assert_eq!(c, Category::OtherExpense);

        let (d, c) = classify("получил 3000 от брата", SignHint::None, &tax());
        assert_eq!(d, Direction::Income);
        assert_eq!(c, Category::OtherIncome);
    }

    #[test]
    fn income_categories_ignore_expense_stems() {
        // Direction is income, so grocery stems cannot attract the message.
        let (d, c) = classify("получил деньги за продукты", SignHint::None, &tax());
        assert_eq!(d, Direction::Income);
        assert_eq!(c, Category::OtherIncome);
    }
}
