/// The known category set. The store accepts any label; membership here is
/// enforced by the application service before a transaction is recorded.
/// Theme palettes carry a color assignment for each of these.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Education",
    "Salary",
    "Investment",
    "Other",
];

pub fn is_known_category(label: &str) -> bool {
    KNOWN_CATEGORIES.contains(&label)
}
