//! Plain-text rendering of duplicate reports.

use admitlens_contracts::duplicate::{CompositeKey, DuplicateReport, ExactKey};

/// One-line display form of a grouping key. Absent components print as `-`.
pub trait KeyLabel {
    fn key_label(&self) -> String;
}

fn component(part: &Option<String>) -> &str {
    part.as_deref().unwrap_or("-")
}

impl KeyLabel for ExactKey {
    fn key_label(&self) -> String {
        component(&self.0).to_string()
    }
}

impl KeyLabel for CompositeKey {
    fn key_label(&self) -> String {
        [&self.name, &self.day, &self.hospital, &self.room]
            .into_iter()
            .map(component)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub fn header(collection: &str, count: usize) {
    println!();
    println!("Collection: {collection} | Records: {count}");
}

pub fn duplicate_report<K: KeyLabel>(title: &str, report: &DuplicateReport<K>) {
    println!();
    println!("{title}");
    println!("{}", "=".repeat(title.len()));

    if let Some(advisory) = &report.advisory {
        println!("WARNING: {advisory}");
    }

    if report.is_clean() {
        println!("No duplicates found.");
        return;
    }

    println!(
        "Duplicate keys: {} (showing {})",
        report.total_groups,
        report.shown()
    );
    for group in &report.groups {
        println!("  [{}] {}", group.count, group.key.key_label());
    }
    if report.truncated {
        println!(
            "  ... {} more not shown",
            report.total_groups - report.shown()
        );
    }
}
