//! Split summaries.

use console::{Term, style};
use fob_split::{PackageKind, PlanDocument};

/// Render a group list the way reachability sets are written: `{a, b}`.
///
/// ```
/// use fob_split_cli::ui::format_groups;
///
/// assert_eq!(format_groups(&["editor", "main"]), "{editor, main}");
/// assert_eq!(format_groups::<&str>(&[]), "{}");
/// ```
pub fn format_groups<S: AsRef<str>>(groups: &[S]) -> String {
    let names: Vec<&str> = groups.iter().map(AsRef::as_ref).collect();
    format!("{{{}}}", names.join(", "))
}

fn kind_label(kind: PackageKind) -> &'static str {
    match kind {
        PackageKind::Root => "root",
        PackageKind::Group => "group",
        PackageKind::Common => "common",
    }
}

/// Print the package table of a plan to stdout.
pub fn print_split_summary(document: &PlanDocument) {
    let term = Term::stdout();
    let width = document
        .packages
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0);

    let _ = term.write_line(&format!(
        "{} ({} packages, root group {})",
        style("Packages").bold(),
        document.packages.len(),
        style(&document.root_group).cyan()
    ));

    for package in &document.packages {
        let _ = term.write_line(&format!(
            "  {:<width$}  {:<6}  {:>4} modules  {}",
            package.name,
            kind_label(package.kind),
            package.module_count,
            style(format_groups(&package.groups)).dim(),
        ));
    }

    if !document.dropped.is_empty() {
        let _ = term.write_line(&format!(
            "{} {} unreachable module(s) dropped",
            style("Dropped").bold(),
            document.dropped.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(kind_label(PackageKind::Root), "root");
        assert_eq!(kind_label(PackageKind::Common), "common");
    }
}
