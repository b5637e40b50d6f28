//! Per-role factor resolution.

use log::debug;

use crate::domain::{FactorLookup, FactorTable};

/// Factor stored for `role`, or `0.0` when the table has no entry.
///
/// Unknown roles are expected (tables come from independent sources), so a
/// miss is neutral rather than an error.
pub fn resolve_factor(table: &FactorTable, role: &str) -> f64 {
    let lookup = table.lookup(role);
    if lookup == FactorLookup::Unavailable {
        debug!("No factor for role '{role}'; using neutral 0.0.");
    }
    lookup.or_neutral()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FactorTable {
        [("Data Analyst", 0.1), ("Data Scientist", 0.12), ("Archivist", 0.0), ("Typist", -0.2)]
            .into_iter()
            .collect()
    }

    #[test]
    fn present_roles_return_stored_value() {
        let t = table();
        assert_eq!(resolve_factor(&t, "Data Analyst"), 0.1);
        assert_eq!(resolve_factor(&t, "Data Scientist"), 0.12);
        assert_eq!(resolve_factor(&t, "Typist"), -0.2);
    }

    #[test]
    fn absent_roles_are_neutral() {
        let t = table();
        assert_eq!(resolve_factor(&t, "Data Engineer"), 0.0);
        assert_eq!(resolve_factor(&FactorTable::new(), "Data Analyst"), 0.0);
    }

    #[test]
    fn stored_zero_is_present_not_missing() {
        let t = table();
        assert_eq!(t.lookup("Archivist"), FactorLookup::Present(0.0));
        assert_eq!(t.lookup("Nobody"), FactorLookup::Unavailable);
    }

    #[test]
    fn matching_is_exact() {
        let t = table();
        assert_eq!(resolve_factor(&t, "data analyst"), 0.0);
        assert_eq!(resolve_factor(&t, "Data Analyst "), 0.0);
    }

    #[test]
    fn first_entry_wins_on_duplicates() {
        let t: FactorTable = [("Data Analyst", 0.1), ("Data Analyst", 0.9)].into_iter().collect();
        assert_eq!(resolve_factor(&t, "Data Analyst"), 0.1);
    }
}
