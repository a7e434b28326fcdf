use crate::dto::RawResult;

/// Resolves a roster name to one of a division's results.
pub trait MatchStrategy: Send + Sync {
    fn find<'a>(&self, player: &str, results: &'a [RawResult]) -> Option<&'a RawResult>;
}

pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

fn exact<'a>(target: &str, results: &'a [RawResult]) -> Option<&'a RawResult> {
    results.iter().find(|r| normalize_name(&r.name) == target)
}

/// Full name only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn find<'a>(&self, player: &str, results: &'a [RawResult]) -> Option<&'a RawResult> {
        exact(&normalize_name(player), results)
    }
}

/// Full name first, then `"first last"` containing or contained in the roster
/// name. First hit in list order wins, so ambiguous rosters are not caught.
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzyMatch;

impl MatchStrategy for FuzzyMatch {
    fn find<'a>(&self, player: &str, results: &'a [RawResult]) -> Option<&'a RawResult> {
        let target = normalize_name(player);
        if target.is_empty() {
            return None;
        }
        exact(&target, results).or_else(|| {
            results.iter().find(|r| {
                let combined = format!("{} {}", normalize_name(&r.first_name), normalize_name(&r.last_name));
                // a blank first and last name would be contained in every target
                !combined.trim().is_empty() && (combined.contains(&target) || target.contains(&combined))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, first: &str, last: &str) -> RawResult {
        RawResult {
            name: name.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            place: 1,
            to_par: 0,
            total: 54,
            completed: true,
        }
    }

    #[test]
    fn exact_name_ignores_case_and_whitespace() {
        let results = vec![raw("Alice A", "Alice", "A")];
        let found = FuzzyMatch.find("  alice a ", &results).unwrap();
        assert_eq!(found.name, "Alice A");
        assert!(ExactMatch.find("ALICE A", &results).is_some());
    }

    #[test]
    fn containment_both_ways() {
        let results = vec![raw("Anneli Tougjas-Manniste", "Anneli", "Tougjas")];
        assert!(FuzzyMatch.find("Anneli Tougjas Manniste", &results).is_some());
        assert!(ExactMatch.find("Anneli Tougjas Manniste", &results).is_none());

        let results = vec![raw("Paul McBeth Jr", "Paul", "McBeth Jr")];
        assert!(FuzzyMatch.find("Paul McBeth", &results).is_some());
    }

    #[test]
    fn initial_does_not_match_first_name() {
        let results = vec![raw("Amy Smith", "Amy", "Smith")];
        assert!(FuzzyMatch.find("A. Smith", &results).is_none());
    }

    #[test]
    fn exact_beats_earlier_containment() {
        let results = vec![raw("Ezra Robinson Sr", "Ezra", "Robinson Sr"), raw("Ezra Robinson", "Ezra", "Robinson")];
        let found = FuzzyMatch.find("Ezra Robinson", &results).unwrap();
        assert_eq!(found.name, "Ezra Robinson");
    }

    #[test]
    fn first_containment_wins() {
        let results = vec![raw("Isaac Robinson", "Isaac", "Robinson"), raw("Ezra Robinson", "Ezra", "Robinson")];
        let found = FuzzyMatch.find("Robinson", &results).unwrap();
        assert_eq!(found.name, "Isaac Robinson");
    }

    #[test]
    fn blank_names_never_match() {
        let results = vec![raw("", "", "")];
        assert!(FuzzyMatch.find("Gannon Buhr", &results).is_none());
        assert!(FuzzyMatch.find("", &[raw("Gannon Buhr", "Gannon", "Buhr")]).is_none());
    }

    #[test]
    fn not_in_field() {
        assert!(FuzzyMatch.find("Gannon Buhr", &[]).is_none());
    }
}
