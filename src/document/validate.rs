use itertools::Itertools;

use crate::catalog::Catalog;
use crate::error::ValidationIssue;
use crate::game_types::{ManeuverName, Tolerances};

use super::convert::PlaneDocument;

impl PlaneDocument {
    /// Checks maneuver names and tolerances. Returns every problem found, in
    /// row order, with duplicate names listed last.
    pub fn validate(&self, catalog: &Catalog) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (row, maneuver) in self.maneuvers.iter().enumerate() {
            let name = ManeuverName::from(maneuver.name.as_str());
            if !name.is_well_formed() {
                issues.push(ValidationIssue::MalformedName {
                    row,
                    name: maneuver.name.clone(),
                });
            } else if !catalog.contains(name.as_str()) {
                issues.push(ValidationIssue::NotInCatalog {
                    row,
                    name: maneuver.name.clone(),
                });
            }

            match Tolerances::parse_strict(&maneuver.tolerances) {
                Some(tolerances) => {
                    issues.extend(tolerances.out_of_range().map(|value| {
                        ValidationIssue::ToleranceOutOfRange {
                            row,
                            name: maneuver.name.clone(),
                            value,
                        }
                    }));
                }
                None => issues.push(ValidationIssue::MalformedTolerances {
                    row,
                    name: maneuver.name.clone(),
                    raw: maneuver.tolerances.clone(),
                }),
            }
        }

        issues.extend(
            self.maneuvers
                .iter()
                .map(|m| m.name.as_str())
                .duplicates()
                .map(|name| ValidationIssue::DuplicateName {
                    name: name.to_string(),
                }),
        );

        issues
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::convert::ManeuverDocument;

    fn maneuver(name: &str, tolerances: &str) -> ManeuverDocument {
        ManeuverDocument {
            name: name.to_string(),
            tolerances: tolerances.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn clean_document() {
        let document = PlaneDocument {
            maneuvers: vec![maneuver("11L2", "2/0/1"), maneuver("3S2", "0/0/0")],
            ..Default::default()
        };
        assert!(document.validate(&Catalog::master()).is_empty());
    }

    #[test]
    fn every_issue_is_reported() {
        let document = PlaneDocument {
            maneuvers: vec![
                maneuver("L2", "2/0/1"),
                maneuver("11L2", "2/0"),
                maneuver("3S2", "0/12/0"),
                maneuver("11L2", "2/0/1"),
                maneuver("99S2", "1/1/1"),
            ],
            ..Default::default()
        };
        let issues = document.validate(&Catalog::master());
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MalformedName {
                    row: 0,
                    name: "L2".to_string()
                },
                ValidationIssue::MalformedTolerances {
                    row: 1,
                    name: "11L2".to_string(),
                    raw: "2/0".to_string()
                },
                ValidationIssue::ToleranceOutOfRange {
                    row: 2,
                    name: "3S2".to_string(),
                    value: 12
                },
                ValidationIssue::NotInCatalog {
                    row: 4,
                    name: "99S2".to_string()
                },
                ValidationIssue::DuplicateName {
                    name: "11L2".to_string()
                },
            ]
        );
    }
}
