//! Canonical JSON artifact serialization.
//!
//! Output text is stable for identical input ordering — artifacts are
//! diffed between pipeline runs. Member order inside each record follows
//! struct declaration order; table keys serialize in insertion order.

use crate::model::{Assignment, RosterTable, Signup, Site};

/// The assignments artifact: an object keyed by identity key; each value is
/// a single Assignment object or an array of colliding Assignments.
pub fn assignments_json(table: &RosterTable<Assignment>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}

/// The sites artifact: an array of Site objects in insertion order.
pub fn sites_json(sites: &[Site]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(sites)
}

/// The signups artifact: same shape as assignments over Signup records.
pub fn signups_json(table: &RosterTable<Signup>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_collision() -> RosterTable<Assignment> {
        let mut table = RosterTable::new();
        for (first, site) in [("Ann", "Park"), ("ann", "Shelter")] {
            table.insert(
                "annlee".into(),
                Assignment {
                    first: first.into(),
                    last: "Lee".into(),
                    site: site.into(),
                    group: String::new(),
                    crew_leader: String::new(),
                },
            );
        }
        table
    }

    #[test]
    fn assignment_field_order_is_declaration_order() {
        let mut table = RosterTable::new();
        table.insert(
            "annlee".into(),
            Assignment {
                first: "Ann".into(),
                last: "Lee".into(),
                site: "Park".into(),
                group: "Choir".into(),
                crew_leader: "Sam".into(),
            },
        );
        let json = assignments_json(&table).unwrap();

        let order: Vec<usize> = ["\"first\"", "\"last\"", "\"site\"", "\"group\"", "\"crewLeader\""]
            .iter()
            .map(|f| json.find(f).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted, "fields must serialize in declaration order");
    }

    #[test]
    fn collided_key_serializes_as_array() {
        let json = assignments_json(&table_with_collision()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value["annlee"];
        assert!(entry.is_array());
        assert_eq!(entry[0]["site"], "Park");
        assert_eq!(entry[1]["site"], "Shelter");
    }

    #[test]
    fn repeated_serialization_is_byte_identical() {
        let table = table_with_collision();
        assert_eq!(
            assignments_json(&table).unwrap(),
            assignments_json(&table).unwrap()
        );
    }

    #[test]
    fn sites_artifact_is_ordered_array() {
        let sites = vec![
            Site {
                site_id: "001-food-bank".into(),
                name: "Food Bank".into(),
                address: String::new(),
                tasks: String::new(),
                volunteers: 0,
                notes: String::new(),
                contact_name: String::new(),
                email: String::new(),
                phone: String::new(),
                public_description: String::new(),
                bio: String::new(),
            },
        ];
        let json = sites_json(&sites).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["siteId"], "001-food-bank");
        assert_eq!(value[0]["volunteers"], 0);
    }

    #[test]
    fn signup_fields_use_camel_case() {
        let mut table = RosterTable::new();
        table.insert(
            "annlee".into(),
            Signup {
                first: "Ann".into(),
                last: "Lee".into(),
                email: "ann@example.org".into(),
                phone: String::new(),
                preferred_org: "Choir".into(),
                timestamp: String::new(),
            },
        );
        let json = signups_json(&table).unwrap();
        assert!(json.contains("\"preferredOrg\""));
    }
}
