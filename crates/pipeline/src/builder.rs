use crate::coerce::{clean_phone, clean_string, coerce_volunteer_count, slugify};
use crate::config::{AssignmentColumns, SignupColumns, SiteColumns};
use crate::error::PipelineError;
use crate::key::normalize_key;
use crate::model::{Assignment, BuildStats, RosterTable, Row, Signup, Site};
use crate::resolve::{any_candidate_matches, resolve};

// ---------------------------------------------------------------------------
// Dataset-level schema check
// ---------------------------------------------------------------------------

/// Refuse to build when a required field has no matching column anywhere in
/// the dataset — every row would fail its required-field check and the run
/// would silently emit an empty artifact. An empty dataset is fine (blank
/// sheets happen); a populated one with no resolvable required column is a
/// configuration problem.
fn require_columns(rows: &[Row], required: &[(&str, &[String])]) -> Result<(), PipelineError> {
    if rows.is_empty() {
        return Ok(());
    }
    let headers: Vec<&str> = rows.iter().flat_map(Row::headers).collect();
    for (field, candidates) in required {
        if !any_candidate_matches(headers.iter().copied(), candidates) {
            return Err(PipelineError::MissingColumn {
                field: (*field).to_string(),
                candidates: candidates.to_vec(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// Build the volunteer → assignment table. Rows missing `first`, `last`, or
/// `site` are skipped and counted — attendance sheets routinely end in blank
/// rows. Identity-key collisions fold into ordered lists, never fail.
pub fn build_assignments(
    rows: &[Row],
    columns: &AssignmentColumns,
) -> Result<(RosterTable<Assignment>, BuildStats), PipelineError> {
    require_columns(
        rows,
        &[
            ("first", &columns.first),
            ("last", &columns.last),
            ("site", &columns.site),
        ],
    )?;

    let mut table = RosterTable::new();
    let mut stats = BuildStats {
        rows_read: rows.len(),
        ..BuildStats::default()
    };

    for row in rows {
        let first = clean_string(resolve(row, &columns.first));
        let last = clean_string(resolve(row, &columns.last));
        let site = clean_string(resolve(row, &columns.site));

        if first.is_empty() || last.is_empty() || site.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let key = normalize_key(first, last);
        table.insert(
            key,
            Assignment {
                first: first.to_string(),
                last: last.to_string(),
                site: site.to_string(),
                group: clean_string(resolve(row, &columns.group)).to_string(),
                crew_leader: clean_string(resolve(row, &columns.crew_leader)).to_string(),
            },
        );
        stats.accepted += 1;
    }

    stats.duplicate_keys = table.duplicate_keys();
    Ok((table, stats))
}

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

/// Build the service-site list. Rows with an empty name are skipped. The
/// `site_id` sequence counts accepted sites only, so it reflects processing
/// order — not a stable external identifier.
pub fn build_sites(
    rows: &[Row],
    columns: &SiteColumns,
) -> Result<(Vec<Site>, BuildStats), PipelineError> {
    require_columns(rows, &[("name", &columns.name)])?;

    let mut sites = Vec::new();
    let mut stats = BuildStats {
        rows_read: rows.len(),
        ..BuildStats::default()
    };

    for row in rows {
        let name = clean_string(resolve(row, &columns.name));
        if name.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let site_id = format!("{:03}-{}", sites.len() + 1, slugify(name));
        sites.push(Site {
            site_id,
            name: name.to_string(),
            address: clean_string(resolve(row, &columns.address)).to_string(),
            tasks: clean_string(resolve(row, &columns.tasks)).to_string(),
            volunteers: coerce_volunteer_count(resolve(row, &columns.volunteers)),
            notes: clean_string(resolve(row, &columns.notes)).to_string(),
            contact_name: clean_string(resolve(row, &columns.contact_name)).to_string(),
            email: clean_string(resolve(row, &columns.email)).to_string(),
            phone: clean_phone(resolve(row, &columns.phone)).to_string(),
            public_description: clean_string(resolve(row, &columns.public_description))
                .to_string(),
            bio: clean_string(resolve(row, &columns.bio)).to_string(),
        });
        stats.accepted += 1;
    }

    Ok((sites, stats))
}

// ---------------------------------------------------------------------------
// Signups
// ---------------------------------------------------------------------------

/// Build the signup table from a registration-form export. Same key and
/// merge semantics as assignments over different columns.
pub fn build_signups(
    rows: &[Row],
    columns: &SignupColumns,
) -> Result<(RosterTable<Signup>, BuildStats), PipelineError> {
    require_columns(rows, &[("first", &columns.first), ("last", &columns.last)])?;

    let mut table = RosterTable::new();
    let mut stats = BuildStats {
        rows_read: rows.len(),
        ..BuildStats::default()
    };

    for row in rows {
        let first = clean_string(resolve(row, &columns.first));
        let last = clean_string(resolve(row, &columns.last));

        if first.is_empty() || last.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let key = normalize_key(first, last);
        table.insert(
            key,
            Signup {
                first: first.to_string(),
                last: last.to_string(),
                email: clean_string(resolve(row, &columns.email)).to_string(),
                phone: clean_phone(resolve(row, &columns.phone)).to_string(),
                preferred_org: clean_string(resolve(row, &columns.preferred_org)).to_string(),
                timestamp: clean_string(resolve(row, &columns.timestamp)).to_string(),
            },
        );
        stats.accepted += 1;
    }

    stats.duplicate_keys = table.duplicate_keys();
    Ok((table, stats))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RosterEntry;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn blank_required_fields_skip_the_row() {
        let rows = vec![
            row(&[("First name", "Ann"), ("Last name", "Lee"), ("Site", "Park")]),
            row(&[("First name", ""), ("Last name", "Lee"), ("Site", "Park")]),
            row(&[("First name", "Bo"), ("Last name", "Kim"), ("Site", "")]),
            row(&[("First name", "nan"), ("Last name", "nan"), ("Site", "Park")]),
        ];
        let (table, stats) =
            build_assignments(&rows, &AssignmentColumns::default()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn group_defaults_empty_when_column_absent() {
        let rows = vec![row(&[
            ("First name", "Ann"),
            ("Last name", "Lee"),
            ("Site", "Park"),
        ])];
        let (table, _) = build_assignments(&rows, &AssignmentColumns::default()).unwrap();
        match table.get("annlee").unwrap() {
            RosterEntry::Single(a) => {
                assert_eq!(a.group, "");
                assert_eq!(a.crew_leader, "");
            }
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn delegate_outranks_crew_leader_column() {
        let rows = vec![row(&[
            ("First name", "Ann"),
            ("Last name", "Lee"),
            ("Site", "Park"),
            ("Delegate", "Sam"),
            ("Crew Leader", "Riley"),
        ])];
        let (table, _) = build_assignments(&rows, &AssignmentColumns::default()).unwrap();
        match table.get("annlee").unwrap() {
            RosterEntry::Single(a) => assert_eq!(a.crew_leader, "Sam"),
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn same_key_different_sites_preserves_input_order() {
        let rows = vec![
            row(&[("First name", "Ann"), ("Last name", "Lee"), ("Site", "Park")]),
            row(&[("First name", "ann"), ("Last name", "lee"), ("Site", "Shelter")]),
        ];
        let (table, stats) =
            build_assignments(&rows, &AssignmentColumns::default()).unwrap();

        assert_eq!(stats.duplicate_keys, 1);
        match table.get("annlee").unwrap() {
            RosterEntry::Multiple(records) => {
                assert_eq!(records[0].site, "Park");
                assert_eq!(records[1].site, "Shelter");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let rows = vec![row(&[("First name", "Ann"), ("Last name", "Lee")])];
        let err = build_assignments(&rows, &AssignmentColumns::default()).unwrap_err();
        match err {
            PipelineError::MissingColumn { field, .. } => assert_eq!(field, "site"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn empty_dataset_is_not_a_schema_error() {
        let (table, stats) = build_assignments(&[], &AssignmentColumns::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(stats, BuildStats::default());
    }

    #[test]
    fn site_ids_sequence_accepted_rows_only() {
        let rows = vec![
            row(&[("Service Site Name", "Food Bank"), ("Volunteer Count", "")]),
            row(&[("Service Site Name", ""), ("Volunteer Count", "10")]),
            row(&[("Service Site Name", "St. Mary's Food Bank!"), ("Volunteer Count", "12.0")]),
        ];
        let (sites, stats) = build_sites(&rows, &SiteColumns::default()).unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].site_id, "001-food-bank");
        assert_eq!(sites[0].volunteers, 0);
        assert_eq!(sites[1].site_id, "002-st-mary-s-food-bank");
        assert_eq!(sites[1].volunteers, 12);
    }

    #[test]
    fn earlier_event_year_site_headers_resolve() {
        // The registration-form export era used wordier headers; the
        // default candidate lists must still fill every field from them.
        let rows = vec![row(&[
            ("Site Name", "Food Bank"),
            ("Contact Name", "Pat Ruiz"),
            ("Phone Number", "5551234567.0"),
            ("Contact Email", "pat@example.org"),
            ("Site Address", "9 Depot St"),
            ("Tasks That Will Be Performed", "Sorting"),
            ("Task Performed Text Entry", "Sort donations"),
            ("Special Notes", "bring gloves"),
            ("Volunteers Needed", "12.0"),
            ("Organization Bio", "Founded 1982"),
        ])];
        let (sites, _) = build_sites(&rows, &SiteColumns::default()).unwrap();
        let site = &sites[0];

        assert_eq!(site.site_id, "001-food-bank");
        assert_eq!(site.contact_name, "Pat Ruiz");
        assert_eq!(site.phone, "5551234567");
        assert_eq!(site.email, "pat@example.org");
        assert_eq!(site.address, "9 Depot St");
        assert_eq!(site.tasks, "Sorting");
        assert_eq!(site.public_description, "Sort donations");
        assert_eq!(site.notes, "bring gloves");
        assert_eq!(site.volunteers, 12);
        assert_eq!(site.bio, "Founded 1982");
    }

    #[test]
    fn site_phone_loses_float_artifact() {
        let rows = vec![row(&[
            ("Service Site Name", "Food Bank"),
            ("Phone", "5551234567.0"),
        ])];
        let (sites, _) = build_sites(&rows, &SiteColumns::default()).unwrap();
        assert_eq!(sites[0].phone, "5551234567");
    }

    #[test]
    fn sites_are_never_deduplicated() {
        let rows = vec![
            row(&[("Service Site Name", "Food Bank")]),
            row(&[("Service Site Name", "Food Bank")]),
        ];
        let (sites, _) = build_sites(&rows, &SiteColumns::default()).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].site_id, "001-food-bank");
        assert_eq!(sites[1].site_id, "002-food-bank");
    }

    #[test]
    fn signups_merge_like_assignments() {
        let rows = vec![
            row(&[
                ("First Name", "Jo-Ann"),
                ("Last Name", "O'Neil"),
                ("Email", "jo@example.org"),
                ("Phone", "5551234567.0"),
            ]),
            row(&[
                ("First Name", "joann"),
                ("Last Name", "oneil"),
                ("Email", "joann@example.org"),
            ]),
        ];
        let (table, stats) = build_signups(&rows, &SignupColumns::default()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(stats.duplicate_keys, 1);
        match table.get("joannoneil").unwrap() {
            RosterEntry::Multiple(records) => {
                assert_eq!(records[0].phone, "5551234567");
                assert_eq!(records[1].email, "joann@example.org");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }
}
