use serde::Deserialize;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Pipeline configuration, normally loaded from `roster.toml`.
///
/// Every header-candidate list defaults to the names used across past event
/// years, so a config only has to name its sheets; supporting a new
/// spreadsheet schema variant means adding a header string under
/// `[columns.*]`, never touching pipeline code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub sheets: SheetsConfig,
    pub columns: ColumnsConfig,
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Host serving the CSV export endpoint. Overridable for tests.
    pub base_url: String,
    pub assignments: Option<SheetRef>,
    pub sites: Option<SheetRef>,
    /// Signup-form sheet; optional — `sync` skips it when absent.
    pub signups: Option<SheetRef>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com".into(),
            assignments: None,
            sites: None,
            signups: None,
        }
    }
}

/// One worksheet within a hosted spreadsheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetRef {
    pub sheet_id: String,
    #[serde(default = "default_gid")]
    pub gid: String,
}

fn default_gid() -> String {
    "0".into()
}

// ---------------------------------------------------------------------------
// Column candidates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub assignments: AssignmentColumns,
    pub sites: SiteColumns,
    pub signups: SignupColumns,
}

/// Ordered candidate header names per canonical assignment field. List order
/// encodes priority among historical names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssignmentColumns {
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub site: Vec<String>,
    pub group: Vec<String>,
    pub crew_leader: Vec<String>,
}

impl Default for AssignmentColumns {
    fn default() -> Self {
        Self {
            first: names(&["First name", "First Name", "first"]),
            last: names(&["Last name", "Last Name", "last"]),
            site: names(&["Site", "site"]),
            group: names(&["Organization/RSO", "Organization", "RSO", "group"]),
            // "Delegate" marked the crew leader in earlier event years
            crew_leader: names(&["Delegate", "Crew Leader", "crew leader", "crew"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteColumns {
    pub name: Vec<String>,
    pub address: Vec<String>,
    pub tasks: Vec<String>,
    pub volunteers: Vec<String>,
    pub notes: Vec<String>,
    pub contact_name: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
    pub public_description: Vec<String>,
    pub bio: Vec<String>,
}

impl Default for SiteColumns {
    fn default() -> Self {
        Self {
            name: names(&["Site Name", "Service Site Name", "Name", "name"]),
            address: names(&["Site Address", "Address", "address"]),
            tasks: names(&["Tasks That Will Be Performed", "Tasks", "Task(s)", "tasks"]),
            volunteers: names(&[
                "Volunteer Count",
                "Volunteers",
                "Volunteers Needed",
                "# Volunteers",
                "volunteer count",
            ]),
            notes: names(&["Special Notes", "Notes", "notes", "Additional Notes"]),
            contact_name: names(&["Contact Name", "contact name", "Contact"]),
            email: names(&["Email", "email", "Contact Email"]),
            phone: names(&["Phone Number", "Phone", "phone", "Contact Phone"]),
            public_description: names(&[
                "Task Performed Text Entry",
                "Work Description",
                "Public Description",
                "Description",
            ]),
            bio: names(&["Bio", "Organization Bio", "About the Organization", "About"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignupColumns {
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
    pub preferred_org: Vec<String>,
    pub timestamp: Vec<String>,
}

impl Default for SignupColumns {
    fn default() -> Self {
        Self {
            first: names(&["First Name", "First name", "first"]),
            last: names(&["Last Name", "Last name", "last"]),
            email: names(&["Email", "email"]),
            phone: names(&["Phone", "phone"]),
            preferred_org: names(&["Preferred Organization", "preferred organization"]),
            timestamp: names(&["Timestamp", "timestamp"]),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub assignments: String,
    pub sites: String,
    pub signups: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            assignments: "assignments.json".into(),
            sites: "sites.json".into(),
            signups: "signups.json".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SyncConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let config: SyncConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.sheets.base_url.trim().is_empty() {
            return Err(PipelineError::ConfigValidation(
                "sheets.base_url must not be empty".into(),
            ));
        }

        for (label, sheet) in [
            ("assignments", &self.sheets.assignments),
            ("sites", &self.sheets.sites),
            ("signups", &self.sheets.signups),
        ] {
            if let Some(sheet) = sheet {
                if sheet.sheet_id.trim().is_empty() {
                    return Err(PipelineError::ConfigValidation(format!(
                        "sheets.{label}.sheet_id must not be empty"
                    )));
                }
            }
        }

        // Required fields must keep at least one candidate header name;
        // without any the resolver could never accept a single row.
        let required: [(&str, &[String]); 6] = [
            ("columns.assignments.first", &self.columns.assignments.first),
            ("columns.assignments.last", &self.columns.assignments.last),
            ("columns.assignments.site", &self.columns.assignments.site),
            ("columns.sites.name", &self.columns.sites.name),
            ("columns.signups.first", &self.columns.signups.first),
            ("columns.signups.last", &self.columns.signups.last),
        ];
        for (label, candidates) in required {
            if candidates.is_empty() {
                return Err(PipelineError::ConfigValidation(format!(
                    "{label} needs at least one candidate header name"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
