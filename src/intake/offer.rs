//! Single-section offer wizard.

use serde::Serialize;

use crate::errors::IntakeError;
use crate::intake::fields::{
    parse_count, parse_score, parse_year, FieldDescriptor, FieldErrors, FieldKind,
    SectionDescriptor, ValidationError, Validator,
};
use crate::intake::identity::Identity;
use crate::intake::wizard::WizardFlow;

pub const DRIVE_OPTIONS: [&str; 2] = ["on campus", "off campus"];
pub const TYPE_OPTIONS: [&str; 3] = ["internship", "placement", "internship and placement"];
pub const SECTOR_OPTIONS: [&str; 3] = ["IT", "Core", "Management"];

const STEPS: [&str; 1] = ["details"];
const SECTION: &str = "details";

const KEYS: [&str; 14] = [
    "company",
    "role",
    "location",
    "total_opening",
    "drive",
    "type",
    "sector",
    "salary_min",
    "salary_max",
    "min_result",
    "max_backlog",
    "passout_years",
    "branch",
    "skills",
];

const CRITERIA_KEYS: [&str; 4] = ["min_result", "max_backlog", "passout_years", "branch"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferPayload {
    pub company: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub total_opening: u32,
    pub drive: String,
    #[serde(rename = "type")]
    pub offer_type: String,
    pub sector: String,
    pub salary: SalaryRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<OfferCriteria>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferCriteria {
    pub min_result: f64,
    pub max_backlog: u32,
    pub passout_year: Vec<i32>,
    pub branch: String,
}

/// Raw offer values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFlow {
    values: [String; KEYS.len()],
}

impl OfferFlow {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> &str {
        KEYS.iter()
            .position(|candidate| *candidate == key)
            .map(|index| self.values[index].as_str())
            .unwrap_or("")
    }

    fn descriptor() -> SectionDescriptor {
        SectionDescriptor::new(
            SECTION,
            "Offer Details",
            vec![
                FieldDescriptor::text("company", "Company ID"),
                FieldDescriptor::text("role", "Role"),
                FieldDescriptor::text("location", "Location").with_optional(),
                FieldDescriptor::new(
                    "total_opening",
                    "Total Openings",
                    FieldKind::Integer,
                    Validator::Integer,
                ),
                FieldDescriptor::choice("drive", "Drive", &DRIVE_OPTIONS),
                FieldDescriptor::choice("type", "Offer Type", &TYPE_OPTIONS),
                FieldDescriptor::choice("sector", "Sector", &SECTOR_OPTIONS),
                FieldDescriptor::new(
                    "salary_min",
                    "Minimum Salary (per annum)",
                    FieldKind::Integer,
                    Validator::Integer,
                ),
                FieldDescriptor::new(
                    "salary_max",
                    "Maximum Salary (per annum)",
                    FieldKind::Integer,
                    Validator::Integer,
                ),
                FieldDescriptor::new(
                    "min_result",
                    "Minimum CGPA",
                    FieldKind::Decimal,
                    Validator::Score,
                )
                .with_optional()
                .with_help("Leave every criteria field blank to publish without criteria."),
                FieldDescriptor::new(
                    "max_backlog",
                    "Maximum Backlogs",
                    FieldKind::Integer,
                    Validator::Integer,
                )
                .with_optional(),
                FieldDescriptor::new(
                    "passout_years",
                    "Eligible Passout Years",
                    FieldKind::Text,
                    Validator::Custom(std::sync::Arc::new(|raw| {
                        parse_years(raw).map(|years| {
                            years
                                .iter()
                                .map(ToString::to_string)
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                    })),
                )
                .with_optional()
                .with_help("Comma separated, e.g. 2025, 2026."),
                FieldDescriptor::text("branch", "Eligible Branch").with_optional(),
                FieldDescriptor::text("skills", "Skills")
                    .with_optional()
                    .with_help("Comma separated."),
            ],
        )
    }

    /// Converts the raw values, collecting every failure.
    pub fn to_payload(&self) -> Result<OfferPayload, IntakeError> {
        let mut errors = FieldErrors::new();
        let count = |key: &'static str, errors: &mut FieldErrors| {
            parse_count(self.get(key)).unwrap_or_else(|message| {
                errors.push(SECTION, key, message);
                0
            })
        };
        let total_opening = count("total_opening", &mut errors);
        let salary = SalaryRange {
            min: count("salary_min", &mut errors),
            max: count("salary_max", &mut errors),
        };
        if errors.for_field("salary_min").is_none()
            && errors.for_field("salary_max").is_none()
            && salary.min > salary.max
        {
            errors.push(
                SECTION,
                "salary_max",
                "Maximum salary must not be below the minimum",
            );
        }

        let criteria = if CRITERIA_KEYS.iter().any(|key| !self.get(key).trim().is_empty()) {
            let min_result = parse_score(self.get("min_result")).unwrap_or_else(|message| {
                errors.push(SECTION, "min_result", message);
                0.0
            });
            let max_backlog = if self.get("max_backlog").trim().is_empty() {
                0
            } else {
                count("max_backlog", &mut errors)
            };
            let passout_year = parse_years(self.get("passout_years")).unwrap_or_else(|message| {
                errors.push(SECTION, "passout_years", message);
                Vec::new()
            });
            Some(OfferCriteria {
                min_result,
                max_backlog,
                passout_year,
                branch: self.get("branch").trim().to_string(),
            })
        } else {
            None
        };

        errors.into_result()?;
        let location = self.get("location").trim();
        Ok(OfferPayload {
            company: self.get("company").trim().to_string(),
            role: self.get("role").trim().to_string(),
            location: (!location.is_empty()).then(|| location.to_string()),
            total_opening,
            drive: self.get("drive").trim().to_string(),
            offer_type: self.get("type").trim().to_string(),
            sector: self.get("sector").trim().to_string(),
            salary,
            criteria,
            skills: split_list(self.get("skills")),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_years(raw: &str) -> Result<Vec<i32>, String> {
    split_list(raw)
        .iter()
        .map(|item| parse_year(item))
        .collect()
}

impl WizardFlow for OfferFlow {
    type Output = OfferPayload;

    fn name(&self) -> &'static str {
        "offer"
    }

    fn steps(&self) -> &'static [&'static str] {
        &STEPS
    }

    fn section(&self, _step: usize) -> SectionDescriptor {
        Self::descriptor()
    }

    fn value(&self, _step: usize, key: &str) -> Option<String> {
        KEYS.iter()
            .position(|candidate| *candidate == key)
            .map(|index| self.values[index].clone())
    }

    fn set_value(&mut self, _step: usize, key: &str, value: &str) -> Result<(), ValidationError> {
        let index = KEYS
            .iter()
            .position(|candidate| *candidate == key)
            .ok_or_else(|| ValidationError::new(format!("Unknown offer field `{key}`")))?;
        self.values[index] = value.to_string();
        Ok(())
    }

    fn build(&self, _identity: Option<&Identity>) -> Result<Self::Output, IntakeError> {
        self.to_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_offer() -> OfferFlow {
        let mut flow = OfferFlow::new();
        for (key, value) in [
            ("company", "66a1f0c2"),
            ("role", "Firmware Engineer"),
            ("total_opening", "4"),
            ("drive", "on campus"),
            ("type", "placement"),
            ("sector", "Core"),
            ("salary_min", "600000"),
            ("salary_max", "900000"),
        ] {
            flow.set_value(0, key, value).unwrap();
        }
        flow
    }

    #[test]
    fn optional_blocks_are_omitted() {
        let json = serde_json::to_value(base_offer().to_payload().unwrap()).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("criteria").is_none());
        assert_eq!(json["type"], "placement");
        assert_eq!(json["salary"]["max"], 900000);
        assert_eq!(json["skills"], serde_json::json!([]));
    }

    #[test]
    fn criteria_and_skills_are_split() {
        let mut flow = base_offer();
        flow.set_value(0, "min_result", "7.5").unwrap();
        flow.set_value(0, "passout_years", "2025, 2026").unwrap();
        flow.set_value(0, "skills", "C, RTOS, ,CAN").unwrap();
        let payload = flow.to_payload().unwrap();
        let criteria = payload.criteria.unwrap();
        assert_eq!(criteria.passout_year, vec![2025, 2026]);
        assert_eq!(criteria.max_backlog, 0);
        assert_eq!(payload.skills, vec!["C", "RTOS", "CAN"]);
    }

    #[test]
    fn inverted_salary_range_is_rejected() {
        let mut flow = base_offer();
        flow.set_value(0, "salary_min", "1000000").unwrap();
        let err = flow.to_payload().unwrap_err();
        assert!(err.field_errors().unwrap().for_field("salary_max").is_some());
    }

    #[test]
    fn criteria_without_cgpa_is_reported() {
        let mut flow = base_offer();
        flow.set_value(0, "branch", "EC").unwrap();
        let err = flow.to_payload().unwrap_err();
        assert!(err.field_errors().unwrap().for_field("min_result").is_some());
    }
}
