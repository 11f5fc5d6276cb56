//! Flat section state to the nested, typed student payload.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::IntakeError;
use crate::intake::address::{AddressPayload, AddressSection};
use crate::intake::fields::{parse_count, parse_score, parse_year, FieldErrors};
use crate::intake::identity::Identity;
use crate::intake::profile::{AcademicSection, PersonalSection};
use crate::intake::qualification::PriorQualification;
use crate::intake::semesters::semester_label;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentPayload {
    pub name: String,
    pub enrollment_no: String,
    pub dob: String,
    pub email: String,
    #[serde(rename = "googleId")]
    pub google_id: String,
    pub contact: String,
    pub gender: String,
    pub caste: String,
    pub academic_details: AcademicDetails,
    pub address: AddressPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicDetails {
    pub passout_year: i32,
    pub result: AcademicResults,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicResults {
    pub ssc: SchoolResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsc: Option<SchoolResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diploma: Option<DiplomaResult>,
    pub degree: DegreeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolResult {
    pub percentage: f64,
    pub completion_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiplomaResult {
    pub result: BTreeMap<String, f64>,
    pub completion_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeResult {
    pub result: BTreeMap<String, f64>,
    pub completion_year: i32,
    pub backlogs: u32,
}

/// Collects coercion failures for one section while converting its values.
struct Coercion<'a> {
    section: &'static str,
    errors: &'a mut FieldErrors,
}

impl Coercion<'_> {
    fn year(&mut self, field: &str, raw: &str) -> i32 {
        parse_year(raw).unwrap_or_else(|message| {
            self.errors.push(self.section, field, message);
            0
        })
    }

    fn score(&mut self, field: &str, raw: &str) -> f64 {
        parse_score(raw).unwrap_or_else(|message| {
            self.errors.push(self.section, field, message);
            0.0
        })
    }

    fn count(&mut self, field: &str, raw: &str) -> u32 {
        parse_count(raw).unwrap_or_else(|message| {
            self.errors.push(self.section, field, message);
            0
        })
    }

    fn semesters(&mut self, prefix: &str, scores: &[String]) -> BTreeMap<String, f64> {
        scores
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let value = self.score(&format!("{prefix}{}", index + 1), raw);
                (semester_label(index), value)
            })
            .collect()
    }
}

/// Builds the submission payload.
///
/// Fails with [`IntakeError::Unauthenticated`] when no identity is present and
/// with [`IntakeError::Validation`] listing every value that did not convert.
/// Placeholder numbers used while collecting errors never leave this function.
pub fn build_payload(
    identity: Option<&Identity>,
    personal: &PersonalSection,
    address: &AddressSection,
    academic: &AcademicSection,
) -> Result<StudentPayload, IntakeError> {
    let identity = identity.ok_or(IntakeError::Unauthenticated)?;
    let mut errors = FieldErrors::new();

    let address = address.to_payload(&mut errors);
    let academic_details = {
        let mut coerce = Coercion {
            section: AcademicSection::NAME,
            errors: &mut errors,
        };
        let passout_year = coerce.year("passout_year", academic.passout_year());
        let ssc = SchoolResult {
            percentage: coerce.score("ssc_score", &academic.ssc_score),
            completion_year: coerce.year("ssc_year", &academic.ssc_year),
        };
        let (hsc, diploma) = match academic.qualification() {
            PriorQualification::None => (None, None),
            PriorQualification::PlusTwo { score, year } => (
                Some(SchoolResult {
                    percentage: coerce.score("hsc_score", score),
                    completion_year: coerce.year("hsc_year", year),
                }),
                None,
            ),
            PriorQualification::Diploma { scores, year } => (
                None,
                Some(DiplomaResult {
                    result: coerce.semesters("diploma_semester_", scores),
                    completion_year: coerce.year("diploma_year", year),
                }),
            ),
        };
        let degree = DegreeResult {
            result: coerce.semesters("semester_", academic.semester_scores()),
            completion_year: passout_year,
            backlogs: coerce.count("backlogs", &academic.backlogs),
        };
        AcademicDetails {
            passout_year,
            result: AcademicResults {
                ssc,
                hsc,
                diploma,
                degree,
            },
        }
    };

    errors.into_result()?;
    Ok(StudentPayload {
        name: personal.name.trim().to_string(),
        enrollment_no: personal.enrollment_no.trim().to_string(),
        dob: personal.dob.trim().to_string(),
        email: personal.email.trim().to_string(),
        google_id: identity.token.clone(),
        contact: personal.contact.trim().to_string(),
        gender: personal.gender.trim().to_string(),
        caste: personal.caste.trim().to_string(),
        academic_details,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::qualification::QualificationKind;

    fn filled_academic() -> AcademicSection {
        let mut academic = AcademicSection::new(2025);
        academic.set_passout_year("2027");
        for (i, score) in ["8.1", "8.4", "7.9", "9.0"].iter().enumerate() {
            academic.set_semester_score(i, score).unwrap();
        }
        academic.ssc_score = "91.2".into();
        academic.ssc_year = "2019".into();
        academic.backlogs = "0".into();
        academic
    }

    fn filled_address() -> AddressSection {
        AddressSection {
            address_line: "12 Ring Road".into(),
            area: "Athwa".into(),
            city: "Surat".into(),
            state: "Gujarat".into(),
            country: "India".into(),
            pincode: "395001".into(),
        }
    }

    #[test]
    fn missing_identity_builds_nothing() {
        let result = build_payload(
            None,
            &PersonalSection::default(),
            &filled_address(),
            &filled_academic(),
        );
        assert!(matches!(result, Err(IntakeError::Unauthenticated)));
    }

    #[test]
    fn plus_two_branch_omits_diploma_key() {
        let mut academic = filled_academic();
        academic.set_qualification(QualificationKind::PlusTwo);
        academic.set_value("hsc_score", "88").unwrap();
        academic.set_value("hsc_year", "2021").unwrap();
        let identity = Identity::new("tok");
        let payload = build_payload(
            Some(&identity),
            &PersonalSection::default(),
            &filled_address(),
            &academic,
        )
        .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let result = &json["academic_details"]["result"];
        assert_eq!(result["hsc"]["completion_year"], 2021);
        assert!(result.get("diploma").is_none());
        assert_eq!(result["degree"]["result"]["sem4"], 9.0);
        assert!(result["degree"]["result"].get("sem5").is_none());
        assert_eq!(json["googleId"], "tok");
    }

    #[test]
    fn every_bad_number_is_reported() {
        let mut academic = filled_academic();
        academic.ssc_score = "ninety".into();
        academic.backlogs = "-1".into();
        academic.set_semester_score(1, "abc").unwrap();
        let mut address = filled_address();
        address.pincode = "39A".into();
        let identity = Identity::new("tok");
        let err = build_payload(
            Some(&identity),
            &PersonalSection::default(),
            &address,
            &academic,
        )
        .unwrap_err();
        let errors = err.field_errors().expect("validation error");
        assert_eq!(errors.len(), 4);
        assert!(errors.for_field("semester_2").is_some());
        assert!(errors.for_field("pincode").is_some());
    }
}
