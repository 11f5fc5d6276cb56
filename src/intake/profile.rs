//! Student profile wizard: personal, address and academic sections.

use crate::errors::IntakeError;
use crate::intake::address::AddressSection;
use crate::intake::fields::{
    FieldDescriptor, FieldKind, SectionDescriptor, ValidationError, Validator,
};
use crate::intake::identity::Identity;
use crate::intake::payload::{build_payload, StudentPayload};
use crate::intake::qualification::{PriorQualification, QualificationKind, DIPLOMA_SEMESTERS};
use crate::intake::semesters::{derive_semester_count, resize_scores};
use crate::intake::wizard::WizardFlow;

pub const GENDER_OPTIONS: [&str; 3] = ["Male", "Female", "Other"];
pub const CASTE_OPTIONS: [&str; 5] = ["General", "SC", "ST", "OBC", "SEBC"];

const STEPS: [&str; 3] = ["personal", "address", "academic"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalSection {
    pub name: String,
    pub email: String,
    pub enrollment_no: String,
    pub dob: String,
    pub contact: String,
    pub gender: String,
    pub caste: String,
    /// Email came from the identity provider and cannot be edited.
    pub email_locked: bool,
}

impl PersonalSection {
    pub const NAME: &'static str = "personal";

    pub fn descriptor(&self) -> SectionDescriptor {
        SectionDescriptor::new(
            Self::NAME,
            "Personal Details",
            vec![
                FieldDescriptor::text("name", "Full Name"),
                FieldDescriptor::new("email", "Email", FieldKind::Text, Validator::Email)
                    .with_read_only(self.email_locked),
                FieldDescriptor::text("enrollment_no", "Enrollment Number"),
                FieldDescriptor::new("dob", "Date of Birth", FieldKind::Date, Validator::Date)
                    .with_help("Use YYYY-MM-DD."),
                FieldDescriptor::new("contact", "Contact Number", FieldKind::Text, Validator::Phone),
                FieldDescriptor::choice("gender", "Gender", &GENDER_OPTIONS),
                FieldDescriptor::choice("caste", "Caste", &CASTE_OPTIONS),
            ],
        )
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let value = match key {
            "name" => &self.name,
            "email" => &self.email,
            "enrollment_no" => &self.enrollment_no,
            "dob" => &self.dob,
            "contact" => &self.contact,
            "gender" => &self.gender,
            "caste" => &self.caste,
            _ => return None,
        };
        Some(value.clone())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let slot = match key {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "enrollment_no" => &mut self.enrollment_no,
            "dob" => &mut self.dob,
            "contact" => &mut self.contact,
            "gender" => &mut self.gender,
            "caste" => &mut self.caste,
            other => {
                return Err(ValidationError::new(format!(
                    "Unknown personal field `{other}`"
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Academic section; its field set depends on earlier answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicSection {
    passout_year: String,
    semester_scores: Vec<String>,
    pub ssc_score: String,
    pub ssc_year: String,
    qualification: PriorQualification,
    pub backlogs: String,
    current_year: i32,
}

impl AcademicSection {
    pub const NAME: &'static str = "academic";

    pub fn new(current_year: i32) -> Self {
        Self {
            passout_year: String::new(),
            semester_scores: vec![String::new(); derive_semester_count("", current_year)],
            ssc_score: String::new(),
            ssc_year: String::new(),
            qualification: PriorQualification::None,
            backlogs: String::new(),
            current_year,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn passout_year(&self) -> &str {
        &self.passout_year
    }

    pub fn semester_scores(&self) -> &[String] {
        &self.semester_scores
    }

    pub fn qualification(&self) -> &PriorQualification {
        &self.qualification
    }

    /// Sets the expected passout year and reshapes the semester list.
    ///
    /// Nothing is recomputed when the text is unchanged.
    pub fn set_passout_year(&mut self, year_text: &str) {
        if self.passout_year == year_text {
            return;
        }
        self.passout_year = year_text.to_string();
        let count = derive_semester_count(year_text, self.current_year);
        if count != self.semester_scores.len() {
            tracing::debug!(
                from = self.semester_scores.len(),
                to = count,
                "semester fields resized"
            );
            resize_scores(&mut self.semester_scores, count);
        }
    }

    /// Writes the score at zero-based `index`.
    pub fn set_semester_score(&mut self, index: usize, value: &str) -> Result<(), ValidationError> {
        let count = self.semester_scores.len();
        let slot = self.semester_scores.get_mut(index).ok_or_else(|| {
            ValidationError::new(format!(
                "Semester {} is not shown (only {count} semesters)",
                index + 1
            ))
        })?;
        *slot = value.to_string();
        Ok(())
    }

    pub fn set_qualification(&mut self, kind: QualificationKind) -> bool {
        self.qualification.set_qualification(kind)
    }

    pub fn descriptor(&self) -> SectionDescriptor {
        let mut fields = vec![FieldDescriptor::new(
            "passout_year",
            "Expected Passout Year",
            FieldKind::Integer,
            Validator::Year,
        )
        .with_help("Semester fields adjust to the years remaining in the degree.")];
        for index in 0..self.semester_scores.len() {
            fields.push(score_field(
                format!("semester_{}", index + 1),
                format!("Semester {} Result", index + 1),
            ));
        }
        fields.push(score_field("ssc_score", "10th Result"));
        fields.push(year_field("ssc_year", "10th Passout Year"));
        fields.push(
            FieldDescriptor::choice(
                "qualification",
                "Qualification After 10th",
                &QualificationKind::labels(),
            )
            .with_help("Switching the qualification clears the fields of the previous choice."),
        );
        match &self.qualification {
            PriorQualification::None => {}
            PriorQualification::PlusTwo { .. } => {
                fields.push(score_field("hsc_score", "12th Result"));
                fields.push(year_field("hsc_year", "12th Passout Year"));
            }
            PriorQualification::Diploma { .. } => {
                for index in 0..DIPLOMA_SEMESTERS {
                    fields.push(score_field(
                        format!("diploma_semester_{}", index + 1),
                        format!("Diploma Semester {} Result", index + 1),
                    ));
                }
                fields.push(year_field("diploma_year", "Diploma Passout Year"));
            }
        }
        fields.push(FieldDescriptor::new(
            "backlogs",
            "Number of Backlogs",
            FieldKind::Integer,
            Validator::Integer,
        ));
        SectionDescriptor::new(Self::NAME, "Academic Details", fields)
    }

    pub fn value(&self, key: &str) -> Option<String> {
        if let Some(index) = indexed_key(key, "semester_") {
            return self.semester_scores.get(index).cloned();
        }
        if let Some(index) = indexed_key(key, "diploma_semester_") {
            return match &self.qualification {
                PriorQualification::Diploma { scores, .. } => scores.get(index).cloned(),
                _ => None,
            };
        }
        match (key, &self.qualification) {
            ("passout_year", _) => Some(self.passout_year.clone()),
            ("ssc_score", _) => Some(self.ssc_score.clone()),
            ("ssc_year", _) => Some(self.ssc_year.clone()),
            ("backlogs", _) => Some(self.backlogs.clone()),
            ("qualification", branch) => Some(branch.kind().label().to_string()),
            ("hsc_score", PriorQualification::PlusTwo { score, .. }) => Some(score.clone()),
            ("hsc_year", PriorQualification::PlusTwo { year, .. }) => Some(year.clone()),
            ("diploma_year", PriorQualification::Diploma { year, .. }) => Some(year.clone()),
            _ => None,
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        if let Some(index) = indexed_key(key, "semester_") {
            return self.set_semester_score(index, value);
        }
        if let Some(index) = indexed_key(key, "diploma_semester_") {
            return match &mut self.qualification {
                PriorQualification::Diploma { scores, .. } => {
                    let slot = scores.get_mut(index).ok_or_else(|| {
                        ValidationError::new(format!("Diploma semester {} does not exist", index + 1))
                    })?;
                    *slot = value.to_string();
                    Ok(())
                }
                _ => Err(inactive_branch(key)),
            };
        }
        match key {
            "passout_year" => self.set_passout_year(value),
            "ssc_score" => self.ssc_score = value.to_string(),
            "ssc_year" => self.ssc_year = value.to_string(),
            "backlogs" => self.backlogs = value.to_string(),
            "qualification" => {
                let kind = value.parse::<QualificationKind>().map_err(ValidationError::new)?;
                self.set_qualification(kind);
            }
            "hsc_score" | "hsc_year" | "diploma_year" => {
                let slot = match (&mut self.qualification, key) {
                    (PriorQualification::PlusTwo { score, .. }, "hsc_score") => score,
                    (PriorQualification::PlusTwo { year, .. }, "hsc_year") => year,
                    (PriorQualification::Diploma { year, .. }, "diploma_year") => year,
                    _ => return Err(inactive_branch(key)),
                };
                *slot = value.to_string();
            }
            other => {
                return Err(ValidationError::new(format!(
                    "Unknown academic field `{other}`"
                )))
            }
        }
        Ok(())
    }
}

fn score_field(key: impl Into<String>, label: impl Into<String>) -> FieldDescriptor {
    FieldDescriptor::new(key, label, FieldKind::Decimal, Validator::Score)
}

fn year_field(key: &'static str, label: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(key, label, FieldKind::Integer, Validator::Year)
}

fn inactive_branch(key: &str) -> ValidationError {
    ValidationError::new(format!(
        "`{key}` belongs to a qualification that is not selected"
    ))
}

/// Parses `<prefix><n>` (one-based) into a zero-based index.
fn indexed_key(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .map(|n| n - 1)
}

/// Three-section student profile flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFlow {
    pub personal: PersonalSection,
    pub address: AddressSection,
    pub academic: AcademicSection,
}

impl ProfileFlow {
    pub fn new(current_year: i32) -> Self {
        Self {
            personal: PersonalSection::default(),
            address: AddressSection::default(),
            academic: AcademicSection::new(current_year),
        }
    }

    /// Pre-fills name and email from the signed-in identity.
    ///
    /// The email is locked only when it is a valid address; otherwise it
    /// stays editable so the section can still be completed.
    pub fn with_identity(mut self, identity: &Identity) -> Self {
        if let Some(name) = &identity.name {
            self.personal.name = name.clone();
        }
        if let Some(email) = &identity.email {
            self.personal.email = email.clone();
            self.personal.email_locked = Validator::Email.validate(email).is_ok();
            if !self.personal.email_locked {
                tracing::warn!("identity email is not a valid address; leaving it editable");
            }
        }
        self
    }
}

impl WizardFlow for ProfileFlow {
    type Output = StudentPayload;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn steps(&self) -> &'static [&'static str] {
        &STEPS
    }

    fn section(&self, step: usize) -> SectionDescriptor {
        match step {
            0 => self.personal.descriptor(),
            1 => AddressSection::descriptor("Address Details"),
            _ => self.academic.descriptor(),
        }
    }

    fn value(&self, step: usize, key: &str) -> Option<String> {
        match step {
            0 => self.personal.value(key),
            1 => self.address.value(key),
            _ => self.academic.value(key),
        }
    }

    fn set_value(&mut self, step: usize, key: &str, value: &str) -> Result<(), ValidationError> {
        match step {
            0 => self.personal.set_value(key, value),
            1 => self.address.set_value(key, value),
            _ => self.academic.set_value(key, value),
        }
    }

    fn requires_identity(&self) -> bool {
        true
    }

    fn build(&self, identity: Option<&Identity>) -> Result<Self::Output, IntakeError> {
        build_payload(identity, &self.personal, &self.address, &self.academic)
    }
}
