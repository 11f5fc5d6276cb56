//! Company wizard: details, then address.

use serde::Serialize;

use crate::errors::IntakeError;
use crate::intake::address::{AddressPayload, AddressSection};
use crate::intake::fields::{FieldDescriptor, FieldErrors, SectionDescriptor, ValidationError};
use crate::intake::identity::Identity;
use crate::intake::wizard::WizardFlow;

const STEPS: [&str; 2] = ["details", "address"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDetails {
    pub name: String,
    pub logo: String,
    pub link: String,
    pub description: String,
    pub contact: String,
}

impl CompanyDetails {
    pub const NAME: &'static str = "details";

    pub fn descriptor() -> SectionDescriptor {
        SectionDescriptor::new(
            Self::NAME,
            "Company Details",
            vec![
                FieldDescriptor::text("name", "Company Name"),
                FieldDescriptor::text("logo", "Logo URL").with_optional(),
                FieldDescriptor::text("link", "Website").with_optional(),
                FieldDescriptor::text("description", "Description"),
                FieldDescriptor::text("contact", "Contact"),
            ],
        )
    }

    fn slot(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "name" => &mut self.name,
            "logo" => &mut self.logo,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "contact" => &mut self.contact,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyPayload {
    pub name: String,
    pub logo: String,
    pub link: String,
    pub description: String,
    pub contact: String,
    pub address: AddressPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFlow {
    pub details: CompanyDetails,
    pub address: AddressSection,
}

impl CompanyFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_payload(&self) -> Result<CompanyPayload, IntakeError> {
        let mut errors = FieldErrors::new();
        let address = self.address.to_payload(&mut errors);
        errors.into_result()?;
        let details = &self.details;
        Ok(CompanyPayload {
            name: details.name.trim().to_string(),
            logo: details.logo.trim().to_string(),
            link: details.link.trim().to_string(),
            description: details.description.trim().to_string(),
            contact: details.contact.trim().to_string(),
            address,
        })
    }
}

impl WizardFlow for CompanyFlow {
    type Output = CompanyPayload;

    fn name(&self) -> &'static str {
        "company"
    }

    fn steps(&self) -> &'static [&'static str] {
        &STEPS
    }

    fn section(&self, step: usize) -> SectionDescriptor {
        if step == 0 {
            CompanyDetails::descriptor()
        } else {
            AddressSection::descriptor("Company Address")
        }
    }

    fn value(&self, step: usize, key: &str) -> Option<String> {
        if step == 0 {
            let details = &self.details;
            let value = match key {
                "name" => &details.name,
                "logo" => &details.logo,
                "link" => &details.link,
                "description" => &details.description,
                "contact" => &details.contact,
                _ => return None,
            };
            Some(value.clone())
        } else {
            self.address.value(key)
        }
    }

    fn set_value(&mut self, step: usize, key: &str, value: &str) -> Result<(), ValidationError> {
        if step == 0 {
            let slot = self.details.slot(key).ok_or_else(|| {
                ValidationError::new(format!("Unknown company field `{key}`"))
            })?;
            *slot = value.to_string();
            Ok(())
        } else {
            self.address.set_value(key, value)
        }
    }

    fn build(&self, _identity: Option<&Identity>) -> Result<Self::Output, IntakeError> {
        self.to_payload()
    }
}
