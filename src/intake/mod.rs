//! Intake wizards: the step engine, section state and payload builders.

pub mod address;
pub mod company;
pub mod fields;
pub mod identity;
pub mod offer;
pub mod payload;
pub mod profile;
pub mod qualification;
pub mod semesters;
pub mod wizard;

pub use address::{AddressPayload, AddressSection};
pub use company::{CompanyFlow, CompanyPayload};
pub use fields::{FieldError, FieldErrors, SectionDescriptor, ValidationError};
pub use identity::{EnvIdentity, Identity, IdentityProvider, StaticIdentity};
pub use offer::{OfferFlow, OfferPayload};
pub use payload::{build_payload, StudentPayload};
pub use profile::{AcademicSection, PersonalSection, ProfileFlow};
pub use qualification::{PriorQualification, QualificationKind};
pub use semesters::derive_semester_count;
pub use wizard::{StepChange, Wizard, WizardFlow};
