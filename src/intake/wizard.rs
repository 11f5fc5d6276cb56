//! Linear multi-section wizard engine.
//!
//! A [`WizardFlow`] owns the per-section field state and knows how to turn it
//! into an output payload. [`Wizard`] wraps a flow with the step cursor and
//! the advance / retreat / submit transitions. Field state is keyed by
//! section, so moving between sections never clears entered values.

use crate::errors::IntakeError;
use crate::intake::fields::{FieldErrors, SectionDescriptor, ValidationError};
use crate::intake::identity::Identity;

/// High-level form contract for entity-specific wizards.
pub trait WizardFlow {
    type Output;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Section names in order.
    fn steps(&self) -> &'static [&'static str];

    /// Current field list of section `step`.
    fn section(&self, step: usize) -> SectionDescriptor;

    /// Raw value of `key` in section `step`.
    fn value(&self, step: usize, key: &str) -> Option<String>;

    /// Writes a raw value. Unknown or inactive keys are rejected.
    fn set_value(&mut self, step: usize, key: &str, value: &str) -> Result<(), ValidationError>;

    /// Whether [`WizardFlow::build`] needs a signed-in identity.
    fn requires_identity(&self) -> bool {
        false
    }

    /// Builds the output payload from the accumulated state.
    fn build(&self, identity: Option<&Identity>) -> Result<Self::Output, IntakeError>;
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    Moved { from: usize, to: usize },
    AtBoundary,
}

/// Step cursor over a [`WizardFlow`].
#[derive(Debug, Clone)]
pub struct Wizard<F: WizardFlow> {
    flow: F,
    index: usize,
}

impl<F: WizardFlow> Wizard<F> {
    pub fn new(flow: F) -> Self {
        Self { flow, index: 0 }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.flow.steps().len()
    }

    pub fn current_step_name(&self) -> &'static str {
        self.flow.steps().get(self.index).copied().unwrap_or("")
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// True on the section that offers submission.
    pub fn is_terminal(&self) -> bool {
        self.index + 1 >= self.step_count()
    }

    pub fn current_section(&self) -> SectionDescriptor {
        self.flow.section(self.index)
    }

    /// Field list of any section, reflecting the current answers.
    pub fn section_descriptor(&self, step: usize) -> Option<SectionDescriptor> {
        (step < self.step_count()).then(|| self.flow.section(step))
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.flow.value(self.index, key)
    }

    /// Writes a field of the current section.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldErrors> {
        let section = self.current_section();
        let mut errors = FieldErrors::new();
        match section.field(key) {
            None => errors.push(section.name, key, "Field is not part of this section"),
            Some(field) if field.read_only => {
                errors.push(section.name, key, format!("{} is read-only", field.label))
            }
            Some(_) => {
                if let Err(err) = self.flow.set_value(self.index, key, value) {
                    errors.push(section.name, key, err.message);
                }
            }
        }
        errors.into_result()
    }

    /// Full validation of the current section.
    pub fn validate_current(&self) -> FieldErrors {
        self.validate_step(self.index)
    }

    fn validate_step(&self, step: usize) -> FieldErrors {
        let section = self.flow.section(step);
        section.validate(|key| self.flow.value(step, key))
    }

    /// Moves to the next section once the current one validates.
    pub fn advance(&mut self) -> Result<StepChange, FieldErrors> {
        if self.is_terminal() {
            return Ok(StepChange::AtBoundary);
        }
        self.validate_current().into_result()?;
        let from = self.index;
        self.index += 1;
        tracing::debug!(
            flow = self.flow.name(),
            from = self.flow.steps()[from],
            to = self.current_step_name(),
            "wizard advanced"
        );
        Ok(StepChange::Moved {
            from,
            to: self.index,
        })
    }

    /// Moves back one section without touching any values.
    pub fn retreat(&mut self) -> StepChange {
        if self.is_first() {
            return StepChange::AtBoundary;
        }
        let from = self.index;
        self.index -= 1;
        tracing::debug!(
            flow = self.flow.name(),
            from = self.flow.steps()[from],
            to = self.current_step_name(),
            "wizard retreated"
        );
        StepChange::Moved {
            from,
            to: self.index,
        }
    }

    /// Validates every section and builds the payload.
    ///
    /// Only reachable from the terminal section. A flow that needs an identity
    /// fails with [`IntakeError::Unauthenticated`] before anything is built.
    pub fn submit(&self, identity: Option<&Identity>) -> Result<F::Output, IntakeError> {
        if !self.is_terminal() {
            return Err(IntakeError::NotAtFinalStep {
                step: self.current_step_name(),
            });
        }
        if self.flow.requires_identity() && identity.is_none() {
            tracing::warn!(flow = self.flow.name(), "submission blocked: no identity");
            return Err(IntakeError::Unauthenticated);
        }
        let mut errors = FieldErrors::new();
        for step in 0..self.step_count() {
            errors.extend(self.validate_step(step));
        }
        errors.into_result()?;
        let output = self.flow.build(identity)?;
        tracing::info!(flow = self.flow.name(), "payload built for submission");
        Ok(output)
    }
}
