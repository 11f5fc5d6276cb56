//! Interactive driver for intake wizards.
//!
//! [`FormEngine`] walks the fields of the wizard's current section through a
//! [`FormInteraction`], advances section by section and finally asks for
//! confirmation before submitting. Sections are re-read after every answer
//! because some of them reshape as values change.

use crate::cli::io;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{
    choice_input, confirm_input, text_input, ChoicePromptResult, ConfirmationPromptResult,
    TextPromptResult,
};
use crate::errors::IntakeError;
use crate::intake::fields::{FieldDescriptor, FieldErrors, FieldKind};
use crate::intake::identity::Identity;
use crate::intake::wizard::{StepChange, Wizard, WizardFlow};

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// User chose to keep the current value.
    Keep,
    /// Abort the entire wizard immediately.
    Cancel,
    /// Go back to the previous field.
    Back,
    /// Request additional information for the current field.
    Help,
}

/// Responses accepted when confirming the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

/// Snapshot of collected data displayed before final confirmation.
#[derive(Debug, Default)]
pub struct FormSummary {
    pub entries: Vec<(String, String)>,
}

pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<&'a str>,
    pub index: usize,
    pub total: usize,
    pub section_title: &'a str,
    pub step: usize,
    pub steps: usize,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    /// Shows the review lines and asks whether to submit.
    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;

    fn show_errors(&mut self, errors: &FieldErrors) {
        for error in errors.iter() {
            io::print_warning(format!("{}: {}", error.field, error.message));
        }
    }
}

/// Terminal implementation backed by the shared prompt components.
#[derive(Debug, Default)]
pub struct WizardInteraction;

impl WizardInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl FormInteraction for WizardInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        render_prompt(context);
        let label = &context.descriptor.label;
        match &context.descriptor.kind {
            FieldKind::Choice(options) => {
                match choice_input(label, options, context.default, context.index > 0) {
                    Ok(ChoicePromptResult::Value(value)) => PromptResponse::Value(value),
                    Ok(ChoicePromptResult::Back) => PromptResponse::Back,
                    Ok(ChoicePromptResult::Cancel) | Err(_) => PromptResponse::Cancel,
                }
            }
            _ => match text_input(label, context.default) {
                Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
                Ok(TextPromptResult::Keep) => PromptResponse::Keep,
                Ok(TextPromptResult::Back) => PromptResponse::Back,
                Ok(TextPromptResult::Help) => PromptResponse::Help,
                Ok(TextPromptResult::Cancel) | Err(_) => PromptResponse::Cancel,
            },
        }
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        let formatter = Formatter::new();
        formatter.print_header("Review entries");
        for line in lines {
            println!("{line}");
        }
        match confirm_input("Submit these details?") {
            Ok(ConfirmationPromptResult::Confirm) => ConfirmationResponse::Confirm,
            Ok(ConfirmationPromptResult::Back) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

/// Drives a [`Wizard`] using a [`FormInteraction`] implementation.
pub struct FormEngine<'a, F: WizardFlow> {
    wizard: &'a mut Wizard<F>,
}

impl<'a, F: WizardFlow> FormEngine<'a, F> {
    pub fn new(wizard: &'a mut Wizard<F>) -> Self {
        Self { wizard }
    }

    pub fn run<I: FormInteraction>(
        &mut self,
        interaction: &mut I,
        identity: Option<&Identity>,
    ) -> Result<FormResult<F::Output>, IntakeError> {
        let mut field_index = 0usize;

        loop {
            let section = self.wizard.current_section();

            if field_index >= section.fields.len() {
                if !self.wizard.is_terminal() {
                    match self.wizard.advance() {
                        Ok(_) => field_index = 0,
                        Err(errors) => {
                            interaction.show_errors(&errors);
                            field_index = first_error_position(&section.fields, &errors);
                        }
                    }
                    continue;
                }

                let errors = self.wizard.validate_current();
                if !errors.is_empty() {
                    interaction.show_errors(&errors);
                    field_index = first_error_position(&section.fields, &errors);
                    continue;
                }

                let lines = format_summary_lines(&self.build_summary());
                match interaction.confirm(&lines) {
                    ConfirmationResponse::Confirm => match self.wizard.submit(identity) {
                        Ok(output) => return Ok(FormResult::Completed(output)),
                        Err(IntakeError::Validation(errors)) => {
                            interaction.show_errors(&errors);
                            field_index = self.return_to_first_error(&errors);
                        }
                        Err(err) => return Err(err),
                    },
                    ConfirmationResponse::Back => {
                        if section.fields.is_empty() {
                            if self.wizard.retreat() == StepChange::AtBoundary {
                                return Ok(FormResult::Cancelled);
                            }
                            field_index = self.wizard.current_section().fields.len();
                        }
                        field_index = field_index.saturating_sub(1);
                    }
                    ConfirmationResponse::Cancel => return Ok(FormResult::Cancelled),
                }
                continue;
            }

            let field = &section.fields[field_index];
            if field.read_only {
                field_index += 1;
                continue;
            }

            let current = self
                .wizard
                .value(&field.key)
                .filter(|value| !value.is_empty());
            let response = interaction.prompt_field(&PromptContext {
                descriptor: field,
                default: current.as_deref(),
                index: field_index,
                total: section.fields.len(),
                section_title: section.title,
                step: self.wizard.current_index(),
                steps: self.wizard.step_count(),
            });

            match response {
                PromptResponse::Cancel => return Ok(FormResult::Cancelled),
                PromptResponse::Help => {
                    io::print_info(
                        field
                            .help
                            .unwrap_or("No additional information available for this field."),
                    );
                }
                PromptResponse::Back => {
                    if field_index > 0 {
                        field_index -= 1;
                    } else if let StepChange::Moved { .. } = self.wizard.retreat() {
                        field_index = self
                            .wizard
                            .current_section()
                            .fields
                            .len()
                            .saturating_sub(1);
                    } else {
                        io::print_warning("Already at the first field.");
                    }
                }
                PromptResponse::Keep => {
                    if current.is_some() || !field.required {
                        field_index += 1;
                    } else {
                        io::print_warning(format!("{} is required.", field.label));
                    }
                }
                PromptResponse::Value(raw) => {
                    if let Err(err) = field.check(&raw) {
                        io::print_warning(&err.message);
                        continue;
                    }
                    let normalized = if raw.trim().is_empty() {
                        String::new()
                    } else {
                        field
                            .validator
                            .validate(&raw)
                            .unwrap_or_else(|_| raw.trim().to_string())
                    };
                    match self.wizard.set_field(&field.key, &normalized) {
                        Ok(()) => field_index += 1,
                        Err(errors) => interaction.show_errors(&errors),
                    }
                }
            }
        }
    }

    /// Moves back to the section holding the first error and returns the
    /// field position within it.
    fn return_to_first_error(&mut self, errors: &FieldErrors) -> usize {
        let Some(first) = errors.first() else {
            return 0;
        };
        let steps = self.wizard.flow().steps();
        if let Some(target) = steps.iter().position(|name| *name == first.section) {
            while self.wizard.current_index() > target {
                self.wizard.retreat();
            }
        }
        let section = self.wizard.current_section();
        first_error_position(&section.fields, errors)
    }

    fn build_summary(&self) -> FormSummary {
        let flow = self.wizard.flow();
        let mut summary = FormSummary::default();
        for step in 0..self.wizard.step_count() {
            let section = flow.section(step);
            for field in &section.fields {
                let value = flow
                    .value(step, &field.key)
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| "[unfilled]".to_string());
                summary
                    .entries
                    .push((format!("{} / {}", section.title, field.label), value));
            }
        }
        summary
    }
}

fn first_error_position(fields: &[FieldDescriptor], errors: &FieldErrors) -> usize {
    errors
        .iter()
        .find_map(|error| fields.iter().position(|field| field.key == error.field))
        .unwrap_or(0)
}

fn step_header(context: &PromptContext<'_>) -> String {
    format!(
        "Step {} of {} - {}",
        context.step + 1,
        context.steps,
        context.section_title
    )
}

fn render_prompt(context: &PromptContext<'_>) {
    let formatter = Formatter::new();
    formatter.print_header(step_header(context));
    formatter.print_detail(format!(
        "Field {} of {}: {}",
        context.index + 1,
        context.total,
        context.descriptor.label
    ));
    if let Some(current) = context.default {
        formatter.print_detail(format!("Current: {current}"));
    }
    if let Some(help) = context.descriptor.help {
        formatter.print_detail(help);
    }
    if !matches!(context.descriptor.kind, FieldKind::Choice(_)) {
        let mut instructions = vec!["Type a value and press Enter to continue.".to_string()];
        instructions.push("Press ESC or type :back to return to the previous field.".into());
        instructions.push("Type :help for details or :cancel to stop.".into());
        formatter.print_detail(instructions.join(" "));
    }
}

fn format_summary_lines(summary: &FormSummary) -> Vec<String> {
    let formatter = Formatter::new();
    let mut lines = vec!["Review your entries:".to_string()];
    lines.extend(formatter.two_column_lines(&summary.entries));
    lines
}
