//! Wizard subcommands: collect, then print or submit the payload.

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::WizardArgs;
use crate::cli::core::{CommandContext, CommandResult};
use crate::cli::forms::{FormEngine, FormResult, WizardInteraction};
use crate::cli::{io, output};
use crate::intake::profile::ProfileFlow;
use crate::intake::{CompanyFlow, OfferFlow, Wizard, WizardFlow};
use crate::transport::{ApiClient, HttpTransport, TransportError};

pub fn profile(context: &CommandContext, args: &WizardArgs) -> CommandResult {
    let identity = context.require_identity()?;
    let flow = ProfileFlow::new(context.clock.current_year()).with_identity(identity);
    run_wizard(context, flow, args, "Profile", |client, payload| {
        client.create_student(payload)
    })
}

pub fn company(context: &CommandContext, args: &WizardArgs) -> CommandResult {
    run_wizard(context, CompanyFlow::new(), args, "Company", |client, payload| {
        client.create_company(payload)
    })
}

pub fn offer(context: &CommandContext, args: &WizardArgs) -> CommandResult {
    run_wizard(context, OfferFlow::new(), args, "Offer", |client, payload| {
        client.create_offer(payload)
    })
}

fn run_wizard<F, S>(
    context: &CommandContext,
    flow: F,
    args: &WizardArgs,
    label: &str,
    send: S,
) -> CommandResult
where
    F: WizardFlow,
    F::Output: Serialize,
    S: Fn(&ApiClient<HttpTransport>, &F::Output) -> Result<Value, TransportError>,
{
    let mut wizard = Wizard::new(flow);
    let mut interaction = WizardInteraction::new();
    let outcome =
        FormEngine::new(&mut wizard).run(&mut interaction, context.identity.as_ref())?;
    let payload = match outcome {
        FormResult::Completed(payload) => payload,
        FormResult::Cancelled => {
            io::print_info(format!("{label} wizard cancelled; nothing was sent."));
            return Ok(());
        }
    };

    if args.dry_run {
        output::section(format!("{label} payload"));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let client = context.api_client()?;
    loop {
        match send(&client, &payload) {
            Ok(_) => {
                tracing::info!(wizard = label, "submission accepted");
                io::print_success(format!("{label} submitted."));
                return Ok(());
            }
            Err(err) => {
                tracing::warn!(wizard = label, error = %err, "submission failed");
                io::print_error(format!("Submission failed: {err}"));
                if !io::confirm_action("Retry submission?", true)? {
                    return Err(err.into());
                }
            }
        }
    }
}
