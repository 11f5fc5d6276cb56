use crate::browse::{CompanyRecord, OfferRecord};
use crate::cli::browser_view::run_browser;
use crate::cli::core::{CommandContext, CommandResult};
use crate::cli::io;

pub fn offers(context: &CommandContext) -> CommandResult {
    let client = context.api_client()?;
    run_browser::<OfferRecord, _>("Offers", || {
        let collection = client.list_offers()?;
        report_skipped(collection.skipped);
        Ok(collection)
    })
}

pub fn companies(context: &CommandContext) -> CommandResult {
    let client = context.api_client()?;
    run_browser::<CompanyRecord, _>("Companies", || {
        let collection = client.list_companies()?;
        report_skipped(collection.skipped);
        Ok(collection)
    })
}

fn report_skipped(skipped: usize) {
    if skipped > 0 {
        io::print_warning(format!("{skipped} record(s) could not be read and were skipped."));
    }
}
