use crate::reports;
use clap::Args;
use seatforge_core::formats::read_text_file;
use seatforge_core::report::{dump, repeat_partners, report};
use seatforge_core::SfResult;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    pub input: PathBuf,

    /// Also list everyone this person meets more than once
    #[arg(short, long)]
    pub person: Option<String>,
}

pub fn run(args: ReportArgs) -> SfResult<()> {
    let state = read_text_file(&args.input)?;

    // Resolve the name first so a typo fails before any output.
    let person = args
        .person
        .as_deref()
        .map(|name| state.person_index(name))
        .transpose()?;

    println!("{}", dump(&state));
    println!("{}", report(&state));
    reports::print_summary(&state);

    if let Some(p) = person {
        reports::print_partners(&state, p, &repeat_partners(&state, p));
    }
    Ok(())
}
