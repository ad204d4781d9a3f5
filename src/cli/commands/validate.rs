//! `tolchain validate` command - check a contributor table without analysing it

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_rows;
use crate::cli::output::{print_structured, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::chain::build_chain;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Contributor table (YAML or JSON sequence of rows)
    pub rows: PathBuf,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let rows = load_rows(&args.rows)?;
    let chain = build_chain(&rows)?;

    match resolve_format(global.format) {
        OutputFormat::Text | OutputFormat::Auto => {
            println!(
                "{} {} contributor(s) valid in {}",
                style("✓").green(),
                style(chain.len()).cyan(),
                style(args.rows.display()).dim()
            );
            for c in &chain {
                println!(
                    "   {} {} {} +{}/-{}",
                    c.direction,
                    style(&c.name).cyan(),
                    c.nominal,
                    c.plus_tolerance,
                    c.minus_tolerance
                );
            }
        }
        format => print_structured(&chain, format)?,
    }

    Ok(())
}
