//! `tolchain analyze` command - run the stack-up on a contributor table

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{load_rows, percent_bar};
use crate::cli::output::{print_structured, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::analyze;
use crate::core::config::{AnalysisConfig, MonteCarloConfig, Target};
use crate::core::report::{Bounds, Report};
use crate::core::stackup::{TargetCheck, Verdict};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Contributor table (YAML or JSON sequence of rows)
    pub rows: PathBuf,

    /// Analysis configuration file (YAML)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Lower specification limit of the resultant (requires --usl)
    #[arg(long, requires = "usl", allow_hyphen_values = true)]
    pub lsl: Option<f64>,

    /// Upper specification limit of the resultant (requires --lsl)
    #[arg(long, requires = "lsl", allow_hyphen_values = true)]
    pub usl: Option<f64>,

    /// Run a Monte Carlo simulation with N iterations
    #[arg(long, value_name = "N")]
    pub monte_carlo: Option<u32>,

    /// Seed for the Monte Carlo RNG (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sigma level for normal contributors in Monte Carlo
    /// Common values: 6.0 (±3σ, 99.73%), 4.0 (±2σ, 95.4%), 8.0 (±4σ, 99.99%)
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Decimal places for text output
    #[arg(long)]
    pub precision: Option<usize>,
}

impl AnalyzeArgs {
    /// Load the configuration file (if any) and apply command-line overrides
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match self.config {
            Some(ref path) => AnalysisConfig::load(path).into_diagnostic()?,
            None => AnalysisConfig::default(),
        };

        if let (Some(lsl), Some(usl)) = (self.lsl, self.usl) {
            let mut target = config.target.take().unwrap_or_else(|| Target::new(lsl, usl));
            target.lower_limit = lsl;
            target.upper_limit = usl;
            config.target = Some(target);
        }

        if self.monte_carlo.is_some() || self.seed.is_some() || self.sigma.is_some() {
            let mc = config.monte_carlo.get_or_insert_with(MonteCarloConfig::default);
            if let Some(iterations) = self.monte_carlo {
                mc.iterations = iterations;
            }
            if self.seed.is_some() {
                mc.seed = self.seed;
            }
            if let Some(sigma) = self.sigma {
                mc.sigma_level = sigma;
            }
        }

        if let Some(precision) = self.precision {
            config.precision = precision;
        }

        config.validate().into_diagnostic()?;
        Ok(config)
    }
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let config = args.resolve_config()?;
    let rows = load_rows(&args.rows)?;
    let report = analyze(&rows, &config)?;

    match resolve_format(global.format) {
        OutputFormat::Text | OutputFormat::Auto => print_report(&report),
        format => print_structured(&report, format)?,
    }

    Ok(())
}

fn print_report(report: &Report) {
    let p = report.precision();

    println!(
        "{} Analyzed {} contributor(s)",
        style("✓").green(),
        style(report.contributor_count).cyan()
    );
    println!();
    println!("   Nominal resultant: {:.*}", p, report.nominal_resultant);

    if let Some(ref target) = report.target {
        println!(
            "   Target: {} (LSL: {:.*}, USL: {:.*}) {}",
            style(&target.target.name).yellow(),
            p,
            target.target.lower_limit,
            p,
            target.target.upper_limit,
            target.target.units
        );
    }

    let checks = report.target.as_ref().map(|t| (t.worst_case, t.statistical));

    println!();
    println!("   {} Analysis:", style("Worst-Case").bold());
    print_bounds(&report.worst_case, checks.map(|c| c.0), p);

    println!();
    println!("   {} Analysis:", style("RSS (Statistical)").bold());
    print_bounds(&report.statistical, checks.map(|c| c.1), p);

    if report.contributors.len() > 1 {
        println!();
        println!(
            "   {} (Variance Contribution):",
            style("Sensitivity Analysis").bold()
        );
        for line in &report.contributors {
            let pct = line.variance_percent;
            let pct_styled = if pct >= 50.0 {
                style(format!("{:5.1}%", pct)).red().bold()
            } else if pct >= 25.0 {
                style(format!("{:5.1}%", pct)).yellow()
            } else {
                style(format!("{:5.1}%", pct)).dim()
            };
            println!(
                "     {} {} {} {}",
                pct_styled,
                percent_bar(pct, 30),
                line.direction,
                line.name
            );
        }
    }

    if let Some(ref mc) = report.monte_carlo {
        println!();
        println!(
            "   {} ({} iterations):",
            style("Monte Carlo").bold(),
            mc.iterations
        );
        print_indented(&format!("{:.*}", p, mc));
    }
}

fn print_bounds(bounds: &Bounds, check: Option<TargetCheck>, p: usize) {
    print_indented(&format!("{:.*}", p, bounds));
    if let Some(check) = check {
        let verdict = match check.verdict {
            Verdict::Pass => style(check.verdict.to_string()).green(),
            Verdict::Marginal => style(check.verdict.to_string()).yellow(),
            Verdict::Fail => style(check.verdict.to_string()).red(),
        };
        println!("     Margin: {:.*}", p, check.margin);
        println!("     Result: {}", verdict);
    }
}

/// Print a plain `Display` section under a styled heading
fn print_indented(body: &str) {
    for line in body.lines() {
        println!("     {}", line);
    }
}
