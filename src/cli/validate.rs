//! Validate command: report every diagnostic for a style.

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural};
use crate::style::load_documents;
use crate::validation::{first_error, validate_style, ValidationResult};

use super::Context;

/// Check a style's palette and masks
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let source = ctx
        .style_dir()
        .map(display_path)
        .unwrap_or_else(|| "builtin style".to_string());

    let (palette, masks) = load_documents(ctx.style_dir())?;
    let result = validate_style(&palette, &masks);

    print_diagnostics(&result, ctx);

    let summary = format!(
        "{} ({}, {}x{} grid): {}, {}",
        source,
        plural(palette.len(), "colour", "colours"),
        masks.grid(),
        masks.grid(),
        plural(result.error_count(), "error", "errors"),
        plural(result.warning_count(), "warning", "warnings")
    );

    if let Some(err) = first_error(&result) {
        ctx.printer.error("Invalid", &summary);
        return Err(err);
    }

    if args.strict && result.warning_count() > 0 {
        ctx.printer.error("Invalid", &summary);
        return Err(crate::error::FlockError::ConfigLoad {
            message: format!("{} in strict mode", plural(result.warning_count(), "warning", "warnings")),
            help: Some("Fix the warnings above or drop --strict".to_string()),
        });
    }

    ctx.printer.status("Validated", &summary);
    Ok(())
}

/// Print each diagnostic to stderr.
pub fn print_diagnostics(result: &ValidationResult, ctx: &Context) {
    for diagnostic in result.iter() {
        eprintln!("{}", ctx.printer.diagnostic(diagnostic));
    }
}
