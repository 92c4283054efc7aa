//! Traits command: resolve traits without rendering.

use clap::{ArgGroup, Args};
use serde::Serialize;

use crate::error::{FlockError, Result};
use crate::resolve::resolve_traits;
use crate::seed::{normalize_txid, seed_from_txid, Seed};
use crate::types::Traits;

use super::Context;

/// Print the traits for a seed or txid
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["seed", "txid"])))]
pub struct TraitsArgs {
    /// Positive integer seed
    pub seed: Option<String>,

    /// 64-character transaction id to derive the seed from
    #[arg(long)]
    pub txid: Option<String>,
}

#[derive(Debug, Serialize)]
struct TraitsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    txid: Option<String>,
    seed: u64,
    traits: Traits,
}

pub fn run(args: TraitsArgs, ctx: &Context) -> Result<()> {
    let report = report(&args)?;

    ctx.printer
        .status("Resolved", &format!("traits for seed {}", report.seed));

    let json = serde_json::to_string_pretty(&report).map_err(|e| FlockError::Encode {
        message: format!("Failed to serialize traits: {}", e),
    })?;
    println!("{}", json);

    Ok(())
}

fn report(args: &TraitsArgs) -> Result<TraitsReport> {
    let (seed, txid) = match (&args.seed, &args.txid) {
        (_, Some(txid)) => (seed_from_txid(txid)?, Some(normalize_txid(txid)?)),
        (Some(seed), None) => (seed.parse::<Seed>()?, None),
        (None, None) => {
            return Err(FlockError::InvalidSeed {
                value: String::new(),
            })
        }
    };

    Ok(TraitsReport {
        txid,
        seed: seed.get(),
        traits: resolve_traits(seed.get())?,
    })
}
