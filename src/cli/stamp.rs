//! Stamp command: generate the sheep for a txid and stamp it.

use clap::Args;
use serde::Serialize;

use crate::error::{FlockError, Result};
use crate::flock::Flock;
use crate::stamp::{StampBackend, StampRequest};

use super::Context;

/// Generate the sheep for a txid and stamp it
#[derive(Args, Debug)]
pub struct StampArgs {
    /// 64-character transaction id
    #[arg(long)]
    pub txid: String,
}

#[derive(Debug, Serialize)]
struct StampOutput<'a> {
    seed: u64,
    source_txid: &'a str,
    tx_hash: String,
}

pub fn run(args: StampArgs, ctx: &Context) -> Result<()> {
    let style = ctx.load_style()?;
    let result = Flock::new(&style).generate_from_txid(&args.txid)?;
    let request = StampRequest::from_metadata(&result.metadata)?;

    let service = ctx.stamp_service()?;
    let tx_hash = service.create_stamp(&request)?;

    ctx.printer
        .status("Stamped", &format!("{} as {}", request.name, tx_hash));

    let output = StampOutput {
        seed: result.seed.get(),
        source_txid: result.metadata.source_txid.as_deref().unwrap_or_default(),
        tx_hash,
    };
    let json = serde_json::to_string_pretty(&output).map_err(|e| FlockError::Encode {
        message: format!("Failed to serialize stamp result: {}", e),
    })?;
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    #[test]
    fn test_stamp_with_mock() {
        let ctx = Context::new(Manifest::default(), None);
        run(StampArgs { txid: "f".repeat(64) }, &ctx).unwrap();
    }

    #[test]
    fn test_stamp_rejects_bad_txid() {
        let ctx = Context::new(Manifest::default(), None);
        let err = run(StampArgs { txid: "nope".to_string() }, &ctx).unwrap_err();
        assert!(matches!(err, FlockError::InvalidTxid { .. }));
    }
}
