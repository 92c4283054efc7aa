//! Fee command: estimate the stamping cost for a txid's sheep.

use clap::Args;

use crate::error::Result;
use crate::flock::Flock;
use crate::stamp::{StampBackend, StampRequest};

use super::Context;

/// Estimate the fee for stamping the sheep for a txid
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// 64-character transaction id
    #[arg(long)]
    pub txid: String,
}

/// Estimated fee in sats for the sheep derived from `txid`.
pub fn estimate(txid: &str, ctx: &Context) -> Result<u64> {
    let style = ctx.load_style()?;
    let result = Flock::new(&style).generate_from_txid(txid)?;
    let request = StampRequest::from_metadata(&result.metadata)?;

    ctx.stamp_service()?.estimate_fee(&request)
}

pub fn run(args: FeeArgs, ctx: &Context) -> Result<()> {
    let sats = estimate(&args.txid, ctx)?;

    ctx.printer.info("Estimated", &format!("{} sats", sats));
    println!("{}", serde_json::json!({ "estimated_sats": sats }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use crate::stamp::MOCK_FEE_SATS;

    #[test]
    fn test_mock_fee() {
        let ctx = Context::new(Manifest::default(), None);
        assert_eq!(estimate(&"a".repeat(64), &ctx).unwrap(), MOCK_FEE_SATS);
    }
}
