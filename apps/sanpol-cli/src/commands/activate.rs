//! Make a policy the active one.

use clap::Args;

use sanpol_engine::{Reconciler, RunOptions, RunRequest};

use crate::connect::ConnectArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Make a policy the active one on the switch
#[derive(Args, Debug)]
pub struct ActivateArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Name of the policy to activate
    pub name: String,
}

/// Execute the activate command
pub async fn execute(args: ActivateArgs) -> CliResult<()> {
    let gateway = args.connect.gateway()?;

    let report = Reconciler::new(gateway)
        .run(
            RunRequest::Activate(args.name),
            RunOptions {
                simulate: args.connect.check,
            },
        )
        .await?;

    output::render(&report, args.connect.json)?;

    if report.failed {
        return Err(CliError::RunFailed(
            report.message.unwrap_or_else(|| "run failed".to_string()),
        ));
    }
    Ok(())
}
