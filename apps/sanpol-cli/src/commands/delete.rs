//! Delete policies by name.

use clap::Args;

use sanpol_engine::{Reconciler, RunOptions, RunRequest};

use crate::connect::ConnectArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Delete policies by name
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Names of the policies to delete; names that do not exist on the
    /// switch are skipped
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Execute the delete command
pub async fn execute(args: DeleteArgs) -> CliResult<()> {
    let gateway = args.connect.gateway()?;

    let report = Reconciler::new(gateway)
        .run(
            RunRequest::Delete(args.names),
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
