//! Shared connection arguments and gateway construction.

use std::time::Duration;

use clap::Args;
use dialoguer::Password;

use sanpol_gateway::{
    Credentials, GatewayConfig, RestGateway, TransportSecurity, DEFAULT_VF_ID,
};

use crate::error::{CliError, CliResult};

/// How to reach and address one switch.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Management address of the switch (host or host:port)
    #[arg(short = 's', long = "switch")]
    pub switch: String,

    /// Login user name
    #[arg(short = 'u', long)]
    pub username: String,

    /// Login password; falls back to an interactive prompt
    #[arg(short = 'p', long, env = "SANPOL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Transport security: http, https, or self-signed
    #[arg(long, default_value_t = TransportSecurity::Https)]
    pub security: TransportSecurity,

    /// Virtual fabric to target (-1 for a switch without virtual fabrics)
    #[arg(long = "vf-id", default_value_t = DEFAULT_VF_ID)]
    pub vf_id: i32,

    /// Delay in seconds inserted before every management call
    #[arg(long, value_name = "SECONDS")]
    pub throttle: Option<f64>,

    /// Compute and report changes without submitting them
    #[arg(long)]
    pub check: bool,

    /// Output the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConnectArgs {
    /// Build the REST gateway for these arguments.
    pub fn gateway(&self) -> CliResult<RestGateway> {
        let password = self.resolve_password()?;
        let mut config = GatewayConfig::new(
            self.switch.clone(),
            Credentials::new(self.username.clone(), password),
        )
        .with_security(self.security)
        .with_vf_id(self.vf_id);

        if let Some(seconds) = self.throttle {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(CliError::Validation(format!(
                    "throttle must be a non-negative number of seconds, got {seconds}"
                )));
            }
            config = config.with_throttle(Duration::from_secs_f64(seconds));
        }

        Ok(RestGateway::new(config)?)
    }

    fn resolve_password(&self) -> CliResult<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        if !atty::is(atty::Stream::Stdin) {
            return Err(CliError::Validation(
                "No password given. Pass --password or set SANPOL_PASSWORD.".to_string(),
            ));
        }
        let password = Password::new()
            .with_prompt(format!("Password for {}@{}", self.username, self.switch))
            .interact()?;
        Ok(password)
    }
}
