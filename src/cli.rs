use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

use crate::negotiation::NegotiationKind;

pub struct CliArgs {
    pub config_path: PathBuf,
    pub kind: NegotiationKind,
    pub session_id: Option<String>,
}

pub fn args_from_env() -> Result<CliArgs> {
    let mut args = env::args().skip(1);
    let mut config_path = None;
    let mut kind = NegotiationKind::Interrogation;
    let mut session_id = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config_path = Some(PathBuf::from(value));
            }
            "--kind" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --kind"))?;
                kind = match value.as_str() {
                    "interrogation" => NegotiationKind::Interrogation,
                    "haggling" => NegotiationKind::Haggling,
                    other => {
                        return Err(anyhow!(
                            "unknown kind: {other}. expected interrogation or haggling"
                        ));
                    }
                };
            }
            "--session" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --session"))?;
                session_id = Some(value);
            }
            other => {
                return Err(anyhow!(
                    "unknown argument: {other}. usage: parley [--config <path>] [--kind interrogation|haggling] [--session <id>]"
                ));
            }
        }
    }

    Ok(CliArgs {
        config_path: config_path.unwrap_or_else(|| PathBuf::from("./parley.jsonc")),
        kind,
        session_id,
    })
}
