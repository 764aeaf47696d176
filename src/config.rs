// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use crate::csi::CsiConfig;
use crate::error::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Operator configuration loaded from command line flags and environment variables
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cert-manager-csi-operator",
    version,
    about = "Mutating webhook injecting cert-manager CSI volumes into Deployments and StatefulSets"
)]
pub struct Config {
    /// Address the webhook server listens on
    #[arg(long, env = "BIND_ADDRESS", default_value = defaults::BIND_ADDRESS)]
    pub bind_address: SocketAddr,

    /// PEM encoded certificate chain served by the webhook
    #[arg(long, env = "TLS_CERT_FILE", requires = "tls_key_file")]
    pub tls_cert_file: Option<PathBuf>,

    /// PEM encoded private key of the webhook certificate
    #[arg(long, env = "TLS_KEY_FILE", requires = "tls_cert_file")]
    pub tls_key_file: Option<PathBuf>,

    #[command(flatten)]
    pub csi: CsiConfig,
}

impl Config {
    /// Parse flags and environment variables and validate the result
    pub fn load() -> Result<Self> {
        let config = Config::parse();
        config.csi.validate()?;
        Ok(config)
    }
}
