// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

/// Validation failures of the CSI configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least a namespace or an annotation key must be set")]
    ScopeUnset,

    #[error("issuer name is required")]
    IssuerNameRequired,

    #[error("mount path is required")]
    MountPathRequired,

    #[error("common name {0:?} must be a templated string")]
    CommonNameNotTemplated(String),
}

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to serialize admission patch: {0}")]
    Patch(#[from] kube::core::admission::SerializePatchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read TLS file {path}: {source}")]
    TlsFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No certificates found in {0}")]
    NoCertificates(PathBuf),

    #[error("No private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("TLS configuration error: {0}")]
    Tls(#[from] tokio_rustls::rustls::Error),
}

pub type Result<T> = std::result::Result<T, OperatorError>;
