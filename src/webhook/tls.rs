// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! TLS termination for the webhook server from PEM encoded files

use crate::error::{OperatorError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::rustls::crypto::ring::default_provider;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tracing::{debug, instrument};

/// Build a rustls server configuration from a certificate chain and a private key file
#[instrument]
pub fn load_server_config(cert_path: &Path, key_path: &Path) -> Result<ServerConfig> {
    let certs = read_certificates(cert_path)?;
    let key = read_private_key(key_path)?;
    debug!("Loaded {} certificate(s)", certs.len());

    let mut config = ServerConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(config)
}

/// Read every certificate from a PEM file
pub fn read_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| tls_file_error(path, source))?;

    if certs.is_empty() {
        return Err(OperatorError::NoCertificates(path.to_path_buf()));
    }
    Ok(certs)
}

/// Read the first PKCS1, PKCS8 or SEC1 private key from a PEM file
pub fn read_private_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| tls_file_error(path, source))?
        .ok_or_else(|| OperatorError::NoPrivateKey(path.to_path_buf()))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| tls_file_error(path, source))
}

fn tls_file_error(path: &Path, source: std::io::Error) -> OperatorError {
    OperatorError::TlsFile {
        path: path.to_path_buf(),
        source,
    }
}
