// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator-wide policy for the cert-manager CSI volume.
//! See https://cert-manager.io/docs/projects/csi-driver/#supported-volume-attributes

use crate::constants::{defaults, TEMPLATE_MARKER};
use crate::error::ConfigError;
use clap::Args;
use std::fmt;

/// Which workloads are managed and how their certificate volume is requested.
///
/// Built once at startup from flags and environment variables, validated once,
/// then shared read-only between all admission requests.
#[derive(Args, Clone, PartialEq, Eq)]
pub struct CsiConfig {
    /// When set, resources created in this namespace are managed.
    #[arg(long, env = "CSI_NAMESPACE", default_value = "")]
    pub namespace: String,

    /// When set, resources carrying this annotation are managed (overrides the namespace match).
    #[arg(long, env = "CSI_ANNOTATION_KEY", default_value = defaults::ANNOTATION_KEY)]
    pub annotation_key: String,

    /// The issuer name to sign the certificate request.
    #[arg(long, env = "CSI_ISSUER_NAME", default_value = "")]
    pub issuer_name: String,

    /// The issuer kind to sign the certificate request.
    #[arg(long, env = "CSI_ISSUER_KIND", default_value = "")]
    pub issuer_kind: String,

    /// FS group of the written files. Should match the runAsGroup of the consuming container.
    #[arg(
        long,
        env = "CSI_FS_GROUP",
        default_value_t = defaults::FS_GROUP,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub fs_group: i64,

    /// File name to store the CA certificate at.
    #[arg(long = "ca-file", env = "CSI_CA_FILE", default_value = "")]
    pub ca_filename: String,

    /// File name to store the certificate at.
    #[arg(long = "certificate-file", env = "CSI_CERTIFICATE_FILE", default_value = "")]
    pub cert_filename: String,

    /// File name to store the private key at.
    #[arg(long = "privatekey-file", env = "CSI_PRIVATEKEY_FILE", default_value = "")]
    pub key_filename: String,

    /// Directory the certificate files are mounted into.
    #[arg(long, env = "CSI_MOUNT_PATH", default_value = defaults::MOUNT_PATH)]
    pub mount_path: String,

    /// Mark the certificate as a certificate authority.
    #[arg(long, env = "CSI_IS_CA")]
    pub is_ca: bool,

    /// Requested duration the signed certificate is valid for.
    #[arg(long, env = "CSI_DURATION", default_value = "")]
    pub duration: String,

    /// Time to renew the certificate before expiry. The driver defaults to a third of the duration.
    #[arg(long, env = "CSI_RENEW_BEFORE", default_value = "")]
    pub renew_before: String,

    /// Re-use the same private key when renewing certificates.
    #[arg(long, env = "CSI_REUSE_PRIVATE_KEY")]
    pub reuse_private_key: bool,

    /// Certificate common name template, e.g. "${POD_NAME}.${POD_NAMESPACE}".
    #[arg(long, env = "CSI_COMMON_NAME", default_value = "")]
    pub common_name: String,

    /// DNS names the certificate is requested for (supports variables).
    #[arg(long, env = "CSI_DNS_NAMES", default_value = "")]
    pub dns_names: String,

    /// IP addresses the certificate is requested for.
    #[arg(long, env = "CSI_IP_SANS", default_value = "")]
    pub ip_sans: String,

    /// URI names the certificate is requested for (supports variables).
    #[arg(long, env = "CSI_URI_SANS", default_value = "")]
    pub uri_sans: String,

    /// Key encoding format (PKCS1 or PKCS8).
    #[arg(long, env = "CSI_KEY_ENCODING", default_value = "")]
    pub key_encoding: String,

    /// Key usages set on the certificate request.
    #[arg(long, env = "CSI_KEY_USAGES", default_value = "")]
    pub key_usages: String,

    /// Also write the certificate chain and private key as a PKCS12 file.
    #[arg(long, env = "CSI_PKCS12_ENABLE")]
    pub pkcs12_enable: bool,

    /// File name of the PKCS12 file. Requires --pkcs12-enable.
    #[arg(long, env = "CSI_PKCS12_FILENAME", default_value = "")]
    pub pkcs12_filename: String,

    /// Password encoding the PKCS12 file. Required by the driver when --pkcs12-enable is set.
    #[arg(long, env = "CSI_PKCS12_PASSWORD", default_value = "", hide_env_values = true)]
    pub pkcs12_password: String,
}

impl Default for CsiConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            annotation_key: defaults::ANNOTATION_KEY.to_string(),
            issuer_name: String::new(),
            issuer_kind: String::new(),
            fs_group: defaults::FS_GROUP,
            ca_filename: String::new(),
            cert_filename: String::new(),
            key_filename: String::new(),
            mount_path: defaults::MOUNT_PATH.to_string(),
            is_ca: false,
            duration: String::new(),
            renew_before: String::new(),
            reuse_private_key: false,
            common_name: String::new(),
            dns_names: String::new(),
            ip_sans: String::new(),
            uri_sans: String::new(),
            key_encoding: String::new(),
            key_usages: String::new(),
            pkcs12_enable: false,
            pkcs12_filename: String::new(),
            pkcs12_password: String::new(),
        }
    }
}

impl CsiConfig {
    /// Check the invariants the rest of the operator relies on.
    ///
    /// The PKCS12 password is not checked here, the CSI driver rejects the
    /// volume when it is missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() && self.annotation_key.is_empty() {
            return Err(ConfigError::ScopeUnset);
        }
        if self.issuer_name.is_empty() {
            return Err(ConfigError::IssuerNameRequired);
        }
        if self.mount_path.is_empty() {
            return Err(ConfigError::MountPathRequired);
        }
        if !self.common_name.is_empty() && !self.common_name.contains(TEMPLATE_MARKER) {
            return Err(ConfigError::CommonNameNotTemplated(
                self.common_name.clone(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for CsiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.pkcs12_password.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("CsiConfig")
            .field("namespace", &self.namespace)
            .field("annotation_key", &self.annotation_key)
            .field("issuer_name", &self.issuer_name)
            .field("issuer_kind", &self.issuer_kind)
            .field("fs_group", &self.fs_group)
            .field("ca_filename", &self.ca_filename)
            .field("cert_filename", &self.cert_filename)
            .field("key_filename", &self.key_filename)
            .field("mount_path", &self.mount_path)
            .field("is_ca", &self.is_ca)
            .field("duration", &self.duration)
            .field("renew_before", &self.renew_before)
            .field("reuse_private_key", &self.reuse_private_key)
            .field("common_name", &self.common_name)
            .field("dns_names", &self.dns_names)
            .field("ip_sans", &self.ip_sans)
            .field("uri_sans", &self.uri_sans)
            .field("key_encoding", &self.key_encoding)
            .field("key_usages", &self.key_usages)
            .field("pkcs12_enable", &self.pkcs12_enable)
            .field("pkcs12_filename", &self.pkcs12_filename)
            .field("pkcs12_password", &password)
            .finish()
    }
}
