// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Projection of the CSI configuration onto the driver's volume attributes

use crate::constants::{attributes, CSI_DRIVER};
use crate::csi::CsiConfig;
use crate::error::ConfigError;
use std::collections::BTreeMap;

/// Build the full attribute key for a slug, e.g. `csi.cert-manager.io/issuer-name`
pub fn attribute_key(slug: &str) -> String {
    format!("{}/{}", CSI_DRIVER, slug)
}

impl CsiConfig {
    /// Volume attributes for the cert-manager CSI driver.
    ///
    /// Validates first and returns the validation error unchanged, so no
    /// partial map is ever produced from an invalid configuration.
    pub fn attributes(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        self.validate()?;
        Ok(project_attributes(self))
    }
}

/// Map every configuration field to its attribute, then drop empty values and
/// an fs-group of `0`. Booleans are always emitted as `"true"` or `"false"`.
pub fn project_attributes(config: &CsiConfig) -> BTreeMap<String, String> {
    let all = [
        // Issuer
        (attributes::ISSUER_NAME, config.issuer_name.clone()),
        (attributes::ISSUER_KIND, config.issuer_kind.clone()),
        // Files
        (attributes::FS_GROUP, config.fs_group.to_string()),
        (attributes::CA_FILE, config.ca_filename.clone()),
        (attributes::CERTIFICATE_FILE, config.cert_filename.clone()),
        (attributes::PRIVATEKEY_FILE, config.key_filename.clone()),
        // Details
        (attributes::IS_CA, config.is_ca.to_string()),
        (attributes::DURATION, config.duration.clone()),
        (attributes::RENEW_BEFORE, config.renew_before.clone()),
        (
            attributes::REUSE_PRIVATE_KEY,
            config.reuse_private_key.to_string(),
        ),
        (attributes::COMMON_NAME, config.common_name.clone()),
        (attributes::DNS_NAMES, config.dns_names.clone()),
        (attributes::IP_SANS, config.ip_sans.clone()),
        (attributes::URI_SANS, config.uri_sans.clone()),
        (attributes::KEY_ENCODING, config.key_encoding.clone()),
        (attributes::KEY_USAGES, config.key_usages.clone()),
        (attributes::PKCS12_ENABLE, config.pkcs12_enable.to_string()),
        (attributes::PKCS12_FILENAME, config.pkcs12_filename.clone()),
        (attributes::PKCS12_PASSWORD, config.pkcs12_password.clone()),
    ];

    all.into_iter()
        .filter(|(slug, value)| !is_default_value(slug, value))
        .map(|(slug, value)| (attribute_key(slug), value))
        .collect()
}

fn is_default_value(slug: &str, value: &str) -> bool {
    value.is_empty() || (slug == attributes::FS_GROUP && value == "0")
}
