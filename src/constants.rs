// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Name of the cert-manager CSI driver, also the prefix of every volume attribute key
pub const CSI_DRIVER: &str = "csi.cert-manager.io";

/// Name shared by the injected volume and its mount
pub const VOLUME_NAME: &str = "cert-manager-tls";

/// Marker that a common name must contain to be treated as a template
pub const TEMPLATE_MARKER: &str = "${";

/// Default values for the operator flags
pub mod defaults {
    pub const ANNOTATION_KEY: &str = "op.csi.cert-manager.io";
    pub const MOUNT_PATH: &str = "/var/run/tls";
    pub const FS_GROUP: i64 = 0;
    pub const BIND_ADDRESS: &str = "0.0.0.0:9443";
}

/// Slugs of the CSI volume attributes understood by the cert-manager CSI driver.
/// See https://cert-manager.io/docs/projects/csi-driver/#supported-volume-attributes
pub mod attributes {
    pub const ISSUER_NAME: &str = "issuer-name";
    pub const ISSUER_KIND: &str = "issuer-kind";
    pub const FS_GROUP: &str = "fs-group";
    pub const CA_FILE: &str = "ca-file";
    pub const CERTIFICATE_FILE: &str = "certificate-file";
    pub const PRIVATEKEY_FILE: &str = "privatekey-file";
    pub const IS_CA: &str = "is-ca";
    pub const DURATION: &str = "duration";
    pub const RENEW_BEFORE: &str = "renew-before";
    pub const REUSE_PRIVATE_KEY: &str = "reuse-private-key";
    pub const COMMON_NAME: &str = "common-name";
    pub const DNS_NAMES: &str = "dns-names";
    pub const IP_SANS: &str = "ip-sans";
    pub const URI_SANS: &str = "uri-sans";
    pub const KEY_ENCODING: &str = "key-encoding";
    pub const KEY_USAGES: &str = "key-usages";
    pub const PKCS12_ENABLE: &str = "pkcs12-enable";
    pub const PKCS12_FILENAME: &str = "pkcs12-filename";
    pub const PKCS12_PASSWORD: &str = "pkcs12-password";
}

/// HTTP paths served by the webhook
pub mod paths {
    pub const MUTATE_DEPLOYMENT: &str = "/mutate-v1-deployment";
    pub const MUTATE_STATEFULSET: &str = "/mutate-v1-statefulset";
    pub const HEALTHZ: &str = "/healthz";
}
