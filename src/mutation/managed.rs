// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::csi::CsiConfig;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

impl CsiConfig {
    /// Check whether a workload is in scope for certificate injection.
    ///
    /// The namespace is compared literally, so an empty configured namespace
    /// only matches objects without a namespace. A configured annotation key
    /// takes precedence over the namespace match: the workload is then managed
    /// exactly when it carries the annotation, whatever its value.
    pub fn is_managed(&self, meta: &ObjectMeta) -> bool {
        let mut managed = meta.namespace.as_deref().unwrap_or_default() == self.namespace;

        if !self.annotation_key.is_empty() {
            managed = meta
                .annotations
                .as_ref()
                .is_some_and(|a| a.contains_key(&self.annotation_key));
        }

        managed
    }
}
