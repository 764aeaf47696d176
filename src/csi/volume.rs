// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{CSI_DRIVER, VOLUME_NAME};
use crate::csi::CsiConfig;
use k8s_openapi::api::core::v1::{CSIVolumeSource, Volume, VolumeMount};
use std::collections::BTreeMap;

impl CsiConfig {
    /// The certificate volume and the mount every container receives.
    ///
    /// Both carry the same name so they are always merged together. The
    /// attributes are passed through unchanged.
    pub fn volume_and_mount(&self, attributes: BTreeMap<String, String>) -> (Volume, VolumeMount) {
        let volume = Volume {
            name: VOLUME_NAME.to_string(),
            csi: Some(CSIVolumeSource {
                driver: CSI_DRIVER.to_string(),
                read_only: Some(true),
                volume_attributes: Some(attributes),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mount = VolumeMount {
            name: VOLUME_NAME.to_string(),
            mount_path: self.mount_path.clone(),
            read_only: Some(true),
            ..Default::default()
        };
        (volume, mount)
    }
}
