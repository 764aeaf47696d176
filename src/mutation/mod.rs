// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Injection of the certificate volume into pod template specs.

pub mod managed;
pub mod merge;

pub use merge::{merge_by_name, merge_mounts, merge_volumes, Named};

use crate::csi::CsiConfig;
use crate::error::ConfigError;
use k8s_openapi::api::core::v1::PodSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info};

/// What [`mutate`] did to the pod spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The workload is not managed, the pod spec was left untouched
    Unmanaged,
    /// The certificate volume and mounts are present in the pod spec
    Injected,
}

/// Ensure the certificate volume and its mount exist in a managed pod spec.
///
/// The volume is merged into the pod's volumes and the mount into every
/// container. On a configuration error the pod spec is not touched. Applying
/// this to an already mutated pod spec changes nothing.
pub fn mutate(
    config: &CsiConfig,
    meta: &ObjectMeta,
    pod_spec: &mut PodSpec,
) -> Result<MutationOutcome, ConfigError> {
    if !config.is_managed(meta) {
        info!("Object is not managed");
        return Ok(MutationOutcome::Unmanaged);
    }
    debug!("Object is managed");

    let attributes = config.attributes()?;
    let (volume, mount) = config.volume_and_mount(attributes);

    merge_volumes(&mut pod_spec.volumes, [volume]);
    for container in pod_spec.containers.iter_mut() {
        merge_mounts(&mut container.volume_mounts, [mount.clone()]);
    }

    info!(
        "Ensured volume and mount exist for {} container(s)",
        pod_spec.containers.len()
    );
    Ok(MutationOutcome::Injected)
}
