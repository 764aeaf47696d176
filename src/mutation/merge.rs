// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Name-keyed merging of volumes and volume mounts

use k8s_openapi::api::core::v1::{Volume, VolumeMount};

/// Pod spec list entries identified by their name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Volume {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for VolumeMount {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Merge `elements` into `dst` by name.
///
/// An element replaces the first entry with the same name in place, otherwise
/// it is appended. Entries with other names keep their content and order, so
/// merging the same element twice leaves `dst` unchanged the second time.
pub fn merge_by_name<T: Named>(dst: &mut Vec<T>, elements: impl IntoIterator<Item = T>) {
    for element in elements {
        match dst.iter_mut().find(|current| current.name() == element.name()) {
            Some(current) => *current = element,
            None => dst.push(element),
        }
    }
}

/// Merge volumes into an optional pod spec volume list
pub fn merge_volumes(dst: &mut Option<Vec<Volume>>, volumes: impl IntoIterator<Item = Volume>) {
    merge_by_name(dst.get_or_insert_with(Vec::new), volumes);
}

/// Merge mounts into an optional container volume mount list
pub fn merge_mounts(
    dst: &mut Option<Vec<VolumeMount>>,
    mounts: impl IntoIterator<Item = VolumeMount>,
) {
    merge_by_name(dst.get_or_insert_with(Vec::new), mounts);
}
