// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workload kinds whose pod templates receive the certificate volume

use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::PodSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A resource that owns a pod template
pub trait Workload:
    Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The object's own metadata together with its pod template spec, if any
    fn pod_template_mut(&mut self) -> (&ObjectMeta, Option<&mut PodSpec>);
}

impl Workload for Deployment {
    fn pod_template_mut(&mut self) -> (&ObjectMeta, Option<&mut PodSpec>) {
        let pod_spec = self.spec.as_mut().and_then(|s| s.template.spec.as_mut());
        (&self.metadata, pod_spec)
    }
}

impl Workload for StatefulSet {
    fn pod_template_mut(&mut self) -> (&ObjectMeta, Option<&mut PodSpec>) {
        let pod_spec = self.spec.as_mut().and_then(|s| s.template.spec.as_mut());
        (&self.metadata, pod_spec)
    }
}
