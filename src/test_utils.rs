// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for building workloads and admission reviews.

use crate::csi::CsiConfig;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec, StatefulSet, StatefulSetSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec, Volume, VolumeMount};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;

/// A valid configuration using the default annotation scope and issuer "ca-issuer"
pub fn make_csi_config() -> CsiConfig {
    CsiConfig {
        issuer_name: "ca-issuer".to_string(),
        ..Default::default()
    }
}

pub fn make_meta(
    namespace: Option<&str>,
    annotations: Option<BTreeMap<String, String>>,
) -> ObjectMeta {
    ObjectMeta {
        name: Some("test".to_string()),
        namespace: namespace.map(str::to_string),
        annotations,
        ..Default::default()
    }
}

pub fn make_container(name: &str, volume_mounts: Option<Vec<VolumeMount>>) -> Container {
    Container {
        name: name.to_string(),
        image: Some("example.com/unittest:latest".to_string()),
        volume_mounts,
        ..Default::default()
    }
}

pub fn make_pod_spec(containers: Vec<Container>, volumes: Option<Vec<Volume>>) -> PodSpec {
    PodSpec {
        containers,
        volumes,
        ..Default::default()
    }
}

fn make_template(pod_spec: PodSpec) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(app_labels()),
            ..Default::default()
        }),
        spec: Some(pod_spec),
    }
}

fn app_labels() -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), "unittest".to_string())])
}

pub fn make_deployment(meta: ObjectMeta, pod_spec: PodSpec) -> Deployment {
    Deployment {
        metadata: meta,
        spec: Some(DeploymentSpec {
            selector: LabelSelector {
                match_labels: Some(app_labels()),
                ..Default::default()
            },
            template: make_template(pod_spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_statefulset(meta: ObjectMeta, pod_spec: PodSpec) -> StatefulSet {
    StatefulSet {
        metadata: meta,
        spec: Some(StatefulSetSpec {
            selector: LabelSelector {
                match_labels: Some(app_labels()),
                ..Default::default()
            },
            template: make_template(pod_spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create an admission.k8s.io/v1 AdmissionReview JSON body for an apps/v1 object
pub fn admission_review_json(
    kind: &str,
    resource: &str,
    namespace: &str,
    object: serde_json::Value,
) -> serde_json::Value {
    let name = object
        .pointer("/metadata/name")
        .cloned()
        .unwrap_or_else(|| serde_json::Value::String(String::new()));
    serde_json::json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {"group": "apps", "version": "v1", "kind": kind},
            "resource": {"group": "apps", "version": "v1", "resource": resource},
            "name": name,
            "namespace": namespace,
            "operation": "CREATE",
            "userInfo": {"username": "admin", "groups": ["system:authenticated"]},
            "object": object,
            "oldObject": null,
            "dryRun": false
        }
    })
}
