// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutating admission webhook for Deployments and StatefulSets.
//!
//! Serves `POST /mutate-v1-deployment` and `POST /mutate-v1-statefulset`,
//! each answering an `admission.k8s.io/v1` AdmissionReview with a JSON patch
//! that injects the cert-manager CSI volume into managed workloads.

pub mod admission;
pub mod server;
pub mod tls;
pub mod workload;

pub use server::WebhookServer;
pub use workload::Workload;

use crate::csi::CsiConfig;

/// State shared read-only by all request handlers
pub struct WebhookState {
    pub config: CsiConfig,
}

impl WebhookState {
    pub fn new(config: CsiConfig) -> Self {
        Self { config }
    }
}
