// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admission review handling - decodes workloads, mutates them and answers with a JSON patch

use crate::csi::CsiConfig;
use crate::error::{OperatorError, Result};
use crate::mutation::{mutate, MutationOutcome};
use crate::webhook::Workload;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview};
use kube::core::DynamicObject;
use std::borrow::Cow;
use std::fmt::Display;
use tracing::{debug, info, instrument, warn};

const STATUS_BAD_REQUEST: u16 = 400;
const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Decode a raw AdmissionReview body for workload kind `W` and produce the reply review
pub fn handle_review_body<W: Workload>(
    config: &CsiConfig,
    body: &[u8],
) -> AdmissionReview<DynamicObject> {
    let response = match serde_json::from_slice::<AdmissionReview<W>>(body) {
        Ok(review) => handle_review(config, review),
        Err(e) => {
            warn!("Failed to decode admission review: {}", e);
            invalid(format!("failed to decode admission review: {}", e))
        }
    };
    response.into_review()
}

/// Answer a decoded AdmissionReview
pub fn handle_review<W: Workload>(config: &CsiConfig, review: AdmissionReview<W>) -> AdmissionResponse {
    let request: std::result::Result<AdmissionRequest<W>, _> = review.try_into();
    match request {
        Ok(request) => admit(config, &request),
        Err(e) => {
            warn!("Admission review carries no usable request: {}", e);
            invalid(e)
        }
    }
}

/// Mutate the request's object and allow it, with a patch when anything changed.
///
/// A configuration error denies the request with status 500, the object is
/// not patched in that case.
#[instrument(
    skip_all,
    fields(
        uid = %request.uid,
        kind = %request.kind.kind,
        object = %format!("{}/{}", request.namespace.as_deref().unwrap_or_default(), request.name)
    )
)]
pub fn admit<W: Workload>(config: &CsiConfig, request: &AdmissionRequest<W>) -> AdmissionResponse {
    let response = AdmissionResponse::from(request);

    let Some(object) = request.object.as_ref() else {
        debug!("No object in {:?} request, allowing unchanged", request.operation);
        return response;
    };

    match patch_for(config, object, request.namespace.as_deref()) {
        Ok(None) => {
            debug!("Allowing unchanged");
            response
        }
        Ok(Some(patch)) => match AdmissionResponse::from(request).with_patch(patch) {
            Ok(patched) => {
                info!("Injected certificate volume");
                patched
            }
            Err(e) => {
                warn!("Failed to serialize patch: {}", e);
                errored(response, STATUS_INTERNAL_SERVER_ERROR, OperatorError::from(e))
            }
        },
        Err(e) => {
            warn!("Denying: {}", e);
            errored(response, STATUS_INTERNAL_SERVER_ERROR, e)
        }
    }
}

/// Compute the JSON patch that turns `object` into its mutated form.
/// Returns `None` when the object is left as is.
fn patch_for<W: Workload>(
    config: &CsiConfig,
    object: &W,
    request_namespace: Option<&str>,
) -> Result<Option<json_patch::Patch>> {
    let mut mutated = object.clone();
    let outcome = {
        let (meta, pod_spec) = mutated.pod_template_mut();
        let Some(pod_spec) = pod_spec else {
            debug!("Object has no pod template spec");
            return Ok(None);
        };
        let meta = with_request_namespace(meta, request_namespace);
        mutate(config, &meta, pod_spec)?
    };
    if outcome == MutationOutcome::Unmanaged {
        return Ok(None);
    }

    // Both sides go through the same typed model so the diff only covers the mutation
    let original = serde_json::to_value(object)?;
    let patched = serde_json::to_value(&mutated)?;
    Ok(Some(json_patch::diff(&original, &patched)))
}

/// Objects in CREATE requests may omit their namespace, the request always carries it
fn with_request_namespace<'a>(meta: &'a ObjectMeta, request_namespace: Option<&str>) -> Cow<'a, ObjectMeta> {
    match request_namespace {
        Some(namespace) if meta.namespace.as_deref().unwrap_or_default().is_empty() => {
            Cow::Owned(ObjectMeta {
                namespace: Some(namespace.to_string()),
                ..meta.clone()
            })
        }
        _ => Cow::Borrowed(meta),
    }
}

fn invalid(reason: impl Display) -> AdmissionResponse {
    let mut response = AdmissionResponse::invalid(reason);
    response.result.code = STATUS_BAD_REQUEST;
    response
}

fn errored(response: AdmissionResponse, code: u16, reason: impl Display) -> AdmissionResponse {
    let mut response = response.deny(reason);
    response.result.code = code;
    response
}
