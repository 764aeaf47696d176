// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! cert-manager CSI driver configuration, volume attributes and volume synthesis.

pub mod attributes;
pub mod config;
pub mod volume;

pub use attributes::{attribute_key, project_attributes};
pub use config::CsiConfig;
