// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod csi;
pub mod error;
pub mod mutation;
pub mod webhook;

#[cfg(test)]
mod test_utils;
