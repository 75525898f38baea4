//! # Synapse Backend
//!
//! Reconciliation engine for model-generated study schedules.
//!
//! A client posts tasks and fixed events; the engine asks a generative model
//! for a multi-day plan, then turns whatever text comes back into a strict,
//! calendar-correct schedule with study tips attached.
//!
//! ## Pipeline
//!
//! - **Extraction**: locate the JSON literal in free-form model output
//! - **Normalization**: accept the canonical `days` shape or a flat day mapping
//! - **Alignment**: anchor entries to real dates relative to "today"
//! - **Horizon**: clip to the latest due date (at least four days out)
//! - **Tips**: second, optional model call whose results are matched to blocks
//!
//! ## Architecture
//!
//! - [`models`]: request and response types
//! - [`services`]: pipeline stages and the [`services::SchedulePlanner`]
//! - [`llm`]: model transport and prompt assembly
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
