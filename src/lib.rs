// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ora: a weekly routine planner.
//!
//! This crate provides the backend API: activity storage per user,
//! voice commands through Dialogflow, and projection of weekly activities
//! onto the calendar.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schedule;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{DialogflowClient, FirebaseTokenVerifier};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity_verifier: Arc<FirebaseTokenVerifier>,
    pub dialogflow: DialogflowClient,
}
