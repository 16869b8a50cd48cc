// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external APIs and request workflows.

pub mod dialogflow;
pub mod identity;
pub mod voice;

pub use dialogflow::{DialogflowClient, QueryResult};
pub use identity::{FirebaseTokenVerifier, IdentityError, VerifiedUser};
pub use voice::{IntentOutcome, VoiceCommandProcessor, VoiceOutcome};
