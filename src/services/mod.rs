// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Services module - the client core's business logic.

pub mod dispatch;
pub mod gateway;
pub mod location;
pub mod push;

pub use dispatch::{AlertDispatcher, AlertGateway, DispatchPhase, TriggerOutcome};
pub use gateway::BackendGateway;
pub use location::{FixedLocationProvider, LocationError, LocationProvider};
pub use push::{PushTokenGateway, PushTokenManager, PushTokenSource, StaticTokenSource};
