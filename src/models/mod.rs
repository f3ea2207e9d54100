// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Data models for the application.

pub mod alert;
pub mod contact;
pub mod entity;
pub mod media;
pub mod neighborhood;
pub mod user;

pub use alert::{AlertRequest, Coordinates};
pub use contact::{Contact, NewContactRequest};
pub use entity::{Entity, EntityPetitionRequest};
pub use media::{MediaKind, MediaPackage};
pub use neighborhood::Neighborhood;
pub use user::{
    LoginRequest, LoginResponse, RegisterRequest, Session, UpdatePasswordRequest,
    UpdateUserRequest, User,
};
