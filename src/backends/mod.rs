// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for the viewfinder's collaborators
//!
//! The screen consumes three capabilities it does not implement itself:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Viewfinder (app)                │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐ ┌──────────┐ ┌──────────┐  │
//! │  │   Camera    │ │Permission│ │  Media   │  │
//! │  │   Device    │ │ Provider │ │  Store   │  │
//! │  └─────────────┘ └──────────┘ └──────────┘  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera device trait, settings mapping and the test-pattern camera
//! - [`permissions`]: Permission requests
//! - [`media_store`]: Optional persistence of captures into the media library

pub mod camera;
pub mod media_store;
pub mod permissions;

use std::sync::Arc;

/// The collaborators a viewfinder is wired to
#[derive(Clone)]
pub struct Backends {
    pub camera: Arc<dyn camera::CameraDevice>,
    pub permissions: Arc<dyn permissions::PermissionProvider>,
    pub media_store: Arc<dyn media_store::MediaStore>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("camera", &self.camera.name())
            .finish_non_exhaustive()
    }
}
