// SPDX-License-Identifier: GPL-3.0-only

//! Permission requests
//!
//! The viewfinder asks for camera, microphone and media library access when
//! it mounts. Camera access gates the whole screen, microphone access gates
//! video recording, media library access gates saving captures.

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Types of permissions that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Access to device camera.
    Camera,
    /// Access to device microphone.
    Microphone,
    /// Access to the photo library.
    MediaLibrary,
}

/// The current status of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has been denied by the user.
    Denied,
    /// Permission has not been requested yet.
    #[default]
    NotDetermined,
}

/// Status of every permission the viewfinder uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSet {
    pub camera: PermissionStatus,
    pub microphone: PermissionStatus,
    pub media_library: PermissionStatus,
}

impl PermissionSet {
    /// Every permission granted
    pub fn all_granted() -> Self {
        Self {
            camera: PermissionStatus::Granted,
            microphone: PermissionStatus::Granted,
            media_library: PermissionStatus::Granted,
        }
    }

    pub fn status(&self, permission: Permission) -> PermissionStatus {
        match permission {
            Permission::Camera => self.camera,
            Permission::Microphone => self.microphone,
            Permission::MediaLibrary => self.media_library,
        }
    }

    pub fn set(&mut self, permission: Permission, status: PermissionStatus) {
        match permission {
            Permission::Camera => self.camera = status,
            Permission::Microphone => self.microphone = status,
            Permission::MediaLibrary => self.media_library = status,
        }
    }

    pub fn is_granted(&self, permission: Permission) -> bool {
        self.status(permission) == PermissionStatus::Granted
    }

    /// True once the camera request has been answered either way
    pub fn is_resolved(&self) -> bool {
        self.camera != PermissionStatus::NotDetermined
    }
}

/// Source of permission decisions (system prompt, fixed table, ...)
pub trait PermissionProvider: Send + Sync {
    /// Request a permission from the user.
    ///
    /// If the permission has already been granted or denied, this returns
    /// the current status without showing a prompt.
    fn request(&self, permission: Permission) -> BoxFuture<'static, PermissionStatus>;
}

/// Request camera, microphone and media library access, one after another
pub async fn request_all(provider: Arc<dyn PermissionProvider>) -> PermissionSet {
    let mut permissions = PermissionSet::default();
    for permission in [
        Permission::Camera,
        Permission::Microphone,
        Permission::MediaLibrary,
    ] {
        let status = provider.request(permission).await;
        info!(?permission, ?status, "Permission resolved");
        permissions.set(permission, status);
    }
    permissions
}

/// Answers every request from a fixed table
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    denied: HashSet<Permission>,
}

impl StaticPermissions {
    /// Grant everything
    pub fn granting_all() -> Self {
        Self::default()
    }

    /// Deny one permission
    pub fn deny(mut self, permission: Permission) -> Self {
        self.denied.insert(permission);
        self
    }
}

impl PermissionProvider for StaticPermissions {
    fn request(&self, permission: Permission) -> BoxFuture<'static, PermissionStatus> {
        let status = if self.denied.contains(&permission) {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        };
        future::ready(status).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_all_collects_each_status() {
        let provider = Arc::new(StaticPermissions::granting_all().deny(Permission::Microphone));
        let permissions = request_all(provider).await;

        assert!(permissions.is_granted(Permission::Camera));
        assert_eq!(permissions.microphone, PermissionStatus::Denied);
        assert!(permissions.is_granted(Permission::MediaLibrary));
        assert!(permissions.is_resolved());
    }

    #[test]
    fn test_default_set_is_unresolved() {
        let permissions = PermissionSet::default();
        assert!(!permissions.is_resolved());
        assert!(!permissions.is_granted(Permission::Camera));
    }
}
