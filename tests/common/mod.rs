// SPDX-License-Identifier: GPL-3.0-only

//! Shared harness for viewfinder integration tests
//!
//! The camera and media store resolve each request only when the test says
//! so, which makes "request still in flight" states observable.

#![allow(dead_code)]

use futures::FutureExt;
use futures::StreamExt;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use viewfinder::app::Viewfinder;
use viewfinder::backends::Backends;
use viewfinder::backends::camera::{
    CameraDevice, CameraResult, CapturedMedia, DeviceSettings, MediaUri,
};
use viewfinder::backends::media_store::MediaStore;
use viewfinder::backends::permissions::StaticPermissions;
use viewfinder::errors::{AppError, AppResult, CameraError};
use viewfinder::{Config, Message};

type Pending<T> = Mutex<VecDeque<oneshot::Sender<CameraResult<T>>>>;

/// Camera whose requests stay pending until resolved by the test
#[derive(Default)]
pub struct ScriptedCamera {
    photos: Pending<MediaUri>,
    recordings: Pending<MediaUri>,
    stops: Pending<()>,
    pub photo_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub applied: Mutex<Vec<DeviceSettings>>,
}

impl ScriptedCamera {
    pub fn photo_calls(&self) -> usize {
        self.photo_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn last_applied(&self) -> Option<DeviceSettings> {
        self.applied.lock().unwrap().last().copied()
    }

    pub fn resolve_photo(&self, result: CameraResult<MediaUri>) {
        let sender = self.photos.lock().unwrap().pop_front().expect("no pending photo");
        let _ = sender.send(result);
    }

    pub fn resolve_recording(&self, result: CameraResult<MediaUri>) {
        let sender = self
            .recordings
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending recording");
        let _ = sender.send(result);
    }

    pub fn resolve_stop(&self, result: CameraResult<()>) {
        let sender = self.stops.lock().unwrap().pop_front().expect("no pending stop");
        let _ = sender.send(result);
    }

    fn pending<T: Send + 'static>(queue: &Pending<T>) -> BoxFuture<'static, CameraResult<T>> {
        let (tx, rx) = oneshot::channel();
        queue.lock().unwrap().push_back(tx);
        rx.map(|result| result.unwrap_or(Err(CameraError::Disconnected)))
            .boxed()
    }
}

impl CameraDevice for ScriptedCamera {
    fn name(&self) -> &str {
        "Scripted Camera"
    }

    fn take_photo(&self) -> BoxFuture<'static, CameraResult<MediaUri>> {
        self.photo_calls.fetch_add(1, Ordering::SeqCst);
        Self::pending(&self.photos)
    }

    fn start_recording(&self) -> BoxFuture<'static, CameraResult<MediaUri>> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Self::pending(&self.recordings)
    }

    fn stop_recording(&self) -> BoxFuture<'static, CameraResult<()>> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Self::pending(&self.stops)
    }

    fn apply_settings(&self, settings: &DeviceSettings) -> CameraResult<()> {
        self.applied.lock().unwrap().push(*settings);
        Ok(())
    }
}

/// Media store that remembers what it was asked to save
#[derive(Default)]
pub struct RecordingStore {
    pub saved: Mutex<Vec<CapturedMedia>>,
    pub fail: AtomicBool,
}

impl MediaStore for RecordingStore {
    fn save_to_library(&self, media: &CapturedMedia) -> BoxFuture<'static, AppResult<MediaUri>> {
        self.saved.lock().unwrap().push(media.clone());
        let result = if self.fail.load(Ordering::SeqCst) {
            Err(AppError::Persistence("disk full".to_string()))
        } else {
            Ok(MediaUri::new(format!("file:///library/{}", media.uri.file_name())))
        };
        futures::future::ready(result).boxed()
    }
}

/// A viewfinder plus the futures its tasks produced
pub struct Harness {
    pub app: Viewfinder,
    pub camera: Arc<ScriptedCamera>,
    pub store: Arc<RecordingStore>,
    pending: FuturesUnordered<BoxFuture<'static, Message>>,
}

impl Harness {
    /// Mount and resolve the permission requests
    pub fn new(config: Config, permissions: StaticPermissions) -> Self {
        let camera = Arc::new(ScriptedCamera::default());
        let store = Arc::new(RecordingStore::default());
        let backends = Backends {
            camera: camera.clone(),
            permissions: Arc::new(permissions),
            media_store: store.clone(),
        };

        let (app, init) = Viewfinder::new(config, backends);
        let mut harness = Self {
            app,
            camera,
            store,
            pending: FuturesUnordered::new(),
        };
        harness.pending.extend(init.into_futures());
        harness.settle();
        harness
    }

    pub fn granted() -> Self {
        Self::new(test_config(), StaticPermissions::granting_all())
    }

    /// Apply a message and keep its follow-up work
    pub fn send(&mut self, message: Message) {
        let task = self.app.update(message);
        self.pending.extend(task.into_futures());
    }

    /// Apply every message whose future is ready right now
    pub fn settle(&mut self) {
        while let Some(Some(message)) = self.pending.next().now_or_never() {
            self.send(message);
        }
    }

    /// `send` followed by `settle`
    pub fn press(&mut self, message: Message) {
        self.send(message);
        self.settle();
    }
}

/// Defaults with library saving on and no timeout
pub fn test_config() -> Config {
    Config {
        capture_timeout_secs: None,
        ..Default::default()
    }
}
