//! The texture registry.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;
use std::sync::Arc;

use bytemuck::Pod;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::pixel::as_bytes;
use super::{Rect, Region, Size, TextureBackend, TextureError, TextureFormat, TextureId};
use crate::config::{IdAllocation, RegistryConfig};
use crate::events::{EventChannel, SharedTextureObserver, SubscriptionId, TextureEvent};

/// Metadata of a live texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub size: Size,
    pub format: TextureFormat,
}

#[derive(Debug)]
struct Entry<N> {
    info: TextureInfo,
    native: N,
}

/// Hands out texture ids according to an [`IdAllocation`] policy.
#[derive(Debug)]
struct IdAllocator {
    policy: IdAllocation,
    /// Next never-issued id. Values above `u32::MAX` mean the counter is spent.
    next: u64,
    free: BinaryHeap<Reverse<u32>>,
}

impl IdAllocator {
    fn new(policy: IdAllocation) -> Self {
        Self {
            policy,
            next: 1,
            free: BinaryHeap::new(),
        }
    }

    fn allocate<N>(&mut self, live: &BTreeMap<TextureId, N>) -> Option<TextureId> {
        if self.policy == IdAllocation::Recycle {
            if let Some(Reverse(raw)) = self.free.pop() {
                return Some(TextureId::from_raw(raw));
            }
        }

        if let Ok(raw) = u32::try_from(self.next) {
            self.next += 1;
            return Some(TextureId::from_raw(raw));
        }

        // Counter spent: take the lowest id not currently live.
        let mut candidate: u32 = 1;
        for id in live.keys() {
            if id.raw() > candidate {
                break;
            }
            if id.raw() == candidate {
                candidate = candidate.checked_add(1)?;
            }
        }
        Some(TextureId::from_raw(candidate))
    }

    fn release(&mut self, id: TextureId) {
        if self.policy == IdAllocation::Recycle {
            self.free.push(Reverse(id.raw()));
        }
    }
}

/// Handle-based registry of textures backed by a [`TextureBackend`].
///
/// The registry is the single source of truth for which ids are live and
/// what size and format they have. It exclusively owns every native
/// handle: handles are created through the backend in
/// [`create_texture`](Self::create_texture) and released in
/// [`destroy_texture`](Self::destroy_texture), [`clear`](Self::clear), or
/// when the registry is dropped.
///
/// The registry does no internal locking. It is meant to be driven from a
/// single render/update thread; hosts that need access from several
/// threads wrap the whole registry in one lock (see
/// [`into_shared`](Self::into_shared)).
///
/// # Example
///
/// ```
/// use batchtex::texture::{Color, SoftwareBackend, TextureFormat, TextureRegistry};
///
/// let mut registry = TextureRegistry::new(SoftwareBackend::new());
/// let id = registry.create_texture(2, 1, TextureFormat::Rgba8).unwrap();
/// registry.set_data(id, &[Color::RED, Color::BLUE]).unwrap();
///
/// assert_eq!(registry.texture_count(), 1);
/// registry.destroy_texture(id);
/// assert!(!registry.has_texture(id));
/// ```
pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    textures: BTreeMap<TextureId, Entry<B::Native>>,
    allocator: IdAllocator,
    events: EventChannel<B::Native>,
    config: RegistryConfig,
}

/// A registry behind a single lock, for hosts that share it across threads.
pub type SharedTextureRegistry<B> = Arc<Mutex<TextureRegistry<B>>>;

impl<B: TextureBackend> TextureRegistry<B> {
    /// Create a registry with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RegistryConfig::default())
    }

    pub fn with_config(backend: B, config: RegistryConfig) -> Self {
        debug!(
            registry = %config.label,
            backend = backend.name(),
            id_allocation = %config.id_allocation,
            "Texture registry created"
        );
        Self {
            backend,
            textures: BTreeMap::new(),
            allocator: IdAllocator::new(config.id_allocation),
            events: EventChannel::new(),
            config,
        }
    }

    /// Move the registry behind an `Arc<Mutex<_>>`.
    pub fn into_shared(self) -> SharedTextureRegistry<B> {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The backend, for read-only access (device handles, read-back).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Attach an observer for creation and destruction events.
    pub fn subscribe(&mut self, observer: SharedTextureObserver<B::Native>) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    /// Detach an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    /// Create a texture and return its id.
    ///
    /// Both dimensions must be positive and no larger than
    /// [`RegistryConfig::max_dimension`]. The native resource is allocated
    /// and a `Created` event is delivered before this returns. Contents are
    /// unspecified until the first upload.
    pub fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<TextureId, TextureError> {
        self.check_dimensions(width, height)?;

        let id = self.allocator.allocate(&self.textures).ok_or_else(|| {
            TextureError::InvalidArgument("texture id space exhausted".to_string())
        })?;

        let size = Size::new(width, height);
        let native = match self.backend.create(size, format) {
            Ok(native) => native,
            Err(e) => {
                self.allocator.release(id);
                return Err(e);
            }
        };

        self.textures.insert(
            id,
            Entry {
                info: TextureInfo { size, format },
                native: native.clone(),
            },
        );

        debug!(
            registry = %self.config.label,
            %id,
            width,
            height,
            %format,
            "Texture created"
        );

        self.events.publish(&TextureEvent::Created {
            id,
            width,
            height,
            format,
            native,
        });

        Ok(id)
    }

    /// Destroy a texture.
    ///
    /// Destroying an id that is not live is a no-op and returns `false`.
    /// Otherwise the metadata is removed, a `Destroyed` event carrying the
    /// native handle is delivered, and the native resource is released.
    pub fn destroy_texture(&mut self, id: TextureId) -> bool {
        let Some(entry) = self.textures.remove(&id) else {
            trace!(registry = %self.config.label, %id, "Destroy of unknown texture ignored");
            return false;
        };

        self.allocator.release(id);
        self.retire(id, entry);
        debug!(registry = %self.config.label, %id, "Texture destroyed");
        true
    }

    /// Destroy every live texture, in ascending id order.
    pub fn clear(&mut self) {
        if self.textures.is_empty() {
            return;
        }

        let textures = std::mem::take(&mut self.textures);
        let count = textures.len();
        for (id, entry) in textures {
            self.allocator.release(id);
            self.retire(id, entry);
        }
        debug!(registry = %self.config.label, count, "All textures destroyed");
    }

    /// Whether `id` refers to a live texture.
    pub fn has_texture(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn texture_size(&self, id: TextureId) -> Result<Size, TextureError> {
        self.entry(id).map(|e| e.info.size)
    }

    pub fn texture_format(&self, id: TextureId) -> Result<TextureFormat, TextureError> {
        self.entry(id).map(|e| e.info.format)
    }

    /// Size and format together, or `None` if `id` is not live.
    pub fn texture_info(&self, id: TextureId) -> Option<TextureInfo> {
        self.textures.get(&id).map(|e| e.info)
    }

    /// The native handle for rendering, or `None` if `id` is not live.
    pub fn texture(&self, id: TextureId) -> Option<&B::Native> {
        self.textures.get(&id).map(|e| &e.native)
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Live textures in ascending id order.
    pub fn textures(&self) -> impl Iterator<Item = (TextureId, TextureInfo)> + '_ {
        self.textures.iter().map(|(id, e)| (*id, e.info))
    }

    /// Replace the whole surface of a texture.
    ///
    /// `data` must hold exactly `width * height` elements, and each element
    /// must be as large as one pixel of the texture's format.
    pub fn set_data<T: Pod>(&mut self, id: TextureId, data: &[T]) -> Result<(), TextureError> {
        self.upload(id, None, data)
    }

    /// Replace the pixels inside `rect`.
    ///
    /// `rect` must be non-empty and lie within `[0, width) × [0, height)`;
    /// `data` must hold exactly `rect.width * rect.height` elements, row by
    /// row.
    pub fn set_data_region<T: Pod>(
        &mut self,
        id: TextureId,
        rect: Rect,
        data: &[T],
    ) -> Result<(), TextureError> {
        self.upload(id, Some(rect), data)
    }

    fn upload<T: Pod>(
        &mut self,
        id: TextureId,
        rect: Option<Rect>,
        data: &[T],
    ) -> Result<(), TextureError> {
        let entry = self
            .textures
            .get(&id)
            .ok_or(TextureError::NotFound { id })?;
        let TextureInfo { size, format } = entry.info;

        let element_bytes = std::mem::size_of::<T>();
        if element_bytes != format.bytes_per_pixel() {
            return Err(TextureError::FormatMismatch {
                format,
                expected_bytes: format.bytes_per_pixel(),
                actual_bytes: element_bytes,
            });
        }

        let region = match rect {
            None => Region::full(size),
            Some(rect) => {
                if rect.is_empty() {
                    return Err(TextureError::InvalidArgument(format!(
                        "upload rectangle {} is empty",
                        rect
                    )));
                }
                rect.within(size)
                    .ok_or(TextureError::OutOfBounds { rect, size })?
            }
        };

        let expected = region.pixel_count();
        if data.len() != expected {
            return Err(TextureError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        self.backend
            .upload(&entry.native, format, region, as_bytes(data))?;

        trace!(
            registry = %self.config.label,
            %id,
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "Texture data uploaded"
        );
        Ok(())
    }

    fn entry(&self, id: TextureId) -> Result<&Entry<B::Native>, TextureError> {
        self.textures.get(&id).ok_or(TextureError::NotFound { id })
    }

    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidArgument(format!(
                "texture dimensions must be positive, got {}×{}",
                width, height
            )));
        }
        let max = self.config.max_dimension;
        if width > max || height > max {
            return Err(TextureError::InvalidArgument(format!(
                "texture dimensions {}×{} exceed the maximum of {}",
                width, height, max
            )));
        }
        Ok(())
    }

    /// Announce and release an entry that has already left the table.
    fn retire(&mut self, id: TextureId, entry: Entry<B::Native>) {
        self.events.publish(&TextureEvent::Destroyed {
            id,
            native: entry.native.clone(),
        });
        self.backend.release(entry.native);
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<B: TextureBackend> fmt::Debug for TextureRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRegistry")
            .field("label", &self.config.label)
            .field("backend", &self.backend.name())
            .field("textures", &self.textures.len())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::texture::{Color, SoftwareBackend, SurfaceHandle};

    fn registry() -> TextureRegistry<SoftwareBackend> {
        TextureRegistry::new(SoftwareBackend::new())
    }

    fn event_log() -> Arc<EventLog<SurfaceHandle>> {
        Arc::new(EventLog::new())
    }

    fn recycling_registry() -> TextureRegistry<SoftwareBackend> {
        TextureRegistry::with_config(
            SoftwareBackend::new(),
            RegistryConfig::new().with_id_allocation(IdAllocation::Recycle),
        )
    }

    #[test]
    fn test_create_records_metadata() {
        let mut reg = registry();
        let id = reg.create_texture(3, 5, TextureFormat::Rg8).unwrap();

        assert!(reg.has_texture(id));
        assert_eq!(reg.texture_size(id).unwrap(), Size::new(3, 5));
        assert_eq!(reg.texture_format(id).unwrap(), TextureFormat::Rg8);
        assert_eq!(reg.texture_count(), 1);
        assert_eq!(reg.backend().surface_count(), 1);
    }

    #[test]
    fn test_create_rejects_zero_dimensions() {
        let mut reg = registry();
        for (w, h) in [(0, 1), (1, 0), (0, 0)] {
            let err = reg.create_texture(w, h, TextureFormat::Rgba8).unwrap_err();
            assert!(matches!(err, TextureError::InvalidArgument(_)));
        }
        assert_eq!(reg.texture_count(), 0);
        assert_eq!(reg.backend().surface_count(), 0);
    }

    #[test]
    fn test_create_rejects_oversized() {
        let mut reg = TextureRegistry::with_config(
            SoftwareBackend::new(),
            RegistryConfig::new().with_max_dimension(64),
        );
        assert!(reg.create_texture(64, 64, TextureFormat::R8).is_ok());
        let err = reg.create_texture(65, 1, TextureFormat::R8).unwrap_err();
        assert!(err.to_string().contains("exceed the maximum of 64"));
    }

    #[test]
    fn test_monotonic_ids_are_not_reused() {
        let mut reg = registry();
        let a = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert!(reg.destroy_texture(a));
        let b = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, TextureId::from_raw(1));
        assert_eq!(b, TextureId::from_raw(2));
    }

    #[test]
    fn test_recycle_reuses_lowest_free_id() {
        let mut reg = recycling_registry();
        let a = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        let b = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        let c = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        reg.destroy_texture(c);
        reg.destroy_texture(a);

        assert_eq!(reg.create_texture(1, 1, TextureFormat::R8).unwrap(), a);
        assert_eq!(reg.create_texture(1, 1, TextureFormat::R8).unwrap(), c);
        let d = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert_ne!(d, b);
        assert_eq!(d, TextureId::from_raw(4));
    }

    #[test]
    fn test_monotonic_wraps_to_lowest_free_id_when_counter_spent() {
        let mut reg = registry();
        let a = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        let b = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        reg.allocator.next = u64::from(u32::MAX) + 1;

        reg.destroy_texture(a);
        let c = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert_eq!(c, a);
        let d = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert_ne!(d, b);
        assert_eq!(d, TextureId::from_raw(3));
    }

    #[test]
    fn test_failed_backend_create_returns_recycled_id() {
        let mut reg = TextureRegistry::with_config(
            SoftwareBackend::new(),
            RegistryConfig::new()
                .with_id_allocation(IdAllocation::Recycle)
                .with_max_dimension(u32::MAX),
        );
        let a = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        reg.destroy_texture(a);

        // usize overflow in the software backend on 64-bit: 2^32-1 squared * 16.
        let result = reg.create_texture(u32::MAX, u32::MAX, TextureFormat::Rgba32Float);
        assert!(matches!(result, Err(TextureError::Backend(_))));
        assert_eq!(reg.texture_count(), 0);
        assert_eq!(reg.create_texture(1, 1, TextureFormat::R8).unwrap(), a);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut reg = registry();
        let id = reg.create_texture(2, 2, TextureFormat::Rgba8).unwrap();
        let keep = reg.create_texture(2, 2, TextureFormat::Rgba8).unwrap();

        assert!(reg.destroy_texture(id));
        assert_eq!(reg.texture_count(), 1);
        assert!(!reg.destroy_texture(id));
        assert_eq!(reg.texture_count(), 1);
        assert!(reg.has_texture(keep));
        assert_eq!(reg.backend().surface_count(), 1);
    }

    #[test]
    fn test_lookups_on_missing_id() {
        let reg = registry();
        let id = TextureId::from_raw(99);
        assert!(!reg.has_texture(id));
        assert_eq!(reg.texture_size(id), Err(TextureError::NotFound { id }));
        assert_eq!(reg.texture_format(id), Err(TextureError::NotFound { id }));
        assert!(reg.texture(id).is_none());
        assert!(reg.texture_info(id).is_none());
    }

    #[test]
    fn test_zero_native_handle_is_not_absent() {
        let mut reg = registry();
        let id = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        assert_eq!(reg.texture(id), Some(&SurfaceHandle(0)));
        reg.destroy_texture(id);
        assert_eq!(reg.texture(id), None);
    }

    #[test]
    fn test_set_data_full_surface() {
        let mut reg = registry();
        let id = reg.create_texture(2, 1, TextureFormat::Rgba8).unwrap();
        reg.set_data(id, &[Color::RED, Color::WHITE]).unwrap();

        let handle = *reg.texture(id).unwrap();
        assert_eq!(
            reg.backend().pixels(handle).unwrap(),
            &[255, 0, 0, 255, 255, 255, 255, 255]
        );
        assert_eq!(reg.texture_size(id).unwrap(), Size::new(2, 1));
    }

    #[test]
    fn test_set_data_length_mismatch_keeps_contents() {
        let mut reg = registry();
        let id = reg.create_texture(2, 2, TextureFormat::R8).unwrap();
        reg.set_data(id, &[1u8, 2, 3, 4]).unwrap();

        let err = reg.set_data(id, &[9u8, 9, 9]).unwrap_err();
        assert_eq!(
            err,
            TextureError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
        let err = reg.set_data::<u8>(id, &[]).unwrap_err();
        assert!(matches!(err, TextureError::LengthMismatch { actual: 0, .. }));

        let handle = *reg.texture(id).unwrap();
        assert_eq!(reg.backend().pixels(handle).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(reg.texture_size(id).unwrap(), Size::new(2, 2));
    }

    #[test]
    fn test_set_data_format_mismatch() {
        let mut reg = registry();
        let id = reg.create_texture(2, 2, TextureFormat::Rgba8).unwrap();
        let err = reg.set_data(id, &[0u8; 16]).unwrap_err();
        assert_eq!(
            err,
            TextureError::FormatMismatch {
                format: TextureFormat::Rgba8,
                expected_bytes: 4,
                actual_bytes: 1
            }
        );
    }

    #[test]
    fn test_set_data_accepts_matching_element_types() {
        let mut reg = registry();
        let rgba = reg.create_texture(1, 1, TextureFormat::Rgba8).unwrap();
        reg.set_data(rgba, &[[1u8, 2, 3, 4]]).unwrap();
        reg.set_data(rgba, &[0xffff_ffffu32]).unwrap();

        let float = reg.create_texture(1, 1, TextureFormat::Rgba32Float).unwrap();
        reg.set_data(float, &[[0.5f32, 0.25, 1.0, 1.0]]).unwrap();

        let half = reg.create_texture(1, 1, TextureFormat::Rgba16Float).unwrap();
        reg.set_data(half, &[[0x3c00u16; 4]]).unwrap();
    }

    #[test]
    fn test_set_data_missing_texture() {
        let mut reg = registry();
        let id = TextureId::from_raw(1);
        assert_eq!(
            reg.set_data(id, &[Color::RED]),
            Err(TextureError::NotFound { id })
        );
    }

    #[test]
    fn test_set_data_region() {
        let mut reg = registry();
        let id = reg.create_texture(3, 2, TextureFormat::R8).unwrap();
        reg.set_data_region(id, Rect::new(1, 0, 2, 2), &[1u8, 2, 3, 4])
            .unwrap();

        let handle = *reg.texture(id).unwrap();
        assert_eq!(reg.backend().pixels(handle).unwrap(), &[0, 1, 2, 0, 3, 4]);
    }

    #[test]
    fn test_set_data_region_out_of_bounds() {
        let mut reg = registry();
        let id = reg.create_texture(4, 4, TextureFormat::R8).unwrap();

        for rect in [
            Rect::new(3, 3, 2, 2),
            Rect::new(-1, 0, 2, 2),
            Rect::new(4, 0, 1, 1),
            Rect::new(0, 0, 5, 4),
        ] {
            let data = vec![0u8; rect.area()];
            let err = reg.set_data_region(id, rect, &data).unwrap_err();
            assert_eq!(
                err,
                TextureError::OutOfBounds {
                    rect,
                    size: Size::new(4, 4)
                }
            );
        }
    }

    #[test]
    fn test_set_data_region_empty_rect() {
        let mut reg = registry();
        let id = reg.create_texture(4, 4, TextureFormat::R8).unwrap();
        let err = reg
            .set_data_region::<u8>(id, Rect::new(0, 0, 0, 2), &[])
            .unwrap_err();
        assert!(matches!(err, TextureError::InvalidArgument(_)));
    }

    #[test]
    fn test_set_data_region_length_mismatch() {
        let mut reg = registry();
        let id = reg.create_texture(4, 4, TextureFormat::R8).unwrap();
        let err = reg
            .set_data_region(id, Rect::new(0, 0, 2, 2), &[0u8; 3])
            .unwrap_err();
        assert_eq!(
            err,
            TextureError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_events_created_and_destroyed() {
        let mut reg = registry();
        let log = event_log();
        reg.subscribe(log.clone());

        let id = reg.create_texture(4, 4, TextureFormat::Rgba8).unwrap();
        assert_eq!(
            log.events(),
            vec![TextureEvent::Created {
                id,
                width: 4,
                height: 4,
                format: TextureFormat::Rgba8,
                native: SurfaceHandle(0),
            }]
        );

        reg.set_data(id, &[Color::BLACK; 16]).unwrap();
        reg.destroy_texture(id);
        reg.destroy_texture(id);

        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            TextureEvent::Destroyed {
                id,
                native: SurfaceHandle(0)
            }
        );
    }

    #[test]
    fn test_closure_observer_receives_lifecycle() {
        let mut reg = registry();
        let shared_seen = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&shared_seen);
        reg.subscribe(Arc::new(move |event: &TextureEvent<SurfaceHandle>| {
            seen.lock().push(event.clone());
        }));

        let id = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        reg.destroy_texture(id);
        assert_eq!(shared_seen.lock().len(), 2);
        assert!(!reg.has_texture(id));
    }

    #[test]
    fn test_failed_create_fires_no_event() {
        let mut reg = registry();
        let log = event_log();
        reg.subscribe(log.clone());
        assert!(reg.create_texture(0, 4, TextureFormat::Rgba8).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_clear_destroys_in_id_order() {
        let mut reg = registry();
        let log = event_log();
        let a = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        let b = reg.create_texture(1, 1, TextureFormat::R8).unwrap();
        reg.subscribe(log.clone());

        reg.clear();
        let ids: Vec<_> = log.events().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(reg.texture_count(), 0);
        assert_eq!(reg.backend().surface_count(), 0);
    }

    #[test]
    fn test_drop_destroys_remaining_textures() {
        let log = event_log();
        {
            let mut reg = registry();
            reg.subscribe(log.clone());
            reg.create_texture(1, 1, TextureFormat::R8).unwrap();
            reg.create_texture(2, 2, TextureFormat::R8).unwrap();
        }
        let destroyed = log.events().iter().filter(|e| !e.is_created()).count();
        assert_eq!(destroyed, 2);
    }

    #[test]
    fn test_textures_iterates_in_order() {
        let mut reg = registry();
        let a = reg.create_texture(1, 2, TextureFormat::R8).unwrap();
        let b = reg.create_texture(3, 4, TextureFormat::Rgba8).unwrap();
        let listed: Vec<_> = reg.textures().collect();
        assert_eq!(
            listed,
            vec![
                (
                    a,
                    TextureInfo {
                        size: Size::new(1, 2),
                        format: TextureFormat::R8
                    }
                ),
                (
                    b,
                    TextureInfo {
                        size: Size::new(3, 4),
                        format: TextureFormat::Rgba8
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_into_shared() {
        let shared = registry().into_shared();
        let id = shared
            .lock()
            .create_texture(1, 1, TextureFormat::R8)
            .unwrap();
        assert!(shared.lock().has_texture(id));
    }

    #[test]
    fn test_registry_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<TextureRegistry<SoftwareBackend>>();
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_format() -> impl Strategy<Value = TextureFormat> {
            prop::sample::select(TextureFormat::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn test_create_then_query(
                width in 1u32..=256,
                height in 1u32..=256,
                format in any_format(),
            ) {
                let mut reg = registry();
                let before = reg.texture_count();
                let id = reg.create_texture(width, height, format)?;

                prop_assert!(reg.has_texture(id));
                prop_assert_eq!(reg.texture_size(id)?, Size::new(width, height));
                prop_assert_eq!(reg.texture_format(id)?, format);
                prop_assert_eq!(reg.texture_count(), before + 1);
            }

            #[test]
            fn test_live_ids_are_unique(
                ops in prop::collection::vec((any::<bool>(), 0usize..8), 1..64),
                recycle in any::<bool>(),
            ) {
                let policy = if recycle { IdAllocation::Recycle } else { IdAllocation::Monotonic };
                let mut reg = TextureRegistry::with_config(
                    SoftwareBackend::new(),
                    RegistryConfig::new().with_id_allocation(policy),
                );
                let mut live: Vec<TextureId> = Vec::new();

                for (create, pick) in ops {
                    if create || live.is_empty() {
                        let id = reg.create_texture(1, 1, TextureFormat::R8)?;
                        prop_assert!(!live.contains(&id), "{} issued twice while live", id);
                        live.push(id);
                    } else {
                        let id = live.remove(pick % live.len());
                        prop_assert!(reg.destroy_texture(id));
                        prop_assert!(!reg.has_texture(id));
                    }
                    prop_assert_eq!(reg.texture_count(), live.len());
                }
            }

            #[test]
            fn test_region_upload_bounds(
                x in -4i32..8,
                y in -4i32..8,
                w in 1u32..8,
                h in 1u32..8,
            ) {
                let mut reg = registry();
                let id = reg.create_texture(4, 4, TextureFormat::R8)?;
                let rect = Rect::new(x, y, w, h);
                let data = vec![7u8; rect.area()];
                let inside = x >= 0 && y >= 0 && x as u32 + w <= 4 && y as u32 + h <= 4;

                match reg.set_data_region(id, rect, &data) {
                    Ok(()) => prop_assert!(inside),
                    Err(TextureError::OutOfBounds { .. }) => prop_assert!(!inside),
                    Err(other) => prop_assert!(false, "unexpected error {}", other),
                }
            }
        }
    }
}
