//! Narrow-viewport tracking for responsive front ends.
//!
//! A [`Viewport`] publishes resize notifications. [`NarrowLayout`] listens to
//! them and keeps an `is_narrow` flag current; it stops listening when
//! dropped.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Widest viewport, in logical pixels, still treated as narrow.
pub const NARROW_MAX_WIDTH: u32 = 900;

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// A `max-width` media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaQuery {
    max_width: u32,
}

impl MediaQuery {
    pub const fn max_width(px: u32) -> Self {
        Self { max_width: px }
    }

    /// The `(max-width: 900px)` breakpoint.
    pub const fn narrow() -> Self {
        Self::max_width(NARROW_MAX_WIDTH)
    }

    pub const fn matches(self, size: ViewportSize) -> bool {
        size.width <= self.max_width
    }
}

/// Source of resize notifications.
#[derive(Debug)]
pub struct Viewport {
    size: watch::Sender<ViewportSize>,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let (size, _) = watch::channel(ViewportSize { width, height });
        Self { size }
    }

    /// Publish a resize. Listeners are notified even if the size is unchanged.
    pub fn resize(&self, width: u32, height: u32) {
        self.size.send_modify(|size| *size = ViewportSize { width, height });
    }

    pub fn size(&self) -> ViewportSize {
        *self.size.borrow()
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.size.receiver_count()
    }
}

/// Keeps `is_narrow` in sync with a [`Viewport`].
///
/// Must be attached from within a tokio runtime. Dropping it unsubscribes.
#[derive(Debug)]
pub struct NarrowLayout {
    is_narrow: watch::Receiver<bool>,
    listener: JoinHandle<()>,
}

impl NarrowLayout {
    /// Attach with the default narrow breakpoint.
    pub fn attach(viewport: &Viewport) -> Self {
        Self::attach_query(viewport, MediaQuery::narrow())
    }

    pub fn attach_query(viewport: &Viewport, query: MediaQuery) -> Self {
        let mut sizes = viewport.size.subscribe();
        let initial = query.matches(*sizes.borrow_and_update());
        let (is_narrow_tx, is_narrow) = watch::channel(initial);

        let listener = tokio::spawn(async move {
            while sizes.changed().await.is_ok() {
                let narrow = query.matches(*sizes.borrow_and_update());
                is_narrow_tx.send_if_modified(|current| {
                    let changed = *current != narrow;
                    *current = narrow;
                    changed
                });
            }
        });

        Self {
            is_narrow,
            listener,
        }
    }

    pub fn is_narrow(&self) -> bool {
        *self.is_narrow.borrow()
    }

    /// Receiver notified whenever `is_narrow` flips.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.is_narrow.clone()
    }
}

impl Drop for NarrowLayout {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        let query = MediaQuery::narrow();
        assert!(query.matches(ViewportSize {
            width: 900,
            height: 600
        }));
        assert!(!query.matches(ViewportSize {
            width: 901,
            height: 600
        }));
    }

    #[tokio::test]
    async fn computes_initial_value_on_attach() {
        let phone = Viewport::new(375, 667);
        assert!(NarrowLayout::attach(&phone).is_narrow());

        let desktop = Viewport::new(1440, 900);
        assert!(!NarrowLayout::attach(&desktop).is_narrow());
    }

    #[tokio::test]
    async fn follows_resize_notifications() {
        let viewport = Viewport::new(1280, 800);
        let layout = NarrowLayout::attach(&viewport);
        let mut narrow = layout.subscribe();

        viewport.resize(600, 800);
        narrow.changed().await.unwrap();
        assert!(*narrow.borrow_and_update());
        assert!(layout.is_narrow());

        viewport.resize(1024, 800);
        narrow.changed().await.unwrap();
        assert!(!layout.is_narrow());
    }

    #[tokio::test]
    async fn custom_breakpoint() {
        let viewport = Viewport::new(700, 500);
        let layout = NarrowLayout::attach_query(&viewport, MediaQuery::max_width(640));
        assert!(!layout.is_narrow());
    }

    #[tokio::test]
    async fn drop_unsubscribes() {
        let viewport = Viewport::new(1280, 800);
        let layout = NarrowLayout::attach(&viewport);
        assert_eq!(viewport.listener_count(), 1);
        let mut narrow = layout.subscribe();

        drop(layout);
        viewport.resize(320, 480);

        assert!(narrow.changed().await.is_err());
        assert!(!*narrow.borrow());
        assert_eq!(viewport.listener_count(), 0);
        assert_eq!(viewport.size().width, 320);
    }
}
