//! Ownership of the self-rescheduling animation callback.
//!
//! A `requestAnimationFrame` callback has to reach itself to ask for the
//! next frame. It does so through a [`FrameHandle`], which is a [`Weak`]
//! pointer, so the [`FrameLoop`] stays the only strong owner. Dropping the
//! loop drops the callback and whatever it captured.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicI32, Ordering};

type Slot<C> = RefCell<Option<C>>;

/// Sole owner of an animation callback.
pub struct FrameLoop<C> {
	slot: Rc<Slot<C>>,
}

impl<C> Default for FrameLoop<C> {
	fn default() -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
		}
	}
}

impl<C> FrameLoop<C> {
	/// Install the callback built by `make`, dropping any previous one.
	/// `make` receives the handle the callback uses to reschedule itself.
	pub fn install(&self, make: impl FnOnce(FrameHandle<C>) -> C) {
		let callback = make(FrameHandle(Rc::downgrade(&self.slot)));
		*self.slot.borrow_mut() = Some(callback);
	}

	/// Run `f` with the installed callback.
	pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
		self.slot.borrow().as_ref().map(f)
	}
}

/// Non-owning reference from a callback back to its own [`FrameLoop`].
pub struct FrameHandle<C>(Weak<Slot<C>>);

impl<C> FrameHandle<C> {
	/// Run `f` with the callback, or do nothing once the loop is gone.
	pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
		let slot = self.0.upgrade()?;
		let callback = slot.borrow();
		callback.as_ref().map(f)
	}
}

/// Id of the last requested animation frame, so a cleanup hook can cancel
/// it before the callback is dropped.
#[derive(Debug, Default)]
pub struct PendingFrame(AtomicI32);

impl PendingFrame {
	/// Record the id returned by `requestAnimationFrame`.
	pub fn set(&self, id: i32) {
		self.0.store(id, Ordering::Relaxed);
	}

	/// Take the pending id. Frame ids are never zero.
	pub fn take(&self) -> Option<i32> {
		match self.0.swap(0, Ordering::Relaxed) {
			0 => None,
			id => Some(id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type Callback = Box<dyn Fn() -> usize>;

	#[test]
	fn dropping_the_loop_releases_captured_state() {
		let captured = Rc::new(vec![1, 2, 3]);
		let frames: FrameLoop<Callback> = FrameLoop::default();

		let state = captured.clone();
		frames.install(|handle| {
			Box::new(move || {
				// Reschedule through the weak handle like the canvas loop does.
				let _ = handle.with(|_| ());
				state.len()
			})
		});
		assert_eq!(frames.with(|cb| cb()), Some(3));
		assert_eq!(Rc::strong_count(&captured), 2);

		drop(frames);
		assert_eq!(Rc::strong_count(&captured), 1);
	}

	#[test]
	fn handle_sees_callback_only_while_loop_lives() {
		let frames: FrameLoop<Callback> = FrameLoop::default();
		let mut kept = None;
		frames.install(|handle| {
			kept = Some(FrameHandle(handle.0.clone()));
			Box::new(|| 7)
		});
		let handle = kept.unwrap();
		assert_eq!(handle.with(|cb| cb()), Some(7));

		drop(frames);
		assert_eq!(handle.with(|cb| cb()), None);
	}

	#[test]
	fn reinstall_drops_previous_callback() {
		let first = Rc::new(());
		let frames: FrameLoop<Callback> = FrameLoop::default();

		let held = first.clone();
		frames.install(move |_| Box::new(move || Rc::strong_count(&held)));
		assert_eq!(Rc::strong_count(&first), 2);

		frames.install(|_| Box::new(|| 0));
		assert_eq!(Rc::strong_count(&first), 1);
		assert_eq!(frames.with(|cb| cb()), Some(0));
	}

	#[test]
	fn pending_frame_is_taken_once() {
		let pending = PendingFrame::default();
		assert_eq!(pending.take(), None);
		pending.set(42);
		assert_eq!(pending.take(), Some(42));
		assert_eq!(pending.take(), None);
	}
}
