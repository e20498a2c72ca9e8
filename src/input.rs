//! Pointer input and the mapping from page coordinates into a surface's own pixel space.

use glam::Vec2;

/// A node in the host's layout tree.
pub trait Layout: Sized {
	/// Position of this node relative to its positioning container.
	fn offset(&self) -> Vec2;

	/// The positioning container, or `None` at the root.
	fn offset_parent(&self) -> Option<Self>;
}

/// Sum of the offsets of `target` and all of its positioning containers, i.e. its page position.
pub fn page_offset<L: Layout>(target: &L) -> Vec2 {
	let mut offset = target.offset();
	let mut parent = target.offset_parent();
	while let Some(node) = parent {
		offset += node.offset();
		parent = node.offset_parent();
	}
	offset
}

/// Maps page coordinates into `target`'s local pixel space.
pub fn local_coordinates<L: Layout>(page: Vec2, target: &L) -> Vec2 {
	page - page_offset(target)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
	Down,
	Move,
	Up,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerSource {
	Mouse { page: Vec2 },
	/// Page positions of every touch currently on the surface.
	Touch { touches: Vec<Vec2> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
	pub phase: Phase,
	pub source: PointerSource,
}

impl PointerEvent {
	pub fn mouse(phase: Phase, page: Vec2) -> Self {
		Self {
			phase,
			source: PointerSource::Mouse { page },
		}
	}

	pub fn touch(phase: Phase, touches: impl IntoIterator<Item = Vec2>) -> Self {
		Self {
			phase,
			source: PointerSource::Touch {
				touches: touches.into_iter().collect(),
			},
		}
	}

	/// The single pointer position in page coordinates. `None` for multi-touch and touch-free events,
	/// which must not drive any state.
	pub fn page_position(&self) -> Option<Vec2> {
		match &self.source {
			PointerSource::Mouse { page } => Some(*page),
			PointerSource::Touch { touches } => match touches.as_slice() {
				[single] => Some(*single),
				_ => None,
			},
		}
	}

	/// The single pointer position in `target`'s pixel space.
	pub fn local_position<L: Layout>(&self, target: &L) -> Option<Vec2> {
		self.page_position()
			.map(|page| local_coordinates(page, target))
	}
}
