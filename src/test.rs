use std::rc::Rc;

use glam::Vec2;

use crate::engine::{RegionId, REGION_COUNT};
use crate::input::Layout;
use crate::render::{DisplayList, Surface};
use crate::session::Host;

#[derive(Debug)]
struct NodeData {
	offset: Vec2,
	parent: Option<Node>,
}

/// A minimal layout tree standing in for the browser's.
#[derive(Clone, Debug)]
pub struct Node(Rc<NodeData>);

impl Node {
	pub fn root(offset: Vec2) -> Self {
		Self(Rc::new(NodeData {
			offset,
			parent: None,
		}))
	}

	pub fn child(&self, offset: Vec2) -> Self {
		Self(Rc::new(NodeData {
			offset,
			parent: Some(self.clone()),
		}))
	}
}

impl Layout for Node {
	fn offset(&self) -> Vec2 {
		self.0.offset
	}

	fn offset_parent(&self) -> Option<Self> {
		self.0.parent.clone()
	}
}

/// A host whose surfaces record what is drawn on them.
pub struct RecordingHost {
	pub regions: [DisplayList; REGION_COUNT],
	pub disc: DisplayList,
}

impl RecordingHost {
	/// Square region surfaces of `region_px` and a square disc surface of `disc_px`.
	pub fn new(region_px: u32, disc_px: u32) -> Self {
		Self {
			regions: std::array::from_fn(|_| DisplayList::new(region_px, region_px)),
			disc: DisplayList::new(disc_px, disc_px),
		}
	}
}

impl Host for RecordingHost {
	fn region_surface(&mut self, id: RegionId) -> &mut dyn Surface {
		&mut self.regions[id.index()]
	}

	fn disc_surface(&mut self) -> &mut dyn Surface {
		&mut self.disc
	}
}
