//! A single spinning cube held half a metre in front of the camera.

use glam::{DMat3, DMat4, DVec3};

/// Radians added to each rotation axis per frame.
pub const SPIN_STEP: f64 = 0.01;
pub const CUBE_SIZE: f64 = 0.2;
pub const CUBE_OFFSET: DVec3 = DVec3::new(0.0, 0.0, -0.5);
pub const FOV_DEGREES: f64 = 70.0;
const Z_NEAR: f64 = 0.01;
const Z_FAR: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Session {
	#[default]
	Inline,
	Immersive,
}

impl Session {
	pub fn toggled(self) -> Self {
		match self {
			Session::Inline => Session::Immersive,
			Session::Immersive => Session::Inline,
		}
	}

	pub fn button_label(self) -> &'static str {
		match self {
			Session::Inline => "START AR",
			Session::Immersive => "STOP AR",
		}
	}
}

/// A visible face after rotation and projection, ready to fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
	pub points: [(f64, f64); 4],
	pub depth: f64,
	pub shade: (u8, u8, u8),
}

#[derive(Clone, Debug, Default)]
pub struct CubeState {
	pub rotation_x: f64,
	pub rotation_y: f64,
	pub session: Session,
	pub width: f64,
	pub height: f64,
}

const CORNERS: [DVec3; 8] = [
	DVec3::new(-1.0, -1.0, -1.0),
	DVec3::new(1.0, -1.0, -1.0),
	DVec3::new(1.0, 1.0, -1.0),
	DVec3::new(-1.0, 1.0, -1.0),
	DVec3::new(-1.0, -1.0, 1.0),
	DVec3::new(1.0, -1.0, 1.0),
	DVec3::new(1.0, 1.0, 1.0),
	DVec3::new(-1.0, 1.0, 1.0),
];

// Corner indices per face plus the outward normal.
const FACES: [([usize; 4], DVec3); 6] = [
	([4, 5, 6, 7], DVec3::Z),
	([1, 0, 3, 2], DVec3::NEG_Z),
	([5, 1, 2, 6], DVec3::X),
	([0, 4, 7, 3], DVec3::NEG_X),
	([7, 6, 2, 3], DVec3::Y),
	([0, 1, 5, 4], DVec3::NEG_Y),
];

const SKY: DVec3 = DVec3::ONE;
const GROUND: DVec3 = DVec3::new(0xbb as f64 / 255.0, 0xbb as f64 / 255.0, 1.0);
const BASE: DVec3 = DVec3::X;

impl CubeState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	/// Per-frame step.
	pub fn advance(&mut self) {
		self.rotation_x += SPIN_STEP;
		self.rotation_y += SPIN_STEP;
	}

	pub fn toggle_session(&mut self) -> Session {
		self.session = self.session.toggled();
		self.session
	}

	/// Drops back to inline when the page left fullscreen on its own (Esc).
	/// Returns true when the session changed.
	pub fn sync_fullscreen(&mut self, fullscreen: bool) -> bool {
		if self.session == Session::Immersive && !fullscreen {
			self.session = Session::Inline;
			return true;
		}
		false
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Y first, then X.
	fn rotation(&self) -> DMat3 {
		DMat3::from_rotation_x(self.rotation_x) * DMat3::from_rotation_y(self.rotation_y)
	}

	/// Perspective projection of a camera-space point to canvas pixels.
	pub fn project(&self, p: DVec3) -> Option<(f64, f64)> {
		if p.z >= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
			return None;
		}
		let projection = DMat4::perspective_rh(
			FOV_DEGREES.to_radians(),
			self.width / self.height,
			Z_NEAR,
			Z_FAR,
		);
		let ndc = projection.project_point3(p);
		Some((
			(ndc.x + 1.0) / 2.0 * self.width,
			(1.0 - ndc.y) / 2.0 * self.height,
		))
	}

	/// Camera-facing faces sorted back to front.
	pub fn visible_faces(&self) -> Vec<Face> {
		let rotation = self.rotation();
		let corners: Vec<DVec3> = CORNERS
			.iter()
			.map(|c| rotation * (*c * (CUBE_SIZE / 2.0)) + CUBE_OFFSET)
			.collect();

		let mut faces: Vec<Face> = FACES
			.iter()
			.filter_map(|(idx, normal)| {
				let n = rotation * *normal;
				let center = idx.iter().map(|&i| corners[i]).sum::<DVec3>() / 4.0;
				// camera sits at the origin
				if n.dot(-center) <= 0.0 {
					return None;
				}
				let mut points = [(0.0, 0.0); 4];
				for (slot, &i) in points.iter_mut().zip(idx) {
					*slot = self.project(corners[i])?;
				}
				Some(Face {
					points,
					depth: -center.z,
					shade: shade(n),
				})
			})
			.collect();
		faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
		faces
	}
}

/// Hemisphere lighting: blend ground and sky colour by how far the normal points up.
fn shade(normal: DVec3) -> (u8, u8, u8) {
	let light = GROUND.lerp(SKY, 0.5 * normal.y + 0.5);
	let rgb = (BASE * light * 255.0).round().clamp(DVec3::ZERO, DVec3::splat(255.0));
	(rgb.x as u8, rgb.y as u8, rgb.z as u8)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advance_spins_both_axes() {
		let mut cube = CubeState::new(800.0, 600.0);
		for _ in 0..100 {
			cube.advance();
		}
		assert!((cube.rotation_x - 1.0).abs() < 1e-9);
		assert!((cube.rotation_y - 1.0).abs() < 1e-9);
	}

	#[test]
	fn session_toggles_back_and_forth() {
		let mut cube = CubeState::default();
		assert_eq!(cube.session, Session::Inline);
		assert_eq!(cube.toggle_session(), Session::Immersive);
		assert_eq!(cube.session.button_label(), "STOP AR");
		assert_eq!(cube.toggle_session(), Session::Inline);
	}

	#[test]
	fn leaving_fullscreen_ends_immersive_session() {
		let mut cube = CubeState::default();
		assert!(!cube.sync_fullscreen(false));
		cube.toggle_session();
		assert!(!cube.sync_fullscreen(true));
		assert_eq!(cube.session, Session::Immersive);
		assert!(cube.sync_fullscreen(false));
		assert_eq!(cube.session, Session::Inline);
		assert_eq!(cube.session.button_label(), "START AR");
	}

	#[test]
	fn unrotated_cube_shows_only_its_front() {
		let cube = CubeState::new(800.0, 600.0);
		let faces = cube.visible_faces();
		assert_eq!(faces.len(), 1);
		// centred on screen
		let (sx, sy) = faces[0]
			.points
			.iter()
			.fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
		assert!((sx / 4.0 - 400.0).abs() < 1e-6);
		assert!((sy / 4.0 - 300.0).abs() < 1e-6);
	}

	#[test]
	fn rotated_cube_sorts_faces_back_to_front() {
		let mut cube = CubeState::new(800.0, 600.0);
		for _ in 0..50 {
			cube.advance();
		}
		let faces = cube.visible_faces();
		assert!(faces.len() >= 2 && faces.len() <= 3);
		assert!(faces.windows(2).all(|w| w[0].depth >= w[1].depth));
	}

	#[test]
	fn top_face_is_lit_by_the_sky() {
		assert_eq!(shade(DVec3::Y), (255, 0, 0));
		assert_eq!(shade(DVec3::NEG_Y), (0xbb, 0, 0));
	}

	#[test]
	fn points_behind_camera_do_not_project() {
		let cube = CubeState::new(800.0, 600.0);
		assert!(cube.project(DVec3::new(0.0, 0.0, 1.0)).is_none());
		let (x, y) = cube.project(DVec3::new(0.0, 0.0, -1.0)).unwrap();
		assert!((x - 400.0).abs() < 1e-9 && (y - 300.0).abs() < 1e-9);
	}
}
