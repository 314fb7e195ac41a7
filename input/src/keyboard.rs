use super::State;
use std::collections::HashSet;

pub type KeyCode = winit::keyboard::KeyCode;

pub struct Keyboard {
	pressed: HashSet<KeyCode>,
}

impl Keyboard {
	pub fn new() -> Self {
		Self { pressed: HashSet::new() }
	}

	/// Returns `true` if the key was not held before.
	pub fn update(&mut self, key: KeyCode, key_state: State) -> bool {
		match key_state {
			State::Pressed => self.pressed.insert(key),
			State::Released => {
				self.pressed.remove(&key);
				false
			},
		}
	}

	pub fn pressed(&self, key: KeyCode) -> bool {
		self.pressed.contains(&key)
	}

	pub fn release_all(&mut self) {
		self.pressed.clear();
	}
}

impl Default for Keyboard {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn press_and_release() {
		let mut keyboard = Keyboard::new();
		assert!(keyboard.update(KeyCode::KeyR, State::Pressed));
		assert!(!keyboard.update(KeyCode::KeyR, State::Pressed));
		assert!(keyboard.pressed(KeyCode::KeyR));
		keyboard.update(KeyCode::KeyR, State::Released);
		assert!(!keyboard.pressed(KeyCode::KeyR));
	}
}
