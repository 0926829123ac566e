use std::collections::HashMap;

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use sdl2::{event::Event, keyboard::Keycode, EventPump};

use crate::events::{GameCommand, GameEvent};
use crate::systems::components::InputSnapshot;

/// The three movement inputs the simulation cares about. Opposite
/// horizontal keys held together cancel out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MovementKey {
    Left,
    Right,
    Jump,
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
    movement_bindings: HashMap<Keycode, MovementKey>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        key_bindings.insert(Keycode::Space, GameCommand::Start);
        key_bindings.insert(Keycode::Return, GameCommand::Start);
        key_bindings.insert(Keycode::M, GameCommand::MuteAudio);
        key_bindings.insert(Keycode::Escape, GameCommand::Exit);
        key_bindings.insert(Keycode::Q, GameCommand::Exit);

        let mut movement_bindings = HashMap::new();

        movement_bindings.insert(Keycode::Left, MovementKey::Left);
        movement_bindings.insert(Keycode::A, MovementKey::Left);
        movement_bindings.insert(Keycode::Right, MovementKey::Right);
        movement_bindings.insert(Keycode::D, MovementKey::Right);
        movement_bindings.insert(Keycode::Up, MovementKey::Jump);
        movement_bindings.insert(Keycode::W, MovementKey::Jump);

        Self {
            key_bindings,
            movement_bindings,
        }
    }
}

/// Drains the SDL event queue, translating key presses into commands and
/// maintaining the held-key snapshot the player system samples.
pub fn input_system(
    bindings: Res<Bindings>,
    mut snapshot: ResMut<InputSnapshot>,
    mut writer: EventWriter<GameEvent>,
    mut pump: NonSendMut<&'static mut EventPump>,
) {
    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => {
                writer.write(GameEvent::Command(GameCommand::Exit));
            }
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                if let Some(command) = bindings.key_bindings.get(&key).copied() {
                    writer.write(GameEvent::Command(command));
                }

                if let Some(movement) = bindings.movement_bindings.get(&key) {
                    set_held(&mut snapshot, *movement, true);
                }
            }
            Event::KeyUp {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                if let Some(movement) = bindings.movement_bindings.get(&key) {
                    set_held(&mut snapshot, *movement, false);
                }
            }
            _ => {}
        }
    }
}

fn set_held(snapshot: &mut InputSnapshot, key: MovementKey, held: bool) {
    match key {
        MovementKey::Left => snapshot.left = held,
        MovementKey::Right => snapshot.right = held,
        MovementKey::Jump => snapshot.up = held,
    }
}
