//! Sound cues.
//!
//! Gameplay code never talks to the audio device. It writes [`PlaySound`] messages, and
//! the host drains them once per frame into its [`AudioBackend`] via [`dispatch_sounds`].

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::{SoundHandle, SoundRegistry};

/// Request to play a registered sound once.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct PlaySound {
    pub name: String,
}

/// Host-side mixer.
pub trait AudioBackend {
    /// `channel: None` lets the mixer pick a free channel.
    fn play_channel(&mut self, sound: SoundHandle, volume: i32, loops: i32, channel: Option<i32>);
}

/// Queue `name` if it resolves in the sound registry. Unknown or empty names are dropped.
pub fn play_sound(world: &mut World, name: Option<&str>) {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return;
    };
    let known = world
        .get_resource::<SoundRegistry>()
        .is_some_and(|r| r.contains(name));
    if !known {
        return;
    }
    world.write_message(PlaySound { name: name.to_owned() });
}

/// Play every queued sound through `backend`. Returns how many were played.
pub fn dispatch_sounds(world: &mut World, backend: &mut dyn AudioBackend) -> usize {
    let queued: Vec<PlaySound> = match world.get_resource_mut::<Messages<PlaySound>>() {
        Some(mut messages) => messages.drain().collect(),
        None => return 0,
    };
    let volume = Tunables::current(world).sfx_volume;
    let Some(registry) = world.get_resource::<SoundRegistry>() else {
        return 0;
    };

    let mut played = 0;
    for cue in queued {
        let Some(sound) = registry.get(&cue.name) else {
            continue;
        };
        backend.play_channel(sound, volume, 0, None);
        played += 1;
    }
    played
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlaySound>();
}
