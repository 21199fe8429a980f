//! Input module (engine-facing).
//!
//! This crate is independent of any UI framework. It turns raw input into
//! [`crate::types::GameAction`]s and directional intents:
//!
//! - [`map`]: `crossterm` key events to game actions
//! - [`gamepad`]: polled controller state to edge-triggered direction callbacks

pub mod gamepad;
pub mod map;

pub use puzzle15_types as types;

pub use gamepad::{
    decode_stick, ButtonFlag, ButtonState, ButtonsStatus, DeviceSnapshot, GamepadCallbacks,
    GamepadEvent, GamepadSource, GamepadTranslator,
};
pub use map::{handle_key_event, should_quit};
