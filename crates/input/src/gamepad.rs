//! Gamepad translator - polled controller state to edge-triggered intents.
//!
//! The platform reports held state ("button 14 is down") every frame. The
//! translator samples it into a 14-flag [`ButtonsStatus`], compares it with
//! the previous sample and fires a direction callback only on a
//! false -> true transition of one of the four cardinal flags.
//!
//! Button indices follow the standard gamepad mapping:
//!
//! | Index | Button | Flag |
//! |-------|--------|------|
//! | 0 | A | `A` |
//! | 1 | B | `B` |
//! | 4 | LB | `R` |
//! | 5 | RB | `S` |
//! | 7 | RT | `Hide` |
//! | 9 | Start | `P` |
//! | 12..=15 | D-pad up/down/left/right | `DirectionU/D/L/R` |
//!
//! The left stick (axes 0 and 1) is decoded into one of eight directions with
//! a deadzone of 0.6.

use std::fmt;

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::types::{Direction, AXES_DEADZONE};

pub const BUTTON_A: usize = 0;
pub const BUTTON_B: usize = 1;
pub const BUTTON_LB: usize = 4;
pub const BUTTON_RB: usize = 5;
pub const BUTTON_RT: usize = 7;
pub const BUTTON_START: usize = 9;
pub const BUTTON_UP: usize = 12;
pub const BUTTON_DOWN: usize = 13;
pub const BUTTON_LEFT: usize = 14;
pub const BUTTON_RIGHT: usize = 15;

/// Pressed state and analog value of one physical button
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonState {
    pub pressed: bool,
    pub value: f64,
}

impl ButtonState {
    /// Digital-mapped buttons only count when fully pressed.
    fn fully_pressed(&self) -> bool {
        self.pressed && self.value == 1.0
    }
}

/// One device as reported by the platform for the current frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceSnapshot {
    pub index: usize,
    pub id: String,
    pub buttons: Vec<ButtonState>,
    pub axes: Vec<f64>,
}

impl DeviceSnapshot {
    pub fn new(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
            buttons: Vec::new(),
            axes: Vec::new(),
        }
    }

    pub fn with_button(mut self, button: usize, pressed: bool, value: f64) -> Self {
        if self.buttons.len() <= button {
            self.buttons.resize(button + 1, ButtonState::default());
        }
        self.buttons[button] = ButtonState { pressed, value };
        self
    }

    /// Fully press a button (`pressed` with value 1.0)
    pub fn with_pressed(self, button: usize) -> Self {
        self.with_button(button, true, 1.0)
    }

    pub fn with_axes(mut self, axes: &[f64]) -> Self {
        self.axes = axes.to_vec();
        self
    }

    /// State of `button`, released if the device does not report it
    pub fn button(&self, button: usize) -> ButtonState {
        self.buttons.get(button).copied().unwrap_or_default()
    }
}

/// Platform access to connected controllers
pub trait GamepadSource {
    /// Current state of the device at `index`, `None` if nothing is there
    fn gamepad(&self, index: usize) -> Option<DeviceSnapshot>;
}

impl GamepadSource for [DeviceSnapshot] {
    fn gamepad(&self, index: usize) -> Option<DeviceSnapshot> {
        self.iter().find(|d| d.index == index).cloned()
    }
}

impl GamepadSource for Vec<DeviceSnapshot> {
    fn gamepad(&self, index: usize) -> Option<DeviceSnapshot> {
        self.as_slice().gamepad(index)
    }
}

/// Connection events delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamepadEvent {
    Connected { index: usize, id: String },
    Disconnected { index: usize, id: String },
}

/// The 14 logical flags sampled each poll, in edge-detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonFlag {
    A,
    B,
    P,
    R,
    S,
    Hide,
    DirectionL,
    DirectionR,
    DirectionD,
    DirectionU,
    DirectionLD,
    DirectionLU,
    DirectionRD,
    DirectionRU,
}

impl ButtonFlag {
    pub const ALL: [ButtonFlag; 14] = [
        ButtonFlag::A,
        ButtonFlag::B,
        ButtonFlag::P,
        ButtonFlag::R,
        ButtonFlag::S,
        ButtonFlag::Hide,
        ButtonFlag::DirectionL,
        ButtonFlag::DirectionR,
        ButtonFlag::DirectionD,
        ButtonFlag::DirectionU,
        ButtonFlag::DirectionLD,
        ButtonFlag::DirectionLU,
        ButtonFlag::DirectionRD,
        ButtonFlag::DirectionRU,
    ];

    /// The move intent for the four cardinal flags. Diagonals and action
    /// buttons have none.
    pub fn cardinal(&self) -> Option<Direction> {
        match self {
            ButtonFlag::DirectionL => Some(Direction::Left),
            ButtonFlag::DirectionR => Some(Direction::Right),
            ButtonFlag::DirectionD => Some(Direction::Down),
            ButtonFlag::DirectionU => Some(Direction::Top),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Snapshot of all 14 flags for one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonsStatus {
    flags: [bool; 14],
}

impl ButtonsStatus {
    pub fn get(&self, flag: ButtonFlag) -> bool {
        self.flags[flag.slot()]
    }

    pub fn set(&mut self, flag: ButtonFlag, value: bool) {
        self.flags[flag.slot()] = value;
    }

    /// Flags that are currently true, in edge-detection order
    pub fn active(&self) -> impl Iterator<Item = ButtonFlag> + '_ {
        ButtonFlag::ALL.into_iter().filter(|f| self.get(*f))
    }

    /// Sample a device: buttons first, then the left stick on top.
    pub fn from_device(device: &DeviceSnapshot, deadzone: f64) -> Self {
        let mut status = Self::default();

        status.set(ButtonFlag::A, device.button(BUTTON_A).pressed);
        status.set(ButtonFlag::B, device.button(BUTTON_B).pressed);
        status.set(ButtonFlag::R, device.button(BUTTON_LB).pressed);
        status.set(ButtonFlag::S, device.button(BUTTON_RB).pressed);
        status.set(ButtonFlag::P, device.button(BUTTON_START).pressed);
        status.set(ButtonFlag::Hide, device.button(BUTTON_RT).pressed);

        status.set(ButtonFlag::DirectionU, device.button(BUTTON_UP).fully_pressed());
        status.set(ButtonFlag::DirectionD, device.button(BUTTON_DOWN).fully_pressed());
        status.set(ButtonFlag::DirectionL, device.button(BUTTON_LEFT).fully_pressed());
        status.set(ButtonFlag::DirectionR, device.button(BUTTON_RIGHT).fully_pressed());

        if let [h, v, ..] = device.axes.as_slice() {
            if let Some(flag) = decode_stick(*h, *v, deadzone) {
                status.set(flag, true);
            }
        }

        status
    }
}

/// Decode stick axes into at most one of eight direction flags.
///
/// Branches are tested in a fixed order and the first match wins, so
/// boundary values resolve deterministically (`h == v == deadzone` is
/// right-down, not right).
///
/// # Examples
///
/// ```
/// use puzzle15_input::gamepad::{decode_stick, ButtonFlag};
///
/// assert_eq!(decode_stick(0.8, 0.1, 0.6), Some(ButtonFlag::DirectionR));
/// assert_eq!(decode_stick(0.8, 0.8, 0.6), Some(ButtonFlag::DirectionRD));
/// assert_eq!(decode_stick(0.1, -0.2, 0.6), None);
/// ```
pub fn decode_stick(h: f64, v: f64, deadzone: f64) -> Option<ButtonFlag> {
    let d = deadzone;
    if h > d && v.abs() < d {
        Some(ButtonFlag::DirectionR)
    } else if h < -d && v.abs() < d {
        Some(ButtonFlag::DirectionL)
    } else if h.abs() < d && v > d {
        Some(ButtonFlag::DirectionD)
    } else if h.abs() < d && v < -d {
        Some(ButtonFlag::DirectionU)
    } else if h >= d && v >= d {
        Some(ButtonFlag::DirectionRD)
    } else if h <= -d && v >= d {
        Some(ButtonFlag::DirectionLD)
    } else if h >= d && v <= -d {
        Some(ButtonFlag::DirectionRU)
    } else if h <= -d && v <= -d {
        Some(ButtonFlag::DirectionLU)
    } else {
        None
    }
}

type IdCallback = Box<dyn FnMut(&str)>;
type Callback = Box<dyn FnMut()>;

/// Callbacks invoked by the translator. Unset callbacks are skipped.
#[derive(Default)]
pub struct GamepadCallbacks {
    connected: Option<IdCallback>,
    disconnected: Option<IdCallback>,
    up: Option<Callback>,
    down: Option<Callback>,
    left: Option<Callback>,
    right: Option<Callback>,
}

impl GamepadCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connected(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.connected = Some(Box::new(f));
        self
    }

    pub fn on_disconnected(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.disconnected = Some(Box::new(f));
        self
    }

    pub fn on_up(mut self, f: impl FnMut() + 'static) -> Self {
        self.up = Some(Box::new(f));
        self
    }

    pub fn on_down(mut self, f: impl FnMut() + 'static) -> Self {
        self.down = Some(Box::new(f));
        self
    }

    pub fn on_left(mut self, f: impl FnMut() + 'static) -> Self {
        self.left = Some(Box::new(f));
        self
    }

    pub fn on_right(mut self, f: impl FnMut() + 'static) -> Self {
        self.right = Some(Box::new(f));
        self
    }

    /// Route every direction callback to one handler
    pub fn on_direction(self, f: impl FnMut(Direction) + 'static) -> Self {
        let f = std::rc::Rc::new(std::cell::RefCell::new(f));
        let (up, down, left) = (f.clone(), f.clone(), f.clone());
        self.on_up(move || (&mut *up.borrow_mut())(Direction::Top))
            .on_down(move || (&mut *down.borrow_mut())(Direction::Down))
            .on_left(move || (&mut *left.borrow_mut())(Direction::Left))
            .on_right(move || (&mut *f.borrow_mut())(Direction::Right))
    }

    fn fire(&mut self, dir: Direction) {
        let cb = match dir {
            Direction::Top => self.up.as_mut(),
            Direction::Down => self.down.as_mut(),
            Direction::Left => self.left.as_mut(),
            Direction::Right => self.right.as_mut(),
        };
        if let Some(cb) = cb {
            cb();
        }
    }
}

impl fmt::Debug for GamepadCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamepadCallbacks")
            .field("connected", &self.connected.is_some())
            .field("disconnected", &self.disconnected.is_some())
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}

/// Tracks one controller and turns its polled state into direction edges.
#[derive(Debug)]
pub struct GamepadTranslator {
    connected_index: Option<usize>,
    callbacks: GamepadCallbacks,
    listening: bool,
    previous: ButtonsStatus,
    deadzone: f64,
}

impl GamepadTranslator {
    pub fn new() -> Self {
        Self {
            connected_index: None,
            callbacks: GamepadCallbacks::default(),
            listening: false,
            previous: ButtonsStatus::default(),
            deadzone: AXES_DEADZONE,
        }
    }

    /// Install callbacks and start listening to connection events
    pub fn init(&mut self, callbacks: GamepadCallbacks) {
        self.callbacks = callbacks;
        self.listening = true;
    }

    /// Stop listening to connection events.
    ///
    /// A controller that is already bound keeps being polled.
    pub fn dispose(&mut self) {
        self.listening = false;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn connected_index(&self) -> Option<usize> {
        self.connected_index
    }

    pub fn previous_status(&self) -> ButtonsStatus {
        self.previous
    }

    pub fn deadzone(&self) -> f64 {
        self.deadzone
    }

    /// Handle a connection event. Returns false if not listening.
    ///
    /// Disconnects clear the binding without checking which device left.
    pub fn handle_event(&mut self, event: &GamepadEvent) -> bool {
        if !self.listening {
            return false;
        }
        match event {
            GamepadEvent::Connected { index, id } => {
                info!(index, id = %id, "gamepad connected");
                self.connected_index = Some(*index);
                if let Some(cb) = self.callbacks.connected.as_mut() {
                    cb(id.as_str());
                }
            }
            GamepadEvent::Disconnected { index, id } => {
                info!(index, id = %id, bound = ?self.connected_index, "gamepad disconnected");
                self.connected_index = None;
                if let Some(cb) = self.callbacks.disconnected.as_mut() {
                    cb(id.as_str());
                }
            }
        }
        true
    }

    /// Sample the bound controller and fire callbacks for new presses.
    ///
    /// Returns the directions fired, in edge-detection order. Does nothing
    /// when no controller is bound or the source no longer reports it.
    pub fn poll<S>(&mut self, source: &S) -> ArrayVec<Direction, 4>
    where
        S: GamepadSource + ?Sized,
    {
        let mut fired = ArrayVec::new();
        let Some(index) = self.connected_index else {
            return fired;
        };
        let Some(device) = source.gamepad(index) else {
            debug!(index, "bound gamepad missing from poll");
            return fired;
        };

        let current = ButtonsStatus::from_device(&device, self.deadzone);
        for flag in ButtonFlag::ALL {
            let now = current.get(flag);
            if now == self.previous.get(flag) || !now {
                continue;
            }
            if let Some(dir) = flag.cardinal() {
                self.callbacks.fire(dir);
                let _ = fired.try_push(dir);
            }
        }
        self.previous = current;

        fired
    }
}

impl Default for GamepadTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (GamepadCallbacks, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (c, d, moves) = (log.clone(), log.clone(), log.clone());
        let callbacks = GamepadCallbacks::new()
            .on_connected(move |id| c.borrow_mut().push(format!("connected:{id}")))
            .on_disconnected(move |id| d.borrow_mut().push(format!("disconnected:{id}")))
            .on_direction(move |dir| moves.borrow_mut().push(dir.as_str().to_string()));
        (callbacks, log)
    }

    fn connected_translator() -> (GamepadTranslator, Rc<RefCell<Vec<String>>>) {
        let (callbacks, log) = recording();
        let mut gp = GamepadTranslator::new();
        gp.init(callbacks);
        gp.handle_event(&GamepadEvent::Connected {
            index: 0,
            id: "pad".into(),
        });
        log.borrow_mut().clear();
        (gp, log)
    }

    #[test]
    fn test_decode_stick_cardinals() {
        let d = AXES_DEADZONE;
        assert_eq!(decode_stick(0.8, 0.1, d), Some(ButtonFlag::DirectionR));
        assert_eq!(decode_stick(-0.8, 0.1, d), Some(ButtonFlag::DirectionL));
        assert_eq!(decode_stick(0.1, 0.8, d), Some(ButtonFlag::DirectionD));
        assert_eq!(decode_stick(0.1, -0.8, d), Some(ButtonFlag::DirectionU));
    }

    #[test]
    fn test_decode_stick_diagonals() {
        let d = AXES_DEADZONE;
        assert_eq!(decode_stick(0.8, 0.8, d), Some(ButtonFlag::DirectionRD));
        assert_eq!(decode_stick(-0.8, 0.8, d), Some(ButtonFlag::DirectionLD));
        assert_eq!(decode_stick(0.8, -0.8, d), Some(ButtonFlag::DirectionRU));
        assert_eq!(decode_stick(-0.8, -0.8, d), Some(ButtonFlag::DirectionLU));
    }

    #[test]
    fn test_decode_stick_boundaries() {
        let d = AXES_DEADZONE;
        // Inside the deadzone.
        assert_eq!(decode_stick(0.0, 0.0, d), None);
        assert_eq!(decode_stick(0.59, -0.59, d), None);
        // Exactly at the deadzone on both axes is diagonal.
        assert_eq!(decode_stick(d, d, d), Some(ButtonFlag::DirectionRD));
        assert_eq!(decode_stick(-d, -d, d), Some(ButtonFlag::DirectionLU));
        // Exactly at the deadzone on one axis only matches nothing.
        assert_eq!(decode_stick(d, 0.0, d), None);
        assert_eq!(decode_stick(0.9, d, d), Some(ButtonFlag::DirectionRD));
    }

    #[test]
    fn test_partial_dpad_press_is_ignored() {
        let device = DeviceSnapshot::new(0, "pad").with_button(BUTTON_LEFT, true, 0.5);
        let status = ButtonsStatus::from_device(&device, AXES_DEADZONE);
        assert!(!status.get(ButtonFlag::DirectionL));

        let device = DeviceSnapshot::new(0, "pad").with_pressed(BUTTON_LEFT);
        let status = ButtonsStatus::from_device(&device, AXES_DEADZONE);
        assert!(status.get(ButtonFlag::DirectionL));
    }

    #[test]
    fn test_action_buttons_map_to_flags() {
        let device = DeviceSnapshot::new(0, "pad")
            .with_button(BUTTON_A, true, 0.3)
            .with_button(BUTTON_LB, true, 0.0)
            .with_button(BUTTON_RT, true, 0.2)
            .with_button(BUTTON_START, true, 1.0);
        let status = ButtonsStatus::from_device(&device, AXES_DEADZONE);
        assert_eq!(
            status.active().collect::<Vec<_>>(),
            vec![ButtonFlag::A, ButtonFlag::P, ButtonFlag::R, ButtonFlag::Hide]
        );
    }

    #[test]
    fn test_missing_axes_decode_nothing() {
        let device = DeviceSnapshot::new(0, "pad").with_axes(&[0.9]);
        let status = ButtonsStatus::from_device(&device, AXES_DEADZONE);
        assert_eq!(status.active().count(), 0);
    }

    #[test]
    fn test_connect_and_disconnect_callbacks() {
        let (callbacks, log) = recording();
        let mut gp = GamepadTranslator::new();
        gp.init(callbacks);

        gp.handle_event(&GamepadEvent::Connected {
            index: 0,
            id: "first".into(),
        });
        gp.handle_event(&GamepadEvent::Connected {
            index: 2,
            id: "second".into(),
        });
        assert_eq!(gp.connected_index(), Some(2), "last connected wins");

        // A different device disconnecting still clears the binding.
        gp.handle_event(&GamepadEvent::Disconnected {
            index: 0,
            id: "first".into(),
        });
        assert_eq!(gp.connected_index(), None);
        assert_eq!(
            *log.borrow(),
            vec!["connected:first", "connected:second", "disconnected:first"]
        );
    }

    #[test]
    fn test_events_ignored_before_init_and_after_dispose() {
        let mut gp = GamepadTranslator::new();
        let connect = GamepadEvent::Connected {
            index: 0,
            id: "pad".into(),
        };
        assert!(!gp.handle_event(&connect));
        assert_eq!(gp.connected_index(), None);

        let (callbacks, log) = recording();
        gp.init(callbacks);
        gp.dispose();
        assert!(!gp.handle_event(&connect));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_poll_without_binding_is_noop() {
        let (callbacks, log) = recording();
        let mut gp = GamepadTranslator::new();
        gp.init(callbacks);

        let devices = vec![DeviceSnapshot::new(0, "pad").with_pressed(BUTTON_UP)];
        assert!(gp.poll(&devices).is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_poll_missing_device_keeps_previous() {
        let (mut gp, log) = connected_translator();
        let held = vec![DeviceSnapshot::new(0, "pad").with_pressed(BUTTON_UP)];
        assert_eq!(gp.poll(&held).as_slice(), &[Direction::Top]);

        let gone: Vec<DeviceSnapshot> = Vec::new();
        assert!(gp.poll(&gone).is_empty());
        assert!(gp.previous_status().get(ButtonFlag::DirectionU));

        // Still held when the device comes back: no new edge.
        assert!(gp.poll(&held).is_empty());
        assert_eq!(*log.borrow(), vec!["top"]);
    }

    #[test]
    fn test_poll_is_edge_triggered() {
        let (mut gp, log) = connected_translator();
        let held = vec![DeviceSnapshot::new(0, "pad").with_pressed(BUTTON_RIGHT)];
        let released = vec![DeviceSnapshot::new(0, "pad")];

        assert_eq!(gp.poll(&held).as_slice(), &[Direction::Right]);
        assert!(gp.poll(&held).is_empty(), "held button must not repeat");
        assert!(gp.poll(&released).is_empty(), "release does not fire");
        assert_eq!(gp.poll(&held).as_slice(), &[Direction::Right]);
        assert_eq!(*log.borrow(), vec!["right", "right"]);
    }

    #[test]
    fn test_stick_fires_cardinal_but_not_diagonal() {
        let (mut gp, log) = connected_translator();
        let stick = |h: f64, v: f64| vec![DeviceSnapshot::new(0, "pad").with_axes(&[h, v])];

        assert_eq!(gp.poll(&stick(0.1, 0.9)).as_slice(), &[Direction::Down]);
        assert!(gp.poll(&stick(0.9, 0.9)).is_empty(), "diagonal fires nothing");
        assert!(gp.previous_status().get(ButtonFlag::DirectionRD));
        assert_eq!(gp.poll(&stick(0.9, 0.0)).as_slice(), &[Direction::Right]);
        assert_eq!(*log.borrow(), vec!["down", "right"]);
    }

    #[test]
    fn test_multiple_edges_fire_in_flag_order() {
        let (mut gp, _log) = connected_translator();
        let devices = vec![DeviceSnapshot::new(0, "pad")
            .with_pressed(BUTTON_UP)
            .with_pressed(BUTTON_LEFT)
            .with_pressed(BUTTON_A)];
        assert_eq!(
            gp.poll(&devices).as_slice(),
            &[Direction::Left, Direction::Top]
        );
    }

    #[test]
    fn test_poll_continues_after_dispose() {
        let (mut gp, _log) = connected_translator();
        gp.dispose();
        let devices = vec![DeviceSnapshot::new(0, "pad").with_pressed(BUTTON_DOWN)];
        assert_eq!(gp.poll(&devices).as_slice(), &[Direction::Down]);
    }
}
