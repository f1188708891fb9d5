//! winit Bridge
//!
//! Translates winit window/device events into engine [`InputEvent`]s.
//! Mouse-look uses `DeviceEvent::MouseMotion` (raw, unaccelerated deltas)
//! rather than cursor positions, which stop at the window edge.

use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::{InputEvent, KeyCode};

/// Map a winit physical key code to an engine key code.
pub fn key_from_winit(code: WinitKeyCode) -> KeyCode {
    match code {
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

/// Map a winit physical key to an engine key code.
pub fn physical_key_from_winit(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(code) => key_from_winit(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unknown,
    }
}

/// Translate a window event. Returns `None` for events the walk mode
/// does not consume. Key repeats are dropped: held state is already tracked.
pub fn event_from_window(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return None;
            }
            let key = physical_key_from_winit(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyDown(key),
                ElementState::Released => InputEvent::KeyUp(key),
            })
        }
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button: MouseButton::Left,
            ..
        } => Some(InputEvent::Click),
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

/// Translate a device event (raw mouse motion).
pub fn event_from_device(event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => {
            Some(InputEvent::PointerMove { dx: *dx, dy: *dy })
        }
        _ => None,
    }
}
