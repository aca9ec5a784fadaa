//! Key bindings of the plotter.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{Action, Attribute};

/// Presets reachable from the number keys, in key order.
const PRESET_KEYS: [(char, &str); 3] = [('1', "baseline"), ('2', "mcu"), ('3', "harvesting")];

/// Translates a key press into a plotter action.
///
/// Only [`KeyEventKind::Press`] counts; release and repeat events are
/// ignored so a single press never fires twice.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Right | KeyCode::Char('+' | '=') => Action::Faster,
        KeyCode::Left | KeyCode::Char('-') => Action::Slower,
        KeyCode::Char('v') => Action::Plot(Attribute::Voltage),
        KeyCode::Char('c') => Action::Plot(Attribute::Current),
        KeyCode::Char('e') => Action::Plot(Attribute::Energy),
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char(c) => PRESET_KEYS
            .iter()
            .find(|(k, _)| *k == c)
            .map(|&(_, preset)| Action::Preset(preset))?,
        _ => return None,
    };
    Some(action)
}
