use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    PickerUp,
    PickerDown,
    PickerPageUp,
    PickerPageDown,
    Digit(u8),
    EraseDigit,
    Cancel,
    AddPicked,
    Draw,
    Reset,
    SaveState,
    LoadState,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Up => InputAction::PickerUp,
        KeyCode::Down => InputAction::PickerDown,
        KeyCode::PageUp => InputAction::PickerPageUp,
        KeyCode::PageDown => InputAction::PickerPageDown,
        KeyCode::Backspace => InputAction::EraseDigit,
        KeyCode::Enter => InputAction::AddPicked,
        KeyCode::Char(ch @ '0'..='9') => InputAction::Digit(ch as u8 - b'0'),
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('k') => InputAction::PickerUp,
        KeyCode::Char('j') => InputAction::PickerDown,
        KeyCode::Char('a') => InputAction::AddPicked,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::SaveState
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::LoadState
        }
        KeyCode::Char('r') => InputAction::Draw,
        KeyCode::Char('x') => InputAction::Reset,
        KeyCode::Char('S') => InputAction::SaveState,
        KeyCode::Char('L') => InputAction::LoadState,
        _ => InputAction::None,
    }
}
