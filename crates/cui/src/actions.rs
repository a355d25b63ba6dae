use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::PickerUp => app.step_picker(1),
        InputAction::PickerDown => app.step_picker(-1),
        InputAction::PickerPageUp => app.step_picker(10),
        InputAction::PickerPageDown => app.step_picker(-10),
        InputAction::Digit(digit) => app.type_digit(digit),
        InputAction::EraseDigit => app.erase_digit(),
        InputAction::Cancel => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.clear_typed();
            }
        }
        InputAction::AddPicked => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.add_picked();
            }
        }
        InputAction::Draw => app.draw(),
        InputAction::Reset => app.reset(),
        InputAction::SaveState => app.open_save_prompt(),
        InputAction::LoadState => app.open_load_prompt(),
    }
}
