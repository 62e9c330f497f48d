//! Text rendering of controller state.

use client_core::DisplayState;

pub const PENDING_TEXT: &str = "Loading....";
pub const FAILED_TEXT: &str = "Request failed; see log for details.";

pub fn render(state: &DisplayState) -> &str {
    match state {
        DisplayState::Idle => "",
        DisplayState::Pending => PENDING_TEXT,
        DisplayState::Succeeded(text) => text,
        DisplayState::Failed => FAILED_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_text_is_rendered_verbatim() {
        let state = DisplayState::Succeeded("  two\nlines ".into());
        assert_eq!(render(&state), "  two\nlines ");
    }

    #[test]
    fn failure_never_renders_partial_text() {
        assert_eq!(render(&DisplayState::Failed), FAILED_TEXT);
        assert_eq!(render(&DisplayState::Pending), PENDING_TEXT);
        assert_eq!(render(&DisplayState::Idle), "");
    }
}
