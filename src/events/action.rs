//! Action enum for decoupling input handling from state changes.
//!
//! Key handling only decides *what* the user meant; the App decides what
//! that does to the current screen.

use crate::app::Screen;

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,
    /// Open help popup
    OpenHelp,
    /// Close help popup
    CloseHelp,

    // === Sidebar ===
    SidebarNext,
    SidebarPrev,
    /// Jump straight to a screen and focus it
    OpenScreen(Screen),
    /// Focus the screen highlighted in the sidebar
    EnterScreen,
    /// Return focus to the sidebar
    LeaveScreen,

    // === Lists ===
    RowDown,
    RowUp,
    /// Reload the current list from the backend
    Refresh,
    /// Start a new record
    NewRecord,
    /// Edit the highlighted record
    EditSelected,
    /// Ask to delete the highlighted record
    DeleteSelected,

    // === Forms ===
    NextField,
    PrevField,
    /// Step a chooser left
    CycleLeft,
    /// Step a chooser right
    CycleRight,
    InputChar(char),
    Backspace,
    /// Flip a checkbox or yes/no field
    Toggle,
    Submit,
    /// Clear the form
    ResetForm,

    // === Technology picker ===
    SwitchPane,
    CommitTechnology,
    RemoveTechnology,

    // === Confirmation modal ===
    Confirm,
    Cancel,

    // === No-op ===
    None,
}
