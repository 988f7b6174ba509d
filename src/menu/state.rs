//! Pure menu state machine.
//!
//! Each menu level has a fixed choice alphabet and a per-entry return
//! policy. `transition` is total: every token maps to a `Step`, and
//! tokens outside the alphabet map to `Step::Invalid`.

/// Diagnostic printed for tokens outside the active menu's alphabet.
pub const INVALID_CHOICE_DIAGNOSTIC: &str = "Please insert a valid choice.";

/// The active menu level. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLevel {
    /// Top-level workflow menu
    Main,
    /// Interactive vs. automatic execution
    RunMode,
    /// Auxiliary tools
    Utilities,
}

/// An operation the dispatcher can perform on behalf of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CompilePrograms,
    EnterRunMode,
    EnterUtilities,
    RunInteractive,
    ReplayTrace,
    GeneratePda,
}

/// What the menu loop does after a dispatched action returns.
///
/// The run-mode menu leaves after any action while the utilities menu
/// loops back; this asymmetry is observable behavior and must not be
/// unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPolicy {
    /// Re-display the same menu
    Reprompt,
    /// Terminate this menu loop
    Leave,
}

/// Result of feeding one choice token to a menu level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Perform an action, then apply the return policy
    Dispatch {
        action: MenuAction,
        then: ReturnPolicy,
    },
    /// Exit token: terminate this menu loop without any action
    Leave,
    /// Token outside the alphabet: print the diagnostic and re-prompt
    Invalid,
}

impl MenuLevel {
    /// Header line shown above the numbered options.
    pub fn header(self) -> &'static str {
        match self {
            MenuLevel::Main => "What do you want to do?",
            MenuLevel::RunMode => "Which running mode?",
            MenuLevel::Utilities => "Please choose:",
        }
    }

    /// Numbered options as (token, label) pairs, exit token included.
    pub fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            MenuLevel::Main => &[
                ("1", "Compile program(s)"),
                ("2", "Run a program"),
                ("3", "Utilities"),
                ("0", "Exit"),
            ],
            MenuLevel::RunMode => &[
                ("1", "Interactive mode"),
                ("2", "Automatic mode (execution trace)"),
                ("0", "Back"),
            ],
            MenuLevel::Utilities => &[("1", "PDA key generator"), ("0", "Back")],
        }
    }

    /// Level name for log events.
    pub fn name(self) -> &'static str {
        match self {
            MenuLevel::Main => "main",
            MenuLevel::RunMode => "run-mode",
            MenuLevel::Utilities => "utilities",
        }
    }
}

impl MenuAction {
    /// Action name for log events.
    pub fn name(self) -> &'static str {
        match self {
            MenuAction::CompilePrograms => "compile-programs",
            MenuAction::EnterRunMode => "enter-run-mode",
            MenuAction::EnterUtilities => "enter-utilities",
            MenuAction::RunInteractive => "run-interactive",
            MenuAction::ReplayTrace => "replay-trace",
            MenuAction::GeneratePda => "generate-pda",
        }
    }
}

/// Map one choice token to the step the dispatcher must take.
///
/// Note the main menu's "2": after the run-mode submenu returns, the main
/// loop terminates instead of re-prompting. Utilities ("3") re-prompts.
pub fn transition(level: MenuLevel, token: &str) -> Step {
    use MenuAction::*;
    use MenuLevel::*;
    use ReturnPolicy::*;

    match (level, token) {
        (Main, "1") => Step::Dispatch {
            action: CompilePrograms,
            then: Reprompt,
        },
        (Main, "2") => Step::Dispatch {
            action: EnterRunMode,
            then: Leave,
        },
        (Main, "3") => Step::Dispatch {
            action: EnterUtilities,
            then: Reprompt,
        },
        (RunMode, "1") => Step::Dispatch {
            action: RunInteractive,
            then: Leave,
        },
        (RunMode, "2") => Step::Dispatch {
            action: ReplayTrace,
            then: Leave,
        },
        (Utilities, "1") => Step::Dispatch {
            action: GeneratePda,
            then: Reprompt,
        },
        (_, "0") => Step::Leave,
        _ => Step::Invalid,
    }
}
