//! Menu dispatcher: drives the menu loops and routes choices to the
//! workbench collaborators.
//!
//! One logical thread of control. The trace-replay action is async and
//! is awaited to completion before the loop proceeds; there is no
//! cancellation or timeout for collaborator operations. Collaborator
//! errors propagate out of `run` untouched, only invalid choice tokens
//! are handled here.
use crate::logging;
use crate::menu::console::Console;
use crate::menu::state::{
    transition, MenuAction, MenuLevel, ReturnPolicy, Step, INVALID_CHOICE_DIAGNOSTIC,
};
use crate::ui::formatter::Formatter;
use crate::workbench::Toolkit;
use crate::Result;
use std::future::Future;
use std::pin::Pin;

/// Drives the nested workflow menus over a console and a toolkit.
pub struct MenuDispatcher<'a> {
    console: &'a mut dyn Console,
    toolkit: &'a mut Toolkit,
}

impl<'a> MenuDispatcher<'a> {
    pub fn new(console: &'a mut dyn Console, toolkit: &'a mut Toolkit) -> Self {
        MenuDispatcher { console, toolkit }
    }

    /// Run the top-level menu until the operator exits.
    pub async fn run(&mut self) -> Result<()> {
        self.run_level(MenuLevel::Main).await
    }

    async fn run_level(&mut self, level: MenuLevel) -> Result<()> {
        logging::log_menu_entered(level.name());

        loop {
            self.display(level);

            let Some(token) = self.console.read_choice()? else {
                // End of input terminates the active menu like "0"
                return Ok(());
            };

            match transition(level, token.trim()) {
                Step::Leave => return Ok(()),
                Step::Invalid => {
                    logging::log_invalid_choice(level.name());
                    self.console.show(INVALID_CHOICE_DIAGNOSTIC);
                }
                Step::Dispatch { action, then } => {
                    self.dispatch(action).await?;
                    if then == ReturnPolicy::Leave {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn display(&mut self, level: MenuLevel) {
        self.console.show(level.header());
        for (token, label) in level.options() {
            self.console.show(&Formatter::format_option(token, label));
        }
    }

    async fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        logging::log_menu_dispatch(action.name());

        match action {
            MenuAction::CompilePrograms => self.toolkit.compiler.compile_programs(),
            MenuAction::EnterRunMode => self.enter_level(MenuLevel::RunMode).await,
            MenuAction::EnterUtilities => self.enter_level(MenuLevel::Utilities).await,
            MenuAction::RunInteractive => self.toolkit.runner.choose_program_to_run(),
            MenuAction::ReplayTrace => self.toolkit.tracer.run_execution_trace().await,
            MenuAction::GeneratePda => self.toolkit.pda.choose_program_for_derivation(),
        }
    }

    // Boxed so the submenu recursion run_level -> dispatch -> run_level
    // has a finite future type.
    fn enter_level<'b>(
        &'b mut self,
        level: MenuLevel,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + 'b>> {
        Box::pin(self.run_level(level))
    }
}
