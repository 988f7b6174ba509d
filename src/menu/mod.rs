/// Interactive menu dispatcher for the workbench workflow
///
/// This module implements the nested, numbered menus that route operator
/// choices to the workbench collaborators: compile, interactive run,
/// automatic trace replay and PDA generation. The decision logic is a pure
/// transition table in [`state`]; console reads and writes go through the
/// thin [`console::Console`] adapter so the two can be tested apart.
pub mod console;
pub mod dispatcher;
pub mod state;

pub use console::{Console, RustylineConsole};
pub use dispatcher::MenuDispatcher;
pub use state::{MenuAction, MenuLevel, ReturnPolicy, Step};
