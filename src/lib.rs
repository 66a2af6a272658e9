//! Status badges for chat tool invocations.
//!
//! A [`ToolInvocation`] snapshot (tool name, arguments, lifecycle state) maps
//! to a short status line such as "Viewing /App.jsx" or "Deleted /Old.jsx",
//! drawn by [`ToolInvocationBadge`] next to a spinner or a done dot.
pub mod badge;
pub mod config;
pub mod invocation;
pub mod logging;
pub mod message;
pub mod preview;
pub mod ui;

pub use badge::ToolInvocationBadge;
pub use config::BadgeConfig;
pub use invocation::{InvocationState, ToolArgs, ToolInvocation};
pub use message::{ToolFamily, tool_message};
