pub mod debug_logger;
pub mod probe;
pub mod report_renderer;
pub mod troubleshoot;

pub use debug_logger::{get_debug_logger, DebugLogger};
pub use report_renderer::ReportRenderer;
pub use troubleshoot::hints_for;
