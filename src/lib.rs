pub mod classify;
pub mod clicks;
pub mod config;
pub mod layout;
pub mod media;
pub mod model;
pub mod platforms;
pub mod plan;
pub mod render;
pub mod spinning_text;
pub mod validation;

// Re-export commonly used types for convenience.
pub use classify::{classify, RenderVariant};
pub use clicks::{ClickHook, ClickSink, Confirmation, Navigation};
pub use config::AppConfig;
pub use model::{Block, LayoutType, Profile};
pub use plan::{build_plan, build_plan_for, PlanOptions, RenderInstruction, RenderPlan};
pub use platforms::{detect_platform, Platform};
