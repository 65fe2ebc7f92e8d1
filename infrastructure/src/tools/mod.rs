//! Tool implementations for the tutor handlers
//!
//! - `calculator`: closed-grammar arithmetic evaluation
//! - `getConstant`: physical constant lookup

pub mod calculator;
pub mod constant;

mod executor;
mod schema;

pub use executor::LocalToolExecutor;
pub use schema::JsonSchemaToolConverter;

use tutor_domain::tool::entities::ToolSpec;

/// Create the default tool specification with all available tools
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(calculator::calculator_definition())
        .register(constant::get_constant_definition())
}
