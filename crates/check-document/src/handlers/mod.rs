//! Format handlers

mod json;
mod yaml;

pub use self::json::JsonHandler;
pub use self::yaml::YamlHandler;

pub(crate) use self::json::canonical_value;

use crate::format::{Format, FormatHandler};

/// Pick the handler for a format
pub fn handler_for(format: Format) -> Box<dyn FormatHandler> {
    match format {
        Format::Yaml => Box::new(YamlHandler::new()),
        Format::Json => Box::new(JsonHandler::new()),
    }
}
