// Command-line argument rendering: descriptors, registries, and the renderer.

mod argument;
mod registry;
mod value;

pub use argument::{Argument, Kind, Quote, QuoteChar};
pub use registry::{ArgList, ArgValues, render_args, render_argv};
pub use value::Value;
