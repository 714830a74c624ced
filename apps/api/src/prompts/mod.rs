// Prompt construction for every model call.
// All templates live in `templates`; `builder` is the only code that fills them.

pub mod builder;
pub mod schemas;
pub mod templates;
