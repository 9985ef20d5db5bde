//! Text sigils and `EXPLODE` templates.
//!
//! Two pieces of SamBasic read the same little language inside literal
//! text: interpolation (which substitutes variables) and `EXPLODE` (which
//! binds them). Both agree on what a variable reference and an escape pair
//! look like; that agreement lives in [`syntax`]. [`Template`] turns a
//! template into an anchored regular expression plus the ordered list of
//! variables its capture groups bind.

pub mod syntax;
mod template;

pub use template::{Binding, Capture, Namespace, Template, TemplateError};
