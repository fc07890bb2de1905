//! Report renderers for dashboard views.
//!
//! - [`terminal`] — colored tables with a summary box; respects `--verbose` / `--quiet`.
//!
//! JSON output serializes the view structs directly and needs no renderer.

pub mod terminal;
