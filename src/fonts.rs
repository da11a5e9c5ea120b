//! Font-registry collaborator.
//!
//! `%deffont` maps a logical font name to a physical font through an engine
//! spec. Actual font-file resolution lives outside the core; the interpreter
//! only routes definitions through this trait and fails the load when the
//! registry rejects one.

use crate::error::{Error, Result};

/// Maps logical font names to physical font resources.
pub trait FontRegistry {
    /// Register `name` as `engine_font` under the given engine.
    ///
    /// A registry that cannot resolve the font must return
    /// [`Error::FontResolution`]; an engine it does not speak is
    /// [`Error::FontEngine`]. Either failure is fatal to the load.
    fn define(&self, name: &str, engine: &str, engine_font: &str) -> Result<()>;
}

/// Registry that accepts any `xfont` definition without resolving it.
///
/// Useful when only the layout result matters, e.g. for the text and JSON
/// renderers. Engines other than `xfont` are still rejected, matching
/// MagicPoint's engine set.
#[derive(Debug, Default)]
pub struct AcceptAllFonts;

impl FontRegistry for AcceptAllFonts {
    fn define(&self, name: &str, engine: &str, engine_font: &str) -> Result<()> {
        if engine != "xfont" {
            return Err(Error::FontEngine(engine.to_string()));
        }
        log::debug!("registered font {:?} as xfont {:?}", name, engine_font);
        Ok(())
    }
}
