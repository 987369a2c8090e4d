//! Purpose: Internal JSON parsing boundary shared by the engine and the shells.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for parser configuration so callsites avoid ad hoc decode logic.
//! Invariants: Every JSON parse in the crate goes through this module.

pub(crate) mod parse;
