//! Pipeline stages and how each one treats store failures.

use std::fmt;

/// One ordered phase of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Delete every document in the target collections.
    Reset,
    /// Create categories.
    LoadCategories,
    /// Create customizations.
    LoadCustomizations,
    /// Create menu items and their customization links.
    LoadMenuItems,
}

/// What happens when a store call fails during a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Log a warning and carry on with the run.
    LocalLog,
    /// Abort the stage and, with it, the run.
    Propagate,
}

impl Stage {
    /// Name used as the log key for this stage.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::LoadCategories => "load-categories",
            Self::LoadCustomizations => "load-customizations",
            Self::LoadMenuItems => "load-menu-items",
        }
    }

    /// Failure policy for store calls made by this stage.
    ///
    /// Reset is best effort; a failed create while loading means the run
    /// cannot produce a trustworthy dataset.
    ///
    /// # Examples
    /// ```
    /// # use menuseed_core::{Recovery, Stage};
    /// assert_eq!(Stage::Reset.recovery(), Recovery::LocalLog);
    /// assert_eq!(Stage::LoadMenuItems.recovery(), Recovery::Propagate);
    /// ```
    #[must_use]
    pub const fn recovery(self) -> Recovery {
        match self {
            Self::Reset => Recovery::LocalLog,
            Self::LoadCategories | Self::LoadCustomizations | Self::LoadMenuItems => {
                Recovery::Propagate
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
