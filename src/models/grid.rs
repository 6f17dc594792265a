use super::BitMatrix;

/// Tri-state view of one cell of a [`ModuleGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// Light data module
    Light,
    /// Dark data module
    Dark,
    /// Function pattern module (finder, timing, alignment, format/version
    /// info); never touched by data placement or masking
    Reserved {
        /// Colour of the function module
        dark: bool,
    },
}

impl Module {
    /// Whether the module is printed dark
    pub fn is_dark(self) -> bool {
        match self {
            Module::Dark => true,
            Module::Light => false,
            Module::Reserved { dark } => dark,
        }
    }
}

/// Square module grid: one plane for colour and one marking reserved
/// function modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleGrid {
    modules: BitMatrix,
    reserved: BitMatrix,
}

impl ModuleGrid {
    /// Create an all-light grid with no reserved modules
    pub fn new(size: usize) -> Self {
        Self {
            modules: BitMatrix::square(size),
            reserved: BitMatrix::square(size),
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether the module at (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Whether the module at (x, y) belongs to a function pattern
    pub fn is_reserved(&self, x: usize, y: usize) -> bool {
        self.reserved.get(x, y)
    }

    /// Tri-state view of the module at (x, y)
    pub fn module(&self, x: usize, y: usize) -> Module {
        let dark = self.modules.get(x, y);
        if self.reserved.get(x, y) {
            Module::Reserved { dark }
        } else if dark {
            Module::Dark
        } else {
            Module::Light
        }
    }

    /// Colour plane
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Function-pattern plane
    pub fn reserved(&self) -> &BitMatrix {
        &self.reserved
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.count_ones()
    }

    /// Set a function module and mark it reserved
    pub(crate) fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.reserved.set(x, y, true);
    }

    /// Set a data module; reserved cells are left untouched
    pub(crate) fn set_data(&mut self, x: usize, y: usize, dark: bool) {
        if !self.reserved.get(x, y) {
            self.modules.set(x, y, dark);
        }
    }

    /// Flip a data module; reserved cells are left untouched
    pub(crate) fn flip_data(&mut self, x: usize, y: usize) {
        if !self.reserved.get(x, y) {
            self.modules.toggle(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_cells_are_protected() {
        let mut grid = ModuleGrid::new(21);
        grid.set_function(0, 0, true);
        grid.set_data(0, 0, false);
        grid.flip_data(0, 0);
        assert_eq!(grid.module(0, 0), Module::Reserved { dark: true });

        grid.set_data(10, 10, true);
        assert_eq!(grid.module(10, 10), Module::Dark);
        grid.flip_data(10, 10);
        assert_eq!(grid.module(10, 10), Module::Light);
    }

    #[test]
    fn test_dark_count() {
        let mut grid = ModuleGrid::new(21);
        grid.set_function(1, 1, true);
        grid.set_data(2, 2, true);
        assert_eq!(grid.dark_count(), 2);
        assert!(Module::Reserved { dark: true }.is_dark());
    }
}
