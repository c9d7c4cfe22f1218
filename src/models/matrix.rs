use super::Version;

/// State of a single module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Module {
    /// Not yet written
    #[default]
    Unset,
    /// Held for format/version information
    Reserved,
    /// Light (white) module
    Light,
    /// Dark (black) module
    Dark,
}

impl Module {
    /// Module for a color bit
    pub fn from_dark(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// True only for `Dark`
    pub fn is_dark(&self) -> bool {
        matches!(self, Module::Dark)
    }
}

/// Square grid of modules plus a map of function modules
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleMatrix {
    version: Version,
    size: usize,
    modules: Vec<Module>,
    function: Vec<bool>,
}

impl ModuleMatrix {
    /// Create an all-`Unset` matrix for `version`
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            modules: vec![Module::Unset; size * size],
            function: vec![false; size * size],
        }
    }

    /// Version the matrix was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get module at (x, y); out of bounds reads as `Light`
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.size || y >= self.size {
            return Module::Light;
        }
        self.modules[y * self.size + x]
    }

    /// True if (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_dark()
    }

    /// True if (x, y) belongs to a function pattern or reserved area
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.function[y * self.size + x]
    }

    /// Rows of modules, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Module]> {
        self.modules.chunks(self.size)
    }

    /// Count of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// Count of non-function modules
    pub fn data_modules_count(&self) -> usize {
        self.function.iter().filter(|&&f| !f).count()
    }

    /// First `Unset` or `Reserved` module in row-major order
    pub fn first_unfilled(&self) -> Option<(usize, usize)> {
        self.modules
            .iter()
            .position(|m| matches!(m, Module::Unset | Module::Reserved))
            .map(|i| (i % self.size, i / self.size))
    }

    /// Write a data module
    pub(crate) fn set(&mut self, x: usize, y: usize, module: Module) {
        if x >= self.size || y >= self.size {
            return;
        }
        self.modules[y * self.size + x] = module;
    }

    /// Write a function module
    pub(crate) fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        self.modules[index] = Module::from_dark(dark);
        self.function[index] = true;
    }

    /// Hold a function module for later format/version bits
    pub(crate) fn reserve(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        self.modules[index] = Module::Reserved;
        self.function[index] = true;
    }

    /// Flip a module between dark and light
    pub(crate) fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        let cell = &mut self.modules[y * self.size + x];
        *cell = match *cell {
            Module::Dark => Module::Light,
            Module::Light => Module::Dark,
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_matrix() {
        let mut matrix = ModuleMatrix::new(Version::new(1).unwrap());
        assert_eq!(matrix.size(), 21);
        assert_eq!(matrix.get(3, 4), Module::Unset);

        matrix.set(3, 4, Module::Dark);
        assert!(matrix.is_dark(3, 4));
        assert!(!matrix.is_function(3, 4));

        matrix.toggle(3, 4);
        assert_eq!(matrix.get(3, 4), Module::Light);

        matrix.set_function(0, 0, true);
        assert!(matrix.is_function(0, 0));
        assert_eq!(matrix.data_modules_count(), 21 * 21 - 1);
    }

    #[test]
    fn test_reserved_is_unfilled() {
        let mut matrix = ModuleMatrix::new(Version::new(1).unwrap());
        for y in 0..21 {
            for x in 0..21 {
                matrix.set(x, y, Module::Light);
            }
        }
        assert_eq!(matrix.first_unfilled(), None);
        matrix.reserve(5, 2);
        assert_eq!(matrix.first_unfilled(), Some((5, 2)));
        // toggling a reserved cell leaves it untouched
        matrix.toggle(5, 2);
        assert_eq!(matrix.get(5, 2), Module::Reserved);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = ModuleMatrix::new(Version::new(1).unwrap());
        matrix.set(30, 30, Module::Dark); // Should not panic
        assert!(!matrix.is_dark(30, 30));
        assert!(!matrix.is_function(30, 30));
    }
}
