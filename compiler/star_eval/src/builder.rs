//! `VmBuilder` for creating machines with non-default state.

use star_value::Namespace;

use crate::Vm;

/// Runtime switches for a [`Vm`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VmOptions {
    /// Keep locals after a run instead of clearing them at `End`.
    pub persistent_locals: bool,
    /// Initial operand-stack capacity.
    pub stack_capacity: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        VmOptions {
            persistent_locals: false,
            stack_capacity: 64,
        }
    }
}

/// Builder for [`Vm`].
///
/// ```ignore
/// let vm = Vm::builder()
///     .globals(globals)
///     .persistent_locals(true)
///     .build();
/// ```
#[derive(Default)]
pub struct VmBuilder {
    globals: Option<Namespace>,
    locals: Option<Namespace>,
    options: VmOptions,
}

impl VmBuilder {
    pub fn new() -> Self {
        VmBuilder::default()
    }

    #[must_use]
    pub fn globals(mut self, globals: Namespace) -> Self {
        self.globals = Some(globals);
        self
    }

    #[must_use]
    pub fn locals(mut self, locals: Namespace) -> Self {
        self.locals = Some(locals);
        self
    }

    #[must_use]
    pub fn persistent_locals(mut self, persistent: bool) -> Self {
        self.options.persistent_locals = persistent;
        self
    }

    #[must_use]
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.options.stack_capacity = capacity;
        self
    }

    #[must_use]
    pub fn options(mut self, options: VmOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Vm {
        Vm::from_parts(
            self.globals.unwrap_or_default(),
            self.locals,
            self.options,
        )
    }
}
