use std::fmt;
use std::num::NonZeroU32;

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            #[inline]
            pub(crate) const fn from_raw(raw: NonZeroU32) -> Self {
                Self(raw)
            }

            /// Backend-specific name of the object. Never zero.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

gpu_handle!(
    /// Vertex buffer object.
    BufferId
);
gpu_handle!(
    /// Vertex array object (buffer + attribute layout).
    VertexArrayId
);
gpu_handle!(
    /// Compiled shader stage.
    ShaderId
);
gpu_handle!(
    /// Linked shader program.
    ProgramId
);

/// Hands out object names, starting at 1.
///
/// Names are shared across all handle kinds of one backend, so a stale handle of
/// one kind can never alias a live object of another.
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    last: u32,
}

impl HandleAllocator {
    pub(crate) fn allocate(&mut self) -> NonZeroU32 {
        self.last = self.last.wrapping_add(1);
        match NonZeroU32::new(self.last) {
            Some(raw) => raw,
            None => {
                self.last = 1;
                NonZeroU32::MIN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one() {
        let mut a = HandleAllocator::default();
        assert_eq!(a.allocate().get(), 1);
        assert_eq!(a.allocate().get(), 2);
    }

    #[test]
    fn allocator_skips_zero_on_wrap() {
        let mut a = HandleAllocator { last: u32::MAX };
        assert_eq!(a.allocate().get(), 1);
    }

    #[test]
    fn display_names_kind() {
        let id = ProgramId::from_raw(NonZeroU32::MIN);
        assert_eq!(id.to_string(), "ProgramId#1");
    }
}
