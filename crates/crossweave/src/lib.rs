pub use crossweave_core as core;

#[cfg(feature = "dict")]
pub use crossweave_dict as dict;

#[cfg(feature = "generator")]
pub use crossweave_gen as generator;
